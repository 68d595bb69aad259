// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The instance lifecycle controller.
//!
//! One controller exclusively owns one engine binding plus its attached
//! rendering surface and audio sink, and drives the per-instance state
//! machine. Engine events are applied by [`pump`](InstanceController::pump);
//! a generation counter captured at subscription time guards every
//! application, so events from a superseded or disposed binding are
//! discarded instead of mutating state they no longer own.

use medley_core::audio::{AudioSink, GAIN_FULL, GAIN_MUTED};
use medley_core::engine::{EngineBinding, EngineEvent};
use medley_core::error::{DisposalReport, HostError};
use medley_core::input::KeyEvent;
use medley_core::lifecycle::LifecycleState;
use medley_core::platform::EnginePlatform;
use medley_core::project::ProjectRecord;
use medley_core::surface::{RenderSurface, SurfaceSize};

/// Drives the lifecycle of one loaded project.
pub struct InstanceController {
    record: ProjectRecord,
    state: LifecycleState,
    has_focus: bool,
    auto_run: bool,
    binding: Option<Box<dyn EngineBinding>>,
    surface: Option<Box<dyn RenderSurface>>,
    audio: Option<Box<dyn AudioSink>>,
    events: Option<flume::Receiver<EngineEvent>>,
    /// Bumped whenever the underlying binding is superseded or released.
    generation: u64,
    /// The generation the current event subscription belongs to.
    event_generation: u64,
    surface_size: SurfaceSize,
    load_completed: bool,
    last_error: Option<String>,
}

impl InstanceController {
    /// Creates a controller in the `Created` state. No resources are
    /// acquired until [`initialize`](Self::initialize).
    #[must_use]
    pub fn new(record: ProjectRecord, surface_size: SurfaceSize, auto_run: bool) -> Self {
        Self {
            record,
            state: LifecycleState::Created,
            has_focus: false,
            auto_run,
            binding: None,
            surface: None,
            audio: None,
            events: None,
            generation: 0,
            event_generation: 0,
            surface_size,
            load_completed: false,
            last_error: None,
        }
    }

    /// The immutable record this instance executes.
    #[must_use]
    pub fn record(&self) -> &ProjectRecord {
        &self.record
    }

    /// The current lifecycle state.
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether this instance currently holds audio/input focus.
    #[must_use]
    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// The most recent failure reported against this instance, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Whether a rendering surface is currently acquired.
    #[must_use]
    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// Current surface dimensions, or `None` while the surface is released.
    #[must_use]
    pub fn surface_dimensions(&self) -> Option<SurfaceSize> {
        self.surface.as_ref().map(|s| s.dimensions())
    }

    /// The dimensions the surface had (or will have on reacquisition).
    #[must_use]
    pub fn last_surface_size(&self) -> SurfaceSize {
        self.surface_size
    }

    /// Acquires engine resources and begins loading the project binary.
    ///
    /// Transitions `Created → Loading`. Any acquisition failure releases
    /// whatever was acquired and leaves the instance in `Error`; load
    /// failures arrive later as events. Calling this on an instance that
    /// already holds a binding supersedes the in-flight work: the old
    /// binding is released and its late events are discarded.
    pub fn initialize(&mut self, platform: &EnginePlatform) {
        if self.state == LifecycleState::Disposed {
            log::warn!("{}: initialize called on a disposed instance", self.record.id);
            return;
        }
        if self.binding.is_some() || self.surface.is_some() || self.audio.is_some() {
            let report = self.release_resources();
            if !report.is_clean() {
                for failure in &report.failures {
                    log::warn!("{}: {failure}", self.record.id);
                }
            }
        }

        self.generation += 1;
        self.load_completed = false;
        self.last_error = None;
        self.state = LifecycleState::Loading;

        let mut binding = match platform.engines.create_binding() {
            Ok(binding) => binding,
            Err(err) => {
                self.fail_acquisition(format!("{err:#}"));
                return;
            }
        };
        let surface = match platform.surfaces.create_surface(self.surface_size) {
            Ok(surface) => surface,
            Err(err) => {
                self.dispose_binding_quietly(binding);
                self.fail_acquisition(format!("{err:#}"));
                return;
            }
        };
        let mut sink = match platform.audio.create_sink() {
            Ok(sink) => sink,
            Err(err) => {
                self.dispose_binding_quietly(binding);
                self.fail_acquisition(format!("{err:#}"));
                self.dispose_surface_quietly(surface);
                return;
            }
        };

        // Subscribe before issuing the load so no completion can be missed.
        self.event_generation = self.generation;
        self.events = Some(binding.events());

        binding.attach_renderer(surface.as_ref());
        binding.attach_audio(sink.as_ref());
        sink.set_gain(if self.has_focus { GAIN_FULL } else { GAIN_MUTED });

        binding.load(&self.record.binary);
        log::info!(
            "{}: loading {} bytes into a fresh engine binding",
            self.record.id,
            self.record.size
        );

        self.binding = Some(binding);
        self.surface = Some(surface);
        self.audio = Some(sink);
    }

    /// Issues a start signal.
    ///
    /// Valid only from `Ready` or `Running` once loading has completed; a
    /// no-op everywhere else. The transition to `Running` happens on the
    /// engine's `RunStarted` event, not optimistically.
    pub fn run(&mut self) {
        if !self.state.accepts_run() || !self.load_completed {
            log::trace!("{}: run ignored in state {}", self.record.id, self.state);
            return;
        }
        if let Some(binding) = self.binding.as_mut() {
            binding.start();
        }
    }

    /// Issues a stop signal and forces the transition back to `Ready`.
    ///
    /// The forced transition keeps `stop()` synchronous from the caller's
    /// perspective even if the engine is unresponsive; the engine's
    /// eventual `RunStopped` acknowledgement is absorbed as a no-op.
    pub fn stop(&mut self) {
        if !self.state.is_live() {
            return;
        }
        if let Some(binding) = self.binding.as_mut() {
            binding.stop();
        }
        // A still-loading instance has nothing to force back to Ready.
        if self.load_completed {
            self.state = LifecycleState::Ready;
        }
    }

    /// Grants or revokes audio output and keyboard input.
    ///
    /// Gain is toggled immediately. On losing focus, a release event is
    /// synthesized for every currently-pressed key so no stuck-key state
    /// leaks into the backgrounded instance.
    pub fn set_focus(&mut self, enabled: bool) {
        self.has_focus = enabled;
        if let Some(sink) = self.audio.as_mut() {
            sink.set_gain(if enabled { GAIN_FULL } else { GAIN_MUTED });
            if enabled {
                sink.resume();
            }
        }
        if !enabled {
            if let Some(binding) = self.binding.as_ref() {
                let input = binding.input();
                for key in input.pressed_keys() {
                    input.post_key_event(KeyEvent::up(key));
                }
            }
        }
    }

    /// Forwards a key event to the engine. Only the focused instance
    /// receives input; everyone else drops it.
    pub fn post_key(&self, event: KeyEvent) {
        if !self.has_focus {
            return;
        }
        if let Some(binding) = self.binding.as_ref() {
            binding.input().post_key_event(event);
        }
    }

    /// Releases the rendering surface while keeping the engine binding and
    /// its in-memory project state alive.
    ///
    /// Returns `true` if a surface was actually held. The dimensions are
    /// remembered for [`reacquire_surface`](Self::reacquire_surface).
    pub fn release_surface(&mut self) -> bool {
        let Some(mut surface) = self.surface.take() else {
            return false;
        };
        self.surface_size = surface.dimensions();
        if let Err(err) = surface.dispose() {
            log::warn!("{}: surface release failed: {err:#}", self.record.id);
        }
        true
    }

    /// Creates a fresh surface at the last-known dimensions and re-attaches
    /// it to the engine. A no-op if a surface is already held or the
    /// binding is gone.
    pub fn reacquire_surface(&mut self, platform: &EnginePlatform) {
        if self.surface.is_some() {
            return;
        }
        let Some(binding) = self.binding.as_mut() else {
            return;
        };
        match platform.surfaces.create_surface(self.surface_size) {
            Ok(surface) => {
                binding.attach_renderer(surface.as_ref());
                self.surface = Some(surface);
            }
            Err(err) => {
                self.fail_acquisition(format!("{err:#}"));
            }
        }
    }

    /// Resizes the held surface, or just records the dimensions for the
    /// next reacquisition if the surface is currently released.
    pub fn resize_surface(&mut self, size: SurfaceSize) {
        if let Some(surface) = self.surface.as_mut() {
            surface.resize(size);
        }
        self.surface_size = size;
    }

    /// Releases every owned resource and transitions to `Disposed`.
    ///
    /// Idempotent. The event subscription is dropped first so a teardown-
    /// triggered event cannot re-enter the controller; then the audio sink,
    /// rendering surface, and engine binding are released, in that order.
    /// Release failures are collected in the report, never raised.
    pub fn dispose(&mut self) -> DisposalReport {
        if self.state == LifecycleState::Disposed {
            return DisposalReport::default();
        }
        let report = self.release_resources();
        self.has_focus = false;
        self.state = LifecycleState::Disposed;
        log::info!("{}: disposed", self.record.id);
        report
    }

    /// Applies every pending engine event to the state machine.
    pub fn pump(&mut self) {
        let Some(receiver) = self.events.clone() else {
            return;
        };
        let generation = self.event_generation;
        while let Ok(event) = receiver.try_recv() {
            self.apply_event(generation, event);
        }
    }

    fn apply_event(&mut self, generation: u64, event: EngineEvent) {
        if generation != self.generation || self.state == LifecycleState::Disposed {
            log::trace!(
                "{}: stale engine event {event:?} ignored",
                self.record.id
            );
            return;
        }
        match event {
            EngineEvent::Loaded => {
                if self.state != LifecycleState::Loading {
                    log::trace!(
                        "{}: load completion ignored in state {}",
                        self.record.id,
                        self.state
                    );
                    return;
                }
                self.load_completed = true;
                if self.auto_run {
                    if let Some(binding) = self.binding.as_mut() {
                        binding.start();
                    }
                    self.state = LifecycleState::Running;
                } else {
                    self.state = LifecycleState::Ready;
                }
                log::info!("{}: project loaded ({})", self.record.id, self.state);
            }
            EngineEvent::LoadFailed { message } => {
                if self.state != LifecycleState::Loading {
                    return;
                }
                let error = HostError::ProjectLoad(message);
                log::warn!("{}: {error}", self.record.id);
                self.last_error = Some(error.to_string());
                self.state = LifecycleState::Error;
            }
            EngineEvent::RunStarted => {
                if self.load_completed && self.state.accepts_run() {
                    self.state = LifecycleState::Running;
                }
            }
            EngineEvent::RunStopped | EngineEvent::Disposed => {
                if self.state == LifecycleState::Running {
                    self.state = LifecycleState::Ready;
                }
            }
            EngineEvent::RuntimeError { message } => {
                // Post-load failures are reported but never force disposal.
                log::warn!("{}: engine runtime error: {message}", self.record.id);
                self.last_error = Some(message);
            }
        }
    }

    /// Releases sink, surface, and binding (in that order) and invalidates
    /// the event subscription. Leaves the lifecycle state untouched.
    fn release_resources(&mut self) -> DisposalReport {
        let mut report = DisposalReport::default();

        // Unsubscribe before releasing anything so teardown events from the
        // resources themselves cannot re-enter the state machine.
        self.generation += 1;
        self.events = None;

        if let Some(mut sink) = self.audio.take() {
            if let Err(err) = sink.dispose() {
                report.record("audio sink", format!("{err:#}"));
            }
        }
        if let Some(mut surface) = self.surface.take() {
            self.surface_size = surface.dimensions();
            if let Err(err) = surface.dispose() {
                report.record("surface", format!("{err:#}"));
            }
        }
        if let Some(mut binding) = self.binding.take() {
            binding.stop();
            if let Err(err) = binding.dispose() {
                report.record("engine binding", format!("{err:#}"));
            }
        }
        self.load_completed = false;
        report
    }

    fn fail_acquisition(&mut self, message: String) {
        let error = HostError::EngineAcquisition(message);
        log::warn!("{}: {error}", self.record.id);
        self.last_error = Some(error.to_string());
        self.state = LifecycleState::Error;
        self.events = None;
    }

    fn dispose_surface_quietly(&mut self, mut surface: Box<dyn RenderSurface>) {
        if let Err(err) = surface.dispose() {
            log::warn!(
                "{}: surface release after failed acquisition also failed: {err:#}",
                self.record.id
            );
        }
    }

    fn dispose_binding_quietly(&mut self, mut binding: Box<dyn EngineBinding>) {
        if let Err(err) = binding.dispose() {
            log::warn!(
                "{}: binding release after failed acquisition also failed: {err:#}",
                self.record.id
            );
        }
    }
}
