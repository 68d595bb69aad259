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

//! The abstract contract for an execution-engine binding.
//!
//! The orchestrator never depends on a concrete engine. Anything that can
//! attach a renderer and an audio sink, load an opaque project binary, and
//! report progress through an event stream satisfies [`EngineBinding`]
//! structurally.

use anyhow::Result;

use crate::audio::AudioSink;
use crate::input::InputBridge;
use crate::surface::RenderSurface;

/// An event emitted by an engine binding on its event stream.
///
/// Long-running engine work (project loading, start/stop acknowledgement)
/// completes through these events rather than blocking the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The project binary finished loading and the engine is ready to run.
    Loaded,
    /// The project binary could not be loaded.
    LoadFailed {
        /// Human-readable failure description from the engine.
        message: String,
    },
    /// The engine acknowledged a start signal and is now executing.
    RunStarted,
    /// The engine acknowledged a stop signal (or ran to completion).
    RunStopped,
    /// The engine hit a failure after a successful load. Reported, but the
    /// instance remains usable.
    RuntimeError {
        /// Human-readable failure description from the engine.
        message: String,
    },
    /// The engine released its internal runtime.
    Disposed,
}

/// The capability set of one live execution-engine instance.
///
/// A binding is exclusively owned by one instance lifecycle controller. The
/// controller subscribes to [`events`](EngineBinding::events) exactly once
/// at acquisition time and keeps that subscription for the binding's life.
pub trait EngineBinding: Send {
    /// Attaches the rendering surface the engine draws to.
    fn attach_renderer(&mut self, surface: &dyn RenderSurface);

    /// Attaches the audio sink the engine plays through.
    fn attach_audio(&mut self, sink: &dyn AudioSink);

    /// Begins loading an opaque project binary.
    ///
    /// Completion is reported asynchronously as [`EngineEvent::Loaded`] or
    /// [`EngineEvent::LoadFailed`] on the event stream; this call itself
    /// never blocks.
    fn load(&mut self, binary: &[u8]);

    /// Issues a start signal. The engine acknowledges with
    /// [`EngineEvent::RunStarted`].
    fn start(&mut self);

    /// Issues a stop signal. The engine acknowledges with
    /// [`EngineEvent::RunStopped`], but callers must not depend on the
    /// acknowledgement arriving (the engine may be unresponsive).
    fn stop(&mut self);

    /// Releases the engine's internal runtime. Idempotent.
    ///
    /// Failures are reported to the caller so a disposal sweep can collect
    /// them without aborting.
    fn dispose(&mut self) -> Result<()>;

    /// Returns a receiver for the binding's event stream.
    fn events(&self) -> flume::Receiver<EngineEvent>;

    /// Returns the engine's input device bridge (keyboard state).
    fn input(&self) -> &dyn InputBridge;
}

/// Produces fresh engine bindings.
pub trait EngineFactory: Send {
    /// Creates a new, unloaded engine binding.
    fn create_binding(&self) -> Result<Box<dyn EngineBinding>>;
}
