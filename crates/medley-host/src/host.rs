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

//! The host facade tying the registry, focus router, and suspension
//! coordinator together behind the bulk control surface.

use medley_core::error::{DisposalReport, HostError};
use medley_core::input::KeyEvent;
use medley_core::lifecycle::LifecycleState;
use medley_core::platform::EnginePlatform;
use medley_core::project::{ProjectId, ProjectRecord, ProjectSource};
use medley_core::surface::SurfaceSize;

use crate::admission::AdmissionPolicy;
use crate::config::HostConfig;
use crate::focus::FocusRouter;
use crate::registry::InstanceRegistry;
use crate::suspension::SuspensionCoordinator;

/// Orchestrates every loaded project: ingestion, lifecycle, focus, and
/// suspension.
///
/// All operations execute to completion without blocking; engine-side
/// completions are applied by [`pump_events`](Self::pump_events).
pub struct ProjectHost {
    config: HostConfig,
    policy: AdmissionPolicy,
    platform: EnginePlatform,
    registry: InstanceRegistry,
    focus: FocusRouter,
    suspension: SuspensionCoordinator,
}

impl ProjectHost {
    /// Creates a host over the given platform backends.
    #[must_use]
    pub fn new(platform: EnginePlatform, config: HostConfig) -> Self {
        let policy = AdmissionPolicy {
            limit: config.admission_limit,
            override_enabled: config.admission_override,
        };
        Self {
            config,
            policy,
            platform,
            registry: InstanceRegistry::new(),
            focus: FocusRouter::new(),
            suspension: SuspensionCoordinator::new(),
        }
    }

    /// Enables or disables the admission override at runtime.
    ///
    /// The caller asserts the host environment was reconfigured to raise
    /// its rendering-context ceiling; the flag is trusted, not verified.
    pub fn set_admission_override(&mut self, enabled: bool) {
        self.policy.override_enabled = enabled;
    }

    /// Ingests a batch of project sources.
    ///
    /// Either the whole batch is admitted (one instance per source, in
    /// input order) or the whole batch is rejected with
    /// [`HostError::AdmissionLimitExceeded`] and zero side effects. The
    /// first newly admitted project receives focus only if no instance
    /// currently holds it.
    pub fn submit_batch(
        &mut self,
        sources: Vec<ProjectSource>,
    ) -> Result<Vec<ProjectRecord>, HostError> {
        let admitted =
            self.registry
                .submit_batch(&self.policy, &self.platform, &self.config, sources)?;

        // While an exclusive view is open, newcomers join suspended so the
        // rendering-context bound holds.
        if let Some(exclusive) = self.suspension.exclusive().cloned() {
            for record in &admitted {
                if record.id == exclusive {
                    continue;
                }
                if let Some(controller) = self.registry.get_mut(&record.id) {
                    if controller.release_surface() {
                        self.suspension.note_released(record.id.clone());
                    }
                }
            }
        }

        if self.focus.focused().is_none() {
            if let Some(first) = admitted.first() {
                let _ = self.focus.request_focus(&mut self.registry, &first.id);
            }
        }
        Ok(admitted)
    }

    /// Disposes and removes one instance.
    ///
    /// If it held focus, the token is cleared with no automatic
    /// re-assignment. If it was the exclusively viewed instance, the view
    /// closes first so suspended instances reacquire their surfaces.
    pub fn remove(&mut self, id: &ProjectId) -> Result<DisposalReport, HostError> {
        if self.suspension.exclusive() == Some(id) {
            self.suspension.close(&mut self.registry, &self.platform);
        }
        self.suspension.forget(id);
        self.focus.forget(id);
        self.registry.remove(id)
    }

    /// Disposes every instance and empties the registry.
    ///
    /// Disposal failures are collected into the returned report; the sweep
    /// always completes. The focus token and suspension flag are cleared.
    pub fn clear(&mut self) -> DisposalReport {
        self.focus.reset();
        self.suspension.reset();
        self.registry.clear()
    }

    /// Issues a start signal to every live instance.
    pub fn run_all(&mut self) {
        self.registry.run_all();
    }

    /// Issues a stop signal to every live instance.
    pub fn stop_all(&mut self) {
        self.registry.stop_all();
    }

    /// Issues a start signal to one instance.
    pub fn run(&mut self, id: &ProjectId) -> Result<(), HostError> {
        self.registry
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownProject(id.clone()))?
            .run();
        Ok(())
    }

    /// Issues a stop signal to one instance.
    pub fn stop(&mut self, id: &ProjectId) -> Result<(), HostError> {
        self.registry
            .get_mut(id)
            .ok_or_else(|| HostError::UnknownProject(id.clone()))?
            .stop();
        Ok(())
    }

    /// Routes exclusive audio/input focus to `id`.
    pub fn request_focus(&mut self, id: &ProjectId) -> Result<(), HostError> {
        self.focus.request_focus(&mut self.registry, id)
    }

    /// Unfocuses the current holder, leaving no instance focused.
    pub fn clear_focus(&mut self) {
        self.focus.clear_focus(&mut self.registry);
    }

    /// Opens an exclusive detail view for `id`, suspending every other
    /// instance's rendering surface.
    pub fn open_exclusive_view(&mut self, id: &ProjectId) -> Result<(), HostError> {
        self.suspension
            .open(&mut self.registry, &self.platform, &self.config, id)
    }

    /// Closes the exclusive view and reacquires the suspended surfaces.
    pub fn close_exclusive_view(&mut self) {
        self.suspension.close(&mut self.registry, &self.platform);
    }

    /// Delivers a key event to the focused instance, if any.
    pub fn post_key(&self, event: KeyEvent) {
        if let Some(id) = self.focus.focused() {
            if let Some(controller) = self.registry.get(id) {
                controller.post_key(event);
            }
        }
    }

    /// Applies pending engine events across all instances.
    pub fn pump_events(&mut self) {
        self.registry.pump_all();
    }

    /// Number of registered instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns `true` if no instances are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Project ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &ProjectId> {
        self.registry.ids()
    }

    /// The record for `id`, if registered.
    #[must_use]
    pub fn record(&self, id: &ProjectId) -> Option<&ProjectRecord> {
        self.registry.get(id).map(|controller| controller.record())
    }

    /// The lifecycle state of `id`, if registered.
    #[must_use]
    pub fn state_of(&self, id: &ProjectId) -> Option<LifecycleState> {
        self.registry.get(id).map(|controller| controller.state())
    }

    /// The most recent failure reported against `id`, if any.
    #[must_use]
    pub fn last_error_of(&self, id: &ProjectId) -> Option<String> {
        self.registry
            .get(id)
            .and_then(|controller| controller.last_error().map(str::to_owned))
    }

    /// Current surface dimensions of `id`, or `None` while its surface is
    /// released (or it never acquired one).
    #[must_use]
    pub fn surface_dimensions(&self, id: &ProjectId) -> Option<SurfaceSize> {
        self.registry
            .get(id)
            .and_then(|controller| controller.surface_dimensions())
    }

    /// The instance currently holding focus, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&ProjectId> {
        self.focus.focused()
    }

    /// The project shown in an exclusive view, if one is open.
    #[must_use]
    pub fn exclusive_view(&self) -> Option<&ProjectId> {
        self.suspension.exclusive()
    }
}
