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

//! The suspension coordinator.
//!
//! While a single instance is promoted to an exclusive detail view, every
//! other instance releases its rendering surface (keeping identity and
//! engine state) so the total number of live rendering contexts stays
//! bounded. Closing the view reacquires surfaces for exactly the instances
//! that gave one up. Nothing else mutates the suspension flag.

use medley_core::error::HostError;
use medley_core::platform::EnginePlatform;
use medley_core::project::ProjectId;
use medley_core::surface::SurfaceSize;

use crate::config::HostConfig;
use crate::registry::InstanceRegistry;

/// Coordinates surface release/reacquisition around an exclusive view.
#[derive(Default)]
pub struct SuspensionCoordinator {
    exclusive: Option<ProjectId>,
    released: Vec<ProjectId>,
    detail_restore_size: Option<SurfaceSize>,
}

impl SuspensionCoordinator {
    /// Creates a coordinator with no view open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The project currently shown in an exclusive view, if any.
    #[must_use]
    pub fn exclusive(&self) -> Option<&ProjectId> {
        self.exclusive.as_ref()
    }

    /// Opens an exclusive view for `id`.
    ///
    /// Every other instance holding a surface releases it; the detailed
    /// instance keeps (or newly acquires) its own surface and is resized to
    /// the exclusive-view dimensions. Opening while a view is already open
    /// for another project closes that one first.
    pub fn open(
        &mut self,
        registry: &mut InstanceRegistry,
        platform: &EnginePlatform,
        config: &HostConfig,
        id: &ProjectId,
    ) -> Result<(), HostError> {
        if !registry.contains(id) {
            return Err(HostError::UnknownProject(id.clone()));
        }
        if self.exclusive.as_ref() == Some(id) {
            return Ok(());
        }
        if self.exclusive.is_some() {
            self.close(registry, platform);
        }

        let others: Vec<ProjectId> = registry.ids().filter(|other| *other != id).cloned().collect();
        for other in others {
            if let Some(controller) = registry.get_mut(&other) {
                if controller.release_surface() {
                    self.released.push(other);
                }
            }
        }

        if let Some(controller) = registry.get_mut(id) {
            self.detail_restore_size = Some(controller.last_surface_size());
            controller.reacquire_surface(platform);
            controller.resize_surface(config.exclusive_surface_size);
        }

        self.exclusive = Some(id.clone());
        log::info!("exclusive view opened for {id} ({} suspended)", self.released.len());
        Ok(())
    }

    /// Closes the exclusive view, restoring the detailed instance's
    /// previous dimensions and reacquiring surfaces for exactly the
    /// instances that released one on open.
    pub fn close(&mut self, registry: &mut InstanceRegistry, platform: &EnginePlatform) {
        let Some(id) = self.exclusive.take() else {
            return;
        };
        if let Some(controller) = registry.get_mut(&id) {
            if let Some(size) = self.detail_restore_size.take() {
                controller.resize_surface(size);
            }
        }
        self.detail_restore_size = None;
        for other in std::mem::take(&mut self.released) {
            if let Some(controller) = registry.get_mut(&other) {
                controller.reacquire_surface(platform);
            }
        }
        log::info!("exclusive view closed (was {id})");
    }

    /// Records that a freshly admitted instance was suspended to uphold the
    /// surface bound while a view is open.
    pub fn note_released(&mut self, id: ProjectId) {
        if !self.released.contains(&id) {
            self.released.push(id);
        }
    }

    /// Forgets a removed instance so a later close does not try to
    /// reacquire a surface for it.
    pub fn forget(&mut self, id: &ProjectId) {
        self.released.retain(|other| other != id);
    }

    /// Drops all suspension state without reacquiring anything. Used after
    /// a registry-wide clear, where every instance is already disposed.
    pub fn reset(&mut self) {
        self.exclusive = None;
        self.released.clear();
        self.detail_restore_size = None;
    }
}
