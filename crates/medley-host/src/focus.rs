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

//! The focus router: single authoritative holder of the focus token.
//!
//! At most one instance has audio output and keyboard input enabled at any
//! time. Nothing else mutates the token; every other component only reads
//! it through [`focused`](FocusRouter::focused).

use medley_core::error::HostError;
use medley_core::project::ProjectId;

use crate::registry::InstanceRegistry;

/// Routes exclusive audio/input focus between instances.
#[derive(Default)]
pub struct FocusRouter {
    token: Option<ProjectId>,
}

impl FocusRouter {
    /// Creates a router holding no token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The instance currently holding focus, if any.
    #[must_use]
    pub fn focused(&self) -> Option<&ProjectId> {
        self.token.as_ref()
    }

    /// Moves focus to `id`.
    ///
    /// The current holder is unfocused strictly before the target is
    /// focused, so no two instances are simultaneously focused even
    /// transiently. Re-requesting the current holder is a no-op.
    pub fn request_focus(
        &mut self,
        registry: &mut InstanceRegistry,
        id: &ProjectId,
    ) -> Result<(), HostError> {
        if !registry.contains(id) {
            return Err(HostError::UnknownProject(id.clone()));
        }
        if self.token.as_ref() == Some(id) {
            return Ok(());
        }
        if let Some(current) = self.token.take() {
            if let Some(controller) = registry.get_mut(&current) {
                controller.set_focus(false);
            }
        }
        if let Some(controller) = registry.get_mut(id) {
            controller.set_focus(true);
        }
        self.token = Some(id.clone());
        log::debug!("focus granted to {id}");
        Ok(())
    }

    /// Unfocuses the current holder (if any) and clears the token.
    pub fn clear_focus(&mut self, registry: &mut InstanceRegistry) {
        if let Some(current) = self.token.take() {
            if let Some(controller) = registry.get_mut(&current) {
                controller.set_focus(false);
            }
            log::debug!("focus cleared (was {current})");
        }
    }

    /// Drops the token if `id` holds it, without invoking callbacks.
    ///
    /// Used when the holder is being removed from the registry: its
    /// disposal already tears the audio path down, and focus is never
    /// re-assigned automatically.
    pub fn forget(&mut self, id: &ProjectId) {
        if self.token.as_ref() == Some(id) {
            self.token = None;
        }
    }

    /// Drops the token unconditionally, without invoking callbacks.
    pub fn reset(&mut self) {
        self.token = None;
    }
}
