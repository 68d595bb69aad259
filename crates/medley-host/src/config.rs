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

//! Host configuration.

use medley_core::surface::SurfaceSize;
use serde::{Deserialize, Serialize};

use crate::admission::DEFAULT_INSTANCE_LIMIT;

/// Dimensions of a preview surface in the project list (240x180).
pub const PREVIEW_SURFACE_SIZE: SurfaceSize = SurfaceSize::new(240, 180);

/// Dimensions of the enlarged surface in an exclusive detail view (320x240).
pub const EXCLUSIVE_SURFACE_SIZE: SurfaceSize = SurfaceSize::new(320, 240);

/// Configuration for a [`ProjectHost`](crate::ProjectHost).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Maximum number of concurrently live instances. Defaults to the known
    /// host ceiling on concurrently live rendering contexts.
    pub admission_limit: usize,
    /// Bypasses the admission limit. An explicit opt-in the caller sets
    /// after reconfiguring the host environment; the orchestrator trusts
    /// the flag and does not verify it.
    pub admission_override: bool,
    /// Starts each instance as soon as its project finishes loading.
    pub auto_run: bool,
    /// Dimensions of newly acquired preview surfaces.
    pub surface_size: SurfaceSize,
    /// Dimensions of the detailed instance's surface while an exclusive
    /// view is open.
    pub exclusive_surface_size: SurfaceSize,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            admission_limit: DEFAULT_INSTANCE_LIMIT,
            admission_override: false,
            auto_run: false,
            surface_size: PREVIEW_SURFACE_SIZE,
            exclusive_surface_size: EXCLUSIVE_SURFACE_SIZE,
        }
    }
}
