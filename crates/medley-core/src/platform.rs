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

//! The bundle of external factories the orchestrator is constructed with.

use crate::audio::AudioSinkFactory;
use crate::engine::EngineFactory;
use crate::surface::SurfaceFactory;

/// Concrete backends for everything the orchestrator consumes.
///
/// The host owns exactly one platform; every instance acquires its binding,
/// surface, and sink through it. Infrastructure crates provide the concrete
/// factories without the host depending on them.
pub struct EnginePlatform {
    /// Produces execution-engine bindings.
    pub engines: Box<dyn EngineFactory>,
    /// Produces rendering surfaces.
    pub surfaces: Box<dyn SurfaceFactory>,
    /// Produces audio sinks.
    pub audio: Box<dyn AudioSinkFactory>,
}

impl EnginePlatform {
    /// Bundles the three factories into a platform.
    #[must_use]
    pub fn new(
        engines: Box<dyn EngineFactory>,
        surfaces: Box<dyn SurfaceFactory>,
        audio: Box<dyn AudioSinkFactory>,
    ) -> Self {
        Self {
            engines,
            surfaces,
            audio,
        }
    }
}
