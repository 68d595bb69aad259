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

//! # Medley Core
//!
//! Foundational crate containing traits, core types, and interface contracts
//! that define the orchestrator's architecture.
//!
//! Everything the orchestrator consumes from the outside world — the
//! execution engine, rendering surfaces, audio sinks, input devices — is
//! expressed here as a capability trait. Concrete backends live in
//! `medley-infra`; the orchestration logic lives in `medley-host`.

#![warn(missing_docs)]

pub mod audio;
pub mod engine;
pub mod error;
pub mod input;
pub mod lifecycle;
pub mod platform;
pub mod project;
pub mod surface;

pub use engine::{EngineBinding, EngineEvent, EngineFactory};
pub use error::HostError;
pub use lifecycle::LifecycleState;
pub use platform::EnginePlatform;
pub use project::{ProjectId, ProjectRecord, ProjectSource};
