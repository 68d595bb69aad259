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

//! # Medley Host
//!
//! The multi-instance execution orchestrator. One [`ProjectHost`] owns a
//! registry of instance lifecycle controllers (one per loaded project),
//! enforces the admission limit, routes exclusive audio/input focus to a
//! single active instance, and coordinates surface suspension while a
//! detail view is open.
//!
//! All orchestration runs on a single logical thread: operations execute to
//! completion without blocking, and long-running engine work completes via
//! events applied by [`ProjectHost::pump_events`].

#![warn(missing_docs)]

pub mod admission;
pub mod config;
pub mod focus;
pub mod host;
pub mod instance;
pub mod registry;
pub mod suspension;

pub use admission::{AdmissionPolicy, DEFAULT_INSTANCE_LIMIT};
pub use config::HostConfig;
pub use host::ProjectHost;
pub use instance::InstanceController;
pub use registry::InstanceRegistry;
