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

//! # Medley Infra
//!
//! Concrete implementations of the `medley-core` capability traits for
//! headless operation: an engine binding that acknowledges every signal on
//! its event stream, an offscreen rendering surface, a gain-tracking audio
//! sink, and a key-state input bridge.
//!
//! The backends are scriptable: a shared [`HeadlessScript`] injects
//! acquisition, load, and disposal failures, or defers event emission so a
//! test can interleave completions with orchestrator calls. The
//! [`HeadlessHooks`] handle returned next to the platform observes
//! everything the backends did.

#![warn(missing_docs)]

pub mod audio;
pub mod engine;
pub mod input;
pub mod probe;
pub mod surface;

use std::sync::{Arc, Mutex};

use medley_core::platform::EnginePlatform;

use crate::audio::GainSinkFactory;
use crate::engine::HeadlessEngineFactory;
use crate::probe::{ActionLog, HeadlessHooks, HeadlessScript};
use crate::surface::OffscreenSurfaceFactory;

pub use probe::{EngineProbe, SinkProbe};

/// Builds a fully headless platform plus the hooks observing it.
#[must_use]
pub fn headless_platform() -> (EnginePlatform, HeadlessHooks) {
    let log = ActionLog::default();
    let script = Arc::new(Mutex::new(HeadlessScript::default()));
    let engines = Arc::new(Mutex::new(Vec::new()));
    let sinks = Arc::new(Mutex::new(Vec::new()));

    let platform = EnginePlatform::new(
        Box::new(HeadlessEngineFactory::new(
            script.clone(),
            engines.clone(),
            log.clone(),
        )),
        Box::new(OffscreenSurfaceFactory::new(script.clone(), log.clone())),
        Box::new(GainSinkFactory::new(
            script.clone(),
            sinks.clone(),
            log.clone(),
        )),
    );

    let hooks = HeadlessHooks::new(script, engines, sinks, log);
    (platform, hooks)
}
