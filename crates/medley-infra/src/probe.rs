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

//! Observation and scripting hooks for the headless backends.

use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use medley_core::engine::EngineEvent;

/// A shared, ordered record of everything the headless backends did.
///
/// Entries are plain strings like `"sink#0: gain 0"`, appended in call
/// order, so tests can assert strict ordering between operations on
/// different resources.
#[derive(Clone, Default)]
pub struct ActionLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ActionLog {
    /// Appends an entry.
    pub fn record(&self, entry: impl Into<String>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.push(entry.into());
        }
    }

    /// Returns a copy of every entry recorded so far.
    #[must_use]
    pub fn snapshot(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Drains the log, returning the entries recorded so far.
    #[must_use]
    pub fn take(&self) -> Vec<String> {
        self.entries
            .lock()
            .map(|mut entries| std::mem::take(&mut *entries))
            .unwrap_or_default()
    }

    /// Index of the first entry equal to `needle`, if present.
    #[must_use]
    pub fn position(&self, needle: &str) -> Option<usize> {
        self.snapshot().iter().position(|entry| entry == needle)
    }
}

/// Behavior overrides shared by every headless factory and resource.
///
/// All fields persist until changed; tests set them before (or between)
/// orchestrator calls.
#[derive(Debug, Default)]
pub struct HeadlessScript {
    /// Fail the next (and subsequent) engine binding acquisitions.
    pub fail_create_binding: Option<String>,
    /// Fail surface acquisitions.
    pub fail_create_surface: Option<String>,
    /// Fail audio sink acquisitions.
    pub fail_create_sink: Option<String>,
    /// Answer every load request with `LoadFailed` carrying this message.
    pub fail_load: Option<String>,
    /// Do not emit `Loaded`; the test emits completions itself.
    pub defer_load: bool,
    /// Do not acknowledge start signals with `RunStarted`.
    pub defer_start: bool,
    /// Fail surface disposal with this message.
    pub fail_surface_dispose: Option<String>,
    /// Fail audio sink disposal with this message.
    pub fail_sink_dispose: Option<String>,
}

/// Observation handle for one headless engine binding, in creation order.
#[derive(Clone)]
pub struct EngineProbe {
    /// Sender feeding the binding's event stream; lets a test emit
    /// arbitrary engine events (late load completions, runtime errors).
    pub sender: flume::Sender<EngineEvent>,
    /// Set once the binding was disposed.
    pub disposed: Arc<AtomicBool>,
    /// Keys the binding's input bridge currently considers pressed.
    pub pressed: Arc<Mutex<Vec<String>>>,
}

/// Observation handle for one gain sink, in creation order.
#[derive(Clone)]
pub struct SinkProbe {
    /// The last gain set on the sink.
    pub gain: Arc<Mutex<f32>>,
    /// Set once the sink's output context was resumed.
    pub resumed: Arc<AtomicBool>,
}

/// Scripting and observation for a headless platform.
pub struct HeadlessHooks {
    script: Arc<Mutex<HeadlessScript>>,
    engines: Arc<Mutex<Vec<EngineProbe>>>,
    sinks: Arc<Mutex<Vec<SinkProbe>>>,
    /// The shared action log every backend records into.
    pub log: ActionLog,
}

impl HeadlessHooks {
    pub(crate) fn new(
        script: Arc<Mutex<HeadlessScript>>,
        engines: Arc<Mutex<Vec<EngineProbe>>>,
        sinks: Arc<Mutex<Vec<SinkProbe>>>,
        log: ActionLog,
    ) -> Self {
        Self {
            script,
            engines,
            sinks,
            log,
        }
    }

    /// Mutates the shared script.
    pub fn configure(&self, apply: impl FnOnce(&mut HeadlessScript)) {
        if let Ok(mut script) = self.script.lock() {
            apply(&mut script);
        }
    }

    /// Number of engine bindings created so far.
    #[must_use]
    pub fn engine_count(&self) -> usize {
        self.engines.lock().map(|probes| probes.len()).unwrap_or(0)
    }

    /// Probe for the `index`-th created engine binding.
    #[must_use]
    pub fn engine(&self, index: usize) -> Option<EngineProbe> {
        self.engines
            .lock()
            .ok()
            .and_then(|probes| probes.get(index).cloned())
    }

    /// Probe for the `index`-th created audio sink.
    #[must_use]
    pub fn sink(&self, index: usize) -> Option<SinkProbe> {
        self.sinks
            .lock()
            .ok()
            .and_then(|probes| probes.get(index).cloned())
    }

    /// Emits an event on the `index`-th engine binding's stream.
    ///
    /// Returns `false` if the binding does not exist or its receiver was
    /// dropped (i.e. the owning instance unsubscribed).
    pub fn emit(&self, index: usize, event: EngineEvent) -> bool {
        match self.engine(index) {
            Some(probe) => probe.sender.send(event).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_log_preserves_order() {
        let log = ActionLog::default();
        log.record("first");
        log.record("second");
        assert_eq!(log.position("first"), Some(0));
        assert_eq!(log.position("second"), Some(1));
        assert_eq!(log.take(), vec!["first".to_string(), "second".to_string()]);
        assert!(log.snapshot().is_empty());
    }
}
