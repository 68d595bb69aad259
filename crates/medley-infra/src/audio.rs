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

//! A gain-tracking audio sink with no audible output.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use medley_core::audio::{AudioSink, AudioSinkFactory, GAIN_FULL};

use crate::probe::{ActionLog, HeadlessScript, SinkProbe};

/// Produces [`GainSink`]s and registers a probe for each.
pub struct GainSinkFactory {
    script: Arc<Mutex<HeadlessScript>>,
    probes: Arc<Mutex<Vec<SinkProbe>>>,
    log: ActionLog,
    counter: AtomicUsize,
}

impl GainSinkFactory {
    pub(crate) fn new(
        script: Arc<Mutex<HeadlessScript>>,
        probes: Arc<Mutex<Vec<SinkProbe>>>,
        log: ActionLog,
    ) -> Self {
        Self {
            script,
            probes,
            log,
            counter: AtomicUsize::new(0),
        }
    }
}

impl AudioSinkFactory for GainSinkFactory {
    fn create_sink(&self) -> Result<Box<dyn AudioSink>> {
        if let Ok(script) = self.script.lock() {
            if let Some(message) = script.fail_create_sink.clone() {
                bail!(message);
            }
        }
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        let gain = Arc::new(Mutex::new(GAIN_FULL));
        let resumed = Arc::new(AtomicBool::new(false));

        if let Ok(mut probes) = self.probes.lock() {
            probes.push(SinkProbe {
                gain: gain.clone(),
                resumed: resumed.clone(),
            });
        }
        self.log.record(format!("sink#{index}: created"));

        Ok(Box::new(GainSink {
            index,
            gain,
            resumed,
            disposed: false,
            script: self.script.clone(),
            log: self.log.clone(),
        }))
    }
}

/// An audio sink that remembers its gain and resume state.
pub struct GainSink {
    index: usize,
    gain: Arc<Mutex<f32>>,
    resumed: Arc<AtomicBool>,
    disposed: bool,
    script: Arc<Mutex<HeadlessScript>>,
    log: ActionLog,
}

impl AudioSink for GainSink {
    fn set_gain(&mut self, gain: f32) {
        if let Ok(mut current) = self.gain.lock() {
            *current = gain;
        }
        self.log
            .record(format!("sink#{}: gain {gain}", self.index));
    }

    fn gain(&self) -> f32 {
        self.gain.lock().map(|gain| *gain).unwrap_or(0.0)
    }

    fn resume(&mut self) {
        self.resumed.store(true, Ordering::SeqCst);
        self.log.record(format!("sink#{}: resumed", self.index));
    }

    fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        if let Ok(script) = self.script.lock() {
            if let Some(message) = script.fail_sink_dispose.clone() {
                bail!(message);
            }
        }
        self.log.record(format!("sink#{}: disposed", self.index));
        Ok(())
    }
}
