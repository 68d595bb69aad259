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

//! A headless engine binding.
//!
//! Loads complete (or fail) according to the shared script, and every
//! signal is acknowledged on the event stream the way a real engine would:
//! asynchronously from the orchestrator's perspective, applied only when
//! the owning controller pumps.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use medley_core::audio::AudioSink;
use medley_core::engine::{EngineBinding, EngineEvent, EngineFactory};
use medley_core::input::InputBridge;
use medley_core::surface::RenderSurface;

use crate::input::KeyStateBridge;
use crate::probe::{ActionLog, EngineProbe, HeadlessScript};

/// Produces [`HeadlessBinding`]s and registers a probe for each.
pub struct HeadlessEngineFactory {
    script: Arc<Mutex<HeadlessScript>>,
    probes: Arc<Mutex<Vec<EngineProbe>>>,
    log: ActionLog,
    counter: AtomicUsize,
}

impl HeadlessEngineFactory {
    pub(crate) fn new(
        script: Arc<Mutex<HeadlessScript>>,
        probes: Arc<Mutex<Vec<EngineProbe>>>,
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

impl EngineFactory for HeadlessEngineFactory {
    fn create_binding(&self) -> Result<Box<dyn EngineBinding>> {
        if let Ok(script) = self.script.lock() {
            if let Some(message) = script.fail_create_binding.clone() {
                bail!(message);
            }
        }
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        let (sender, receiver) = flume::unbounded();
        let pressed = Arc::new(Mutex::new(Vec::new()));
        let disposed = Arc::new(AtomicBool::new(false));

        if let Ok(mut probes) = self.probes.lock() {
            probes.push(EngineProbe {
                sender: sender.clone(),
                disposed: disposed.clone(),
                pressed: pressed.clone(),
            });
        }
        self.log.record(format!("engine#{index}: created"));

        Ok(Box::new(HeadlessBinding {
            index,
            script: self.script.clone(),
            sender,
            receiver,
            input: KeyStateBridge::new(index, pressed, self.log.clone()),
            disposed,
            log: self.log.clone(),
        }))
    }
}

/// One headless engine instance.
pub struct HeadlessBinding {
    index: usize,
    script: Arc<Mutex<HeadlessScript>>,
    sender: flume::Sender<EngineEvent>,
    receiver: flume::Receiver<EngineEvent>,
    input: KeyStateBridge,
    disposed: Arc<AtomicBool>,
    log: ActionLog,
}

impl HeadlessBinding {
    fn emit(&self, event: EngineEvent) {
        // The receiver may already be gone when the owning instance has
        // unsubscribed; that is not an error for the engine.
        let _ = self.sender.send(event);
    }
}

impl EngineBinding for HeadlessBinding {
    fn attach_renderer(&mut self, surface: &dyn RenderSurface) {
        self.log.record(format!(
            "engine#{}: renderer attached ({})",
            self.index,
            surface.dimensions()
        ));
    }

    fn attach_audio(&mut self, _sink: &dyn AudioSink) {
        self.log
            .record(format!("engine#{}: audio attached", self.index));
    }

    fn load(&mut self, binary: &[u8]) {
        self.log.record(format!(
            "engine#{}: load requested ({} bytes)",
            self.index,
            binary.len()
        ));
        let (fail_load, defer_load) = match self.script.lock() {
            Ok(script) => (script.fail_load.clone(), script.defer_load),
            Err(_) => (None, false),
        };
        if let Some(message) = fail_load {
            self.emit(EngineEvent::LoadFailed { message });
        } else if !defer_load {
            self.emit(EngineEvent::Loaded);
        }
    }

    fn start(&mut self) {
        self.log.record(format!("engine#{}: start signal", self.index));
        let defer_start = self
            .script
            .lock()
            .map(|script| script.defer_start)
            .unwrap_or(false);
        if !defer_start {
            self.emit(EngineEvent::RunStarted);
        }
    }

    fn stop(&mut self) {
        self.log.record(format!("engine#{}: stop signal", self.index));
        self.emit(EngineEvent::RunStopped);
    }

    fn dispose(&mut self) -> Result<()> {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        self.log.record(format!("engine#{}: disposed", self.index));
        self.emit(EngineEvent::Disposed);
        Ok(())
    }

    fn events(&self) -> flume::Receiver<EngineEvent> {
        self.receiver.clone()
    }

    fn input(&self) -> &dyn InputBridge {
        &self.input
    }
}
