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

//! An offscreen rendering surface that only tracks its dimensions.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use medley_core::surface::{RenderSurface, SurfaceFactory, SurfaceSize};

use crate::probe::{ActionLog, HeadlessScript};

/// Produces [`OffscreenSurface`]s.
pub struct OffscreenSurfaceFactory {
    script: Arc<Mutex<HeadlessScript>>,
    log: ActionLog,
    counter: AtomicUsize,
}

impl OffscreenSurfaceFactory {
    pub(crate) fn new(script: Arc<Mutex<HeadlessScript>>, log: ActionLog) -> Self {
        Self {
            script,
            log,
            counter: AtomicUsize::new(0),
        }
    }
}

impl SurfaceFactory for OffscreenSurfaceFactory {
    fn create_surface(&self, size: SurfaceSize) -> Result<Box<dyn RenderSurface>> {
        if let Ok(script) = self.script.lock() {
            if let Some(message) = script.fail_create_surface.clone() {
                bail!(message);
            }
        }
        let index = self.counter.fetch_add(1, Ordering::SeqCst);
        self.log.record(format!("surface#{index}: created {size}"));
        Ok(Box::new(OffscreenSurface {
            index,
            size,
            disposed: false,
            script: self.script.clone(),
            log: self.log.clone(),
        }))
    }
}

/// A rendering surface with no pixels behind it.
pub struct OffscreenSurface {
    index: usize,
    size: SurfaceSize,
    disposed: bool,
    script: Arc<Mutex<HeadlessScript>>,
    log: ActionLog,
}

impl RenderSurface for OffscreenSurface {
    fn resize(&mut self, size: SurfaceSize) {
        self.size = size;
        self.log
            .record(format!("surface#{}: resized to {size}", self.index));
    }

    fn dimensions(&self) -> SurfaceSize {
        self.size
    }

    fn dispose(&mut self) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;
        if let Ok(script) = self.script.lock() {
            if let Some(message) = script.fail_surface_dispose.clone() {
                bail!(message);
            }
        }
        self.log.record(format!("surface#{}: disposed", self.index));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_resize_dispose() {
        let factory = OffscreenSurfaceFactory::new(
            Arc::new(Mutex::new(HeadlessScript::default())),
            ActionLog::default(),
        );
        let mut surface = factory.create_surface(SurfaceSize::new(240, 180)).unwrap();
        assert_eq!(surface.dimensions(), SurfaceSize::new(240, 180));

        surface.resize(SurfaceSize::new(320, 240));
        assert_eq!(surface.dimensions(), SurfaceSize::new(320, 240));

        surface.dispose().unwrap();
        surface.dispose().unwrap();
    }

    #[test]
    fn scripted_dispose_failure_is_reported() {
        let factory = OffscreenSurfaceFactory::new(
            Arc::new(Mutex::new(HeadlessScript {
                fail_surface_dispose: Some("context already lost".to_string()),
                ..Default::default()
            })),
            ActionLog::default(),
        );
        let mut surface = factory.create_surface(SurfaceSize::default()).unwrap();
        let err = surface.dispose().unwrap_err();
        assert_eq!(err.to_string(), "context already lost");
    }
}
