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

//! A key-state input bridge tracking the pressed set.

use std::sync::{Arc, Mutex};

use medley_core::input::{InputBridge, KeyEvent};

use crate::probe::ActionLog;

/// The headless engine's keyboard device.
///
/// Press events add to the pressed set, release events remove from it, and
/// every delivery is recorded in the action log.
pub struct KeyStateBridge {
    index: usize,
    pressed: Arc<Mutex<Vec<String>>>,
    log: ActionLog,
}

impl KeyStateBridge {
    pub(crate) fn new(index: usize, pressed: Arc<Mutex<Vec<String>>>, log: ActionLog) -> Self {
        Self {
            index,
            pressed,
            log,
        }
    }
}

impl InputBridge for KeyStateBridge {
    fn post_key_event(&self, event: KeyEvent) {
        if let Ok(mut pressed) = self.pressed.lock() {
            if event.is_down {
                if !pressed.contains(&event.key) {
                    pressed.push(event.key.clone());
                }
            } else {
                pressed.retain(|key| key != &event.key);
            }
        }
        self.log.record(format!(
            "engine#{}: key {} {}",
            self.index,
            event.key,
            if event.is_down { "down" } else { "up" }
        ));
    }

    fn pressed_keys(&self) -> Vec<String> {
        self.pressed
            .lock()
            .map(|pressed| pressed.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bridge() -> KeyStateBridge {
        KeyStateBridge::new(0, Arc::new(Mutex::new(Vec::new())), ActionLog::default())
    }

    #[test]
    fn press_and_release_track_state() {
        let bridge = bridge();
        bridge.post_key_event(KeyEvent::down("a"));
        bridge.post_key_event(KeyEvent::down("b"));
        bridge.post_key_event(KeyEvent::down("a")); // repeat press, no dup
        assert_eq!(bridge.pressed_keys(), vec!["a".to_string(), "b".to_string()]);

        bridge.post_key_event(KeyEvent::up("a"));
        assert_eq!(bridge.pressed_keys(), vec!["b".to_string()]);
    }
}
