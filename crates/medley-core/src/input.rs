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

//! The abstract contract for an engine's input device bridge.

/// A single key press or release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key identifier, as the host reports it (e.g. `"ArrowUp"`).
    pub key: String,
    /// `true` for press, `false` for release.
    pub is_down: bool,
}

impl KeyEvent {
    /// Creates a press event.
    #[must_use]
    pub fn down(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_down: true,
        }
    }

    /// Creates a release event.
    #[must_use]
    pub fn up(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            is_down: false,
        }
    }
}

/// The engine's keyboard device, reachable through its binding.
///
/// Exposing the currently-pressed set lets the controller synthesize
/// release events when an instance loses focus, so no stuck-key state leaks
/// into a backgrounded instance.
pub trait InputBridge: Send + Sync {
    /// Delivers a key event to the engine.
    fn post_key_event(&self, event: KeyEvent);

    /// Returns every key the engine currently considers pressed.
    fn pressed_keys(&self) -> Vec<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_set_direction() {
        assert!(KeyEvent::down("a").is_down);
        assert!(!KeyEvent::up("a").is_down);
        assert_eq!(KeyEvent::down("ArrowUp").key, "ArrowUp");
    }
}
