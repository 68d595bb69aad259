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

//! The per-instance lifecycle state machine.
//!
//! `Created → Loading → Ready ⇄ Running`, with `Error` reachable from
//! `Loading`/`Ready`/`Running` and `Disposed` terminal and reachable from
//! any state.

use std::fmt;

/// The lifecycle state of one runtime instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    /// The instance exists but has acquired no engine resources yet.
    Created,
    /// Engine resources are acquired and the project binary is loading.
    Loading,
    /// The project is loaded and can be started.
    Ready,
    /// The engine is executing the project.
    Running,
    /// A terminal acquisition or load failure. The instance keeps its
    /// identity but is never auto-retried.
    Error,
    /// All resources have been released. Terminal.
    Disposed,
}

impl LifecycleState {
    /// Returns `true` for states from which no further transition is valid.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == LifecycleState::Disposed
    }

    /// Returns `true` if the instance holds live engine resources, i.e. it
    /// participates in bulk operations and suspension.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(
            self,
            LifecycleState::Loading | LifecycleState::Ready | LifecycleState::Running
        )
    }

    /// Returns `true` if a start signal may be issued from this state.
    ///
    /// `run()` is a no-op while loading or after a failure; it never
    /// resurrects a disposed instance.
    #[must_use]
    pub fn accepts_run(self) -> bool {
        matches!(self, LifecycleState::Ready | LifecycleState::Running)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LifecycleState::Created => "created",
            LifecycleState::Loading => "loading",
            LifecycleState::Ready => "ready",
            LifecycleState::Running => "running",
            LifecycleState::Error => "error",
            LifecycleState::Disposed => "disposed",
        };
        f.write_str(label)
    }
}
