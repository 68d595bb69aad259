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

//! The abstract contract for a per-instance audio sink.

use anyhow::Result;

/// Output gain applied to a focused instance.
pub const GAIN_FULL: f32 = 1.0;

/// Output gain applied to an unfocused instance.
pub const GAIN_MUTED: f32 = 0.0;

/// An audio output handle, exclusively owned by one instance.
///
/// The focus router mutes every instance except the focused one by driving
/// the sink gain; the gain ramp inside the backend may be asynchronous but
/// is fire-and-forget from the orchestrator's view.
pub trait AudioSink: Send {
    /// Sets the output gain. `0.0` is silent, `1.0` is full volume.
    fn set_gain(&mut self, gain: f32);

    /// Returns the last gain set on the sink.
    fn gain(&self) -> f32;

    /// Resumes a suspended output context, satisfying host autoplay
    /// policies. Called when an instance gains focus.
    fn resume(&mut self);

    /// Releases the underlying output resources.
    fn dispose(&mut self) -> Result<()>;
}

/// Produces fresh audio sinks.
pub trait AudioSinkFactory: Send {
    /// Creates a sink, initially at full gain.
    fn create_sink(&self) -> Result<Box<dyn AudioSink>>;
}
