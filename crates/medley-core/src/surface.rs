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

//! The abstract contract for a drawable rendering surface.
//!
//! Rendering contexts are the scarce host resource the admission limit
//! protects; the orchestrator acquires and releases them deterministically
//! but never rasterizes anything itself.

use anyhow::Result;
use std::fmt;

/// Target dimensions of a rendering surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for SurfaceSize {
    /// The default preview dimensions (240x180).
    fn default() -> Self {
        Self::new(240, 180)
    }
}

impl SurfaceSize {
    /// Creates a size from a width and a height.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for SurfaceSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A drawable surface handle, exclusively owned by one instance.
pub trait RenderSurface: Send {
    /// Resizes the surface to the given dimensions.
    fn resize(&mut self, size: SurfaceSize);

    /// Returns the current dimensions.
    fn dimensions(&self) -> SurfaceSize;

    /// Releases the underlying rendering context.
    ///
    /// Failures are reported to the caller so a disposal sweep can collect
    /// them without aborting.
    fn dispose(&mut self) -> Result<()>;
}

/// Produces fresh rendering surfaces.
pub trait SurfaceFactory: Send {
    /// Creates a surface sized to the given dimensions.
    fn create_surface(&self, size: SurfaceSize) -> Result<Box<dyn RenderSurface>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_display() {
        assert_eq!(format!("{}", SurfaceSize::new(240, 180)), "240x180");
    }
}
