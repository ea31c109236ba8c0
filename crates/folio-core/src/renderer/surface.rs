// Copyright 2025 folio contributors
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

//! The render-surface descriptor.

use crate::math::{Extent2D, LinearRgba};

/// Multisample count for the color target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleCount {
    /// No multisampling.
    X1,
    /// 4x MSAA, the "antialiasing enabled" setting.
    X4,
}

impl SampleCount {
    /// The raw sample count.
    pub fn as_u32(self) -> u32 {
        match self {
            SampleCount::X1 => 1,
            SampleCount::X4 => 4,
        }
    }
}

/// Shadow-map filtering mode of the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowMode {
    /// No shadow rendering.
    Disabled,
    /// Percentage-closer filtered soft shadows.
    SoftPcf,
}

/// Everything needed to create the drawable target bound to the host
/// container.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceDescriptor {
    /// Initial pixel size, taken from the host container. May be
    /// degenerate (zero): the surface then stays unconfigured until a
    /// resize delivers real dimensions.
    pub extent: Extent2D,
    /// Clear color; transparent so the page shows through around the globe.
    pub clear_color: LinearRgba,
    /// Color-target multisampling.
    pub samples: SampleCount,
    /// Shadow filtering mode.
    pub shadows: ShadowMode,
}

impl SurfaceDescriptor {
    /// The landing-page surface: transparent clear, 4x MSAA, soft shadows.
    pub fn globe_default(extent: Extent2D) -> Self {
        Self {
            extent,
            clear_color: LinearRgba::TRANSPARENT,
            samples: SampleCount::X4,
            shadows: ShadowMode::SoftPcf,
        }
    }
}
