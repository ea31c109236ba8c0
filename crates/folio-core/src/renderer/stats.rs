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

//! Frame statistics and GPU-resource accounting.

/// Statistics for one rendered frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Monotonic frame counter, starting at 1 for the first frame.
    pub frame_number: u64,
    /// Draw calls issued this frame.
    pub draw_calls: u32,
    /// Triangles submitted this frame.
    pub triangles: u32,
}

/// Live GPU-resource counters, the backing for the no-leak property.
///
/// Every create increments a counter, every destroy decrements it. After a
/// backend's `shutdown`, the census must be all zeros: any nonzero field
/// is a handle that outlived its owning instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResourceCensus {
    /// Vertex/index/uniform buffers.
    pub buffers: u32,
    /// Textures, including depth and shadow maps.
    pub textures: u32,
    /// Samplers.
    pub samplers: u32,
    /// Bind groups and their layouts.
    pub bind_groups: u32,
    /// Render pipelines.
    pub pipelines: u32,
    /// Configured presentation surfaces.
    pub surfaces: u32,
}

impl ResourceCensus {
    /// Returns `true` when no resource of any kind is alive.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Total live resources across all categories.
    pub fn total(&self) -> u32 {
        self.buffers
            + self.textures
            + self.samplers
            + self.bind_groups
            + self.pipelines
            + self.surfaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_census_is_empty() {
        assert!(ResourceCensus::default().is_empty());
        assert_eq!(ResourceCensus::default().total(), 0);
    }

    #[test]
    fn census_totals_all_categories() {
        let census = ResourceCensus {
            buffers: 2,
            textures: 4,
            samplers: 1,
            bind_groups: 3,
            pipelines: 2,
            surfaces: 1,
        };
        assert!(!census.is_empty());
        assert_eq!(census.total(), 13);
    }
}
