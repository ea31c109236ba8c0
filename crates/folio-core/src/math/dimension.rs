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

//! Pixel extents for surfaces and textures.

/// A two-dimensional extent in integer pixels.
///
/// Used for the render surface, the host container, and texture sizes. A
/// zero component is a legal, degenerate value (a collapsed container), not
/// an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent2D {
    /// The width component of the extent.
    pub width: u32,
    /// The height component of the extent.
    pub height: u32,
}

impl Extent2D {
    /// Creates a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `true` when either component is zero.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width divided by height, or 0.0 for a degenerate extent.
    #[inline]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            0.0
        } else {
            self.width as f32 / self.height as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aspect_ratio_of_square_is_one() {
        assert_eq!(Extent2D::new(400, 400).aspect_ratio(), 1.0);
        assert_eq!(Extent2D::new(800, 400).aspect_ratio(), 2.0);
    }

    #[test]
    fn zero_extent_is_degenerate_not_a_panic() {
        let e = Extent2D::new(0, 400);
        assert!(e.is_degenerate());
        assert_eq!(e.aspect_ratio(), 0.0);
        assert_eq!(Extent2D::new(400, 0).aspect_ratio(), 0.0);
    }
}
