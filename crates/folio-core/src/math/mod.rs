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

//! Mathematics primitives for the globe renderer.
//!
//! Vectors, a 4x4 matrix, a linear color type, and pixel extents. All
//! angular functions operate in **radians** unless a name says otherwise.

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// The factor to convert degrees to radians (PI / 180.0).
pub const DEG_TO_RAD: f32 = PI / 180.0;

pub mod color;
pub mod dimension;
pub mod matrix;
pub mod vector;

pub use self::color::LinearRgba;
pub use self::dimension::Extent2D;
pub use self::matrix::Mat4;
pub use self::vector::{Vec2, Vec3, Vec4};

/// Converts an angle from degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * DEG_TO_RAD
}

/// Performs an approximate equality comparison with a custom tolerance.
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the default [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degrees_to_radians_half_turn() {
        assert!(approx_eq(degrees_to_radians(180.0), PI));
        assert!(approx_eq(degrees_to_radians(60.0), PI / 3.0));
    }

    #[test]
    fn approx_eq_respects_tolerance() {
        assert!(approx_eq_eps(0.001, 0.002, 1e-2));
        assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
        assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
    }
}
