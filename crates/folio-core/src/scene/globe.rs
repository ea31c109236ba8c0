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

//! The rotating sphere at the center of the landing page.

use crate::math::Mat4;

/// How far the globe turns per rendered frame, in radians.
///
/// Fixed per frame rather than time-scaled: the render loop runs once per
/// display refresh, and frame count rather than wall clock drives the angle.
pub const ROTATION_STEP: f32 = 0.005;

/// Static shape and material parameters of the globe mesh.
///
/// Geometry is a unit sphere at a fixed subdivision; the material binds a
/// diffuse color map and a normal map with fixed shading parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeDescriptor {
    /// Sphere radius in world units.
    pub radius: f32,
    /// Segment count along both latitude and longitude.
    pub segments: u32,
    /// Strength applied to the sampled normal map.
    pub normal_scale: f32,
    /// Specular exponent of the surface.
    pub shininess: f32,
    /// Relative path of the diffuse color map.
    pub diffuse_path: String,
    /// Relative path of the normal map.
    pub normal_path: String,
}

impl Default for GlobeDescriptor {
    fn default() -> Self {
        Self {
            radius: 1.0,
            segments: 64,
            normal_scale: 0.85,
            shininess: 30.0,
            diffuse_path: "assets/textures/earth_texture.jpg".to_string(),
            normal_path: "assets/textures/earth_normal.jpg".to_string(),
        }
    }
}

/// The globe's mutable per-frame state plus its fixed descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Globe {
    descriptor: GlobeDescriptor,
    rotation_angle: f32,
}

impl Globe {
    /// Creates a globe with the given descriptor and zero rotation.
    pub fn new(descriptor: GlobeDescriptor) -> Self {
        Self {
            descriptor,
            rotation_angle: 0.0,
        }
    }

    /// The fixed shape/material parameters.
    pub fn descriptor(&self) -> &GlobeDescriptor {
        &self.descriptor
    }

    /// Current rotation around the y axis, in radians.
    ///
    /// Monotonically non-decreasing: only [`Globe::advance`] writes it.
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    /// Advances the rotation by exactly one [`ROTATION_STEP`].
    pub fn advance(&mut self) {
        self.rotation_angle += ROTATION_STEP;
    }

    /// The model matrix for the current rotation.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_angle)
    }
}

impl Default for Globe {
    fn default() -> Self {
        Self::new(GlobeDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq_eps;

    #[test]
    fn advance_adds_exactly_one_step() {
        let mut globe = Globe::default();
        globe.advance();
        assert_eq!(globe.rotation_angle(), ROTATION_STEP);
        for _ in 0..99 {
            globe.advance();
        }
        assert!(approx_eq_eps(
            globe.rotation_angle(),
            100.0 * ROTATION_STEP,
            1e-5
        ));
    }

    #[test]
    fn rotation_is_monotonic() {
        let mut globe = Globe::default();
        let mut last = globe.rotation_angle();
        for _ in 0..500 {
            globe.advance();
            assert!(globe.rotation_angle() > last);
            last = globe.rotation_angle();
        }
    }

    #[test]
    fn default_descriptor_matches_landing_page() {
        let d = GlobeDescriptor::default();
        assert_eq!(d.radius, 1.0);
        assert_eq!(d.segments, 64);
        assert_eq!(d.normal_scale, 0.85);
        assert_eq!(d.shininess, 30.0);
    }
}
