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

//! Light types for the globe scene.

use crate::math::{LinearRgba, Vec3};

/// Uniform fill light with no direction or position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    /// The light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier; 1.0 is standard.
    pub intensity: f32,
}

/// A sun-like light with parallel rays.
///
/// Positioned rather than directional-by-vector: the light looks from
/// `position` towards the origin, which is where the globe sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The light color in linear space.
    pub color: LinearRgba,
    /// Intensity multiplier; 1.0 is standard.
    pub intensity: f32,
    /// Where the light sits; rays point from here through the origin.
    pub position: Vec3,
    /// Whether this light renders a shadow map.
    pub casts_shadows: bool,
    /// Shadow-map texel resolution per side, meaningful only when
    /// `casts_shadows` is set.
    pub shadow_map_size: u32,
}

impl DirectionalLight {
    /// The direction the rays travel (normalized, towards the origin).
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize()
    }
}

/// The fixed three-light setup of the landing page.
///
/// Constructed once at mount; never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    /// Low-intensity ambient fill.
    pub ambient: AmbientLight,
    /// The primary, shadow-casting sun.
    pub sun: DirectionalLight,
    /// Secondary fill from the opposite side, no shadows.
    pub fill: DirectionalLight,
}

impl LightRig {
    /// Shadow-map resolution of the sun light.
    pub const SUN_SHADOW_MAP_SIZE: u32 = 2048;

    /// The landing-page rig: dim warm-gray ambient, a bright sun from the
    /// upper front-right, and a faint fill from the mirrored position.
    pub fn globe_default() -> Self {
        Self {
            ambient: AmbientLight {
                color: LinearRgba::from_hex("#404040"),
                intensity: 0.3,
            },
            sun: DirectionalLight {
                color: LinearRgba::WHITE,
                intensity: 1.5,
                position: Vec3::new(5.0, 3.0, 5.0),
                casts_shadows: true,
                shadow_map_size: Self::SUN_SHADOW_MAP_SIZE,
            },
            fill: DirectionalLight {
                color: LinearRgba::WHITE,
                intensity: 0.3,
                position: Vec3::new(-5.0, -3.0, -5.0),
                casts_shadows: false,
                shadow_map_size: 0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;

    #[test]
    fn default_rig_has_one_shadow_caster() {
        let rig = LightRig::globe_default();
        assert!(rig.sun.casts_shadows);
        assert!(!rig.fill.casts_shadows);
        assert_eq!(rig.sun.shadow_map_size, 2048);
    }

    #[test]
    fn sun_and_fill_oppose_each_other() {
        let rig = LightRig::globe_default();
        assert_eq!(rig.fill.position, -rig.sun.position);
        // Opposite positions give opposite ray directions.
        assert!(approx_eq(
            rig.sun.direction().dot(rig.fill.direction()),
            -1.0
        ));
    }

    #[test]
    fn light_directions_are_normalized() {
        let rig = LightRig::globe_default();
        assert!(approx_eq(rig.sun.direction().length(), 1.0));
        assert!(approx_eq(rig.fill.direction().length(), 1.0));
    }

    #[test]
    fn ambient_is_dim() {
        let rig = LightRig::globe_default();
        assert!(rig.ambient.intensity < 1.0);
        assert!(rig.ambient.color.r < 0.5);
    }
}
