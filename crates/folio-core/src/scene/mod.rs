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

//! The CPU-side scene model for the globe view.
//!
//! A [`GlobeScene`] is plain data: one [`Camera`], one [`Globe`], one
//! [`LightRig`]. The structure itself enforces the one-of-each invariant;
//! GPU-side resources live behind the [`crate::renderer::RenderBackend`]
//! trait and are owned by whichever backend uploaded them.

pub mod camera;
pub mod globe;
pub mod light;

pub use camera::Camera;
pub use globe::{Globe, GlobeDescriptor, ROTATION_STEP};
pub use light::{AmbientLight, DirectionalLight, LightRig};

/// Everything a backend needs to draw one frame of the globe.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobeScene {
    /// The viewpoint. Its aspect ratio tracks the host container.
    pub camera: Camera,
    /// The rotating sphere.
    pub globe: Globe,
    /// The lights, fixed at construction.
    pub lights: LightRig,
}

impl GlobeScene {
    /// Builds the default landing-page scene for a container of the given
    /// aspect ratio.
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            camera: Camera::globe_default(aspect_ratio),
            globe: Globe::default(),
            lights: LightRig::globe_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_starts_with_zero_rotation() {
        let scene = GlobeScene::new(1.0);
        assert_eq!(scene.globe.rotation_angle(), 0.0);
        assert_eq!(scene.camera.aspect_ratio, 1.0);
    }
}
