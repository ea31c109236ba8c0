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

//! The perspective camera framing the globe.

use crate::math::{degrees_to_radians, Mat4, Vec3};

/// A perspective camera with a fixed position looking at the origin.
///
/// Only the aspect ratio ever changes after construction: the resize
/// handler recomputes it from the host container's pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The vertical field of view in radians.
    pub fov_y_radians: f32,
    /// The aspect ratio of the viewport (width / height).
    pub aspect_ratio: f32,
    /// The distance to the near clipping plane.
    pub z_near: f32,
    /// The distance to the far clipping plane.
    pub z_far: f32,
    /// Where the camera sits, on the +z axis far enough to frame the sphere.
    pub position: Vec3,
}

impl Camera {
    /// The vertical field of view of the landing-page camera, in degrees.
    pub const GLOBE_FOV_DEGREES: f32 = 60.0;
    /// Distance from origin along +z that frames the unit sphere.
    pub const GLOBE_DISTANCE: f32 = 2.5;

    /// Creates the landing-page camera: 60° vertical FOV, clip planes at
    /// 0.1 and 1000, positioned at `(0, 0, 2.5)`.
    pub fn globe_default(aspect_ratio: f32) -> Self {
        Self {
            fov_y_radians: degrees_to_radians(Self::GLOBE_FOV_DEGREES),
            aspect_ratio,
            z_near: 0.1,
            z_far: 1000.0,
            position: Vec3::new(0.0, 0.0, Self::GLOBE_DISTANCE),
        }
    }

    /// Recomputes the aspect ratio from container pixel dimensions.
    ///
    /// A zero height leaves the aspect untouched; the degenerate surface is
    /// corrected by a later resize, and the camera must not divide by zero
    /// in the meantime.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    /// The projection matrix for the current aspect ratio.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_zo(self.fov_y_radians, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// The view matrix looking from the camera position at the origin.
    pub fn view_matrix(&self) -> Mat4 {
        // The fixed eye position can never coincide with the origin target.
        Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y).unwrap_or(Mat4::IDENTITY)
    }

    /// Combined view-projection matrix for uniform upload.
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, Mat4, PI};

    #[test]
    fn globe_default_matches_landing_page_framing() {
        let camera = Camera::globe_default(1.0);
        assert!(approx_eq(camera.fov_y_radians, PI / 3.0));
        assert_eq!(camera.z_near, 0.1);
        assert_eq!(camera.z_far, 1000.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 2.5));
    }

    #[test]
    fn set_aspect_tracks_container() {
        let mut camera = Camera::globe_default(1.0);
        camera.set_aspect(800, 400);
        assert!(approx_eq(camera.aspect_ratio, 2.0));
    }

    #[test]
    fn set_aspect_ignores_zero_height() {
        let mut camera = Camera::globe_default(1.5);
        camera.set_aspect(800, 0);
        assert!(approx_eq(camera.aspect_ratio, 1.5));
    }

    #[test]
    fn view_projection_is_usable() {
        let camera = Camera::globe_default(16.0 / 9.0);
        let vp = camera.view_projection();
        assert_ne!(vp, Mat4::IDENTITY);
        assert!(vp.determinant().abs() > 1e-6);
    }
}
