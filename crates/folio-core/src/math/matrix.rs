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

//! A column-major 4x4 matrix for transforms and projections.

use super::vector::{Vec3, Vec4};
use std::ops::Mul;

/// A 4x4 matrix stored as four [`Vec4`] columns.
///
/// The convention matches modern rendering APIs: right-handed view space
/// with a `[0, 1]` clip-space depth range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    /// The columns of the matrix. `cols[0]` is the first column, and so on.
    pub cols: [Vec4; 4],
}

impl Mat4 {
    /// The identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            Vec4::new(1.0, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(0.0, 0.0, 1.0, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        ],
    };

    /// Creates a matrix from four column vectors.
    #[inline]
    pub fn from_cols(c0: Vec4, c1: Vec4, c2: Vec4, c3: Vec4) -> Self {
        Self {
            cols: [c0, c1, c2, c3],
        }
    }

    /// Returns a row of the matrix by index (0..4).
    #[inline]
    pub fn get_row(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.cols[0].get(index),
            self.cols[1].get(index),
            self.cols[2].get(index),
            self.cols[3].get(index),
        )
    }

    /// Creates a translation matrix.
    pub fn from_translation(v: Vec3) -> Self {
        let mut m = Self::IDENTITY;
        m.cols[3] = Vec4::from_vec3(v, 1.0);
        m
    }

    /// Creates a rotation matrix around the y axis.
    pub fn from_rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols(
            Vec4::new(c, 0.0, -s, 0.0),
            Vec4::new(0.0, 1.0, 0.0, 0.0),
            Vec4::new(s, 0.0, c, 0.0),
            Vec4::new(0.0, 0.0, 0.0, 1.0),
        )
    }

    /// Creates a right-handed perspective projection with a `[0, 1]` depth
    /// range.
    ///
    /// `fov_y` is the vertical field of view in radians; `aspect` is
    /// width / height. A degenerate aspect of zero is substituted with 1.0
    /// so a zero-sized surface never produces a NaN matrix.
    pub fn perspective_rh_zo(fov_y: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
        let aspect = if aspect > 0.0 { aspect } else { 1.0 };
        let f = 1.0 / (fov_y * 0.5).tan();
        let r = z_far / (z_near - z_far);
        Self::from_cols(
            Vec4::new(f / aspect, 0.0, 0.0, 0.0),
            Vec4::new(0.0, f, 0.0, 0.0),
            Vec4::new(0.0, 0.0, r, -1.0),
            Vec4::new(0.0, 0.0, r * z_near, 0.0),
        )
    }

    /// Creates a right-handed orthographic projection with a `[0, 1]` depth
    /// range, used by the shadow pass.
    pub fn orthographic_rh_zo(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let rw = 1.0 / (right - left);
        let rh = 1.0 / (top - bottom);
        let rd = 1.0 / (z_near - z_far);
        Self::from_cols(
            Vec4::new(2.0 * rw, 0.0, 0.0, 0.0),
            Vec4::new(0.0, 2.0 * rh, 0.0, 0.0),
            Vec4::new(0.0, 0.0, rd, 0.0),
            Vec4::new(
                -(right + left) * rw,
                -(top + bottom) * rh,
                z_near * rd,
                1.0,
            ),
        )
    }

    /// Creates a right-handed view matrix looking from `eye` towards
    /// `target`.
    ///
    /// Returns `None` when `eye` and `target` coincide or `up` is parallel
    /// to the view direction.
    pub fn look_at_rh(eye: Vec3, target: Vec3, up: Vec3) -> Option<Self> {
        let forward = eye - target;
        if forward.length_squared() < super::EPSILON {
            return None;
        }
        let f = forward.normalize();
        let s = up.cross(f);
        if s.length_squared() < super::EPSILON {
            return None;
        }
        let s = s.normalize();
        let u = f.cross(s);
        Some(Self::from_cols(
            Vec4::new(s.x, u.x, f.x, 0.0),
            Vec4::new(s.y, u.y, f.y, 0.0),
            Vec4::new(s.z, u.z, f.z, 0.0),
            Vec4::new(-s.dot(eye), -u.dot(eye), -f.dot(eye), 1.0),
        ))
    }

    /// Returns the transposed matrix.
    pub fn transpose(&self) -> Self {
        Self::from_cols(
            self.get_row(0),
            self.get_row(1),
            self.get_row(2),
            self.get_row(3),
        )
    }

    /// Computes the determinant via expansion along the first column.
    pub fn determinant(&self) -> f32 {
        let m = |r: usize, c: usize| self.cols[c].get(r);
        let det3 = |a: f32, b: f32, c: f32, d: f32, e: f32, f: f32, g: f32, h: f32, i: f32| {
            a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g)
        };
        let mut det = 0.0;
        for r in 0..4 {
            let rows: Vec<usize> = (0..4).filter(|&x| x != r).collect();
            let minor = det3(
                m(rows[0], 1),
                m(rows[0], 2),
                m(rows[0], 3),
                m(rows[1], 1),
                m(rows[1], 2),
                m(rows[1], 3),
                m(rows[2], 1),
                m(rows[2], 2),
                m(rows[2], 3),
            );
            let sign = if r % 2 == 0 { 1.0 } else { -1.0 };
            det += sign * m(r, 0) * minor;
        }
        det
    }

    /// Flattens the matrix into a column-major 2D array for GPU upload.
    #[inline]
    pub fn to_cols_array_2d(&self) -> [[f32; 4]; 4] {
        let c = &self.cols;
        [
            [c[0].x, c[0].y, c[0].z, c[0].w],
            [c[1].x, c[1].y, c[1].z, c[1].w],
            [c[2].x, c[2].y, c[2].z, c[2].w],
            [c[3].x, c[3].y, c[3].z, c[3].w],
        ]
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let mut cols = [Vec4::ZERO; 4];
        for (out, rhs_col) in cols.iter_mut().zip(rhs.cols.iter()) {
            *out = Vec4::new(
                self.get_row(0).dot(*rhs_col),
                self.get_row(1).dot(*rhs_col),
                self.get_row(2).dot(*rhs_col),
                self.get_row(3).dot(*rhs_col),
            );
        }
        Self { cols }
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, rhs: Vec4) -> Vec4 {
        Vec4::new(
            self.get_row(0).dot(rhs),
            self.get_row(1).dot(rhs),
            self.get_row(2).dot(rhs),
            self.get_row(3).dot(rhs),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, approx_eq_eps, PI};

    #[test]
    fn identity_is_multiplicative_neutral() {
        let m = Mat4::from_rotation_y(0.7);
        assert_eq!(m * Mat4::IDENTITY, m);
        assert_eq!(Mat4::IDENTITY * m, m);
    }

    #[test]
    fn rotation_y_quarter_turn_maps_x_to_minus_z() {
        let m = Mat4::from_rotation_y(PI / 2.0);
        let v = m * Vec4::from_vec3(Vec3::X, 0.0);
        assert!(approx_eq(v.x, 0.0));
        assert!(approx_eq(v.z, -1.0));
    }

    #[test]
    fn translation_moves_points_not_directions() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let p = m * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let d = m * Vec4::new(0.0, 0.0, 1.0, 0.0);
        assert_eq!(p.truncate(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(d.truncate(), Vec3::Z);
    }

    #[test]
    fn perspective_is_not_degenerate() {
        let m = Mat4::perspective_rh_zo(PI / 3.0, 16.0 / 9.0, 0.1, 1000.0);
        assert!(m.determinant().abs() > 1e-4);
    }

    #[test]
    fn perspective_zero_aspect_substitutes_one() {
        let degenerate = Mat4::perspective_rh_zo(PI / 3.0, 0.0, 0.1, 1000.0);
        let square = Mat4::perspective_rh_zo(PI / 3.0, 1.0, 0.1, 1000.0);
        assert_eq!(degenerate, square);
    }

    #[test]
    fn look_at_rejects_degenerate_input() {
        let eye = Vec3::new(0.0, 0.0, 2.5);
        assert!(Mat4::look_at_rh(eye, eye, Vec3::Y).is_none());
        assert!(Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Z).is_none());
    }

    #[test]
    fn look_at_places_eye_at_view_origin() {
        let eye = Vec3::new(0.0, 0.0, 2.5);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y).unwrap();
        let p = view * Vec4::from_vec3(eye, 1.0);
        assert!(approx_eq_eps(p.truncate().length(), 0.0, 1e-4));
    }

    #[test]
    fn transpose_is_involutive() {
        let m = Mat4::perspective_rh_zo(1.0, 1.5, 0.1, 100.0);
        assert_eq!(m.transpose().transpose(), m);
    }
}
