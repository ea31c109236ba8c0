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

//! The `LinearRgba` color type.

/// A color in **linear RGBA** space with `f32` components.
///
/// Linear space is what lighting math operates in; sRGB inputs (hex
/// strings) are converted on construction. `#[repr(C)]` keeps the layout
/// stable for GPU upload.
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LinearRgba {
    /// The red component in linear space.
    pub r: f32,
    /// The green component in linear space.
    pub g: f32,
    /// The blue component in linear space.
    pub b: f32,
    /// The alpha (opacity) component.
    pub a: f32,
}

impl LinearRgba {
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Fully transparent black, the globe surface's clear color.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a color from an sRGB hex string (`#RRGGBB`), converting the
    /// channels to linear space.
    ///
    /// Malformed input yields opaque black rather than an error; color
    /// literals are authored, not user-supplied.
    pub fn from_hex(hex: &str) -> Self {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return Self::BLACK;
        }
        let parse = |s: &str| u8::from_str_radix(s, 16).map(|v| v as f32 / 255.0);
        match (parse(&hex[0..2]), parse(&hex[2..4]), parse(&hex[4..6])) {
            (Ok(r), Ok(g), Ok(b)) => {
                Self::rgb(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
            }
            _ => Self::BLACK,
        }
    }

    /// Returns the color scaled by an intensity, alpha untouched.
    #[inline]
    pub fn scaled(&self, intensity: f32) -> Self {
        Self {
            r: self.r * intensity,
            g: self.g * intensity,
            b: self.b * intensity,
            a: self.a,
        }
    }
}

impl Default for LinearRgba {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Converts an sRGB component to linear space.
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
