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

//! CPU-side texture data and the fire-and-forget delivery channel.
//!
//! Texture loading never gates the render loop: a loader decodes off the
//! UI thread and sends results over a channel; the backend drains the
//! channel at frame start and binds whatever has arrived. A load that
//! fails simply never arrives: the globe keeps rendering with placeholder
//! texels.

use super::error::TextureError;
use crate::math::Extent2D;

/// Which material slot a texture feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureSlot {
    /// The diffuse color map.
    Diffuse,
    /// The tangent-space normal map.
    Normal,
}

/// A decoded image ready for GPU upload: tightly packed RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct CpuTexture {
    /// Pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    /// Pixel dimensions.
    pub size: Extent2D,
}

impl CpuTexture {
    /// Returns `true` when the byte length matches the dimensions.
    pub fn is_well_formed(&self) -> bool {
        self.pixels.len() == (self.size.width as usize) * (self.size.height as usize) * 4
    }
}

/// The outcome of one asynchronous texture load.
#[derive(Debug)]
pub struct TextureLoadResult {
    /// The slot the load was started for.
    pub slot: TextureSlot,
    /// The decoded texture, or why it failed.
    pub result: Result<CpuTexture, TextureError>,
}

/// Sending half of the texture delivery channel, held by the loader.
pub type TextureSender = flume::Sender<TextureLoadResult>;

/// Receiving half, drained by the render backend each frame.
pub type TextureReceiver = flume::Receiver<TextureLoadResult>;

/// Creates the delivery channel.
///
/// Unbounded: at most two messages (one per slot) ever flow through it.
pub fn texture_channel() -> (TextureSender, TextureReceiver) {
    flume::unbounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_checks_byte_length() {
        let good = CpuTexture {
            pixels: vec![0; 2 * 2 * 4],
            size: Extent2D::new(2, 2),
        };
        assert!(good.is_well_formed());

        let bad = CpuTexture {
            pixels: vec![0; 3],
            size: Extent2D::new(2, 2),
        };
        assert!(!bad.is_well_formed());
    }

    #[test]
    fn channel_delivers_results_in_order() {
        let (tx, rx) = texture_channel();
        tx.send(TextureLoadResult {
            slot: TextureSlot::Diffuse,
            result: Ok(CpuTexture {
                pixels: vec![0; 4],
                size: Extent2D::new(1, 1),
            }),
        })
        .unwrap();
        tx.send(TextureLoadResult {
            slot: TextureSlot::Normal,
            result: Err(TextureError::Io {
                path: "missing.jpg".to_string(),
                source_error: "not found".to_string(),
            }),
        })
        .unwrap();

        let first = rx.try_recv().unwrap();
        assert_eq!(first.slot, TextureSlot::Diffuse);
        assert!(first.result.is_ok());

        let second = rx.try_recv().unwrap();
        assert_eq!(second.slot, TextureSlot::Normal);
        assert!(second.result.is_err());

        assert!(rx.try_recv().is_err());
    }
}
