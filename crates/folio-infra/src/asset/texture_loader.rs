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

//! Background texture decoding.
//!
//! Loads are fire-and-forget: one short-lived thread per texture decodes
//! with the `image` crate and sends the result over the delivery channel.
//! Nothing waits on them: the render loop starts immediately with
//! placeholder texels and binds real ones whenever they arrive. A failed
//! load is reported on the channel (and logged there); the frame pipeline
//! never notices.

use folio_core::math::Extent2D;
use folio_core::renderer::{CpuTexture, TextureError, TextureLoadResult, TextureSender, TextureSlot};
use folio_core::scene::GlobeDescriptor;

/// Starts the asynchronous loads for both globe textures.
pub fn spawn_globe_loads(descriptor: &GlobeDescriptor, sender: &TextureSender) {
    let loads = [
        (TextureSlot::Diffuse, descriptor.diffuse_path.clone()),
        (TextureSlot::Normal, descriptor.normal_path.clone()),
    ];
    for (slot, path) in loads {
        let sender = sender.clone();
        let spawned = std::thread::Builder::new()
            .name(format!("folio-texture-{slot:?}").to_lowercase())
            .spawn(move || {
                let result = decode_file(&path);
                // The receiver may already be gone if the view unmounted
                // before the decode finished; that is fine.
                let _ = sender.send(TextureLoadResult { slot, result });
            });
        if let Err(err) = spawned {
            log::warn!("Could not spawn texture loader thread: {err}");
        }
    }
}

/// Reads and decodes one image file into tightly packed RGBA8.
fn decode_file(path: &str) -> Result<CpuTexture, TextureError> {
    let bytes = std::fs::read(path).map_err(|err| TextureError::Io {
        path: path.to_string(),
        source_error: err.to_string(),
    })?;

    let img = image::load_from_memory(&bytes).map_err(|err| TextureError::Decode {
        path: path.to_string(),
        details: err.to_string(),
    })?;

    // Keep sRGB data as-is; the GPU view format handles linearization.
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(CpuTexture {
        pixels: rgba.into_raw(),
        size: Extent2D::new(width, height),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::renderer::texture_channel;
    use std::io::Write;

    #[test]
    fn decode_missing_file_is_an_io_error() {
        let err = decode_file("/nonexistent/earth.jpg").unwrap_err();
        assert!(matches!(err, TextureError::Io { .. }));
    }

    #[test]
    fn decode_garbage_is_a_decode_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not an image at all").unwrap();
        let err = decode_file(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TextureError::Decode { .. }));
    }

    #[test]
    fn decode_png_produces_well_formed_rgba() {
        // A 2x2 PNG written through the image crate itself.
        let file = tempfile::NamedTempFile::with_suffix(".png").unwrap();
        let img = image::RgbaImage::from_pixel(2, 2, image::Rgba([10, 20, 30, 255]));
        img.save(file.path()).unwrap();

        let texture = decode_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(texture.size, Extent2D::new(2, 2));
        assert!(texture.is_well_formed());
        assert_eq!(&texture.pixels[0..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn spawned_loads_report_failures_on_the_channel() {
        let (tx, rx) = texture_channel();
        let descriptor = GlobeDescriptor {
            diffuse_path: "/nonexistent/diffuse.jpg".to_string(),
            normal_path: "/nonexistent/normal.jpg".to_string(),
            ..GlobeDescriptor::default()
        };

        spawn_globe_loads(&descriptor, &tx);
        drop(tx);

        let results: Vec<TextureLoadResult> = rx.iter().collect();
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.result.is_err()));
    }
}
