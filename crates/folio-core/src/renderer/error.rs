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

//! The error hierarchy for the rendering subsystem.
//!
//! Almost nothing here is fatal to the page: texture failures degrade
//! visuals, surface failures skip a frame. The types exist so callers can
//! log precisely, not so they can abort.

use std::fmt;

/// An error while fetching or decoding a texture asset.
#[derive(Debug)]
pub enum TextureError {
    /// The asset file could not be read.
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error, stringified.
        source_error: String,
    },
    /// The bytes were read but could not be decoded as an image.
    Decode {
        /// The path of the undecodable asset.
        path: String,
        /// Decoder detail.
        details: String,
    },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io { path, source_error } => {
                write!(f, "Failed to read texture '{path}': {source_error}")
            }
            TextureError::Decode { path, details } => {
                write!(f, "Failed to decode texture '{path}': {details}")
            }
        }
    }
}

impl std::error::Error for TextureError {}

/// An error while creating, configuring, or presenting the render surface.
#[derive(Debug)]
pub enum SurfaceError {
    /// No compatible graphics adapter was found.
    NoAdapter,
    /// The surface could not be created from the window handle.
    CreationFailed(String),
    /// Acquiring the next frame from the swapchain failed.
    AcquisitionFailed(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::NoAdapter => {
                write!(f, "No compatible graphics adapter available.")
            }
            SurfaceError::CreationFailed(msg) => {
                write!(f, "Failed to create render surface: {msg}")
            }
            SurfaceError::AcquisitionFailed(msg) => {
                write!(f, "Failed to acquire surface frame: {msg}")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A high-level error from the render backend.
#[derive(Debug)]
pub enum RenderError {
    /// An operation was attempted before `init` succeeded.
    NotInitialized,
    /// Backend initialization failed.
    InitializationFailed(String),
    /// A surface-level failure.
    Surface(SurfaceError),
    /// A texture-level failure.
    Texture(TextureError),
    /// The graphics device was lost and cannot be recovered in place.
    DeviceLost,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotInitialized => {
                write!(f, "The render backend is not initialized.")
            }
            RenderError::InitializationFailed(msg) => {
                write!(f, "Failed to initialize render backend: {msg}")
            }
            RenderError::Surface(err) => write!(f, "Surface operation failed: {err}"),
            RenderError::Texture(err) => write!(f, "Texture operation failed: {err}"),
            RenderError::DeviceLost => {
                write!(f, "The graphics device was lost.")
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Surface(err) => Some(err),
            RenderError::Texture(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurfaceError> for RenderError {
    fn from(err: SurfaceError) -> Self {
        RenderError::Surface(err)
    }
}

impl From<TextureError> for RenderError {
    fn from(err: TextureError) -> Self {
        RenderError::Texture(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn texture_error_display() {
        let err = TextureError::Io {
            path: "assets/textures/earth_texture.jpg".to_string(),
            source_error: "No such file or directory".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Failed to read texture 'assets/textures/earth_texture.jpg': No such file or directory"
        );
    }

    #[test]
    fn render_error_wraps_surface_error_with_source() {
        let err: RenderError = SurfaceError::NoAdapter.into();
        assert_eq!(
            format!("{err}"),
            "Surface operation failed: No compatible graphics adapter available."
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn render_error_wraps_texture_error_with_source() {
        let tex_err = TextureError::Decode {
            path: "x.jpg".to_string(),
            details: "bad magic".to_string(),
        };
        let err: RenderError = tex_err.into();
        assert!(matches!(err, RenderError::Texture(_)));
        assert!(err.source().is_some());
    }
}
