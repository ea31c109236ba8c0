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

//! A `winit`-based implementation of the [`HostWindow`] trait.

use folio_core::math::Extent2D;
use folio_core::renderer::{HostWindow, HostWindowHandle};
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use std::sync::Arc;
use winit::{
    dpi::LogicalSize, error::OsError, event_loop::ActiveEventLoop, window::Window,
    window::WindowId,
};

/// A wrapper around a `winit` window that acts as the globe's host
/// container.
///
/// Uses an `Arc` internally so the render backend can hold a cheap,
/// thread-safe handle for surface creation while the event loop keeps the
/// window itself.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

/// A builder for [`WinitWindow`] instances.
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
}

impl WinitWindowBuilder {
    /// Creates a builder with the default landing-page window settings.
    pub fn new() -> Self {
        Self {
            title: "folio".to_string(),
            width: 960,
            height: 640,
        }
    }

    /// Sets the window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builds the window on the given event loop.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window '{}' at {}x{}",
            self.title,
            self.width,
            self.height
        );

        let attributes = Window::default_attributes()
            .with_title(self.title)
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_transparent(true)
            .with_visible(true);

        let window = event_loop.create_window(attributes)?;
        log::debug!("Winit window created (id: {:?})", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WinitWindow {
    /// The window's identifier, for matching incoming events.
    pub fn id(&self) -> WindowId {
        self.inner.id()
    }
}

impl HasWindowHandle for WinitWindow {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        self.inner.window_handle()
    }
}

impl HasDisplayHandle for WinitWindow {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        self.inner.display_handle()
    }
}

impl HostWindow for WinitWindow {
    fn inner_size(&self) -> Extent2D {
        let size = self.inner.inner_size();
        Extent2D::new(size.width, size.height)
    }

    fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    fn clone_handle(&self) -> HostWindowHandle {
        self.inner.clone()
    }
}
