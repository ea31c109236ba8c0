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

//! Core WGPU state: instance, surface, device, queue, and the swapchain
//! configuration.

use anyhow::{anyhow, Result};
use folio_core::math::Extent2D;
use folio_core::renderer::HostWindowHandle;
use wgpu::SurfaceTargetUnsafe;

/// Holds the WGPU objects tied to one presentation surface.
///
/// Created once per mounted globe view. The surface may be left
/// unconfigured when the host container is degenerate (zero-sized); the
/// first nonzero resize configures it.
pub struct GraphicsContext {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    /// Whether `surface.configure` has run with the current config.
    pub configured: bool,
    // The surface was created unsafely from this handle; keeping the Arc
    // alive guarantees the handle outlives the surface.
    _window_handle: HostWindowHandle,
}

impl std::fmt::Debug for GraphicsContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphicsContext")
            .field("surface_config", &self.surface_config)
            .field("configured", &self.configured)
            .finish_non_exhaustive()
    }
}

impl GraphicsContext {
    /// Asynchronously initializes the context for a window surface.
    pub async fn new(window_handle: HostWindowHandle, size: Extent2D) -> Result<Self> {
        log::info!("Initializing WGPU graphics context...");

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());

        let surface_target = unsafe {
            SurfaceTargetUnsafe::from_window(&window_handle)
                .map_err(|e| anyhow!("Failed to create surface target: {e}"))?
        };
        let surface = unsafe { instance.create_surface_unsafe(surface_target)? };
        log::debug!("WGPU surface created for the host window.");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("No compatible graphics adapter: {e}"))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Folio Logical Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
            })
            .await
            .map_err(|e| anyhow!("Failed to create logical device: {e}"))?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("WGPU uncaptured error: {e:?}");
        }));

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        // The page shows through the cleared background, so prefer an alpha
        // mode that actually composites; fall back to whatever the platform
        // offers.
        let alpha_mode = surface_caps
            .alpha_modes
            .iter()
            .copied()
            .find(|m| {
                matches!(
                    m,
                    wgpu::CompositeAlphaMode::PreMultiplied
                        | wgpu::CompositeAlphaMode::PostMultiplied
                )
            })
            .unwrap_or(surface_caps.alpha_modes[0]);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let configured = if size.is_degenerate() {
            log::warn!(
                "GraphicsContext: host container is {}x{}; surface left unconfigured until resize",
                size.width,
                size.height
            );
            false
        } else {
            surface.configure(&device, &surface_config);
            true
        };

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            configured,
            _window_handle: window_handle,
        })
    }

    /// Reconfigures the swapchain for new container dimensions.
    ///
    /// Zero dimensions deconfigure the surface (a degenerate target) rather
    /// than erroring; the next nonzero call restores it.
    pub fn resize(&mut self, extent: Extent2D) {
        if extent.is_degenerate() {
            log::warn!(
                "GraphicsContext: resize to degenerate {}x{}; surface deconfigured",
                extent.width,
                extent.height
            );
            self.surface_config.width = extent.width;
            self.surface_config.height = extent.height;
            self.configured = false;
            return;
        }
        log::debug!(
            "GraphicsContext: resizing surface to {}x{}",
            extent.width,
            extent.height
        );
        self.surface_config.width = extent.width;
        self.surface_config.height = extent.height;
        self.surface.configure(&self.device, &self.surface_config);
        self.configured = true;
    }

    /// Acquires the next swapchain texture, reconfiguring once on
    /// lost/outdated surfaces.
    pub fn acquire_frame(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(frame),
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                log::warn!("GraphicsContext: surface lost/outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                self.surface.get_current_texture()
            }
            Err(err) => Err(err),
        }
    }

    /// Current swapchain extent.
    pub fn extent(&self) -> Extent2D {
        Extent2D::new(self.surface_config.width, self.surface_config.height)
    }
}
