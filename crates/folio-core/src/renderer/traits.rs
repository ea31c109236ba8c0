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

//! The host-window and render-backend capability traits.

use super::error::RenderError;
use super::stats::{RenderStats, ResourceCensus};
use crate::math::Extent2D;
use crate::scene::GlobeScene;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use std::sync::Arc;

/// Combines the windowing handle traits graphics backends need, so the
/// pair can be used as a single trait object.
pub trait WindowHandleProvider: HasWindowHandle + HasDisplayHandle {}

impl<T: HasWindowHandle + HasDisplayHandle> WindowHandleProvider for T {}

/// A shared, thread-safe handle to the host window.
pub type HostWindowHandle = Arc<dyn WindowHandleProvider + Send + Sync>;

/// The host container the globe mounts into.
///
/// Any windowing backend can implement this; the view only needs readable
/// pixel dimensions, a redraw request, and a surface-creation handle.
pub trait HostWindow: HasWindowHandle + HasDisplayHandle {
    /// Physical pixel dimensions of the drawable area. Either component may
    /// legitimately be zero (a collapsed container).
    fn inner_size(&self) -> Extent2D;

    /// Requests that the host schedule another frame.
    fn request_redraw(&self);

    /// Clones a shared handle for the backend to create a surface from.
    fn clone_handle(&self) -> HostWindowHandle;
}

/// The capability surface a 3D binding must expose for the globe view.
///
/// One backend instance serves one mounted view: `init` acquires the
/// surface and uploads the scene's GPU resources, `render` draws frames,
/// `shutdown` releases everything. The trait is deliberately small so the
/// lifecycle logic can be exercised against a recording fake.
pub trait RenderBackend: std::fmt::Debug {
    /// Creates the render surface on the host window and uploads the globe
    /// geometry, material, and placeholder textures. Also starts the
    /// asynchronous texture loads; their completion never gates rendering.
    fn init(&mut self, window: &dyn HostWindow) -> Result<(), RenderError>;

    /// Resizes the surface to the host container's new dimensions.
    ///
    /// A degenerate extent is recorded but leaves the surface
    /// unconfigured; the next nonzero resize restores it. Must be safe to
    /// call at any rate and in any state.
    fn resize(&mut self, extent: Extent2D);

    /// Renders one frame of the scene from its camera.
    fn render(&mut self, scene: &GlobeScene) -> Result<RenderStats, RenderError>;

    /// Releases every GPU resource this backend owns.
    ///
    /// Safe to call after a partially failed `init`, and idempotent. After
    /// return, [`RenderBackend::live_resources`] reports an empty census.
    fn shutdown(&mut self);

    /// Live GPU-resource counters for leak verification.
    fn live_resources(&self) -> ResourceCensus;
}
