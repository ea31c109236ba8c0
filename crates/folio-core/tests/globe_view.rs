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

//! Lifecycle scenarios for the globe view, driven against a recording
//! backend: mount, resize, frame advance, and teardown, including the
//! degenerate-container and leak-freedom properties.

use folio_core::math::Extent2D;
use folio_core::renderer::{
    HostWindow, HostWindowHandle, RenderBackend, RenderError, RenderStats, ResourceCensus,
};
use folio_core::scene::{GlobeScene, ROTATION_STEP};
use folio_core::view::{GlobeProps, GlobeView, MountOutcome, ViewState};
use raw_window_handle::{
    DisplayHandle, HandleError, HasDisplayHandle, HasWindowHandle, WindowHandle,
};
use std::sync::Arc;

/// A host container with a settable size and no real windowing handles.
struct FakeHost {
    size: Extent2D,
}

impl FakeHost {
    fn new(width: u32, height: u32) -> Self {
        Self {
            size: Extent2D::new(width, height),
        }
    }
}

impl HasWindowHandle for FakeHost {
    fn window_handle(&self) -> Result<WindowHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HasDisplayHandle for FakeHost {
    fn display_handle(&self) -> Result<DisplayHandle<'_>, HandleError> {
        Err(HandleError::Unavailable)
    }
}

impl HostWindow for FakeHost {
    fn inner_size(&self) -> Extent2D {
        self.size
    }

    fn request_redraw(&self) {}

    fn clone_handle(&self) -> HostWindowHandle {
        Arc::new(FakeHost { size: self.size })
    }
}

/// A backend that records calls instead of touching a GPU.
#[derive(Debug, Default)]
struct RecordingBackend {
    initialized: bool,
    surface_extent: Option<Extent2D>,
    census: ResourceCensus,
    render_calls: u32,
    fail_init: bool,
}

impl RecordingBackend {
    fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }
}

impl RenderBackend for RecordingBackend {
    fn init(&mut self, window: &dyn HostWindow) -> Result<(), RenderError> {
        if self.fail_init {
            // Simulate a partial acquisition that shutdown must clean up.
            self.census.buffers = 1;
            return Err(RenderError::InitializationFailed("adapter lost".into()));
        }
        self.initialized = true;
        self.surface_extent = Some(window.inner_size());
        self.census = ResourceCensus {
            buffers: 3,
            textures: 4,
            samplers: 2,
            bind_groups: 2,
            pipelines: 2,
            surfaces: 1,
        };
        Ok(())
    }

    fn resize(&mut self, extent: Extent2D) {
        if self.initialized {
            self.surface_extent = Some(extent);
        }
    }

    fn render(&mut self, _scene: &GlobeScene) -> Result<RenderStats, RenderError> {
        if !self.initialized {
            return Err(RenderError::NotInitialized);
        }
        self.render_calls += 1;
        Ok(RenderStats {
            frame_number: u64::from(self.render_calls),
            draw_calls: 1,
            triangles: 64 * 64 * 2,
        })
    }

    fn shutdown(&mut self) {
        self.initialized = false;
        self.surface_extent = None;
        self.census = ResourceCensus::default();
    }

    fn live_resources(&self) -> ResourceCensus {
        self.census
    }
}

#[test]
fn mount_into_square_container() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());

    let outcome = view.mount(Some(&host), &mut backend);

    assert_eq!(outcome, MountOutcome::Mounted);
    assert_eq!(view.state(), ViewState::Mounted);
    assert_eq!(backend.surface_extent, Some(Extent2D::new(400, 400)));
    assert_eq!(backend.live_resources().surfaces, 1);

    let scene = view.scene().unwrap();
    assert_eq!(scene.camera.aspect_ratio, 1.0);
    assert_eq!(scene.globe.rotation_angle(), 0.0);
}

#[test]
fn resize_updates_aspect_and_surface_but_not_rotation() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());
    view.mount(Some(&host), &mut backend);

    view.advance_frame(&mut backend);
    let rotation_before = view.scene().unwrap().globe.rotation_angle();

    view.handle_resize(&mut backend, Extent2D::new(800, 400));

    let scene = view.scene().unwrap();
    assert_eq!(scene.camera.aspect_ratio, 2.0);
    assert_eq!(backend.surface_extent, Some(Extent2D::new(800, 400)));
    assert_eq!(scene.globe.rotation_angle(), rotation_before);
}

#[test]
fn resize_is_idempotent_at_any_rate() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());
    view.mount(Some(&host), &mut backend);

    for _ in 0..50 {
        view.handle_resize(&mut backend, Extent2D::new(640, 480));
    }
    let scene = view.scene().unwrap();
    assert!((scene.camera.aspect_ratio - 640.0 / 480.0).abs() < 1e-6);
    assert_eq!(backend.surface_extent, Some(Extent2D::new(640, 480)));
}

#[test]
fn hundred_frames_then_unmount() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());
    view.mount(Some(&host), &mut backend);

    for _ in 0..100 {
        view.advance_frame(&mut backend);
    }

    assert_eq!(backend.render_calls, 100);
    assert_eq!(view.frames_rendered(), 100);
    let rotation = view.scene().unwrap().globe.rotation_angle();
    assert!((rotation - 100.0 * ROTATION_STEP).abs() < 1e-5);

    view.unmount(&mut backend);

    // No frame renders after teardown, and the rotation is frozen.
    for _ in 0..10 {
        assert!(view.advance_frame(&mut backend).is_none());
    }
    assert_eq!(backend.render_calls, 100);
    assert_eq!(view.scene().unwrap().globe.rotation_angle(), rotation);
    assert!(backend.live_resources().is_empty());
}

#[test]
fn zero_width_container_mounts_degenerate_and_recovers() {
    let host = FakeHost::new(0, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());

    let outcome = view.mount(Some(&host), &mut backend);

    assert_eq!(outcome, MountOutcome::Mounted);
    assert_eq!(backend.surface_extent, Some(Extent2D::new(0, 400)));
    assert_eq!(view.scene().unwrap().camera.aspect_ratio, 0.0);

    // The first real resize corrects the degenerate surface.
    view.handle_resize(&mut backend, Extent2D::new(400, 400));
    assert_eq!(backend.surface_extent, Some(Extent2D::new(400, 400)));
    assert_eq!(view.scene().unwrap().camera.aspect_ratio, 1.0);
}

#[test]
fn missing_host_skips_initialization_silently() {
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());

    assert_eq!(view.mount(None, &mut backend), MountOutcome::SkippedNoHost);
    assert_eq!(view.state(), ViewState::Unmounted);
    assert!(backend.live_resources().is_empty());

    // Teardown after a skipped mount must be a safe no-op.
    view.unmount(&mut backend);
    assert!(backend.live_resources().is_empty());
}

#[test]
fn failed_init_releases_partial_acquisitions() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::failing();
    let mut view = GlobeView::new(GlobeProps::default());

    assert_eq!(view.mount(Some(&host), &mut backend), MountOutcome::Failed);
    assert_eq!(view.state(), ViewState::Unmounted);
    assert!(backend.live_resources().is_empty());
}

#[test]
fn repeated_mount_unmount_cycles_leak_nothing() {
    let host = FakeHost::new(300, 200);
    let mut backend = RecordingBackend::default();

    for _ in 0..20 {
        // Unmounting is terminal per view, so every cycle uses a new one.
        let mut view = GlobeView::new(GlobeProps::default());
        view.mount(Some(&host), &mut backend);
        assert!(!backend.live_resources().is_empty());
        view.advance_frame(&mut backend);
        view.unmount(&mut backend);
        assert!(backend.live_resources().is_empty());
    }
}

#[test]
fn cancellation_stops_rescheduling_before_teardown() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());
    view.mount(Some(&host), &mut backend);

    assert!(view.should_reschedule());
    view.cancel_token().cancel();
    assert!(!view.should_reschedule());
    assert!(view.advance_frame(&mut backend).is_none());
    assert_eq!(backend.render_calls, 0);
}

#[test]
fn unmount_is_idempotent() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());
    view.mount(Some(&host), &mut backend);

    view.unmount(&mut backend);
    view.unmount(&mut backend);
    view.unmount(&mut backend);
    assert_eq!(view.state(), ViewState::Unmounted);
    assert!(backend.live_resources().is_empty());
}

#[test]
fn remount_of_same_view_is_rejected() {
    let host = FakeHost::new(400, 400);
    let mut backend = RecordingBackend::default();
    let mut view = GlobeView::new(GlobeProps::default());

    view.mount(Some(&host), &mut backend);
    assert_eq!(
        view.mount(Some(&host), &mut backend),
        MountOutcome::AlreadyMounted
    );
}
