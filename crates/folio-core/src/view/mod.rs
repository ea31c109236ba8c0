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

//! The globe view lifecycle.
//!
//! [`GlobeView`] is the component that owns the scene for its mounted
//! lifetime. It has exactly two states, unmounted (no resources held) and
//! mounted (scene live, render loop active), and the mounted-to-unmounted
//! transition is terminal: remounting means constructing a fresh view.
//!
//! The render loop is inverted compared to a self-rescheduling
//! animation-frame callback: the host's frame scheduler calls
//! [`GlobeView::advance_frame`] once per display refresh and consults
//! [`GlobeView::should_reschedule`], which checks the [`CancelToken`],
//! before requesting the next frame. That makes loop ownership explicit
//! and cancellation deterministic: unmount cancels the token before any
//! resource is released, so no frame can ever execute against a disposed
//! surface.

use crate::math::Extent2D;
use crate::renderer::{HostWindow, RenderBackend, RenderStats};
use crate::scene::GlobeScene;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A shared flag that stops the render loop from rescheduling.
///
/// Cloned into whoever drives the frame scheduler; once canceled it never
/// un-cancels.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    canceled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a live (not yet canceled) token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the token. Irreversible.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Release);
    }

    /// Returns `true` once [`CancelToken::cancel`] has been called.
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }
}

/// The two lifecycle states of a [`GlobeView`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No resources held; the initial and terminal state.
    Unmounted,
    /// Scene constructed, backend initialized, render loop active.
    Mounted,
}

/// What a mount attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    /// The view is now mounted.
    Mounted,
    /// No host container was present; initialization was skipped entirely.
    SkippedNoHost,
    /// The view was already mounted; nothing changed.
    AlreadyMounted,
    /// Backend initialization failed; acquired resources were released and
    /// the view stays unmounted.
    Failed,
}

/// Inputs the page hands the globe component.
#[derive(Debug, Clone, Default)]
pub struct GlobeProps {
    /// Sizing directive for the rendered surface's footprint; `None` defers
    /// entirely to the host container's dimensions.
    pub preferred_extent: Option<Extent2D>,
    /// Visited-location codes. Only the count is ever shown, as on-page
    /// caption text; rendering is unaffected.
    pub visited_codes: Vec<String>,
}

/// The scene-renderer component: owns the [`GlobeScene`] and drives a
/// [`RenderBackend`] through mount, per-frame advance, resize, and
/// teardown.
#[derive(Debug)]
pub struct GlobeView {
    props: GlobeProps,
    state: ViewState,
    scene: Option<GlobeScene>,
    cancel: CancelToken,
    frames_rendered: u64,
}

impl GlobeView {
    /// Creates an unmounted view.
    pub fn new(props: GlobeProps) -> Self {
        Self {
            props,
            state: ViewState::Unmounted,
            scene: None,
            cancel: CancelToken::new(),
            frames_rendered: 0,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// The scene, present while mounted (and retained, frozen, afterwards).
    pub fn scene(&self) -> Option<&GlobeScene> {
        self.scene.as_ref()
    }

    /// A clone of the cancellation token for the frame scheduler.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Frames successfully rendered since mount.
    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    /// Number of visited locations, for the page caption.
    pub fn visited_count(&self) -> usize {
        self.props.visited_codes.len()
    }

    /// The sizing directive from the props, if any.
    pub fn preferred_extent(&self) -> Option<Extent2D> {
        self.props.preferred_extent
    }

    /// Mounts the view into `host`, initializing `backend`.
    ///
    /// With no host present this is a silent no-op. A host reporting zero
    /// dimensions mounts normally with a degenerate surface: a later
    /// resize corrects it. If the backend fails to initialize, whatever it
    /// acquired is released before returning and the view stays unmounted.
    pub fn mount(
        &mut self,
        host: Option<&dyn HostWindow>,
        backend: &mut dyn RenderBackend,
    ) -> MountOutcome {
        if self.state == ViewState::Mounted {
            log::warn!("GlobeView::mount called on an already mounted view");
            return MountOutcome::AlreadyMounted;
        }
        let Some(host) = host else {
            log::debug!("GlobeView: no host container, skipping initialization");
            return MountOutcome::SkippedNoHost;
        };

        let extent = host.inner_size();
        if extent.is_degenerate() {
            log::warn!(
                "GlobeView: mounting into a degenerate container ({}x{})",
                extent.width,
                extent.height
            );
        }

        if let Err(err) = backend.init(host) {
            log::error!("GlobeView: backend initialization failed: {err}");
            // Release anything the failed init left behind.
            backend.shutdown();
            return MountOutcome::Failed;
        }

        self.scene = Some(GlobeScene::new(extent.aspect_ratio()));
        self.state = ViewState::Mounted;
        log::info!(
            "GlobeView mounted into {}x{} container",
            extent.width,
            extent.height
        );
        MountOutcome::Mounted
    }

    /// Advances the animation by one frame and renders it.
    ///
    /// Called by the host's frame scheduler once per display refresh. Does
    /// nothing when unmounted or canceled: rotation is never mutated past
    /// either. A render failure is logged and skipped, never propagated;
    /// the next frame simply tries again.
    pub fn advance_frame(&mut self, backend: &mut dyn RenderBackend) -> Option<RenderStats> {
        if self.state != ViewState::Mounted || self.cancel.is_canceled() {
            return None;
        }
        let scene = self.scene.as_mut()?;
        scene.globe.advance();
        match backend.render(scene) {
            Ok(stats) => {
                self.frames_rendered += 1;
                Some(stats)
            }
            Err(err) => {
                log::error!("GlobeView: frame render failed: {err}");
                None
            }
        }
    }

    /// Whether the frame scheduler should request another frame.
    pub fn should_reschedule(&self) -> bool {
        self.state == ViewState::Mounted && !self.cancel.is_canceled()
    }

    /// Handles a host-container resize: recomputes the camera aspect and
    /// resizes the surface. Nothing else changes: in particular the
    /// rotation angle is untouched.
    ///
    /// Idempotent and safe at any call rate; ignored when unmounted.
    pub fn handle_resize(&mut self, backend: &mut dyn RenderBackend, extent: Extent2D) {
        if self.state != ViewState::Mounted {
            return;
        }
        if let Some(scene) = self.scene.as_mut() {
            scene.camera.set_aspect(extent.width, extent.height);
        }
        backend.resize(extent);
    }

    /// Unmounts the view, in order: stop reacting to resizes (state flip),
    /// cancel the pending render loop, then release every GPU resource via
    /// the backend.
    ///
    /// Never panics, is idempotent, and is safe even when initialization
    /// never ran or partially failed. Terminal: the view cannot remount.
    pub fn unmount(&mut self, backend: &mut dyn RenderBackend) {
        if self.state == ViewState::Unmounted && self.cancel.is_canceled() {
            return;
        }
        self.state = ViewState::Unmounted;
        self.cancel.cancel();
        backend.shutdown();
        log::info!(
            "GlobeView unmounted after {} frames",
            self.frames_rendered
        );
    }
}

impl Drop for GlobeView {
    fn drop(&mut self) {
        // The backend is owned by the caller, who is responsible for calling
        // unmount before dropping the view. Cancel regardless so a stray
        // scheduler clone can never request another frame.
        self.cancel.cancel();
        if self.state == ViewState::Mounted {
            log::warn!("GlobeView dropped while still mounted; render loop canceled");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_token_is_sticky() {
        let token = CancelToken::new();
        assert!(!token.is_canceled());
        let clone = token.clone();
        token.cancel();
        assert!(clone.is_canceled());
    }

    #[test]
    fn new_view_is_unmounted_with_no_scene() {
        let view = GlobeView::new(GlobeProps::default());
        assert_eq!(view.state(), ViewState::Unmounted);
        assert!(view.scene().is_none());
        assert_eq!(view.frames_rendered(), 0);
        assert!(!view.should_reschedule());
    }

    #[test]
    fn visited_count_reflects_props() {
        let props = GlobeProps {
            preferred_extent: None,
            visited_codes: vec!["HKG".to_string(), "GBR".to_string()],
        };
        assert_eq!(GlobeView::new(props).visited_count(), 2);
    }

    #[test]
    fn drop_cancels_the_token() {
        let view = GlobeView::new(GlobeProps::default());
        let token = view.cancel_token();
        drop(view);
        assert!(token.is_canceled());
    }
}
