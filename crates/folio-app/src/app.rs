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

//! The winit event-loop shell wiring content, view, and backend together.
//!
//! Everything runs cooperatively on the UI thread. The render loop is the
//! winit redraw cycle: `RedrawRequested` advances one frame, and
//! `about_to_wait` requests the next redraw only while the view's cancel
//! token is live: that check is what makes teardown deterministic.

use anyhow::Result;
use folio_content::{SiteConfig, Slideshow, ThemePreference};
use folio_core::math::Extent2D;
use folio_core::renderer::HostWindow;
use folio_core::view::{GlobeProps, GlobeView, MountOutcome};
use folio_infra::{WgpuBackend, WinitWindow, WinitWindowBuilder};
use std::path::PathBuf;
use std::time::Instant;
use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::window::WindowId;

/// The running application state.
pub struct FolioApp {
    site: SiteConfig,
    theme: ThemePreference,
    theme_path: Option<PathBuf>,
    slideshow: Slideshow,
    view: GlobeView,
    backend: WgpuBackend,
    window: Option<WinitWindow>,
}

impl FolioApp {
    /// Assembles the app from loaded content and preferences.
    pub fn new(site: SiteConfig, theme: ThemePreference, theme_path: Option<PathBuf>) -> Self {
        let slideshow = Slideshow::new(site.profile.portraits.clone(), Instant::now());
        let props = GlobeProps {
            preferred_extent: Some(Extent2D::new(960, 640)),
            visited_codes: site.journey.visited_codes(),
        };
        Self {
            site,
            theme,
            theme_path,
            slideshow,
            view: GlobeView::new(props),
            backend: WgpuBackend::new(),
            window: None,
        }
    }

    /// Runs the event loop until the window closes.
    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new()?;
        event_loop.run_app(&mut self)?;
        Ok(())
    }

    /// Logs the static page chrome the way the rendered page would lay it
    /// out. The chrome itself is outside the renderer's scope.
    fn log_page_chrome(&self) {
        let profile = &self.site.profile;
        log::info!("Hi - I'm {}: {}", profile.display_name, profile.tagline);
        let nav = &self.site.navigation;
        let labels = |items: &[folio_content::NavItem]| {
            items
                .iter()
                .map(|item| item.label.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        log::info!("Nav: [{}] · [{}]", labels(&nav.left), labels(&nav.right));
        for link in &self.site.social {
            log::debug!("Social: {} -> {}", link.platform, link.url);
        }
        log::info!(
            "My Journey: {} locations and counting",
            self.view.visited_count()
        );
        for stop in &self.site.journey.stops {
            log::debug!(
                "  {} ({}) {}: {}",
                stop.city,
                stop.country_code,
                stop.period,
                stop.note
            );
        }
        log::info!("Theme preference: {:?}", self.theme.mode);
    }

    fn cycle_theme(&mut self) {
        self.theme.mode = self.theme.mode.cycled();
        log::info!("Theme switched to {:?}", self.theme.mode);
        if let Some(path) = &self.theme_path {
            if let Err(err) = self.theme.store(path) {
                log::warn!("Could not persist theme preference: {err}");
            }
        }
    }

    fn handle_key(&mut self, event: &KeyEvent) {
        if event.state != ElementState::Pressed {
            return;
        }
        let now = Instant::now();
        match &event.logical_key {
            Key::Named(NamedKey::ArrowRight) => {
                self.slideshow.next(now);
                log::debug!("Slideshow -> {:?}", self.slideshow.current());
            }
            Key::Named(NamedKey::ArrowLeft) => {
                self.slideshow.prev(now);
                log::debug!("Slideshow -> {:?}", self.slideshow.current());
            }
            Key::Character(text) if text.as_str() == "t" => {
                self.cycle_theme();
            }
            _ => {}
        }
    }
}

impl ApplicationHandler for FolioApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized; nothing to redo on resume.
        }
        log::info!("Application resumed; creating window and mounting the globe...");

        let extent = self
            .view
            .preferred_extent()
            .unwrap_or(Extent2D::new(960, 640));
        let window = match WinitWindowBuilder::new()
            .with_title(format!("{}: folio", self.site.profile.display_name))
            .with_dimensions(extent.width, extent.height)
            .build(event_loop)
        {
            Ok(window) => window,
            Err(err) => {
                // No host container: the globe silently skips mounting.
                log::error!("Window creation failed: {err}");
                self.view.mount(None, &mut self.backend);
                return;
            }
        };

        match self.view.mount(Some(&window), &mut self.backend) {
            MountOutcome::Mounted => {
                self.log_page_chrome();
                window.request_redraw();
            }
            outcome => log::warn!("Globe did not mount: {outcome:?}"),
        }
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        if window.id() != id {
            return;
        }
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested; unmounting and exiting...");
                self.view.unmount(&mut self.backend);
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.view
                    .handle_resize(&mut self.backend, Extent2D::new(size.width, size.height));
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                if self.slideshow.tick(Instant::now()) {
                    log::debug!("Slideshow auto-advanced to {:?}", self.slideshow.current());
                }
                if let Some(stats) = self.view.advance_frame(&mut self.backend) {
                    log::trace!("Frame {} rendered", stats.frame_number);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // The explicit reschedule check: no redraw is ever requested once
        // the view's cancel token fires.
        if self.view.should_reschedule() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}
