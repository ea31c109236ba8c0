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

//! The portrait slideshow.
//!
//! A circular index over the profile portraits with a single cooperative
//! timer: `tick` is called from the UI loop and auto-advances every three
//! seconds. All mutators take an explicit `now` so the behavior is
//! deterministic under test.

use std::time::{Duration, Instant};

/// How long each portrait is shown before auto-advancing.
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_secs(3);

/// Circular slideshow state over a fixed image list.
#[derive(Debug, Clone)]
pub struct Slideshow {
    images: Vec<String>,
    index: usize,
    shown_since: Instant,
}

impl Slideshow {
    /// Creates a slideshow starting at the first image.
    pub fn new(images: Vec<String>, now: Instant) -> Self {
        Self {
            images,
            index: 0,
            shown_since: now,
        }
    }

    /// The currently shown image path, if any images exist.
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.index).map(String::as_str)
    }

    /// The current index, for the navigation dots.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of images.
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` when there are no images to show.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Advances to the next image, wrapping at the end.
    pub fn next(&mut self, now: Instant) {
        if !self.images.is_empty() {
            self.index = (self.index + 1) % self.images.len();
            self.shown_since = now;
        }
    }

    /// Steps back to the previous image, wrapping at the start.
    pub fn prev(&mut self, now: Instant) {
        if !self.images.is_empty() {
            self.index = (self.index + self.images.len() - 1) % self.images.len();
            self.shown_since = now;
        }
    }

    /// Jumps to a specific image; out-of-range indices are ignored.
    pub fn select(&mut self, index: usize, now: Instant) {
        if index < self.images.len() {
            self.index = index;
            self.shown_since = now;
        }
    }

    /// Auto-advances when the current image has been shown long enough.
    ///
    /// Returns `true` when the slide changed. Call at any rate; only the
    /// elapsed interval matters.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.images.len() < 2 {
            return false;
        }
        if now.duration_since(self.shown_since) >= AUTO_ADVANCE_INTERVAL {
            self.next(now);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_images() -> Vec<String> {
        vec!["a.jpg".to_string(), "b.jpg".to_string(), "c.jpg".to_string()]
    }

    #[test]
    fn next_and_prev_wrap() {
        let t0 = Instant::now();
        let mut show = Slideshow::new(three_images(), t0);
        assert_eq!(show.current(), Some("a.jpg"));

        show.next(t0);
        show.next(t0);
        show.next(t0);
        assert_eq!(show.current(), Some("a.jpg"));

        show.prev(t0);
        assert_eq!(show.current(), Some("c.jpg"));
    }

    #[test]
    fn tick_advances_only_after_the_interval() {
        let t0 = Instant::now();
        let mut show = Slideshow::new(three_images(), t0);

        assert!(!show.tick(t0 + Duration::from_millis(2999)));
        assert_eq!(show.index(), 0);

        assert!(show.tick(t0 + Duration::from_secs(3)));
        assert_eq!(show.index(), 1);
    }

    #[test]
    fn manual_selection_resets_the_interval() {
        let t0 = Instant::now();
        let mut show = Slideshow::new(three_images(), t0);

        let t1 = t0 + Duration::from_millis(2900);
        show.select(2, t1);

        // The old deadline has passed, but selection restarted the clock.
        assert!(!show.tick(t0 + Duration::from_secs(3)));
        assert_eq!(show.index(), 2);

        assert!(show.tick(t1 + Duration::from_secs(3)));
        assert_eq!(show.index(), 0);
    }

    #[test]
    fn select_out_of_range_is_ignored() {
        let t0 = Instant::now();
        let mut show = Slideshow::new(three_images(), t0);
        show.select(7, t0);
        assert_eq!(show.index(), 0);
    }

    #[test]
    fn single_image_never_auto_advances() {
        let t0 = Instant::now();
        let mut show = Slideshow::new(vec!["only.jpg".to_string()], t0);
        assert!(!show.tick(t0 + Duration::from_secs(60)));
        assert_eq!(show.index(), 0);
    }

    #[test]
    fn empty_slideshow_is_inert() {
        let t0 = Instant::now();
        let mut show = Slideshow::new(Vec::new(), t0);
        assert!(show.is_empty());
        assert_eq!(show.current(), None);
        show.next(t0);
        show.prev(t0);
        assert!(!show.tick(t0 + Duration::from_secs(10)));
    }
}
