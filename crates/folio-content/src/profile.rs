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

//! The landing-page hero content.

use serde::{Deserialize, Serialize};

/// Who the page is about: the hero heading, subline, bio, and images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// The name shown in the hero heading.
    pub display_name: String,
    /// The pipe-separated interest line under the heading.
    pub tagline: String,
    /// The short bio paragraph.
    pub bio: String,
    /// Portrait image paths cycled by the slideshow.
    pub portraits: Vec<String>,
    /// The animated greeting shown above the heading.
    pub hello_animation: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            display_name: "Jack".to_string(),
            tagline: "AI | Robotics | Machine Learning | Finance | Sports".to_string(),
            bio: "I'm an AI engineer who is passionate at exploring artificial \
                  intelligence, robotics, machine learning, and how technology \
                  shapes our future."
                .to_string(),
            portraits: vec![
                "assets/home/profile_1.jpg".to_string(),
                "assets/home/profile_2.jpg".to_string(),
                "assets/home/profile_3.jpg".to_string(),
            ],
            hello_animation: "assets/home/hello_wave.gif".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_has_three_portraits() {
        let profile = Profile::default();
        assert_eq!(profile.portraits.len(), 3);
        assert!(!profile.display_name.is_empty());
    }
}
