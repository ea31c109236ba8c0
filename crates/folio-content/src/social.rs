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

//! Social profile links.

use serde::{Deserialize, Serialize};

/// One social profile link with its icon key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    /// Platform name.
    pub platform: String,
    /// Profile URL.
    pub url: String,
    /// Accessible label.
    pub label: String,
    /// Icon identifier resolved by the chrome layer.
    pub icon: String,
}

impl SocialLink {
    /// Convenience constructor for literal link lists.
    pub fn new(platform: &str, url: &str, label: &str, icon: &str) -> Self {
        Self {
            platform: platform.to_string(),
            url: url.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
        }
    }

    /// The default link set.
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new(
                "X (Twitter)",
                "https://x.com/jackhau0212",
                "X (Twitter)",
                "x",
            ),
            Self::new(
                "Instagram",
                "https://instagram.com/jackhau0212",
                "Instagram",
                "instagram",
            ),
            Self::new(
                "LinkedIn",
                "https://linkedin.com/in/jackhau",
                "LinkedIn",
                "linkedin",
            ),
            Self::new(
                "GitHub",
                "https://github.com/jackhau0212",
                "GitHub",
                "github",
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_four_platforms() {
        let links = SocialLink::defaults();
        assert_eq!(links.len(), 4);
        assert!(links.iter().all(|l| l.url.starts_with("https://")));
        assert!(links.iter().any(|l| l.icon == "github"));
    }
}
