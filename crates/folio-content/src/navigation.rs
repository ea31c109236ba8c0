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

//! The navbar link configuration.

use serde::{Deserialize, Serialize};

/// One navigation link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Visible label.
    pub label: String,
    /// Route the link points at.
    pub href: String,
}

impl NavItem {
    /// Convenience constructor for literal link lists.
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// The navbar's two link groups, flanking the centered home mark.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Links left of the mark.
    pub left: Vec<NavItem>,
    /// Links right of the mark.
    pub right: Vec<NavItem>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            left: vec![NavItem::new("About", "/about"), NavItem::new("Work", "/work")],
            right: vec![NavItem::new("Thoughts", "/thoughts")],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_navigation_is_asymmetric() {
        let nav = NavigationConfig::default();
        assert_eq!(nav.left.len(), 2);
        assert_eq!(nav.right.len(), 1);
        assert_eq!(nav.left[0], NavItem::new("About", "/about"));
        assert_eq!(nav.right[0].href, "/thoughts");
    }
}
