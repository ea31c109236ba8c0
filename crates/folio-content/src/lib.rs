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

//! Page content and lightweight UI state for the folio shell.
//!
//! Everything here is declarative data or a tiny cooperative state
//! machine: who the page is about, where the links go, which portrait the
//! slideshow is on, and the one persisted preference (the theme). The
//! globe renderer proper lives in `folio-core`/`folio-infra`.

pub mod journey;
pub mod navigation;
pub mod profile;
pub mod slideshow;
pub mod social;
pub mod theme;

pub use journey::{Journey, Stop};
pub use navigation::{NavItem, NavigationConfig};
pub use profile::Profile;
pub use slideshow::Slideshow;
pub use social::SocialLink;
pub use theme::{ThemeMode, ThemePreference};

use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full declarative content of the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Who the page is about.
    pub profile: Profile,
    /// The navbar link lists.
    pub navigation: NavigationConfig,
    /// Footer/social links.
    pub social: Vec<SocialLink>,
    /// The travel timeline next to the globe.
    pub journey: Journey,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            profile: Profile::default(),
            navigation: NavigationConfig::default(),
            social: SocialLink::defaults(),
            journey: Journey::default(),
        }
    }
}

impl SiteConfig {
    /// Loads the site configuration from a JSON file, falling back to the
    /// built-in content when the file is missing or malformed.
    ///
    /// Content problems are never fatal to the page; they are logged and
    /// defaulted over.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(config) => config,
                Err(err) => {
                    log::warn!(
                        "Malformed site config at '{}' ({err}); using built-in content",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::debug!(
                    "No site config at '{}' ({err}); using built-in content",
                    path.display()
                );
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_json() {
        let config = SiteConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: SiteConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn load_falls_back_on_missing_file() {
        let config = SiteConfig::load_or_default(Path::new("/nonexistent/site.json"));
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_falls_back_on_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();
        let config = SiteConfig::load_or_default(file.path());
        assert_eq!(config, SiteConfig::default());
    }

    #[test]
    fn load_reads_a_valid_file() {
        let mut config = SiteConfig::default();
        config.profile.display_name = "Someone Else".to_string();

        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string(&config).unwrap()).unwrap();

        let loaded = SiteConfig::load_or_default(file.path());
        assert_eq!(loaded.profile.display_name, "Someone Else");
    }
}
