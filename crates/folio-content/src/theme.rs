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

//! The theme preference: the only state folio persists.
//!
//! Consumed read-only by the page chrome; the globe renders identically in
//! every theme. Stored as a small JSON document in the user's config
//! directory, written atomically so a crash mid-write can't corrupt it.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};

/// The three theme choices of the toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    /// Always light chrome.
    Light,
    /// Always dark chrome.
    Dark,
    /// Follow the OS preference.
    #[default]
    System,
}

impl ThemeMode {
    /// Cycles light → dark → system → light, the toggle's click order.
    pub fn cycled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::System,
            ThemeMode::System => ThemeMode::Light,
        }
    }
}

/// The persisted preference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemePreference {
    /// The selected mode.
    pub mode: ThemeMode,
}

impl ThemePreference {
    /// The default on-disk location: `<config dir>/folio/theme.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("folio").join("theme.json"))
    }

    /// Loads the preference, falling back to [`ThemeMode::System`] when the
    /// file is missing or unreadable. Never an error: a lost preference
    /// just means the default theme.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(pref) => pref,
                Err(err) => {
                    log::warn!(
                        "Malformed theme preference at '{}' ({err}); using system theme",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Stores the preference atomically: write a sibling temp file, then
    /// rename over the target.
    pub fn store(&self, path: &Path) -> io::Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no parent"))?;
        std::fs::create_dir_all(parent)?;

        let json = serde_json::to_string_pretty(self)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;

        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, path)?;
        log::debug!("Theme preference stored at '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_visits_all_modes() {
        let start = ThemeMode::Light;
        assert_eq!(start.cycled(), ThemeMode::Dark);
        assert_eq!(start.cycled().cycled(), ThemeMode::System);
        assert_eq!(start.cycled().cycled().cycled(), start);
    }

    #[test]
    fn store_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");

        let pref = ThemePreference {
            mode: ThemeMode::Dark,
        };
        pref.store(&path).unwrap();
        assert_eq!(ThemePreference::load(&path), pref);
    }

    #[test]
    fn store_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("theme.json");

        ThemePreference::default().store(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn missing_file_defaults_to_system() {
        let pref = ThemePreference::load(Path::new("/nonexistent/theme.json"));
        assert_eq!(pref.mode, ThemeMode::System);
    }

    #[test]
    fn corrupt_file_defaults_to_system() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.json");
        std::fs::write(&path, "{ definitely not json").unwrap();

        assert_eq!(ThemePreference::load(&path).mode, ThemeMode::System);
    }

    #[test]
    fn mode_serializes_snake_case() {
        let json = serde_json::to_string(&ThemeMode::System).unwrap();
        assert_eq!(json, "\"system\"");
    }
}
