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

// Folio desktop shell
// Landing page with the rotating globe

mod app;

use anyhow::Result;
use app::FolioApp;
use folio_content::{SiteConfig, ThemePreference};
use std::path::Path;

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let site = SiteConfig::load_or_default(Path::new("folio.json"));

    let theme_path = ThemePreference::default_path();
    let theme = theme_path
        .as_deref()
        .map(ThemePreference::load)
        .unwrap_or_default();

    FolioApp::new(site, theme, theme_path).run()?;
    Ok(())
}
