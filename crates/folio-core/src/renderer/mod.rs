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

//! Backend-agnostic rendering contracts.
//!
//! The globe view never talks to a graphics API directly; it drives a
//! [`RenderBackend`] through the small capability surface defined here, so
//! the lifecycle logic is testable against a fake and portable across
//! bindings.

pub mod error;
pub mod stats;
pub mod surface;
pub mod texture;
pub mod traits;

pub use error::{RenderError, SurfaceError, TextureError};
pub use stats::{RenderStats, ResourceCensus};
pub use surface::{SampleCount, ShadowMode, SurfaceDescriptor};
pub use texture::{
    texture_channel, CpuTexture, TextureLoadResult, TextureReceiver, TextureSender, TextureSlot,
};
pub use traits::{HostWindow, HostWindowHandle, RenderBackend, WindowHandleProvider};
