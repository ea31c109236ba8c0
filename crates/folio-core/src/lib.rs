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

//! Foundational crate for the folio workspace.
//!
//! Holds everything the globe renderer needs that is independent of a
//! concrete graphics or windowing backend: the math primitives, the scene
//! model (camera, lights, globe), the [`renderer::RenderBackend`] capability
//! trait that a backend implements, and the [`view::GlobeView`] lifecycle
//! state machine that owns mount, per-frame advance, resize, and teardown.

pub mod math;
pub mod renderer;
pub mod scene;
pub mod view;
