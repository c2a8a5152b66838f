// Copyright 2025 eraflo
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

use crate::engine::ModelEngine;
use crate::error::{EngineError, SurfaceError};
use crate::platform::RenderSurface;

/// Creates the host-specific collaborators of a model surface.
///
/// Each windowing integration (a desktop control or a headless test harness)
/// implements this once. The runtime calls it in construction order: the
/// surface first, then the engine bound to it.
pub trait HostBackend {
    /// Creates an unstarted rendering surface.
    fn create_surface(&self) -> Result<Box<dyn RenderSurface>, SurfaceError>;

    /// Creates the engine that draws into `surface`.
    fn create_engine(
        &self,
        surface: &dyn RenderSurface,
    ) -> Result<Box<dyn ModelEngine>, EngineError>;
}
