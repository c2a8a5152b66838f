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

//! The public-facing SDK for Marionette.
//!
//! [`ModelSurface`] ties a host surface, a model engine and one loaded model
//! together. It gates engine updates to a configurable frame rate, caches and
//! triggers motions, forwards resizes and tears everything down in order.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod frame_gate;
pub mod framework;
pub mod motion_cache;
pub mod model_surface;
pub mod playback;
pub mod ticker;

pub use self::config::ModelSurfaceConfig;
pub use self::error::ModelSurfaceError;
pub use self::frame_gate::FrameGate;
pub use self::framework::{FrameworkOptions, LogFunction};
pub use self::model_surface::{ModelHandle, ModelSurface};
pub use self::motion_cache::MotionCache;
pub use self::playback::{PlaybackController, PlaybackState};
pub use self::ticker::TickGenerator;

/// Everything a host needs to embed a model surface.
pub mod prelude {
    pub use crate::{ModelSurface, ModelSurfaceConfig, ModelSurfaceError, PlaybackState};
    pub use marionette_core::{
        ContextProfile, EngineError, FinishedMotionCallback, HostBackend, Model, ModelEngine,
        Motion, MotionClip, MotionHandle, MotionPriority, MotionQueueEntryHandle, ParameterId,
        RenderSurface, SurfaceError, SurfaceSettings,
    };
}
