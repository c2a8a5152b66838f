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

//! # Marionette Core
//!
//! Foundational crate containing the traits, core types, and interface contracts
//! shared by every part of the model surface runtime.
//!
//! The animation engine and the host surface are external collaborators. This
//! crate only describes them ([`engine::ModelEngine`], [`engine::Model`],
//! [`platform::RenderSurface`]); the scheduling logic that drives them lives in
//! `marionette-sdk`.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod event;
pub mod memory;
pub mod motion;
pub mod platform;
pub mod utils;

pub use engine::{HostBackend, Model, ModelEngine, MotionPriority, MotionQueueEntryHandle};
pub use error::{EngineError, SurfaceError};
pub use event::{RedrawMailbox, RedrawPoster};
pub use motion::{
    EffectBindings, FinishedMotionCallback, Motion, MotionClip, MotionHandle, ParameterId,
};
pub use platform::{ContextProfile, RenderSurface, SurfaceSettings};
pub use utils::timer::Stopwatch;
