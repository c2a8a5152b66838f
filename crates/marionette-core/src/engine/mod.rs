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

//! Contracts for the external animation engine that owns model data, pose
//! computation, and drawing.
//!
//! The runtime drives an engine only through these traits; a concrete backend
//! supplies the implementation through a [`HostBackend`].

mod backend;

pub use self::backend::HostBackend;

use crate::error::EngineError;
use crate::motion::{MotionClip, MotionHandle, ParameterId};
use std::path::Path;

/// Priority of a request on a model's motion queue.
///
/// Ordered from weakest to strongest; a request preempts the playing motion
/// when its priority is strictly higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum MotionPriority {
    /// No motion is playing.
    #[default]
    None,
    /// Background motion played when nothing else is.
    Idle,
    /// Regular, user-triggered motion.
    Normal,
    /// Always replaces whatever is playing.
    Force,
}

impl MotionPriority {
    /// Returns `true` if a request at this priority replaces a motion playing at `current`.
    #[inline]
    pub fn preempts(self, current: MotionPriority) -> bool {
        self == MotionPriority::Force || self > current
    }
}

/// Opaque handle to an entry on the engine's motion queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MotionQueueEntryHandle(pub u64);

/// A model instance loaded by a [`ModelEngine`].
pub trait Model: std::fmt::Debug {
    /// Parameters the model settings assign to the eye-blink effect.
    fn eye_blink_ids(&self) -> &[ParameterId];

    /// Parameters the model settings assign to the lip-sync effect.
    fn lip_sync_ids(&self) -> &[ParameterId];

    /// Queues `motion` on the model's motion manager at the given priority.
    fn start_motion_priority(
        &mut self,
        motion: MotionHandle,
        priority: MotionPriority,
    ) -> MotionQueueEntryHandle;

    /// Releases the model's resources.
    fn dispose(&mut self);
}

/// The animation/rendering runtime bound to a single surface.
pub trait ModelEngine: std::fmt::Debug {
    /// Advances the simulation by `delta_seconds` and draws a frame.
    fn run(&mut self, delta_seconds: f32);

    /// Recomputes projection and viewport state after the surface changed size.
    fn resize(&mut self);

    /// Loads the model named `base_name` from `directory`.
    fn load_model(
        &mut self,
        directory: &Path,
        base_name: &str,
    ) -> Result<Box<dyn Model>, EngineError>;

    /// Decodes a motion file. The caller has already checked that it exists.
    fn load_motion(&mut self, path: &Path) -> Result<Box<dyn MotionClip>, EngineError>;

    /// Sets the colour the engine clears to before drawing, as linear RGBA.
    fn set_background_color(&mut self, rgba: [f32; 4]);

    /// Releases the engine and everything it still owns.
    fn dispose(&mut self);
}
