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

//! Motion clips and the shared handle the motion cache and the engine's motion
//! queue both hold.

use std::any::Any;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

/// Identifies a model parameter that an effect (eye blink, lip sync) drives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParameterId(String);

impl ParameterId {
    /// Creates a parameter identifier from its name in the model settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the parameter name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Engine-specific, already decoded motion data.
///
/// The runtime never looks inside a clip; it only stores it and hands it back to
/// the engine's motion queue. Engines recover their concrete type via [`MotionClip::as_any`].
pub trait MotionClip: fmt::Debug + Send + Sync {
    /// Returns the length of one play-through, or `None` for a looping clip.
    fn duration(&self) -> Option<Duration>;

    /// Downcast to Any for type-specific access.
    fn as_any(&self) -> &dyn Any;
}

/// The model parameters a motion drives besides its own curves.
///
/// Bound once, when the motion first enters the cache.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectBindings {
    /// Parameters driven by the eye-blink effect.
    pub eye_blink: Vec<ParameterId>,
    /// Parameters driven by the lip-sync effect.
    pub lip_sync: Vec<ParameterId>,
}

/// Invoked by the engine when a queued motion finishes playing.
pub type FinishedMotionCallback = Arc<dyn Fn(&Motion) + Send + Sync>;

/// A decoded motion together with its effect bindings and its finished callback.
pub struct Motion {
    source: String,
    clip: Box<dyn MotionClip>,
    effects: EffectBindings,
    // A single slot: a new callback replaces the previous one, it never chains.
    on_finished: Mutex<Option<FinishedMotionCallback>>,
}

impl Motion {
    /// Creates a motion loaded from `source`.
    pub fn new(
        source: impl Into<String>,
        clip: Box<dyn MotionClip>,
        effects: EffectBindings,
        on_finished: Option<FinishedMotionCallback>,
    ) -> Self {
        Self {
            source: source.into(),
            clip,
            effects,
            on_finished: Mutex::new(on_finished),
        }
    }

    /// The path the motion was loaded from, exactly as it was requested.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The engine-specific clip data.
    pub fn clip(&self) -> &dyn MotionClip {
        self.clip.as_ref()
    }

    /// The eye-blink and lip-sync parameters bound to this motion.
    pub fn effects(&self) -> &EffectBindings {
        &self.effects
    }

    /// Returns the callback currently installed, if any.
    pub fn finished_callback(&self) -> Option<FinishedMotionCallback> {
        self.on_finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the finished callback. Passing `None` clears it.
    pub fn set_finished_callback(&self, callback: Option<FinishedMotionCallback>) {
        *self
            .on_finished
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = callback;
    }

    /// Called by the engine's motion queue when this motion has finished.
    pub fn notify_finished(&self) {
        // Cloned out so the callback may itself replace the slot.
        if let Some(callback) = self.finished_callback() {
            callback(self);
        }
    }
}

impl fmt::Debug for Motion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Motion")
            .field("source", &self.source)
            .field("clip", &self.clip)
            .field("effects", &self.effects)
            .field("has_finished_callback", &self.finished_callback().is_some())
            .finish()
    }
}

/// A cheap, reference-counted handle to a cached [`Motion`].
///
/// Cloning a handle does not duplicate the motion; two handles compare equal
/// with [`MotionHandle::ptr_eq`] when they point at the same cache entry.
#[derive(Debug, Clone)]
pub struct MotionHandle(Arc<Motion>);

impl MotionHandle {
    /// Wraps a freshly loaded motion.
    pub fn new(motion: Motion) -> Self {
        Self(Arc::new(motion))
    }

    /// Returns `true` if both handles refer to the same motion instance.
    pub fn ptr_eq(&self, other: &MotionHandle) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for MotionHandle {
    type Target = Motion;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
