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

//! The frame gate decides whether a render notification becomes an engine update.

use crate::error::ModelSurfaceError;
use std::time::Duration;

/// Default minimum interval between two engine updates, in seconds.
pub const DEFAULT_SECONDS_PER_FRAME: f32 = 0.016;

/// Accumulates elapsed time and releases one fixed-step frame per period.
///
/// Frames that arrive before the period has elapsed are dropped, never queued:
/// a long stall yields a single update, not a burst of catch-up frames. The
/// update is always issued with the configured period rather than the real
/// accumulated time, so animation speed is independent of host jitter.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameGate {
    accumulated: Duration,
    seconds_per_frame: f32,
    // Compared against `accumulated`; whole microseconds so that 0.016 s is 16 ms.
    period: Duration,
}

impl FrameGate {
    /// Creates a gate with the given period in seconds.
    pub fn new(seconds_per_frame: f32) -> Result<Self, ModelSurfaceError> {
        Ok(Self {
            accumulated: Duration::ZERO,
            seconds_per_frame,
            period: validate(seconds_per_frame)?,
        })
    }

    /// Feeds the time elapsed since the previous render notification.
    ///
    /// Returns the step to hand to the engine when the period is reached, in
    /// which case the accumulator is reset to zero.
    pub fn tick(&mut self, elapsed: Duration) -> Option<f32> {
        self.accumulated = self.accumulated.saturating_add(elapsed);
        if self.accumulated < self.period {
            return None;
        }
        self.accumulated = Duration::ZERO;
        Some(self.seconds_per_frame)
    }

    /// Time accumulated since the last released frame.
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    /// The frame period in seconds.
    pub fn seconds_per_frame(&self) -> f32 {
        self.seconds_per_frame
    }

    /// The frame rate, the reciprocal of [`FrameGate::seconds_per_frame`].
    pub fn frames_per_second(&self) -> f64 {
        1.0 / f64::from(self.seconds_per_frame)
    }

    /// The frame period as a `Duration`.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Changes the period. Takes effect on the next tick; the accumulator is kept.
    pub fn set_seconds_per_frame(&mut self, seconds: f32) -> Result<(), ModelSurfaceError> {
        self.period = validate(seconds)?;
        self.seconds_per_frame = seconds;
        Ok(())
    }

    /// Changes the period through its reciprocal.
    pub fn set_frames_per_second(&mut self, fps: f64) -> Result<(), ModelSurfaceError> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(ModelSurfaceError::InvalidFramePeriod {
                seconds_per_frame: 1.0 / fps,
            });
        }
        self.set_seconds_per_frame((1.0 / fps) as f32)
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self {
            accumulated: Duration::ZERO,
            seconds_per_frame: DEFAULT_SECONDS_PER_FRAME,
            period: Duration::from_millis(16),
        }
    }
}

/// Converts a period to a `Duration`, rounded to the microsecond.
///
/// Rejects values that are not finite, round to zero or do not fit.
fn validate(seconds: f32) -> Result<Duration, ModelSurfaceError> {
    let micros = (f64::from(seconds) * 1_000_000.0).round();
    if seconds.is_finite() && micros >= 1.0 && micros < u64::MAX as f64 {
        Ok(Duration::from_micros(micros as u64))
    } else {
        Err(ModelSurfaceError::InvalidFramePeriod {
            seconds_per_frame: f64::from(seconds),
        })
    }
}
