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

//! Running/stopped state machine of a model surface.

/// Whether render notifications currently drive the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// Render notifications and resizes are ignored.
    #[default]
    Stopped,
    /// Render notifications go through the frame gate to the engine.
    Running,
}

impl PlaybackState {
    /// Get the name of this playback state.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
        }
    }

    /// Check if the surface is actively rendering.
    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Owns the [`PlaybackState`]; the only place it may change.
///
/// Transitions report whether they actually happened so that the caller can
/// apply the surface subscription exactly once per real change.
#[derive(Debug, Default)]
pub struct PlaybackController {
    state: PlaybackState,
}

impl PlaybackController {
    /// Creates a stopped controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current state.
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// Shorthand for `state().is_running()`.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Moves to [`PlaybackState::Running`]. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        self.transition(PlaybackState::Running)
    }

    /// Moves to [`PlaybackState::Stopped`]. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        self.transition(PlaybackState::Stopped)
    }

    fn transition(&mut self, to: PlaybackState) -> bool {
        if self.state == to {
            return false;
        }
        log::debug!("Playback {} -> {}", self.state.name(), to.name());
        self.state = to;
        true
    }
}
