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

//! Configuration of a model surface.

use crate::error::ModelSurfaceError;
use crate::frame_gate::DEFAULT_SECONDS_PER_FRAME;
use log::LevelFilter;
use marionette_core::platform::SurfaceSettings;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default interval of the redraw tick generator, in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Settings applied when a [`ModelSurface`](crate::ModelSurface) is created.
///
/// Every field has a default, so a JSON document only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSurfaceConfig {
    /// Minimum interval between two engine updates, in seconds.
    pub seconds_per_frame: f32,
    /// Initial interval of the redraw tick generator, in milliseconds.
    pub tick_interval_ms: u64,
    /// Graphics context requested from the host surface.
    pub surface: SurfaceSettings,
    /// Clear colour handed to the engine, as linear RGBA.
    pub background_color: [f32; 4],
    /// Logging level of the native framework. Only the first surface created
    /// in a process decides it.
    pub logging_level: LevelFilter,
}

impl Default for ModelSurfaceConfig {
    fn default() -> Self {
        Self {
            seconds_per_frame: DEFAULT_SECONDS_PER_FRAME,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            surface: SurfaceSettings::default(),
            background_color: [0.0, 0.0, 0.0, 0.0],
            logging_level: LevelFilter::Info,
        }
    }
}

impl ModelSurfaceConfig {
    /// Parses a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ModelSurfaceError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The tick generator interval as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
