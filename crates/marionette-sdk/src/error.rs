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

//! Errors surfaced by the model surface runtime.

use marionette_core::error::{EngineError, SurfaceError};
use std::fmt;
use std::path::PathBuf;

/// An error returned while building or configuring a [`ModelSurface`](crate::ModelSurface).
#[derive(Debug)]
pub enum ModelSurfaceError {
    /// The model file does not exist or has no resolvable containing directory.
    ResourceNotFound {
        /// The path that was given.
        path: PathBuf,
    },
    /// A frame period must be positive and finite.
    InvalidFramePeriod {
        /// The rejected value, in seconds per frame.
        seconds_per_frame: f64,
    },
    /// The tick interval must be at least one millisecond.
    InvalidTickInterval,
    /// The configuration could not be parsed.
    Config(String),
    /// The host surface failed.
    Surface(SurfaceError),
    /// The engine failed.
    Engine(EngineError),
    /// The tick generator thread could not be spawned.
    Timer(std::io::Error),
}

impl fmt::Display for ModelSurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelSurfaceError::ResourceNotFound { path } => {
                write!(f, "Model resource not found: '{}'", path.display())
            }
            ModelSurfaceError::InvalidFramePeriod { seconds_per_frame } => {
                write!(f, "Invalid frame period: {seconds_per_frame} s")
            }
            ModelSurfaceError::InvalidTickInterval => {
                write!(f, "Tick interval must be at least 1 ms")
            }
            ModelSurfaceError::Config(msg) => write!(f, "Invalid configuration: {msg}"),
            ModelSurfaceError::Surface(err) => write!(f, "Surface error: {err}"),
            ModelSurfaceError::Engine(err) => write!(f, "Engine error: {err}"),
            ModelSurfaceError::Timer(err) => write!(f, "Failed to start tick generator: {err}"),
        }
    }
}

impl std::error::Error for ModelSurfaceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelSurfaceError::Surface(err) => Some(err),
            ModelSurfaceError::Engine(err) => Some(err),
            ModelSurfaceError::Timer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SurfaceError> for ModelSurfaceError {
    fn from(err: SurfaceError) -> Self {
        ModelSurfaceError::Surface(err)
    }
}

impl From<EngineError> for ModelSurfaceError {
    fn from(err: EngineError) -> Self {
        ModelSurfaceError::Engine(err)
    }
}

impl From<serde_json::Error> for ModelSurfaceError {
    fn from(err: serde_json::Error) -> Self {
        ModelSurfaceError::Config(err.to_string())
    }
}
