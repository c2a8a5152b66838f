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

//! Defines the error types reported by the external collaborators.

use std::fmt;
use std::path::PathBuf;

/// An error reported by a [`ModelEngine`](crate::engine::ModelEngine) implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// The engine could not be created for the given surface.
    CreationFailed(String),
    /// The model could not be loaded from its directory.
    ModelLoad {
        /// The directory the model was loaded from.
        directory: PathBuf,
        /// The model's base name (file name without extension).
        name: String,
        /// Details from the engine.
        details: String,
    },
    /// A motion file exists but the engine could not decode it.
    MotionLoad {
        /// The path of the motion file.
        path: PathBuf,
        /// Details from the engine.
        details: String,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::CreationFailed(msg) => write!(f, "Engine creation failed: {msg}"),
            EngineError::ModelLoad {
                directory,
                name,
                details,
            } => {
                write!(
                    f,
                    "Failed to load model '{name}' from '{}': {details}",
                    directory.display()
                )
            }
            EngineError::MotionLoad { path, details } => {
                write!(f, "Failed to load motion '{}': {details}", path.display())
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// An error reported by a [`RenderSurface`](crate::platform::RenderSurface) or by
/// the backend creating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// The host could not create the surface control.
    CreationFailed(String),
    /// The graphics context could not be created with the requested settings.
    ContextUnavailable {
        /// The requested context major version.
        major: u32,
        /// The requested context minor version.
        minor: u32,
        /// Details from the host.
        details: String,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::CreationFailed(msg) => write!(f, "Surface creation failed: {msg}"),
            SurfaceError::ContextUnavailable {
                major,
                minor,
                details,
            } => {
                write!(
                    f,
                    "Graphics context {major}.{minor} unavailable: {details}"
                )
            }
        }
    }
}

impl std::error::Error for SurfaceError {}
