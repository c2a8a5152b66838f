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

use crate::error::SurfaceError;
use serde::{Deserialize, Serialize};

/// The OpenGL profile requested from the host context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ContextProfile {
    /// Core profile, deprecated fixed-function entry points removed.
    Core,
    /// Compatibility profile.
    #[default]
    Compatibility,
    /// Whatever the driver hands out.
    Any,
}

/// Settings used to start the surface's graphics context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Requested context major version.
    pub major_version: u32,
    /// Requested context minor version.
    pub minor_version: u32,
    /// Requested context profile.
    pub profile: ContextProfile,
    /// If `true`, the surface composites with a transparent background.
    pub transparent_background: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            major_version: 3,
            minor_version: 2,
            profile: ContextProfile::Compatibility,
            transparent_background: true,
        }
    }
}

/// A host UI element bearing a graphics context.
///
/// Resize and render notifications are delivered by the host to the model
/// surface (`on_resize`, `on_render`); this trait covers the calls going the
/// other way. Every method is called on the thread that owns the surface.
pub trait RenderSurface: std::fmt::Debug {
    /// Creates the graphics context and makes the surface ready to draw.
    fn start(&mut self, settings: &SurfaceSettings) -> Result<(), SurfaceError>;

    /// If `true`, the host redraws every vsync; otherwise only on request.
    fn set_render_continuously(&mut self, continuous: bool);

    /// Subscribes (`true`) or unsubscribes (`false`) the runtime from per-frame
    /// render notifications.
    fn set_frame_events_enabled(&mut self, enabled: bool);

    /// Invalidates the surface so that a render notification follows.
    fn request_redraw(&self);

    /// Sets the graphics-context viewport in pixels.
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Releases the control and its graphics context.
    fn dispose(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_request_a_transparent_compatibility_context() {
        let settings = SurfaceSettings::default();
        assert_eq!((settings.major_version, settings.minor_version), (3, 2));
        assert_eq!(settings.profile, ContextProfile::Compatibility);
        assert!(settings.transparent_background);
    }
}
