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

//! The model surface: one animated model drawn into one host surface.

use crate::config::ModelSurfaceConfig;
use crate::error::ModelSurfaceError;
use crate::frame_gate::FrameGate;
use crate::framework::{self, FrameworkOptions};
use crate::motion_cache::MotionCache;
use crate::playback::{PlaybackController, PlaybackState};
use crate::ticker::TickGenerator;
use marionette_core::engine::{
    HostBackend, Model, ModelEngine, MotionPriority, MotionQueueEntryHandle,
};
use marionette_core::event::RedrawMailbox;
use marionette_core::motion::FinishedMotionCallback;
use marionette_core::platform::RenderSurface;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// The loaded model and the name it is displayed under.
#[derive(Debug)]
pub struct ModelHandle {
    name: String,
    model: Box<dyn Model>,
}

impl ModelHandle {
    /// The model file name without its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The engine's model instance.
    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }
}

/// Coordinates an engine, its host surface and the model loaded into it.
///
/// All methods must be called on the thread that owns the surface. The host
/// forwards its notifications to [`ModelSurface::on_resize`] and
/// [`ModelSurface::on_render`], and regularly calls
/// [`ModelSurface::process_redraw_requests`] from its UI loop.
#[derive(Debug)]
pub struct ModelSurface {
    name: String,
    surface: Option<Box<dyn RenderSurface>>,
    engine: Option<Box<dyn ModelEngine>>,
    model: Option<ModelHandle>,
    playback: PlaybackController,
    frame_gate: FrameGate,
    motions: MotionCache,
    redraws: RedrawMailbox,
    ticker: Option<TickGenerator>,
}

impl ModelSurface {
    /// Creates the surface, the engine and the model, then starts the tick generator.
    ///
    /// Playback starts stopped. If any step fails, whatever was already created
    /// is disposed in teardown order before the error is returned.
    ///
    /// # Errors
    /// [`ModelSurfaceError::ResourceNotFound`] if `model_path` is not an existing
    /// file; nothing is created in that case.
    pub fn new(
        model_path: impl AsRef<Path>,
        backend: &dyn HostBackend,
        config: ModelSurfaceConfig,
    ) -> Result<Self, ModelSurfaceError> {
        let model_path = model_path.as_ref();
        let (directory, name) = resolve_model_path(model_path)?;
        let frame_gate = FrameGate::new(config.seconds_per_frame)?;
        if config.tick_interval_ms == 0 {
            return Err(ModelSurfaceError::InvalidTickInterval);
        }

        framework::start_up(FrameworkOptions {
            logging_level: config.logging_level,
            ..Default::default()
        });

        log::info!("Creating model surface for '{}'...", model_path.display());

        // Any early return from here on drops `this`, which disposes the parts
        // created so far.
        let mut this = Self {
            name: name.clone(),
            surface: None,
            engine: None,
            model: None,
            playback: PlaybackController::new(),
            frame_gate,
            motions: MotionCache::new(),
            redraws: RedrawMailbox::new(),
            ticker: None,
        };

        let surface = this.surface.insert(backend.create_surface()?);
        surface.start(&config.surface)?;
        log::debug!(
            " -> Surface started ({}.{} {:?}).",
            config.surface.major_version,
            config.surface.minor_version,
            config.surface.profile
        );

        let engine = this.engine.insert(backend.create_engine(&**surface)?);
        engine.set_background_color(config.background_color);

        let model = engine.load_model(&directory, &name)?;
        this.model = Some(ModelHandle { name, model });
        log::info!(" -> Model '{}' loaded from '{}'.", this.name, directory.display());

        if let Some(surface) = this.surface.as_mut() {
            surface.set_render_continuously(false);
        }
        this.ticker = Some(
            TickGenerator::start(config.tick_interval(), this.redraws.poster())
                .map_err(ModelSurfaceError::Timer)?,
        );

        Ok(this)
    }

    /// The model name, derived from the model file name without its extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The loaded model, until the surface is disposed.
    pub fn model(&self) -> Option<&ModelHandle> {
        self.model.as_ref()
    }

    /// Whether render notifications currently drive the engine.
    pub fn is_playing(&self) -> bool {
        self.playback.is_running()
    }

    /// The current playback state.
    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Starts playback and subscribes to the surface's render notifications.
    pub fn start(&mut self) {
        if !self.playback.start() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.set_frame_events_enabled(true);
        }
    }

    /// Stops playback and unsubscribes from the surface's render notifications.
    pub fn stop(&mut self) {
        if !self.playback.stop() {
            return;
        }
        if let Some(surface) = self.surface.as_mut() {
            surface.set_frame_events_enabled(false);
        }
    }

    /// Minimum interval between two engine updates, in seconds.
    pub fn seconds_per_frame(&self) -> f32 {
        self.frame_gate.seconds_per_frame()
    }

    /// Sets the frame period and re-arms the tick generator to match.
    pub fn set_seconds_per_frame(&mut self, seconds: f32) -> Result<(), ModelSurfaceError> {
        self.frame_gate.set_seconds_per_frame(seconds)?;
        self.rearm_ticker();
        Ok(())
    }

    /// Target engine updates per second, the reciprocal of the frame period.
    pub fn frames_per_second(&self) -> f64 {
        self.frame_gate.frames_per_second()
    }

    /// Sets the frame rate and re-arms the tick generator to match.
    pub fn set_frames_per_second(&mut self, fps: f64) -> Result<(), ModelSurfaceError> {
        self.frame_gate.set_frames_per_second(fps)?;
        self.rearm_ticker();
        Ok(())
    }

    /// Time accumulated by the frame gate since the last engine update.
    pub fn pending_frame_time(&self) -> Duration {
        self.frame_gate.accumulated()
    }

    /// The tick generator interval, until the surface is disposed.
    pub fn tick_interval(&self) -> Option<Duration> {
        self.ticker.as_ref().map(TickGenerator::interval)
    }

    fn rearm_ticker(&mut self) {
        let period = self.frame_gate.period();
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.set_interval(period);
        }
    }

    /// Plays the motion file at `path` with force priority.
    ///
    /// The motion is decoded once and cached by path; later calls reuse it and
    /// replace its finished callback with `on_finished`. Playback is started if
    /// needed. Returns `None`, changing nothing, if the file does not exist or
    /// the surface has been disposed.
    pub fn start_motion(
        &mut self,
        path: &str,
        on_finished: Option<FinishedMotionCallback>,
    ) -> Option<MotionQueueEntryHandle> {
        let engine = self.engine.as_deref_mut()?;
        let handle = self.model.as_ref()?;
        let motion = self
            .motions
            .resolve(path, on_finished, engine, &*handle.model)?;

        self.start();

        let handle = self.model.as_mut()?;
        let entry = handle
            .model
            .start_motion_priority(motion, MotionPriority::Force);
        log::debug!("Motion '{path}' queued as {entry:?}.");
        Some(entry)
    }

    /// The motion cache, for inspection.
    pub fn motions(&self) -> &MotionCache {
        &self.motions
    }

    /// Handles a size change of the host surface.
    ///
    /// Dimensions are truncated to whole pixels. Ignored while stopped, before
    /// the engine exists or after disposal, and when either side is zero.
    pub fn on_resize(&mut self, width: f64, height: f64) {
        // `as` truncates toward zero and saturates negatives and NaN to 0.
        let (width, height) = (width as u32, height as u32);
        if width == 0 || height == 0 || !self.playback.is_running() {
            return;
        }
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        engine.resize();
        if let Some(surface) = self.surface.as_mut() {
            surface.set_viewport(0, 0, width, height);
        }
        log::debug!("Model surface '{}' resized to {width}x{height}.", self.name);
    }

    /// Handles a render notification from the host surface.
    ///
    /// Returns `true` if the frame gate let an engine update through.
    pub fn on_render(&mut self, elapsed: Duration) -> bool {
        if !self.playback.is_running() {
            return false;
        }
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };

        match self.frame_gate.tick(elapsed) {
            Some(step) => {
                engine.run(step);
                true
            }
            None => {
                log::trace!("Frame skipped ({:?} accumulated).", self.frame_gate.accumulated());
                false
            }
        }
    }

    /// Turns a pending tick into a surface redraw request.
    ///
    /// Returns `true` if a redraw was requested.
    pub fn process_redraw_requests(&mut self) -> bool {
        if !self.redraws.take_pending() {
            return false;
        }
        match self.surface.as_ref() {
            Some(surface) => {
                surface.request_redraw();
                true
            }
            None => false,
        }
    }

    /// Returns `true` once [`ModelSurface::dispose`] has run.
    pub fn is_disposed(&self) -> bool {
        self.surface.is_none() && self.model.is_none() && self.engine.is_none()
    }

    /// Releases the surface, then the model, then the engine.
    ///
    /// Each part is released at most once; calling this again does nothing.
    pub fn dispose(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
        }
        if self.is_disposed() {
            return;
        }

        if let Some(mut surface) = self.surface.take() {
            surface.dispose();
        }
        if let Some(mut handle) = self.model.take() {
            handle.model.dispose();
        }
        if let Some(mut engine) = self.engine.take() {
            engine.dispose();
        }
        log::info!("Model surface '{}' disposed.", self.name);
    }
}

impl Drop for ModelSurface {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Splits a model path into its containing directory and its base name.
fn resolve_model_path(path: &Path) -> Result<(PathBuf, String), ModelSurfaceError> {
    let not_found = || ModelSurfaceError::ResourceNotFound {
        path: path.to_path_buf(),
    };

    if !path.is_file() {
        return Err(not_found());
    }
    let directory = match path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => return Err(not_found()),
    };
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(not_found)?;

    Ok((directory, name))
}
