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

//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use marionette_sdk::prelude::*;
use std::any::Any;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// One observed call into a collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateSurface,
    SurfaceStart(SurfaceSettings),
    SetRenderContinuously(bool),
    SetFrameEventsEnabled(bool),
    RequestRedraw,
    SetViewport(i32, i32, u32, u32),
    SurfaceDispose,
    CreateEngine,
    SetBackgroundColor([f32; 4]),
    LoadModel(PathBuf, String),
    LoadMotion(PathBuf),
    Run(f32),
    Resize,
    EngineDispose,
    StartMotion(String, MotionPriority),
    ModelDispose,
}

/// Shared, ordered call log.
#[derive(Debug, Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.0.lock().unwrap().clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    pub fn runs(&self) -> Vec<f32> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Run(delta) => Some(delta),
                _ => None,
            })
            .collect()
    }
}

/// Which backend step should fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Failure {
    #[default]
    None,
    CreateSurface,
    StartSurface,
    CreateEngine,
    LoadModel,
}

#[derive(Debug)]
pub struct RecordingSurface {
    log: CallLog,
    fail_start: bool,
}

impl RenderSurface for RecordingSurface {
    fn start(&mut self, settings: &SurfaceSettings) -> Result<(), SurfaceError> {
        self.log.push(Call::SurfaceStart(*settings));
        if self.fail_start {
            return Err(SurfaceError::ContextUnavailable {
                major: settings.major_version,
                minor: settings.minor_version,
                details: "no driver".to_string(),
            });
        }
        Ok(())
    }

    fn set_render_continuously(&mut self, continuous: bool) {
        self.log.push(Call::SetRenderContinuously(continuous));
    }

    fn set_frame_events_enabled(&mut self, enabled: bool) {
        self.log.push(Call::SetFrameEventsEnabled(enabled));
    }

    fn request_redraw(&self) {
        self.log.push(Call::RequestRedraw);
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.log.push(Call::SetViewport(x, y, width, height));
    }

    fn dispose(&mut self) {
        self.log.push(Call::SurfaceDispose);
    }
}

#[derive(Debug)]
pub struct RecordingClip;

impl MotionClip for RecordingClip {
    fn duration(&self) -> Option<Duration> {
        Some(Duration::from_secs(1))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
pub struct RecordingModel {
    log: CallLog,
    eye_blink: Vec<ParameterId>,
    lip_sync: Vec<ParameterId>,
    next_entry: u64,
}

impl Model for RecordingModel {
    fn eye_blink_ids(&self) -> &[ParameterId] {
        &self.eye_blink
    }

    fn lip_sync_ids(&self) -> &[ParameterId] {
        &self.lip_sync
    }

    fn start_motion_priority(
        &mut self,
        motion: MotionHandle,
        priority: MotionPriority,
    ) -> MotionQueueEntryHandle {
        self.log
            .push(Call::StartMotion(motion.source().to_string(), priority));
        self.next_entry += 1;
        MotionQueueEntryHandle(self.next_entry)
    }

    fn dispose(&mut self) {
        self.log.push(Call::ModelDispose);
    }
}

#[derive(Debug)]
pub struct RecordingEngine {
    log: CallLog,
    fail_load_model: bool,
}

impl ModelEngine for RecordingEngine {
    fn run(&mut self, delta_seconds: f32) {
        self.log.push(Call::Run(delta_seconds));
    }

    fn resize(&mut self) {
        self.log.push(Call::Resize);
    }

    fn load_model(
        &mut self,
        directory: &Path,
        base_name: &str,
    ) -> Result<Box<dyn Model>, EngineError> {
        self.log
            .push(Call::LoadModel(directory.to_path_buf(), base_name.to_string()));
        if self.fail_load_model {
            return Err(EngineError::ModelLoad {
                directory: directory.to_path_buf(),
                name: base_name.to_string(),
                details: "corrupt moc".to_string(),
            });
        }
        Ok(Box::new(RecordingModel {
            log: self.log.clone(),
            eye_blink: vec![ParameterId::new("ParamEyeLOpen"), ParameterId::new("ParamEyeROpen")],
            lip_sync: vec![ParameterId::new("ParamMouthOpenY")],
            next_entry: 0,
        }))
    }

    fn load_motion(&mut self, path: &Path) -> Result<Box<dyn MotionClip>, EngineError> {
        self.log.push(Call::LoadMotion(path.to_path_buf()));
        let contents = std::fs::read_to_string(path).map_err(|e| EngineError::MotionLoad {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        if contents.trim().is_empty() {
            return Err(EngineError::MotionLoad {
                path: path.to_path_buf(),
                details: "empty motion file".to_string(),
            });
        }
        Ok(Box::new(RecordingClip))
    }

    fn set_background_color(&mut self, rgba: [f32; 4]) {
        self.log.push(Call::SetBackgroundColor(rgba));
    }

    fn dispose(&mut self) {
        self.log.push(Call::EngineDispose);
    }
}

/// A backend whose collaborators record into a shared [`CallLog`].
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub log: CallLog,
    pub failure: Failure,
}

impl RecordingBackend {
    pub fn failing(failure: Failure) -> Self {
        Self {
            failure,
            ..Default::default()
        }
    }
}

impl HostBackend for RecordingBackend {
    fn create_surface(&self) -> Result<Box<dyn RenderSurface>, SurfaceError> {
        self.log.push(Call::CreateSurface);
        if self.failure == Failure::CreateSurface {
            return Err(SurfaceError::CreationFailed("no window".to_string()));
        }
        Ok(Box::new(RecordingSurface {
            log: self.log.clone(),
            fail_start: self.failure == Failure::StartSurface,
        }))
    }

    fn create_engine(&self, _surface: &dyn RenderSurface) -> Result<Box<dyn ModelEngine>, EngineError> {
        self.log.push(Call::CreateEngine);
        if self.failure == Failure::CreateEngine {
            return Err(EngineError::CreationFailed("no allocator".to_string()));
        }
        Ok(Box::new(RecordingEngine {
            log: self.log.clone(),
            fail_load_model: self.failure == Failure::LoadModel,
        }))
    }
}

/// A temporary model directory with a model file and a couple of motions.
pub struct Fixture {
    pub dir: TempDir,
    pub model_path: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let model_path = dir.path().join("Hiyori.model3.json");
        std::fs::write(&model_path, "{}").unwrap();
        Self { dir, model_path }
    }

    /// Writes a decodable motion file and returns its path.
    pub fn motion(&self, name: &str) -> String {
        self.write(name, "{\"Version\":3}")
    }

    /// Writes a motion file the engine fails to decode.
    pub fn broken_motion(&self, name: &str) -> String {
        self.write(name, "")
    }

    pub fn missing(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    fn write(&self, name: &str, contents: &str) -> String {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }
}

/// Config with a long tick interval so the ticker stays out of the way.
pub fn quiet_config() -> ModelSurfaceConfig {
    ModelSurfaceConfig {
        tick_interval_ms: 10_000,
        ..Default::default()
    }
}

/// Builds a surface over a fresh fixture and recording backend.
pub fn open() -> (ModelSurface, RecordingBackend, Fixture) {
    let fixture = Fixture::new();
    let backend = RecordingBackend::default();
    let surface = ModelSurface::new(&fixture.model_path, &backend, quiet_config()).unwrap();
    backend.log.clear();
    (surface, backend, fixture)
}
