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

// Marionette Sandbox
// Drives a model surface against a headless backend that only logs.

use std::alloc::Layout;
use std::any::Any;
use std::cell::Cell;
use std::path::Path;
use std::rc::Rc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use marionette_core::memory::get_memory_stats;
use marionette_core::Stopwatch;
use marionette_data::TrackingAllocator;
use marionette_sdk::framework;
use marionette_sdk::prelude::*;

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new(std::alloc::System);

const RUN_FOR: Duration = Duration::from_secs(3);

#[derive(Debug, Default)]
struct HeadlessSurface {
    redraws: Rc<Cell<u32>>,
}

impl RenderSurface for HeadlessSurface {
    fn start(&mut self, settings: &SurfaceSettings) -> Result<(), SurfaceError> {
        log::info!(
            "[surface] context {}.{} {:?}, transparent: {}",
            settings.major_version,
            settings.minor_version,
            settings.profile,
            settings.transparent_background
        );
        Ok(())
    }

    fn set_render_continuously(&mut self, continuous: bool) {
        log::debug!("[surface] render continuously: {continuous}");
    }

    fn set_frame_events_enabled(&mut self, enabled: bool) {
        log::info!("[surface] frame events enabled: {enabled}");
    }

    fn request_redraw(&self) {
        self.redraws.set(self.redraws.get() + 1);
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        log::info!("[surface] viewport ({x}, {y}) {width}x{height}");
    }

    fn dispose(&mut self) {
        log::info!("[surface] disposed after {} redraw requests", self.redraws.get());
    }
}

#[derive(Debug)]
struct Clip(Duration);

impl MotionClip for Clip {
    fn duration(&self) -> Option<Duration> {
        Some(self.0)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug)]
struct HeadlessModel {
    eye_blink: Vec<ParameterId>,
    lip_sync: Vec<ParameterId>,
    queued: u64,
}

impl Model for HeadlessModel {
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
        self.queued += 1;
        log::info!("[model] motion '{}' queued at {priority:?}", motion.source());
        MotionQueueEntryHandle(self.queued)
    }

    fn dispose(&mut self) {
        log::info!("[model] disposed");
    }
}

#[derive(Debug, Default)]
struct HeadlessEngine {
    frames: u64,
    simulated: f64,
}

impl ModelEngine for HeadlessEngine {
    fn run(&mut self, delta_seconds: f32) {
        self.frames += 1;
        self.simulated += f64::from(delta_seconds);
        log::trace!("[engine] frame {} (+{delta_seconds}s)", self.frames);
    }

    fn resize(&mut self) {
        log::info!("[engine] resize");
    }

    fn load_model(
        &mut self,
        directory: &Path,
        base_name: &str,
    ) -> Result<Box<dyn Model>, EngineError> {
        log::info!("[engine] loading '{base_name}' from '{}'", directory.display());
        Ok(Box::new(HeadlessModel {
            eye_blink: vec![ParameterId::new("ParamEyeLOpen"), ParameterId::new("ParamEyeROpen")],
            lip_sync: vec![ParameterId::new("ParamMouthOpenY")],
            queued: 0,
        }))
    }

    fn load_motion(&mut self, path: &Path) -> Result<Box<dyn MotionClip>, EngineError> {
        log::info!("[engine] decoding motion '{}'", path.display());
        let bytes = std::fs::read(path).map_err(|e| EngineError::MotionLoad {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        // Stage the raw curves in framework memory, as a native decoder would.
        if let Some(allocator) = framework::allocator() {
            let layout = Layout::array::<u8>(bytes.len().max(1)).map_err(|e| {
                EngineError::MotionLoad {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
            })?;
            // SAFETY: the layout is non-zero and the block is released with it.
            unsafe {
                let staging = allocator.allocate(layout);
                if !staging.is_null() {
                    staging.copy_from_nonoverlapping(bytes.as_ptr(), bytes.len());
                    allocator.deallocate(staging, layout);
                }
            }
        }
        Ok(Box::new(Clip(Duration::from_millis(1500))))
    }

    fn set_background_color(&mut self, rgba: [f32; 4]) {
        log::debug!("[engine] background {rgba:?}");
    }

    fn dispose(&mut self) {
        log::info!(
            "[engine] disposed after {} frames ({:.2}s simulated)",
            self.frames,
            self.simulated
        );
    }
}

#[derive(Debug, Default)]
struct HeadlessBackend;

impl HostBackend for HeadlessBackend {
    fn create_surface(&self) -> Result<Box<dyn RenderSurface>, SurfaceError> {
        Ok(Box::<HeadlessSurface>::default())
    }

    fn create_engine(&self, _surface: &dyn RenderSurface) -> Result<Box<dyn ModelEngine>, EngineError> {
        Ok(Box::<HeadlessEngine>::default())
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let assets = tempfile::tempdir()?;
    let model_path = assets.path().join("Hiyori.model3.json");
    std::fs::write(&model_path, "{}")?;
    let motion_path = assets.path().join("Hiyori_m01.motion3.json");
    std::fs::write(&motion_path, "{}")?;
    let motion_path = motion_path.to_string_lossy().into_owned();

    let config = ModelSurfaceConfig::from_json_str(r#"{ "seconds_per_frame": 0.033 }"#)?;
    let mut surface = ModelSurface::new(&model_path, &HeadlessBackend, config)?;
    log::info!(
        "Model '{}' ready at {:.1} fps.",
        surface.name(),
        surface.frames_per_second()
    );

    let on_finished: FinishedMotionCallback =
        Arc::new(|motion: &Motion| log::info!("Motion '{}' finished.", motion.source()));
    surface.start_motion(&motion_path, Some(on_finished));
    surface.on_resize(1280.0, 720.0);

    let total = Stopwatch::new();
    let mut frame = Stopwatch::new();
    let mut rendered = 0u32;
    while total.elapsed() < RUN_FOR {
        // Host UI loop: pump pending ticks, then deliver the render notification.
        if surface.process_redraw_requests() && surface.on_render(frame.lap()) {
            rendered += 1;
        }
        thread::sleep(Duration::from_millis(1));
    }

    if let Some(motion) = surface.motions().get(&motion_path) {
        motion.notify_finished();
    }
    surface.stop();
    surface.dispose();

    let stats = get_memory_stats();
    log::info!(
        "Rendered {rendered} frames in {:.2}s. Peak heap: {} bytes, live allocations: {}.",
        total.elapsed_secs_f64(),
        stats.peak_allocated_bytes,
        stats.live_allocations()
    );
    Ok(())
}
