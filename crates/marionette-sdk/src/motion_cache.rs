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

//! Cache of decoded motions, keyed by the path they were requested with.

use marionette_core::engine::{Model, ModelEngine};
use marionette_core::motion::{EffectBindings, FinishedMotionCallback, Motion, MotionHandle};
use std::collections::HashMap;
use std::path::Path;

/// Maps a motion path to the motion decoded from it.
///
/// Keys are compared as exact, case-sensitive strings. An entry is created once
/// and keeps its identity for the lifetime of the cache; later requests only
/// replace its finished callback.
#[derive(Debug, Default)]
pub struct MotionCache {
    entries: HashMap<String, MotionHandle>,
}

impl MotionCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the motion for `path`, loading and caching it on first use.
    ///
    /// Returns `None` without touching the cache when `path` is not an existing
    /// file, or when the engine cannot decode it. On a cache hit the entry's
    /// finished callback is overwritten with `on_finished`, even when that is `None`.
    pub fn resolve(
        &mut self,
        path: &str,
        on_finished: Option<FinishedMotionCallback>,
        engine: &mut dyn ModelEngine,
        model: &dyn Model,
    ) -> Option<MotionHandle> {
        if !Path::new(path).is_file() {
            return None;
        }

        if let Some(handle) = self.entries.get(path) {
            handle.set_finished_callback(on_finished);
            return Some(handle.clone());
        }

        let clip = match engine.load_motion(Path::new(path)) {
            Ok(clip) => clip,
            Err(e) => {
                log::warn!("Motion '{path}' could not be loaded: {e}");
                return None;
            }
        };

        let effects = EffectBindings {
            eye_blink: model.eye_blink_ids().to_vec(),
            lip_sync: model.lip_sync_ids().to_vec(),
        };
        let handle = MotionHandle::new(Motion::new(path, clip, effects, on_finished));
        self.entries.insert(path.to_owned(), handle.clone());
        log::debug!("Motion '{path}' cached ({} entries).", self.entries.len());

        Some(handle)
    }

    /// Returns the cached motion for `path`, if any.
    pub fn get(&self, path: &str) -> Option<&MotionHandle> {
        self.entries.get(path)
    }

    /// Returns `true` if `path` has been cached.
    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Number of cached motions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
