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

//! Process-wide, one-shot start-up of the native framework.
//!
//! The framework is shared by every model surface in the process. The first
//! surface to be created starts it; later ones find it started and skip the
//! step. There is no per-surface teardown.

use log::{Level, LevelFilter};
use marionette_core::memory::FrameworkAllocator;
use marionette_data::TrackingAllocator;
use std::alloc::System;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Receives framework log lines that pass the configured level.
pub type LogFunction = Arc<dyn Fn(&str) + Send + Sync>;

/// Options the framework is started with.
#[derive(Clone)]
pub struct FrameworkOptions {
    /// Allocator engines use for model and motion buffers.
    pub allocator: Arc<dyn FrameworkAllocator>,
    /// Messages less severe than this are discarded.
    pub logging_level: LevelFilter,
    /// Custom sink for framework messages. `None` forwards them to the `log` facade.
    pub log_function: Option<LogFunction>,
}

impl Default for FrameworkOptions {
    fn default() -> Self {
        Self {
            allocator: Arc::new(TrackingAllocator::new(System)),
            logging_level: LevelFilter::Info,
            log_function: None,
        }
    }
}

impl fmt::Debug for FrameworkOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FrameworkOptions")
            .field("allocator", &self.allocator)
            .field("logging_level", &self.logging_level)
            .field("log_function", &self.log_function.is_some())
            .finish()
    }
}

static FRAMEWORK: OnceLock<FrameworkOptions> = OnceLock::new();

/// Returns `true` once [`start_up`] has run in this process.
pub fn is_started() -> bool {
    FRAMEWORK.get().is_some()
}

/// Starts the framework with `options` unless it is already started.
///
/// Returns `true` if this call performed the start-up. Concurrent callers are
/// serialized; exactly one of them wins.
pub fn start_up(options: FrameworkOptions) -> bool {
    let mut performed = false;
    let installed = FRAMEWORK.get_or_init(|| {
        performed = true;
        options
    });

    if performed {
        log::info!(
            "Framework started (logging level: {}).",
            installed.logging_level
        );
    } else {
        log::debug!("Framework already started; start-up skipped.");
    }
    performed
}

/// The allocator the framework was started with.
///
/// Engine backends fetch it to allocate model and motion buffers, so that
/// those buffers show up in the process memory statistics.
pub fn allocator() -> Option<Arc<dyn FrameworkAllocator>> {
    FRAMEWORK.get().map(|fw| fw.allocator.clone())
}

/// The logging level the framework was started with.
pub fn logging_level() -> Option<LevelFilter> {
    FRAMEWORK.get().map(|fw| fw.logging_level)
}

/// Routes a framework message through the configured level and sink.
///
/// Messages emitted before start-up are dropped.
pub fn log_message(level: Level, message: &str) {
    let Some(fw) = FRAMEWORK.get() else {
        return;
    };
    if level > fw.logging_level {
        return;
    }
    match &fw.log_function {
        Some(sink) => sink(message),
        None => log::log!(target: "marionette::framework", level, "{message}"),
    }
}
