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

mod common;

use approx::assert_relative_eq;
use common::{open, Call, Fixture, RecordingBackend};
use marionette_sdk::config::DEFAULT_TICK_INTERVAL_MS;
use marionette_sdk::prelude::*;
use std::time::Duration;

const MS_10: Duration = Duration::from_millis(10);

#[test]
fn start_and_stop_toggle_frame_events_once() {
    let (mut surface, backend, _fixture) = open();

    surface.start();
    surface.start();
    assert!(surface.is_playing());
    assert_eq!(surface.playback_state(), PlaybackState::Running);

    surface.stop();
    surface.stop();
    assert!(!surface.is_playing());

    assert_eq!(
        backend.log.calls(),
        vec![
            Call::SetFrameEventsEnabled(true),
            Call::SetFrameEventsEnabled(false),
        ]
    );
}

#[test]
fn stop_on_a_stopped_surface_does_nothing() {
    let (mut surface, backend, _fixture) = open();

    surface.stop();

    assert_eq!(surface.playback_state(), PlaybackState::Stopped);
    assert!(backend.log.calls().is_empty());
}

#[test]
fn render_while_stopped_never_reaches_the_engine() {
    let (mut surface, backend, _fixture) = open();

    assert!(!surface.on_render(Duration::from_secs(5)));

    assert!(backend.log.runs().is_empty());
    assert_eq!(surface.pending_frame_time(), Duration::ZERO);
}

#[test]
fn frames_below_the_period_are_dropped() {
    let (mut surface, backend, _fixture) = open();
    surface.start();

    // 0.016 s period: 10 ms is not enough, 20 ms is.
    assert!(!surface.on_render(MS_10));
    assert_eq!(surface.pending_frame_time(), MS_10);
    assert!(surface.on_render(MS_10));

    assert_eq!(backend.log.runs(), vec![0.016]);
    assert_eq!(surface.pending_frame_time(), Duration::ZERO);
}

#[test]
fn default_period_renders_on_every_sixteen_millisecond_tick() {
    let fixture = Fixture::new();
    let backend = RecordingBackend::default();
    let mut surface =
        ModelSurface::new(&fixture.model_path, &backend, ModelSurfaceConfig::default()).unwrap();
    surface.start();

    let tick = Duration::from_millis(DEFAULT_TICK_INTERVAL_MS);
    let rendered = (0..5).filter(|_| surface.on_render(tick)).count();

    assert_eq!(rendered, 5);
    assert_eq!(backend.log.runs(), vec![0.016; 5]);
}

#[test]
fn dispatch_uses_the_fixed_period_not_the_accumulated_time() {
    let (mut surface, backend, _fixture) = open();
    surface.set_seconds_per_frame(0.25).unwrap();
    surface.start();

    assert!(surface.on_render(Duration::from_secs(1)));
    assert!(!surface.on_render(Duration::from_millis(100)));
    assert!(surface.on_render(Duration::from_millis(150)));

    assert_eq!(backend.log.runs(), vec![0.25, 0.25]);
}

#[test]
fn accumulated_time_survives_a_stop() {
    let (mut surface, backend, _fixture) = open();
    surface.set_seconds_per_frame(0.5).unwrap();
    surface.start();

    surface.on_render(Duration::from_millis(300));
    surface.stop();
    surface.on_render(Duration::from_millis(300));
    surface.start();
    assert!(surface.on_render(Duration::from_millis(300)));

    assert_eq!(backend.log.runs(), vec![0.5]);
}

#[test]
fn period_change_applies_on_the_next_tick() {
    let (mut surface, backend, _fixture) = open();
    surface.set_seconds_per_frame(1.0).unwrap();
    surface.start();

    assert!(!surface.on_render(Duration::from_millis(400)));
    surface.set_seconds_per_frame(0.25).unwrap();
    assert!(surface.on_render(Duration::from_millis(100)));

    assert_eq!(backend.log.runs(), vec![0.25]);
}

#[test]
fn frame_rate_properties_are_reciprocal() {
    let (mut surface, _backend, _fixture) = open();

    assert_relative_eq!(surface.seconds_per_frame(), 0.016);
    assert_relative_eq!(surface.frames_per_second(), 62.5, epsilon = 1e-4);

    surface.set_frames_per_second(30.0).unwrap();
    assert_relative_eq!(surface.seconds_per_frame(), 1.0 / 30.0, epsilon = 1e-6);

    surface.set_seconds_per_frame(0.02).unwrap();
    assert_relative_eq!(surface.frames_per_second(), 50.0, epsilon = 1e-4);
}

#[test]
fn period_change_rearms_the_ticker() {
    let (mut surface, _backend, _fixture) = open();
    assert_eq!(surface.tick_interval(), Some(Duration::from_secs(10)));

    surface.set_seconds_per_frame(0.05).unwrap();
    assert_eq!(surface.tick_interval(), Some(Duration::from_millis(50)));

    surface.set_frames_per_second(20.0).unwrap();
    assert_eq!(surface.tick_interval(), Some(Duration::from_millis(50)));
}

#[test]
fn invalid_periods_are_rejected_and_the_old_one_kept() {
    let (mut surface, _backend, _fixture) = open();

    for seconds in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            surface.set_seconds_per_frame(seconds),
            Err(ModelSurfaceError::InvalidFramePeriod { .. })
        ));
    }
    for fps in [0.0, -60.0, f64::NAN, f64::INFINITY] {
        assert!(surface.set_frames_per_second(fps).is_err());
    }

    assert_relative_eq!(surface.seconds_per_frame(), 0.016);
    assert_eq!(surface.tick_interval(), Some(Duration::from_secs(10)));
}

#[test]
fn periods_beyond_duration_range_are_rejected() {
    let (mut surface, _backend, _fixture) = open();

    assert!(matches!(
        surface.set_seconds_per_frame(1e20),
        Err(ModelSurfaceError::InvalidFramePeriod { .. })
    ));
    assert!(matches!(
        surface.set_frames_per_second(1e-20),
        Err(ModelSurfaceError::InvalidFramePeriod { .. })
    ));

    assert_relative_eq!(surface.seconds_per_frame(), 0.016);
    assert_eq!(surface.tick_interval(), Some(Duration::from_secs(10)));
}

#[test]
fn long_periods_cap_the_tick_interval() {
    let (mut surface, _backend, _fixture) = open();

    surface.set_seconds_per_frame(1e9).unwrap();

    assert_eq!(surface.tick_interval(), Some(Duration::from_secs(60 * 60)));
}

#[test]
fn resize_while_running_resizes_engine_then_viewport() {
    let (mut surface, backend, _fixture) = open();
    surface.start();
    backend.log.clear();

    surface.on_resize(800.7, 600.2);

    assert_eq!(
        backend.log.calls(),
        vec![Call::Resize, Call::SetViewport(0, 0, 800, 600)]
    );
}

#[test]
fn resize_is_ignored_while_stopped() {
    let (mut surface, backend, _fixture) = open();

    surface.on_resize(800.0, 600.0);

    assert!(backend.log.calls().is_empty());
}

#[test]
fn degenerate_sizes_are_ignored() {
    let (mut surface, backend, _fixture) = open();
    surface.start();
    backend.log.clear();

    surface.on_resize(0.0, 600.0);
    surface.on_resize(800.0, 0.0);
    surface.on_resize(0.9, 600.0);
    surface.on_resize(-10.0, 600.0);
    surface.on_resize(f64::NAN, 600.0);

    assert!(backend.log.calls().is_empty());
}
