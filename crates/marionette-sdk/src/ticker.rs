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

//! Background tick generator that wakes the host up for redraws.

use flume::RecvTimeoutError;
use marionette_core::event::RedrawPoster;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Shortest interval the generator accepts.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Longest interval the generator waits between two ticks.
const MAX_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug)]
enum TickCommand {
    SetInterval(Duration),
    Stop,
}

/// A periodic timer thread that posts a redraw request on every tick.
///
/// It is a coarse wake-up signal only: it never touches the engine, and ticks
/// fire whether or not playback is running. The frame gate decides what a
/// redraw actually does.
#[derive(Debug)]
pub struct TickGenerator {
    control: flume::Sender<TickCommand>,
    thread: Option<JoinHandle<()>>,
    interval: Duration,
}

impl TickGenerator {
    /// Spawns the timer thread.
    pub fn start(interval: Duration, poster: RedrawPoster) -> std::io::Result<Self> {
        let interval = interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        let (control, commands) = flume::unbounded();

        let thread = thread::Builder::new()
            .name("marionette-ticker".to_string())
            .spawn(move || run(interval, &commands, &poster))?;

        log::debug!("Tick generator started ({interval:?}).");
        Ok(Self {
            control,
            thread: Some(thread),
            interval,
        })
    }

    /// The current tick interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Re-arms the timer with a new interval.
    pub fn set_interval(&mut self, interval: Duration) {
        let interval = interval.clamp(MIN_INTERVAL, MAX_INTERVAL);
        self.interval = interval;
        if self.control.send(TickCommand::SetInterval(interval)).is_err() {
            log::debug!("Tick generator already exited; interval change ignored.");
        }
    }

    /// Returns `true` while the timer thread is alive.
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stops the thread and waits for it. Safe to call more than once.
    pub fn stop(&mut self) {
        let Some(thread) = self.thread.take() else {
            return;
        };
        let _ = self.control.send(TickCommand::Stop);
        if thread.join().is_err() {
            log::error!("Tick generator thread panicked.");
        }
        log::debug!("Tick generator stopped.");
    }
}

impl Drop for TickGenerator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run(mut interval: Duration, commands: &flume::Receiver<TickCommand>, poster: &RedrawPoster) {
    loop {
        match commands.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {
                if !poster.post() {
                    log::debug!("Redraw mailbox closed; tick generator exiting.");
                    break;
                }
            }
            Ok(TickCommand::SetInterval(new_interval)) => interval = new_interval,
            Ok(TickCommand::Stop) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}
