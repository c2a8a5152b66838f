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

use flume::TrySendError;

/// A single-slot, thread-safe mailbox for redraw requests.
///
/// At most one request is ever pending. Posting while a request is pending is
/// accepted and coalesces with it, since one redraw serves both.
#[derive(Debug)]
pub struct RedrawMailbox {
    sender: flume::Sender<()>,
    receiver: flume::Receiver<()>,
}

impl RedrawMailbox {
    /// Creates an empty mailbox.
    pub fn new() -> Self {
        let (sender, receiver) = flume::bounded(1);
        log::debug!("Redraw mailbox initialized.");
        Self { sender, receiver }
    }

    /// Returns a poster that can be moved to another thread.
    pub fn poster(&self) -> RedrawPoster {
        RedrawPoster {
            sender: self.sender.clone(),
        }
    }

    /// Returns `true` if a request is waiting.
    pub fn is_pending(&self) -> bool {
        !self.receiver.is_empty()
    }

    /// Empties the mailbox, returning `true` if a request was waiting.
    ///
    /// Intended to be called on the thread that owns the surface.
    pub fn take_pending(&self) -> bool {
        self.receiver.drain().count() > 0
    }
}

impl Default for RedrawMailbox {
    fn default() -> Self {
        Self::new()
    }
}

/// The sending side of a [`RedrawMailbox`].
#[derive(Debug, Clone)]
pub struct RedrawPoster {
    sender: flume::Sender<()>,
}

impl RedrawPoster {
    /// Posts a redraw request without blocking.
    ///
    /// Returns `false` once the mailbox has been dropped, which tells the
    /// caller there is nobody left to redraw for.
    pub fn post(&self) -> bool {
        match self.sender.try_send(()) {
            Ok(()) => true,
            Err(TrySendError::Full(())) => {
                log::trace!("Redraw already pending; request coalesced.");
                true
            }
            Err(TrySendError::Disconnected(())) => false,
        }
    }
}
