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

//! Provides the primitive used to marshal redraw requests between threads.
//!
//! The tick generator runs on its own thread but must never touch the engine.
//! It only posts into a [`RedrawMailbox`], and the thread owning the surface
//! drains the mailbox and issues the actual redraw.

mod mailbox;

pub use self::mailbox::{RedrawMailbox, RedrawPoster};
