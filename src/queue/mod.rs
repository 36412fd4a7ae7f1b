// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Task queue between the presentation layer and the controller.
//!
//! The queue is multi-producer, single-consumer, FIFO and unbounded.
//! Submitting never blocks, so it is safe to call from a UI thread. The
//! controller takes one task at a time and acknowledges it with
//! [`TaskReceiver::task_done`] once processing finished, which lets callers
//! wait for the queue to drain with [`TaskSender::wait_idle`].
//!
//! No coalescing happens here: two identical discovery tasks are both
//! processed.

mod task;
mod task_queue;

pub use task::{Adjustment, Task};
pub use task_queue::{TaskReceiver, TaskSender, WeakTaskSender, task_queue};
