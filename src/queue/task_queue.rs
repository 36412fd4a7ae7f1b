// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Unbounded FIFO queue with per-task acknowledgement.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};

use super::{Adjustment, Task};
use crate::types::Serial;

/// Creates a new task queue.
///
/// The sender half can be cloned freely and used from any thread, including
/// threads that are not running a tokio runtime. The receiver half belongs to
/// the single consumer.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use keylight_lib::queue::{Task, task_queue};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let (tasks, mut receiver) = task_queue();
/// tasks.discover(Duration::from_secs(2));
///
/// let task = receiver.take().await.unwrap();
/// assert_eq!(task, Task::discover(Duration::from_secs(2)));
/// receiver.task_done();
///
/// tasks.wait_idle().await;
/// # }
/// ```
#[must_use]
pub fn task_queue() -> (TaskSender, TaskReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    let (pending, _) = watch::channel(0usize);
    let pending = Arc::new(pending);

    (
        TaskSender {
            tx,
            pending: Arc::clone(&pending),
        },
        TaskReceiver { rx, pending },
    )
}

/// Producer half of the task queue.
#[derive(Debug, Clone)]
pub struct TaskSender {
    tx: mpsc::UnboundedSender<Task>,
    /// Number of submitted tasks not yet acknowledged.
    pending: Arc<watch::Sender<usize>>,
}

impl TaskSender {
    /// Submits a task without blocking.
    ///
    /// Returns `false` if the consumer is gone and the task was dropped.
    pub fn submit(&self, task: impl Into<Task>) -> bool {
        submit(&self.tx, &self.pending, task.into())
    }

    /// Submits a discovery task.
    pub fn discover(&self, timeout: Duration) -> bool {
        self.submit(Task::discover(timeout))
    }

    /// Submits a status query task.
    pub fn query(&self, serial: impl Into<Serial>) -> bool {
        self.submit(Task::query(serial))
    }

    /// Submits an adjustment task.
    pub fn adjust(&self, adjustment: Adjustment) -> bool {
        self.submit(Task::Adjust(adjustment))
    }

    /// Returns the number of submitted tasks that have not been acknowledged.
    #[must_use]
    pub fn pending(&self) -> usize {
        *self.pending.borrow()
    }

    /// Waits until every submitted task has been acknowledged.
    ///
    /// Tasks submitted while waiting, including the ones the controller
    /// submits for itself, are waited for as well. Also resolves once the
    /// [`TaskReceiver`] is dropped, as its remaining tasks are discarded.
    pub async fn wait_idle(&self) {
        let mut rx = self.pending.subscribe();
        // The sender is kept alive by `self`, so this cannot fail.
        let _ = rx.wait_for(|pending| *pending == 0).await;
    }

    /// Returns `true` if the consumer has been dropped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    /// Creates a sender that does not keep the queue open.
    #[must_use]
    pub fn downgrade(&self) -> WeakTaskSender {
        WeakTaskSender {
            tx: self.tx.downgrade(),
            pending: Arc::clone(&self.pending),
        }
    }
}

/// Sender that does not count towards keeping the queue open.
///
/// Once every [`TaskSender`] is dropped, [`TaskReceiver::take`] returns
/// `None` even if weak senders still exist.
#[derive(Debug, Clone)]
pub struct WeakTaskSender {
    tx: mpsc::WeakUnboundedSender<Task>,
    pending: Arc<watch::Sender<usize>>,
}

impl WeakTaskSender {
    /// Submits a task if the queue is still open.
    pub fn submit(&self, task: impl Into<Task>) -> bool {
        let Some(tx) = self.tx.upgrade() else {
            tracing::debug!("Task queue closed, dropping follow-up task");
            return false;
        };
        submit(&tx, &self.pending, task.into())
    }
}

fn submit(tx: &mpsc::UnboundedSender<Task>, pending: &watch::Sender<usize>, task: Task) -> bool {
    pending.send_modify(|n| *n += 1);

    if let Err(mpsc::error::SendError(task)) = tx.send(task) {
        pending.send_modify(|n| *n = n.saturating_sub(1));
        tracing::warn!(kind = task.kind(), "Task queue closed, dropping task");
        return false;
    }

    true
}

/// Consumer half of the task queue.
#[derive(Debug)]
pub struct TaskReceiver {
    rx: mpsc::UnboundedReceiver<Task>,
    pending: Arc<watch::Sender<usize>>,
}

impl TaskReceiver {
    /// Waits for the next task.
    ///
    /// Returns `None` once the queue is empty and every [`TaskSender`] has
    /// been dropped.
    pub async fn take(&mut self) -> Option<Task> {
        self.rx.recv().await
    }

    /// Takes the next task if one is already queued.
    pub fn try_take(&mut self) -> Option<Task> {
        self.rx.try_recv().ok()
    }

    /// Acknowledges that a taken task has been fully processed.
    pub fn task_done(&self) {
        self.pending.send_modify(|n| *n = n.saturating_sub(1));
    }
}

impl Drop for TaskReceiver {
    /// Queued and unacknowledged tasks are discarded with the consumer.
    fn drop(&mut self) {
        let discarded = self.pending.send_replace(0);
        if discarded > 0 {
            tracing::debug!(discarded, "Task queue consumer dropped with pending tasks");
        }
    }
}
