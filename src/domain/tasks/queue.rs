//! Enqueue boundary for delivery tasks.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::domain::tasks::executor::{ExecutionOutcome, TaskExecutor};
use crate::domain::tasks::{DeliveryTask, TaskCompletion, TaskEnvelope, TaskHandle};

/// Handle for enqueuing delivery tasks from request handlers.
///
/// Two modes:
///
/// - **Channel** (production): the task is sent to a bounded `mpsc` channel
///   consumed by the background worker pool. `enqueue` never waits for
///   execution; if the queue is full the task is dropped with an error log
///   and its handle resolves to [`TaskCompletion::Failed`].
/// - **Eager** (tests): the task runs to its terminal state inline, with
///   retries but no backoff delays, so tests can assert on the returned
///   handle deterministically.
#[derive(Clone)]
pub struct TaskQueue {
    inner: Inner,
}

#[derive(Clone)]
enum Inner {
    Channel {
        tx: mpsc::Sender<TaskEnvelope>,
        max_attempts: u32,
    },
    Eager {
        executor: Arc<TaskExecutor>,
        max_attempts: u32,
    },
}

impl TaskQueue {
    /// Production queue backed by the worker channel.
    pub fn channel(tx: mpsc::Sender<TaskEnvelope>, max_attempts: u32) -> Self {
        Self {
            inner: Inner::Channel { tx, max_attempts },
        }
    }

    /// Test-only synchronous mode; tasks execute in the caller's process.
    pub fn eager(executor: Arc<TaskExecutor>, max_attempts: u32) -> Self {
        Self {
            inner: Inner::Eager {
                executor,
                max_attempts,
            },
        }
    }

    /// Whether the queue can still accept tasks.
    ///
    /// Channel mode reports false once the worker side is gone; eager mode
    /// is always open.
    pub fn is_open(&self) -> bool {
        match &self.inner {
            Inner::Channel { tx, .. } => !tx.is_closed(),
            Inner::Eager { .. } => true,
        }
    }

    /// Enqueues a task and returns a handle to its terminal result.
    ///
    /// In channel mode this returns immediately; the handle is only useful
    /// for tests and is normally dropped.
    pub async fn enqueue(&self, task: DeliveryTask) -> TaskHandle {
        match &self.inner {
            Inner::Channel { tx, max_attempts } => {
                let (envelope, handle) = TaskEnvelope::new(task, *max_attempts);
                if let Err(e) = tx.try_send(envelope) {
                    tracing::error!(
                        task = e.into_inner().task.kind(),
                        "task queue full or closed, dropping task"
                    );
                    // into_inner consumed the envelope; its done sender is
                    // gone, so the handle resolves to Failed on its own.
                }
                handle
            }
            Inner::Eager {
                executor,
                max_attempts,
            } => {
                let (envelope, handle) = TaskEnvelope::new(task, *max_attempts);
                let completion = run_eagerly(executor, &envelope.task, *max_attempts).await;
                envelope.complete(completion);
                handle
            }
        }
    }
}

/// Runs the full attempt loop inline without backoff sleeps.
async fn run_eagerly(
    executor: &TaskExecutor,
    task: &DeliveryTask,
    max_attempts: u32,
) -> TaskCompletion {
    for attempt in 1..=max_attempts {
        match executor.execute(task).await {
            Ok(ExecutionOutcome::Delivered) => return TaskCompletion::Delivered,
            Ok(ExecutionOutcome::SkippedMissing) => return TaskCompletion::Skipped,
            Err(e) if attempt == max_attempts => {
                tracing::error!(task = task.kind(), attempt, error = %e, "task permanently failed");
                return TaskCompletion::Failed;
            }
            Err(e) => {
                tracing::warn!(task = task.kind(), attempt, error = %e, "task failed, retrying eagerly");
            }
        }
    }
    TaskCompletion::Failed
}
