//! Background worker loop for delivery tasks.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::{OwnedSemaphorePermit, Semaphore, mpsc};

use crate::domain::tasks::executor::{ExecutionOutcome, TaskExecutor};
use crate::domain::tasks::retry::RetryPolicy;
use crate::domain::tasks::{TaskCompletion, TaskEnvelope, TaskStatus};
use crate::error::AppError;

/// Runtime settings for the worker pool.
#[derive(Debug, Clone, Copy)]
pub struct WorkerConfig {
    /// Maximum number of task attempts executing concurrently.
    pub concurrency: usize,
    /// Hard per-attempt execution time limit; a timed-out attempt is a
    /// retryable failure.
    pub time_limit: Duration,
    pub retry_policy: RetryPolicy,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            time_limit: Duration::from_secs(30),
            retry_policy: RetryPolicy::default(),
        }
    }
}

/// Consumes task envelopes from the queue and drives the retry state machine.
///
/// Each envelope is executed on its own spawned task, bounded by a
/// concurrency semaphore. Retryable failures release their worker slot,
/// sleep out their backoff, and re-send the envelope into the same channel
/// via `retry_tx`; terminal outcomes resolve the envelope's handle. The
/// semaphore bounds executing attempts only, so a backlog of retries waiting
/// out their delay never starves fresh tasks.
///
/// The loop exits when all senders (including retry senders held by
/// in-flight attempts) are dropped.
pub async fn run_task_worker(
    mut rx: mpsc::Receiver<TaskEnvelope>,
    retry_tx: mpsc::Sender<TaskEnvelope>,
    executor: Arc<TaskExecutor>,
    config: WorkerConfig,
) {
    let semaphore = Arc::new(Semaphore::new(config.concurrency));

    while let Some(envelope) = rx.recv().await {
        let Ok(permit) = semaphore.clone().acquire_owned().await else {
            break;
        };
        let executor = executor.clone();
        let retry_tx = retry_tx.clone();

        tokio::spawn(run_attempt(envelope, executor, config, retry_tx, permit));
    }
}

async fn run_attempt(
    mut envelope: TaskEnvelope,
    executor: Arc<TaskExecutor>,
    config: WorkerConfig,
    retry_tx: mpsc::Sender<TaskEnvelope>,
    permit: OwnedSemaphorePermit,
) {
    let kind = envelope.task.kind();
    envelope.attempt += 1;
    let attempt = envelope.attempt;

    tracing::debug!(task = kind, attempt, status = ?TaskStatus::Running, "executing task");

    let result = match tokio::time::timeout(config.time_limit, executor.execute(&envelope.task))
        .await
    {
        Ok(result) => result,
        Err(_) => Err(AppError::internal(
            "Task execution exceeded time limit",
            json!({ "limit_secs": config.time_limit.as_secs() }),
        )),
    };

    match result {
        Ok(ExecutionOutcome::Delivered) => {
            tracing::debug!(task = kind, attempt, status = ?TaskStatus::Succeeded, "task succeeded");
            envelope.complete(TaskCompletion::Delivered);
        }
        Ok(ExecutionOutcome::SkippedMissing) => {
            // Detail already logged at warning level by the executor.
            envelope.complete(TaskCompletion::Skipped);
        }
        Err(e) => match TaskStatus::after_attempt(false, attempt, envelope.max_attempts) {
            TaskStatus::FailedTerminal => {
                tracing::error!(
                    task = kind,
                    attempt,
                    max_attempts = envelope.max_attempts,
                    error = %e,
                    "task permanently failed"
                );
                envelope.complete(TaskCompletion::Failed);
            }
            TaskStatus::FailedRetryable => {
                let delay = config.retry_policy.delay_for_attempt(attempt);
                tracing::warn!(
                    task = kind,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "task failed, scheduling retry"
                );
                // Free the worker slot before the backoff sleep; the
                // semaphore bounds executing attempts, not waiting retries.
                drop(permit);
                tokio::time::sleep(delay).await;
                if let Err(send_err) = retry_tx.send(envelope).await {
                    tracing::error!(task = kind, "task queue closed, dropping retry");
                    send_err.0.complete(TaskCompletion::Failed);
                }
            }
            TaskStatus::Pending | TaskStatus::Running | TaskStatus::Succeeded => {
                unreachable!("a failed attempt can only map to a failure state")
            }
        },
    }
}
