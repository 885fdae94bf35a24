//! Asynchronous delivery task runner.
//!
//! Units of deferred work (emails, click recording) are enqueued by HTTP
//! handlers and executed on a background worker pool, never in the request
//! path. The pieces:
//!
//! - [`DeliveryTask`] - the task kinds and their self-contained payloads
//! - [`queue::TaskQueue`] - enqueue boundary, channel-backed or eager
//! - [`worker::run_task_worker`] - worker loop driving the retry state machine
//! - [`executor::TaskExecutor`] - the task bodies themselves
//! - [`retry::RetryPolicy`] - backoff as a pure function of attempt count
//!
//! # Execution state machine
//!
//! ```text
//! Pending -> Running -> {Succeeded, FailedRetryable, FailedTerminal}
//! FailedRetryable -> Pending (after backoff)   if attempt < max_attempts
//! FailedRetryable -> FailedTerminal            if attempt == max_attempts
//! ```
//!
//! A task referencing an entity that no longer exists completes as a logged
//! no-op instead of retrying, so retry behavior never reveals whether a user
//! exists (see [`executor`]).

pub mod emails;
pub mod executor;
pub mod queue;
pub mod retry;
pub mod worker;

pub use executor::{ExecutionOutcome, TaskExecutor};
pub use queue::TaskQueue;
pub use retry::RetryPolicy;
pub use worker::{WorkerConfig, run_task_worker};

use tokio::sync::oneshot;

/// A unit of deferred work with a self-contained payload.
///
/// Payloads carry ids plus precomputed values (reset link, login URL) so a
/// worker needs no session or request context to execute them.
#[derive(Debug, Clone)]
pub enum DeliveryTask {
    WelcomeEmail {
        user_id: i64,
        login_url: String,
    },
    PasswordResetEmail {
        user_id: i64,
        reset_link: String,
    },
    RecordClick {
        link_id: i64,
        referrer: Option<String>,
        user_agent: Option<String>,
        ip_address: Option<String>,
    },
}

impl DeliveryTask {
    /// Stable task kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DeliveryTask::WelcomeEmail { .. } => "welcome_email",
            DeliveryTask::PasswordResetEmail { .. } => "password_reset_email",
            DeliveryTask::RecordClick { .. } => "record_click",
        }
    }
}

/// Lifecycle state of a task attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Running,
    Succeeded,
    FailedRetryable,
    FailedTerminal,
}

impl TaskStatus {
    /// State transition after an attempt completes.
    ///
    /// `attempt` counts attempts made so far, including the one that just
    /// finished. A failure on the final allowed attempt is terminal.
    pub fn after_attempt(succeeded: bool, attempt: u32, max_attempts: u32) -> TaskStatus {
        if succeeded {
            TaskStatus::Succeeded
        } else if attempt >= max_attempts {
            TaskStatus::FailedTerminal
        } else {
            TaskStatus::FailedRetryable
        }
    }
}

/// Terminal result of a task, observable through its [`TaskHandle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCompletion {
    /// The task body ran to completion.
    Delivered,
    /// The referenced entity no longer exists; completed as a no-op.
    Skipped,
    /// Retries exhausted, the enqueue was rejected, or the runner shut down.
    Failed,
}

/// A task travelling through the queue, mutated on each retry.
#[derive(Debug)]
pub struct TaskEnvelope {
    pub task: DeliveryTask,
    /// Attempts made so far; incremented by the worker before each run.
    pub attempt: u32,
    pub max_attempts: u32,
    done: Option<oneshot::Sender<TaskCompletion>>,
}

impl TaskEnvelope {
    /// Creates an envelope and the handle observing its terminal state.
    pub fn new(task: DeliveryTask, max_attempts: u32) -> (Self, TaskHandle) {
        let (done_tx, done_rx) = oneshot::channel();
        (
            Self {
                task,
                attempt: 0,
                max_attempts,
                done: Some(done_tx),
            },
            TaskHandle { rx: done_rx },
        )
    }

    /// Resolves the handle with a terminal result.
    ///
    /// A dropped handle (the production fire-and-forget case) is fine; the
    /// send result is intentionally ignored.
    pub fn complete(self, completion: TaskCompletion) {
        if let Some(done) = self.done {
            let _ = done.send(completion);
        }
    }
}

/// Observer for a task's terminal result.
///
/// In production the handle is dropped at enqueue time (fire-and-forget).
/// Tests use [`TaskHandle::wait`] for deterministic assertions, typically
/// together with the eager queue mode.
#[derive(Debug)]
pub struct TaskHandle {
    rx: oneshot::Receiver<TaskCompletion>,
}

impl TaskHandle {
    /// Waits for the task to reach a terminal state.
    ///
    /// Resolves to [`TaskCompletion::Failed`] if the runner shut down before
    /// the task finished.
    pub async fn wait(self) -> TaskCompletion {
        self.rx.await.unwrap_or(TaskCompletion::Failed)
    }
}
