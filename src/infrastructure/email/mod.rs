//! Mailer implementations.
//!
//! The SMTP transport itself is an external collaborator; what ships here is
//! a logging default and an in-memory capture for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::mailer::{EmailMessage, Mailer};
use crate::error::AppError;

/// Mailer that logs messages instead of delivering them.
///
/// The default when no real transport is wired up, so development and
/// single-node deployments work without an SMTP relay.
pub struct LogMailer;

impl LogMailer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), AppError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body_len = message.text_body.len(),
            "email (log transport)"
        );
        Ok(())
    }
}

/// Mailer that captures sent messages in memory for test assertions.
#[derive(Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

impl MemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all messages sent so far.
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

#[async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, message: EmailMessage) -> Result<(), AppError> {
        self.sent.lock().expect("mailer mutex poisoned").push(message);
        Ok(())
    }
}
