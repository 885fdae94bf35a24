//! Outbound email delivery contract.

use crate::error::AppError;
use async_trait::async_trait;

/// A rendered email ready for delivery.
///
/// Bodies are pre-rendered by the caller so the transport needs no template
/// or request context.
#[derive(Debug, Clone)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub text_body: String,
    pub html_body: Option<String>,
}

/// External delivery collaborator for outbound email.
///
/// The task runner only depends on this trait; the actual transport (SMTP
/// relay, provider API) is an infrastructure concern. Delivery errors are
/// retryable from the runner's point of view.
///
/// # Implementations
///
/// - [`crate::infrastructure::email::LogMailer`] - logs instead of sending
/// - [`crate::infrastructure::email::MemoryMailer`] - captures messages for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers a single message.
    async fn send(&self, message: EmailMessage) -> Result<(), AppError>;
}
