//! Task bodies for each delivery task kind.

use std::sync::Arc;

use crate::domain::entities::NewClick;
use crate::domain::mailer::Mailer;
use crate::domain::repositories::{ClickRepository, LinkRepository, UserRepository};
use crate::domain::tasks::{DeliveryTask, emails};
use crate::error::AppError;

/// Result of a single task execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// The task body ran to completion.
    Delivered,
    /// The referenced entity no longer exists; nothing to do.
    SkippedMissing,
}

/// Executes delivery task bodies against their collaborators.
///
/// The executor is retry-agnostic: it runs one attempt and reports the
/// outcome. Retry scheduling lives in [`crate::domain::tasks::worker`].
///
/// # Missing-entity policy
///
/// A task whose referenced user or link has been deleted between enqueue and
/// execution resolves to [`ExecutionOutcome::SkippedMissing`] with a warning
/// log instead of an error. Retrying would waste the whole retry budget on a
/// permanently unrecoverable condition, and for password-reset delivery a
/// differing retry pattern would leak whether an email address is registered.
pub struct TaskExecutor {
    users: Arc<dyn UserRepository>,
    links: Arc<dyn LinkRepository>,
    clicks: Arc<dyn ClickRepository>,
    mailer: Arc<dyn Mailer>,
}

impl TaskExecutor {
    pub fn new(
        users: Arc<dyn UserRepository>,
        links: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickRepository>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            users,
            links,
            clicks,
            mailer,
        }
    }

    /// Runs one attempt of the task body.
    ///
    /// # Errors
    ///
    /// Any error is retryable from the runner's perspective; the
    /// missing-entity condition is deliberately not an error.
    pub async fn execute(&self, task: &DeliveryTask) -> Result<ExecutionOutcome, AppError> {
        match task {
            DeliveryTask::WelcomeEmail { user_id, login_url } => {
                self.send_welcome_email(*user_id, login_url).await
            }
            DeliveryTask::PasswordResetEmail {
                user_id,
                reset_link,
            } => self.send_password_reset_email(*user_id, reset_link).await,
            DeliveryTask::RecordClick {
                link_id,
                referrer,
                user_agent,
                ip_address,
            } => {
                self.record_click(
                    *link_id,
                    referrer.clone(),
                    user_agent.clone(),
                    ip_address.clone(),
                )
                .await
            }
        }
    }

    async fn send_welcome_email(
        &self,
        user_id: i64,
        login_url: &str,
    ) -> Result<ExecutionOutcome, AppError> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            tracing::warn!(user_id, "welcome email: user not found, skipping");
            return Ok(ExecutionOutcome::SkippedMissing);
        };

        let message = emails::welcome(&user, login_url)?;
        self.mailer.send(message).await?;

        tracing::info!(user_id, "welcome email sent");
        Ok(ExecutionOutcome::Delivered)
    }

    async fn send_password_reset_email(
        &self,
        user_id: i64,
        reset_link: &str,
    ) -> Result<ExecutionOutcome, AppError> {
        let Some(user) = self.users.find_by_id(user_id).await? else {
            tracing::warn!(user_id, "password reset email: user not found, skipping");
            return Ok(ExecutionOutcome::SkippedMissing);
        };

        let message = emails::password_reset(&user, reset_link)?;
        self.mailer.send(message).await?;

        tracing::info!(user_id, "password reset email sent");
        Ok(ExecutionOutcome::Delivered)
    }

    async fn record_click(
        &self,
        link_id: i64,
        referrer: Option<String>,
        user_agent: Option<String>,
        ip_address: Option<String>,
    ) -> Result<ExecutionOutcome, AppError> {
        let Some(link) = self.links.find_by_id(link_id).await? else {
            tracing::warn!(link_id, "record click: link not found, skipping");
            return Ok(ExecutionOutcome::SkippedMissing);
        };

        self.clicks
            .create(NewClick {
                link_id: link.id,
                referrer,
                user_agent,
                ip_address,
            })
            .await?;

        tracing::debug!(link_id, "click recorded");
        Ok(ExecutionOutcome::Delivered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Click, Link, User};
    use crate::domain::mailer::MockMailer;
    use crate::domain::repositories::{
        MockClickRepository, MockLinkRepository, MockUserRepository,
    };
    use chrono::Utc;
    use serde_json::json;

    fn test_user(id: i64) -> User {
        User {
            id,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now(),
        }
    }

    fn test_link(id: i64) -> Link {
        Link {
            id,
            user_id: 1,
            slug: "my-link".to_string(),
            target_url: "https://example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    fn executor(
        users: MockUserRepository,
        links: MockLinkRepository,
        clicks: MockClickRepository,
        mailer: MockMailer,
    ) -> TaskExecutor {
        TaskExecutor::new(
            Arc::new(users),
            Arc::new(links),
            Arc::new(clicks),
            Arc::new(mailer),
        )
    }

    #[tokio::test]
    async fn test_welcome_email_delivered() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_user(id))));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .withf(|m| m.to == "alice@example.com" && m.text_body.contains("login"))
            .times(1)
            .returning(|_| Ok(()));

        let exec = executor(
            users,
            MockLinkRepository::new(),
            MockClickRepository::new(),
            mailer,
        );

        let outcome = exec
            .execute(&DeliveryTask::WelcomeEmail {
                user_id: 1,
                login_url: "https://app.test/login".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_welcome_email_missing_user_skips_without_sending() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut mailer = MockMailer::new();
        mailer.expect_send().times(0);

        let exec = executor(
            users,
            MockLinkRepository::new(),
            MockClickRepository::new(),
            mailer,
        );

        let outcome = exec
            .execute(&DeliveryTask::WelcomeEmail {
                user_id: 42,
                login_url: "https://app.test/login".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::SkippedMissing);
    }

    #[tokio::test]
    async fn test_password_reset_missing_user_is_not_an_error() {
        // Anti-enumeration: a deleted/nonexistent user must produce the same
        // non-raising outcome class as any other completed task.
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().times(1).returning(|_| Ok(None));

        let exec = executor(
            users,
            MockLinkRepository::new(),
            MockClickRepository::new(),
            MockMailer::new(),
        );

        let result = exec
            .execute(&DeliveryTask::PasswordResetEmail {
                user_id: 9999,
                reset_link: "https://app.test/reset/tok".to_string(),
            })
            .await;

        assert_eq!(result.unwrap(), ExecutionOutcome::SkippedMissing);
    }

    #[tokio::test]
    async fn test_password_reset_transient_mailer_failure_is_retryable() {
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_user(id))));

        let mut mailer = MockMailer::new();
        mailer
            .expect_send()
            .times(1)
            .returning(|_| Err(AppError::internal("smtp unavailable", json!({}))));

        let exec = executor(
            users,
            MockLinkRepository::new(),
            MockClickRepository::new(),
            mailer,
        );

        let result = exec
            .execute(&DeliveryTask::PasswordResetEmail {
                user_id: 1,
                reset_link: "https://app.test/reset/tok".to_string(),
            })
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_record_click_creates_one_event() {
        let mut links = MockLinkRepository::new();
        links
            .expect_find_by_id()
            .times(1)
            .returning(|id| Ok(Some(test_link(id))));

        let mut clicks = MockClickRepository::new();
        clicks
            .expect_create()
            .withf(|c| {
                c.link_id == 7
                    && c.referrer.as_deref() == Some("https://google.com")
                    && c.ip_address.as_deref() == Some("10.0.0.1")
            })
            .times(1)
            .returning(|c| {
                Ok(Click {
                    id: 1,
                    link_id: c.link_id,
                    referrer: c.referrer,
                    user_agent: c.user_agent,
                    ip_address: c.ip_address,
                    created_at: Utc::now(),
                })
            });

        let exec = executor(
            MockUserRepository::new(),
            links,
            clicks,
            MockMailer::new(),
        );

        let outcome = exec
            .execute(&DeliveryTask::RecordClick {
                link_id: 7,
                referrer: Some("https://google.com".to_string()),
                user_agent: Some("Mozilla/5.0".to_string()),
                ip_address: Some("10.0.0.1".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::Delivered);
    }

    #[tokio::test]
    async fn test_record_click_missing_link_skips() {
        let mut links = MockLinkRepository::new();
        links.expect_find_by_id().times(1).returning(|_| Ok(None));

        let mut clicks = MockClickRepository::new();
        clicks.expect_create().times(0);

        let exec = executor(
            MockUserRepository::new(),
            links,
            clicks,
            MockMailer::new(),
        );

        let outcome = exec
            .execute(&DeliveryTask::RecordClick {
                link_id: 404,
                referrer: None,
                user_agent: None,
                ip_address: None,
            })
            .await
            .unwrap();

        assert_eq!(outcome, ExecutionOutcome::SkippedMissing);
    }
}
