//! Email rendering for delivery tasks.
//!
//! Each notification renders a plain-text and an HTML body from the
//! templates under `templates/emails/`, producing a self-contained
//! [`EmailMessage`] for the [`crate::domain::mailer::Mailer`] collaborator.

use askama::Template;
use serde_json::json;

use crate::domain::entities::User;
use crate::domain::mailer::EmailMessage;
use crate::error::AppError;

#[derive(Template)]
#[template(path = "emails/welcome.txt")]
struct WelcomeText<'a> {
    username: &'a str,
    login_url: &'a str,
}

#[derive(Template)]
#[template(path = "emails/welcome.html")]
struct WelcomeHtml<'a> {
    username: &'a str,
    login_url: &'a str,
}

#[derive(Template)]
#[template(path = "emails/password_reset.txt")]
struct PasswordResetText<'a> {
    username: &'a str,
    reset_link: &'a str,
}

#[derive(Template)]
#[template(path = "emails/password_reset.html")]
struct PasswordResetHtml<'a> {
    username: &'a str,
    reset_link: &'a str,
}

fn render_error(e: askama::Error) -> AppError {
    AppError::internal(
        "Failed to render email template",
        json!({ "reason": e.to_string() }),
    )
}

/// Renders the welcome email for a newly registered user.
pub fn welcome(user: &User, login_url: &str) -> Result<EmailMessage, AppError> {
    let text = WelcomeText {
        username: &user.username,
        login_url,
    }
    .render()
    .map_err(render_error)?;
    let html = WelcomeHtml {
        username: &user.username,
        login_url,
    }
    .render()
    .map_err(render_error)?;

    Ok(EmailMessage {
        to: user.email.clone(),
        subject: "Welcome to Linkmill".to_string(),
        text_body: text,
        html_body: Some(html),
    })
}

/// Renders the password reset email.
pub fn password_reset(user: &User, reset_link: &str) -> Result<EmailMessage, AppError> {
    let text = PasswordResetText {
        username: &user.username,
        reset_link,
    }
    .render()
    .map_err(render_error)?;
    let html = PasswordResetHtml {
        username: &user.username,
        reset_link,
    }
    .render()
    .map_err(render_error)?;

    Ok(EmailMessage {
        to: user.email.clone(),
        subject: "Password Reset Request".to_string(),
        text_body: text,
        html_body: Some(html),
    })
}
