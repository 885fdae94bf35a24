//! Service entry point and operational commands.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use linkmill::config::Config;
use linkmill::domain::mailer::{EmailMessage, Mailer};
use linkmill::infrastructure::email::LogMailer;
use linkmill::server;

#[derive(Parser)]
#[command(name = "linkmill", version, about = "Multi-tenant URL shortener")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (the default).
    Serve,
    /// Delete expired sessions and exit.
    CleanupSessions,
    /// Send a test email through the configured mailer and exit.
    TestEmail {
        /// Recipient address.
        to: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = Config::from_env()?;
            init_tracing(&config);
            server::run(config).await
        }
        Command::CleanupSessions => {
            let config = Config::from_env()?;
            init_tracing(&config);
            cleanup_sessions(config).await
        }
        Command::TestEmail { to } => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::from_default_env())
                .init();
            test_email(to).await
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// One-shot removal of expired sessions, for cron or a systemd timer.
async fn cleanup_sessions(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;

    let (state, _worker) = server::build_state(&config, pool);
    let deleted = state.account_service.cleanup_expired_sessions().await?;
    println!("Deleted {deleted} expired sessions");

    Ok(())
}

/// Sends a canary message so operators can verify the mail transport.
async fn test_email(to: String) -> Result<()> {
    let mailer = LogMailer::new();
    mailer
        .send(EmailMessage {
            to,
            subject: "Linkmill test email".to_string(),
            text_body: "If you can read this, outbound email works.".to_string(),
            html_body: None,
        })
        .await?;
    println!("Test email dispatched");

    Ok(())
}
