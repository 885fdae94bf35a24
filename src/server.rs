//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, worker spawning, and Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::sync::mpsc;

use crate::application::services::{AccountService, LinkService, StatsService};
use crate::config::Config;
use crate::domain::tasks::{RetryPolicy, TaskExecutor, TaskQueue, WorkerConfig, run_task_worker};
use crate::infrastructure::email::LogMailer;
use crate::infrastructure::persistence::{
    PgClickRepository, PgLinkRepository, PgResetTokenRepository, PgSessionRepository,
    PgUserRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool and migrations
/// - Background delivery task worker
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the database connection, migrations, or the server
/// bind fail.
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations").run(&pool).await?;

    let (state, worker) = build_state(&config, pool);
    tokio::spawn(worker);
    tracing::info!("Task worker started");

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}

/// Wires repositories, services, and the task runner into application state.
///
/// Returns the state together with the worker future, which the caller must
/// spawn for channel-mode tasks to execute.
pub fn build_state(
    config: &Config,
    pool: PgPool,
) -> (AppState, impl Future<Output = ()> + Send + 'static) {
    let pool = Arc::new(pool);

    let users = Arc::new(PgUserRepository::new(pool.clone()));
    let links = Arc::new(PgLinkRepository::new(pool.clone()));
    let clicks = Arc::new(PgClickRepository::new(pool.clone()));
    let sessions = Arc::new(PgSessionRepository::new(pool.clone()));
    let reset_tokens = Arc::new(PgResetTokenRepository::new(pool.clone()));

    let executor = Arc::new(TaskExecutor::new(
        users.clone(),
        links.clone(),
        clicks.clone(),
        Arc::new(LogMailer::new()),
    ));

    let (task_tx, task_rx) = mpsc::channel(config.task_queue_capacity);
    let worker_config = WorkerConfig {
        concurrency: config.task_worker_concurrency,
        time_limit: Duration::from_secs(config.task_time_limit_seconds),
        retry_policy: RetryPolicy::default(),
    };
    let worker = run_task_worker(task_rx, task_tx.clone(), executor, worker_config);

    let tasks = TaskQueue::channel(task_tx, config.task_max_attempts);

    let base_url = config.base_url.trim_end_matches('/').to_string();

    let link_service = Arc::new(LinkService::new(links.clone()).with_slug_length(config.slug_length));
    let account_service = Arc::new(AccountService::new(
        users,
        sessions,
        reset_tokens,
        tasks.clone(),
        config.token_signing_secret.clone(),
        base_url.clone(),
        config.session_ttl_seconds,
        config.reset_token_ttl_seconds,
    ));
    let stats_service = Arc::new(StatsService::new(links, clicks));

    let state = AppState {
        link_service,
        account_service,
        stats_service,
        tasks,
        base_url,
    };

    (state, worker)
}
