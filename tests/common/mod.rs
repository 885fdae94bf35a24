#![allow(dead_code)]

//! In-memory test fixtures.
//!
//! Handler tests run against the real router and services, with repositories
//! backed by an in-memory store instead of PostgreSQL. The task queue runs in
//! eager mode so side effects (emails, click rows) are observable as soon as
//! a request returns.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use serde_json::json;

use linkmill::application::services::{AccountService, LinkService, StatsService};
use linkmill::domain::entities::{Click, Link, NewClick, NewLink, NewUser, ReferrerCount, User};
use linkmill::domain::repositories::{
    ClickRepository, LinkRepository, ResetTokenRepository, SessionRepository, UserRepository,
};
use linkmill::domain::tasks::{TaskExecutor, TaskQueue};
use linkmill::error::AppError;
use linkmill::infrastructure::email::MemoryMailer;
use linkmill::routes::router;
use linkmill::state::AppState;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const BASE_URL: &str = "https://lm.test";

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    links: Vec<Link>,
    clicks: Vec<Click>,
    sessions: Vec<SessionRow>,
    reset_tokens: Vec<TokenRow>,
    next_user_id: i64,
    next_link_id: i64,
    next_click_id: i64,
}

struct SessionRow {
    token_hash: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
}

struct TokenRow {
    token_hash: String,
    user_id: i64,
    expires_at: DateTime<Utc>,
}

/// In-memory stand-in for the database, shared by all repository handles.
#[derive(Default)]
pub struct TestDb {
    tables: Mutex<Tables>,
}

impl TestDb {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.tables.lock().expect("test db mutex poisoned")
    }

    /// Number of recorded clicks, across all links.
    pub fn click_count(&self) -> usize {
        self.lock().clicks.len()
    }
}

pub struct MemUserRepository(pub Arc<TestDb>);
pub struct MemLinkRepository(pub Arc<TestDb>);
pub struct MemClickRepository(pub Arc<TestDb>);
pub struct MemSessionRepository(pub Arc<TestDb>);
pub struct MemResetTokenRepository(pub Arc<TestDb>);

#[async_trait]
impl UserRepository for MemUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut tables = self.0.lock();
        if tables
            .users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.0.lock().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .0
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.0.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_password(&self, user_id: i64, password_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.0.lock();
        match tables.users.iter_mut().find(|u| u.id == user_id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl LinkRepository for MemLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut tables = self.0.lock();
        if tables
            .links
            .iter()
            .any(|l| l.user_id == new_link.user_id && l.slug == new_link.slug)
        {
            return Err(AppError::conflict("Unique constraint violation", json!({})));
        }

        tables.next_link_id += 1;
        let link = Link {
            id: tables.next_link_id,
            user_id: new_link.user_id,
            slug: new_link.slug,
            target_url: new_link.target_url,
            created_at: Utc::now(),
        };
        tables.links.push(link.clone());
        Ok(link)
    }

    async fn slug_exists(&self, user_id: i64, slug: &str) -> Result<bool, AppError> {
        Ok(self
            .0
            .lock()
            .links
            .iter()
            .any(|l| l.user_id == user_id && l.slug == slug))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError> {
        Ok(self.0.lock().links.iter().find(|l| l.id == id).cloned())
    }

    async fn find_by_user_and_slug(
        &self,
        user_id: i64,
        slug: &str,
    ) -> Result<Option<Link>, AppError> {
        Ok(self
            .0
            .lock()
            .links
            .iter()
            .find(|l| l.user_id == user_id && l.slug == slug)
            .cloned())
    }

    async fn find_by_username_and_slug(
        &self,
        username: &str,
        slug: &str,
    ) -> Result<Option<Link>, AppError> {
        let tables = self.0.lock();
        let Some(user) = tables.users.iter().find(|u| u.username == username) else {
            return Ok(None);
        };
        Ok(tables
            .links
            .iter()
            .find(|l| l.user_id == user.id && l.slug == slug)
            .cloned())
    }

    async fn list_for_user(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        let mut links: Vec<Link> = self
            .0
            .lock()
            .links
            .iter()
            .filter(|l| l.user_id == user_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(links)
    }

    async fn delete(&self, user_id: i64, slug: &str) -> Result<bool, AppError> {
        let mut tables = self.0.lock();
        let before = tables.links.len();
        tables
            .links
            .retain(|l| !(l.user_id == user_id && l.slug == slug));
        Ok(tables.links.len() < before)
    }
}

#[async_trait]
impl ClickRepository for MemClickRepository {
    async fn create(&self, new_click: NewClick) -> Result<Click, AppError> {
        let mut tables = self.0.lock();
        tables.next_click_id += 1;
        let click = Click {
            id: tables.next_click_id,
            link_id: new_click.link_id,
            referrer: new_click.referrer,
            user_agent: new_click.user_agent,
            ip_address: new_click.ip_address,
            created_at: Utc::now(),
        };
        tables.clicks.push(click.clone());
        Ok(click)
    }

    async fn count_for_link(&self, link_id: i64) -> Result<i64, AppError> {
        Ok(self
            .0
            .lock()
            .clicks
            .iter()
            .filter(|c| c.link_id == link_id)
            .count() as i64)
    }

    async fn top_referrers(
        &self,
        link_id: i64,
        limit: i64,
    ) -> Result<Vec<ReferrerCount>, AppError> {
        let tables = self.0.lock();
        let mut counts: Vec<ReferrerCount> = Vec::new();
        for click in tables.clicks.iter().filter(|c| c.link_id == link_id) {
            let Some(referrer) = &click.referrer else {
                continue;
            };
            match counts.iter_mut().find(|rc| &rc.referrer == referrer) {
                Some(rc) => rc.count += 1,
                None => counts.push(ReferrerCount {
                    referrer: referrer.clone(),
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| b.count.cmp(&a.count));
        counts.truncate(limit as usize);
        Ok(counts)
    }

    async fn recent_for_link(&self, link_id: i64, limit: i64) -> Result<Vec<Click>, AppError> {
        let mut clicks: Vec<Click> = self
            .0
            .lock()
            .clicks
            .iter()
            .filter(|c| c.link_id == link_id)
            .cloned()
            .collect();
        clicks.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        clicks.truncate(limit as usize);
        Ok(clicks)
    }
}

#[async_trait]
impl SessionRepository for MemSessionRepository {
    async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.0.lock().sessions.push(SessionRow {
            token_hash: token_hash.to_string(),
            user_id,
            expires_at,
        });
        Ok(())
    }

    async fn find_user_by_token_hash(&self, token_hash: &str) -> Result<Option<User>, AppError> {
        let tables = self.0.lock();
        let now = Utc::now();
        let Some(session) = tables
            .sessions
            .iter()
            .find(|s| s.token_hash == token_hash && s.expires_at > now)
        else {
            return Ok(None);
        };
        Ok(tables.users.iter().find(|u| u.id == session.user_id).cloned())
    }

    async fn delete(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.0.lock();
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.token_hash != token_hash);
        Ok(tables.sessions.len() < before)
    }

    async fn delete_expired(&self) -> Result<u64, AppError> {
        let mut tables = self.0.lock();
        let now = Utc::now();
        let before = tables.sessions.len();
        tables.sessions.retain(|s| s.expires_at > now);
        Ok((before - tables.sessions.len()) as u64)
    }
}

#[async_trait]
impl ResetTokenRepository for MemResetTokenRepository {
    async fn create(
        &self,
        token_hash: &str,
        user_id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        self.0.lock().reset_tokens.push(TokenRow {
            token_hash: token_hash.to_string(),
            user_id,
            expires_at,
        });
        Ok(())
    }

    async fn consume(&self, token_hash: &str) -> Result<Option<i64>, AppError> {
        let mut tables = self.0.lock();
        let now = Utc::now();
        let Some(pos) = tables
            .reset_tokens
            .iter()
            .position(|t| t.token_hash == token_hash && t.expires_at > now)
        else {
            return Ok(None);
        };
        Ok(Some(tables.reset_tokens.remove(pos).user_id))
    }
}

/// Builds application state over an in-memory store and eager task queue.
///
/// Returns the state with the backing store and mailer so tests can assert
/// on persisted rows and captured emails.
pub fn create_test_state() -> (AppState, Arc<TestDb>, Arc<MemoryMailer>) {
    let db = TestDb::new();
    let mailer = Arc::new(MemoryMailer::new());

    let users = Arc::new(MemUserRepository(db.clone()));
    let links = Arc::new(MemLinkRepository(db.clone()));
    let clicks = Arc::new(MemClickRepository(db.clone()));
    let sessions = Arc::new(MemSessionRepository(db.clone()));
    let reset_tokens = Arc::new(MemResetTokenRepository(db.clone()));

    let executor = Arc::new(TaskExecutor::new(
        users.clone(),
        links.clone(),
        clicks.clone(),
        mailer.clone(),
    ));
    let tasks = TaskQueue::eager(executor, 3);

    let link_service = Arc::new(LinkService::new(links.clone()));
    let account_service = Arc::new(AccountService::new(
        users,
        sessions,
        reset_tokens,
        tasks.clone(),
        SIGNING_SECRET.to_string(),
        BASE_URL.to_string(),
        3600,
        900,
    ));
    let stats_service = Arc::new(StatsService::new(links, clicks));

    let state = AppState {
        link_service,
        account_service,
        stats_service,
        tasks,
        base_url: BASE_URL.to_string(),
    };

    (state, db, mailer)
}

/// Full application router over a fresh in-memory state.
pub fn create_test_app() -> (Router, Arc<TestDb>, Arc<MemoryMailer>) {
    let (state, db, mailer) = create_test_state();
    (router(state), db, mailer)
}

/// Registers a user and opens a session, returning the bearer token.
pub async fn register_and_login(server: &axum_test::TestServer, username: &str) -> String {
    server
        .post("/api/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "correct-horse-battery",
        }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/login")
        .json(&json!({
            "username": username,
            "password": "correct-horse-battery",
        }))
        .await;
    response.assert_status_ok();

    response.json::<serde_json::Value>()["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}
