use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
    time::Instant,
};

use anyhow::{Context, Result};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use cookie::time::Duration as CookieDuration;
use tokio::sync::OwnedMutexGuard;
use tracing::info;
use uuid::Uuid;

use crate::{
    config::SiteConfig,
    session::{AdminCredential, SessionHandle, SessionRegistry, SiteSession},
};

pub const SESSION_COOKIE: &str = "site_session";

#[derive(Clone)]
pub struct AppState {
    config: Arc<SiteConfig>,
    credential: Arc<AdminCredential>,
    sessions: SessionRegistry,
}

impl AppState {
    /// Hashes the admin secret and drops the plaintext from the kept config.
    pub fn new(mut config: SiteConfig) -> Result<Self> {
        let secret = std::mem::take(&mut config.admin_secret);
        let credential =
            AdminCredential::from_secret(&secret).context("failed to prepare admin credential")?;

        let sessions = SessionRegistry::new(config.unlock_window, config.unlock_clicks);

        Ok(Self {
            config: Arc::new(config),
            credential: Arc::new(credential),
            sessions,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn credential(&self) -> &AdminCredential {
        &self.credential
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Locks the visitor's session for a request that changes it, creating one
    /// (and its cookie) when the request carries no live session token.
    pub async fn session(&self, jar: CookieJar) -> (CookieJar, OwnedMutexGuard<SiteSession>) {
        let (token, handle) = match self.live_session(&jar).await {
            Some(live) => live,
            None => {
                let (token, handle) = self.sessions.create().await;
                let live = self.sessions.len().await;
                info!(sessions = live, "site session started");
                (token, handle)
            }
        };

        let mut guard = handle.lock_owned().await;
        guard.touch(Instant::now());
        (jar.add(self.session_cookie(token)), guard)
    }

    /// Resolves the visitor's session for a read-only request. Visitors
    /// without a live session get a throwaway one that is never registered.
    pub async fn visit(&self, jar: CookieJar) -> (CookieJar, VisitorSession) {
        match self.live_session(&jar).await {
            Some((token, handle)) => {
                let mut guard = handle.lock_owned().await;
                guard.touch(Instant::now());
                (jar.add(self.session_cookie(token)), VisitorSession::Live(guard))
            }
            None => {
                let transient = SiteSession::new(self.config.unlock_window, self.config.unlock_clicks);
                (jar, VisitorSession::Transient(Box::new(transient)))
            }
        }
    }

    async fn live_session(&self, jar: &CookieJar) -> Option<(Uuid, SessionHandle)> {
        let token = jar
            .get(SESSION_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok())?;
        let handle = self.sessions.get(token).await?;
        Some((token, handle))
    }

    /// Max-age tracks the idle limit; re-issued on every request with a live session.
    fn session_cookie(&self, token: Uuid) -> Cookie<'static> {
        let max_age = i64::try_from(self.config.session_idle.as_secs()).unwrap_or(i64::MAX);
        let mut cookie = Cookie::new(SESSION_COOKIE, token.to_string());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        cookie.set_max_age(CookieDuration::seconds(max_age));
        cookie
    }
}

/// Session seen by a read-only request.
pub enum VisitorSession {
    Live(OwnedMutexGuard<SiteSession>),
    Transient(Box<SiteSession>),
}

impl Deref for VisitorSession {
    type Target = SiteSession;

    fn deref(&self) -> &SiteSession {
        match self {
            Self::Live(guard) => &**guard,
            Self::Transient(session) => &**session,
        }
    }
}

impl DerefMut for VisitorSession {
    fn deref_mut(&mut self) -> &mut SiteSession {
        match self {
            Self::Live(guard) => &mut **guard,
            Self::Transient(session) => &mut **session,
        }
    }
}
