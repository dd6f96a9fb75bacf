//! Client-side session: the current identity and the bearer credential used
//! for authenticated calls.
//!
//! State moves `Loading -> {Authenticated, Anonymous}`, then between
//! `Authenticated` and `Anonymous` on login, logout or a 401. All mutation
//! goes through `login`, `logout` and `restore`, serialized by one mutex.

use crate::client::{ApiClient, BearerToken};
use crate::errors::ApiError;
use crate::storage::{StorageError, TokenStore};
use serde::Serialize;
use std::sync::Arc;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Authenticated { username: String },
    Anonymous,
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Authenticated { .. } => "authenticated",
            Self::Anonymous => "anonymous",
        }
    }
}

/// Read-only projection for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub state: &'static str,
    pub username: Option<String>,
    pub validated: bool,
    pub has_token: bool,
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    token: Option<BearerToken>,
    // Bumped on every login/logout so a slow validation cannot clobber them.
    generation: u64,
}

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<Mutex<Inner>>,
    store: TokenStore,
}

impl SessionManager {
    /// Reads the durable slot once. A stored token is installed right away and
    /// the session stays `Loading` until `restore` resolves it.
    pub async fn load(store: TokenStore) -> Self {
        let token = store.load().await.map(BearerToken::new);
        let state = if token.is_some() {
            SessionState::Loading
        } else {
            SessionState::Anonymous
        };
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state,
                token,
                generation: 0,
            })),
            store,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    pub async fn state(&self) -> SessionState {
        self.inner.lock().await.state.clone()
    }

    pub async fn username(&self) -> Option<String> {
        match &self.inner.lock().await.state {
            SessionState::Authenticated { username } => Some(username.clone()),
            _ => None,
        }
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        let inner = self.inner.lock().await;
        let username = match &inner.state {
            SessionState::Authenticated { username } => Some(username.clone()),
            _ => None,
        };
        SessionSnapshot {
            state: inner.state.name(),
            username,
            validated: matches!(inner.state, SessionState::Authenticated { .. }),
            has_token: inner.token.is_some(),
        }
    }

    /// Credential to attach to the next authenticated request, if any.
    pub async fn credential(&self) -> Option<BearerToken> {
        self.inner.lock().await.token.clone()
    }

    /// Credential together with the generation it belongs to. The generation
    /// changes on every login and logout.
    pub async fn credential_at(&self) -> (Option<BearerToken>, u64) {
        let inner = self.inner.lock().await;
        (inner.token.clone(), inner.generation)
    }

    pub async fn generation(&self) -> u64 {
        self.inner.lock().await.generation
    }

    pub async fn login(
        &self,
        token: impl Into<String>,
        username: impl Into<String>,
    ) -> Result<(), StorageError> {
        let token = token.into();
        let username = username.into();
        let mut inner = self.inner.lock().await;

        self.store.save(&token).await?;
        inner.token = Some(BearerToken::new(token));
        inner.state = SessionState::Authenticated {
            username: username.clone(),
        };
        inner.generation += 1;

        info!(%username, "session authenticated");
        Ok(())
    }

    pub async fn logout(&self) {
        let mut inner = self.inner.lock().await;

        if let Err(err) = self.store.clear().await {
            warn!("session token could not be removed from storage: {err}");
        }
        inner.token = None;
        inner.generation += 1;
        if inner.state != SessionState::Anonymous {
            info!("session cleared");
        }
        inner.state = SessionState::Anonymous;
    }

    /// Validates a token restored from storage against the score API.
    pub async fn restore(&self, client: &ApiClient) {
        let (token, generation) = {
            let inner = self.inner.lock().await;
            match (&inner.state, &inner.token) {
                (SessionState::Loading, Some(token)) => (token.clone(), inner.generation),
                _ => return,
            }
        };

        let result = client.validate_token(&token).await;

        let mut inner = self.inner.lock().await;
        if inner.generation != generation {
            debug!("discarding stale token validation result");
            return;
        }
        match result {
            Ok(response) => {
                info!(username = %response.username, "stored session validated");
                inner.state = SessionState::Authenticated {
                    username: response.username,
                };
            }
            Err(err) => {
                warn!("token validation failed: {err}");
                if let Err(err) = self.store.clear().await {
                    warn!("session token could not be removed from storage: {err}");
                }
                inner.token = None;
                inner.generation += 1;
                inner.state = SessionState::Anonymous;
            }
        }
    }

    pub fn spawn_restore(&self, client: ApiClient) -> JoinHandle<()> {
        let session = self.clone();
        tokio::spawn(async move { session.restore(&client).await })
    }

    /// Drops the session when an authenticated call came back 401.
    pub async fn check<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(ApiError::Unauthorized) = &result {
            warn!("score API returned 401; logging out");
            self.logout().await;
        }
        result
    }
}
