//! Session store
//!
//! Holds the current token and the user projected from it. The session is an
//! explicit object handed to whoever needs it (the auth gate, the commands);
//! it owns the persisted token and keeps the HTTP client's bearer in sync.

use std::sync::Arc;

use log::{debug, warn};
use serde::Serialize;

use super::storage::{TOKEN_KEY, TokenStore};
use super::token::{self, TokenPayload};
use crate::client::BearerSlot;
use crate::client::api::AuthApi;
use crate::client::models::Credentials;
use crate::error::{AuthError, Result};

/// The signed-in user, as described by the token payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub rol: String,
}

impl From<TokenPayload> for CurrentUser {
    fn from(payload: TokenPayload) -> Self {
        Self {
            id: payload.id,
            username: payload.username,
            rol: payload.rol,
        }
    }
}

/// Session state backed by a [`TokenStore`]
pub struct Session {
    store: Arc<dyn TokenStore>,
    bearer: BearerSlot,
    token: Option<String>,
    user: Option<CurrentUser>,
}

impl Session {
    /// Restore the session from storage.
    ///
    /// The stored token is read once. An expired token is purged and the
    /// session starts signed out; an undecodable token is kept but yields no
    /// user.
    pub async fn restore(store: Arc<dyn TokenStore>, bearer: BearerSlot) -> Self {
        let mut stored = store.get(TOKEN_KEY);

        if stored.as_deref().is_some_and(token::is_expired) {
            debug!("Stored session token has expired; discarding it");
            if let Err(e) = store.remove(TOKEN_KEY) {
                warn!("Failed to remove expired token: {}", e);
            }
            stored = None;
        }

        let user = stored
            .as_deref()
            .and_then(token::decode)
            .map(CurrentUser::from);

        bearer.set(stored.clone()).await;

        Self {
            store,
            bearer,
            token: stored,
            user,
        }
    }

    /// The signed-in user, if any
    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    /// The raw token currently held
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Backing key/value store
    pub fn store(&self) -> &dyn TokenStore {
        self.store.as_ref()
    }

    /// Sign in with `credentials`.
    ///
    /// Fails with [`AuthError::IncorrectCredentials`] when the server issues
    /// no token and [`AuthError::InvalidToken`] when the token cannot be
    /// decoded. Transport and server errors propagate unchanged.
    pub async fn login<A>(&mut self, api: &A, credentials: &Credentials) -> Result<&CurrentUser>
    where
        A: AuthApi + ?Sized,
    {
        let issued = api
            .login(credentials)
            .await?
            .ok_or(AuthError::IncorrectCredentials)?;
        self.adopt(issued).await
    }

    /// Register a new account and sign in with it.
    pub async fn register<A>(&mut self, api: &A, credentials: &Credentials) -> Result<&CurrentUser>
    where
        A: AuthApi + ?Sized,
    {
        let issued = api
            .register(credentials)
            .await?
            .ok_or(AuthError::InvalidToken)?;
        self.adopt(issued).await
    }

    /// Sign out locally. No remote call is made.
    pub async fn logout(&mut self) -> Result<()> {
        self.user = None;
        self.token = None;
        self.bearer.set(None).await;
        self.store.remove(TOKEN_KEY)
    }

    async fn adopt(&mut self, issued: String) -> Result<&CurrentUser> {
        let payload = token::decode(&issued).ok_or(AuthError::InvalidToken)?;

        self.store.set(TOKEN_KEY, &issued)?;
        self.bearer.set(Some(issued.clone())).await;
        self.token = Some(issued);

        debug!("Signed in as {} ({})", payload.username, payload.rol);
        Ok(&*self.user.insert(CurrentUser::from(payload)))
    }
}
