//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::Credentials;
use crate::error::Result;

/// Authentication operations against `/auth`
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a session token.
    ///
    /// `Ok(None)` means the server answered without issuing a token.
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>>;

    /// Create an account and sign in with it.
    async fn register(&self, credentials: &Credentials) -> Result<Option<String>>;
}
