//! Auth gate for protected commands
//!
//! Signed-out visitors are bounced to `login`; the command they asked for is
//! remembered so it can be offered again once they sign in.

use log::warn;

use super::role;
use super::session::{CurrentUser, Session};
use super::storage::{RETURN_TO_KEY, TokenStore};
use crate::error::{AuthError, Result};

/// Where signed-out visitors are sent
pub const LOGIN_ROUTE: &str = "login";

/// The signed-in user and what they may do
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub user: CurrentUser,
    pub is_admin: bool,
}

impl Principal {
    pub fn new(user: CurrentUser) -> Self {
        let is_admin = role::is_admin(Some(&user));
        Self { user, is_admin }
    }

    pub fn has_role(&self, role: &str) -> bool {
        role::has_role(Some(&self.user), role)
    }
}

/// Outcome of a gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the protected command
    Allow(Principal),
    /// Send the visitor to `to`, remembering `from`
    Redirect { to: &'static str, from: String },
}

/// Gate in front of a protected command
pub struct AuthGate<'a> {
    session: &'a Session,
    required_role: Option<&'static str>,
}

impl<'a> AuthGate<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self {
            session,
            required_role: None,
        }
    }

    /// Additionally require `role` (compared case-insensitively).
    pub fn require_role(mut self, role: &'static str) -> Self {
        self.required_role = Some(role);
        self
    }

    /// Decide whether `requested` may run.
    ///
    /// A signed-out session yields a redirect and records `requested` under
    /// the return-to key. A signed-in user lacking the required role gets
    /// [`AuthError::PermissionDenied`].
    pub fn check(&self, requested: &str) -> Result<GateDecision> {
        let Some(user) = self.session.current_user() else {
            remember_return_to(self.session.store(), requested);
            return Ok(GateDecision::Redirect {
                to: LOGIN_ROUTE,
                from: requested.to_string(),
            });
        };

        let lacks_role = self
            .required_role
            .is_some_and(|required| !role::has_role(Some(user), required));
        if lacks_role {
            return Err(AuthError::PermissionDenied {
                action: format!("run `{}`", requested),
            }
            .into());
        }

        Ok(GateDecision::Allow(Principal::new(user.clone())))
    }

    /// Like [`check`](Self::check), turning a redirect into
    /// [`AuthError::LoginRequired`].
    pub fn enforce(&self, requested: &str) -> Result<Principal> {
        match self.check(requested)? {
            GateDecision::Allow(principal) => Ok(principal),
            GateDecision::Redirect { from, .. } => {
                Err(AuthError::LoginRequired { return_to: from }.into())
            }
        }
    }
}

fn remember_return_to(store: &dyn TokenStore, requested: &str) {
    if let Err(e) = store.set(RETURN_TO_KEY, requested) {
        warn!("Failed to remember return-to command: {}", e);
    }
}

/// Consume the remembered return-to command, if any.
pub fn take_return_to(store: &dyn TokenStore) -> Option<String> {
    let value = store.get(RETURN_TO_KEY)?;
    if let Err(e) = store.remove(RETURN_TO_KEY) {
        warn!("Failed to clear return-to command: {}", e);
    }
    Some(value)
}
