//! Role predicates
//!
//! Hiding actions from non-admins is presentation only; the server enforces
//! authorization on every mutating request.

use super::session::CurrentUser;

/// Role name granting full access
pub const ADMIN_ROLE: &str = "admin";

/// Whether `user` holds `role`. Role names compare case-insensitively.
pub fn has_role(user: Option<&CurrentUser>, role: &str) -> bool {
    user.is_some_and(|u| u.rol.trim().eq_ignore_ascii_case(role.trim()))
}

/// Whether `user` is an administrator
pub fn is_admin(user: Option<&CurrentUser>) -> bool {
    has_role(user, ADMIN_ROLE)
}
