//! Session management, access gating and the token codec

pub mod gate;
pub mod role;
pub mod session;
pub mod storage;
pub mod token;

pub use gate::{AuthGate, GateDecision, Principal};
pub use session::{CurrentUser, Session};
pub use storage::{FileTokenStore, TokenStore};
