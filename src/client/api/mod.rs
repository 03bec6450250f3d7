//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - sign-in and account registration
//! - [`ResourceApi`] - generic CRUD over any [`Resource`](super::models::Resource)

mod auth;
mod resource;

pub use auth::AuthApi;
pub use resource::ResourceApi;
