//! Shared command handlers

pub mod prompt;
pub mod resource;
