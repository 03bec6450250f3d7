//! Shared CLI argument types
//!
//! This module contains reusable argument structs that can be flattened
//! into commands using `#[command(flatten)]`.

mod common;
mod global;
mod pagination;

pub use common::{OutputFormat, SortDir};
pub use global::{GlobalOptions, command_line_from_args};
pub use pagination::{FormArgs, ListArgs};
