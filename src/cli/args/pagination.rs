//! List argument types for CLI commands

use clap::Args;

use super::SortDir;

/// Shared list arguments.
///
/// Flatten this into any list command:
/// ```ignore
/// List {
///     #[command(flatten)]
///     list: ListArgs,
/// }
/// ```
#[derive(Args, Debug, Default, Clone)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, short = 'p')]
    pub page: Option<usize>,

    /// Rows per page (defaults to the configured page size)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,

    /// Search term, applied to the collection's search field
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Field to sort by (wire name)
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction (asc, desc)
    #[arg(long, value_enum, hide_possible_values = true, requires = "sort_by")]
    pub sort_dir: Option<SortDir>,
}

impl ListArgs {
    /// Rows per page, falling back to `default`
    pub fn page_size(&self, default: usize) -> usize {
        self.limit.unwrap_or(default).max(1)
    }

    /// Non-blank search term
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Field assignments for create/update commands
#[derive(Args, Debug, Default, Clone)]
pub struct FormArgs {
    /// Set a field, as `name=value` (repeatable)
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Prompt for every field
    #[arg(long, short = 'i')]
    pub interactive: bool,
}
