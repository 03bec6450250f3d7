//! Common CLI types shared across commands

use clap::ValueEnum;

use crate::client::SortOrder;

/// Sort direction for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortDir {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl From<SortDir> for SortOrder {
    fn from(dir: SortDir) -> Self {
        match dir {
            SortDir::Asc => SortOrder::Asc,
            SortDir::Desc => SortOrder::Desc,
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - titles, banners, spinners and action hints
    Pretty,
    /// Table format - plain table and pagination line (global default)
    #[default]
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file, ignoring case.
    pub fn from_preference(name: &str) -> Option<Self> {
        Self::from_str(name.trim(), true).ok()
    }
}
