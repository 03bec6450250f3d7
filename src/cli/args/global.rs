//! Global CLI options shared across all commands
//!
//! Consolidates the global flags into a single struct so handlers take one
//! argument instead of threading each flag through.

use crate::cli::{Cli, OutputFormat};
use crate::config::Config;

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the CLI/env layer; config file values are merged in
/// `CommandContext`.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, when given on the command line or environment
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.vitacare/config.yaml)
    pub config: Option<String>,

    /// API base URL override
    pub api_url: Option<String>,

    /// Debug logging enabled
    pub debug: bool,

    /// The command as typed, remembered when a sign-in is required
    pub command_line: String,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli, command_line: impl Into<String>) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            api_url: cli.api_url.clone(),
            debug: cli.debug,
            command_line: command_line.into(),
        }
    }

    /// Get config path as `Option<&str>`.
    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    /// Get API URL override as `Option<&str>`.
    pub fn api_url_ref(&self) -> Option<&str> {
        self.api_url.as_deref()
    }

    /// Output format after applying the config file preference.
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        self.format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_preference)
            })
            .unwrap_or_default()
    }
}

/// The command line as typed, without the binary path.
pub fn command_line_from_args<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parts = vec!["vitacare".to_string()];
    parts.extend(args.into_iter().skip(1).map(|a| {
        let a = a.as_ref();
        if a.contains(char::is_whitespace) {
            format!("\"{}\"", a)
        } else {
            a.to_string()
        }
    }));
    parts.join(" ")
}
