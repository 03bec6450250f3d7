//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::config::{Config, DEFAULT_API_URL};
use crate::error::Result;

const FORMATS: &[&str] = &["table", "pretty", "json"];

/// Run the init command
///
/// Prompts for the API URL and list preferences, starting from the current
/// file when one exists.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut config = Config::load_at(opts.config_ref())?;

    println!("{}", "Welcome to VitaCare!".bold().green());
    println!("Let's set up your clinic API connection.\n");

    let current_url = opts
        .api_url
        .clone()
        .or_else(|| config.api_url.clone())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let api_url: String = Input::with_theme(&theme)
        .with_prompt("Clinic API URL")
        .with_initial_text(current_url)
        .interact_text()?;
    config.api_url = Some(api_url.trim().trim_end_matches('/').to_string());

    config.preferences.page_size = Input::with_theme(&theme)
        .with_prompt("Rows per page")
        .default(config.preferences.page_size)
        .validate_with(|n: &usize| if *n > 0 { Ok(()) } else { Err("must be at least 1") })
        .interact_text()?;

    let current_format = config
        .preferences
        .format
        .as_deref()
        .and_then(|f| FORMATS.iter().position(|known| *known == f))
        .unwrap_or(0);
    let format = Select::with_theme(&theme)
        .with_prompt("Default output format")
        .items(FORMATS)
        .default(current_format)
        .interact()?;
    config.preferences.format = Some(FORMATS[format].to_string());

    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Sign in", "vitacare login".cyan());
    println!("  {} - Show configuration status", "vitacare status".cyan());
    println!("  {} - Browse medications", "vitacare catalog list".cyan());

    Ok(())
}
