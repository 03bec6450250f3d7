//! Status command implementation

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::auth::TokenStore;
use crate::auth::storage::RETURN_TO_KEY;
use crate::auth::token;
use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Show configuration and session status
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "VitaCare Status".bold());

    let config_path = Config::resolve_path(opts.config_ref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not created, using defaults)".dimmed()
        );
    }

    let ctx = CommandContext::new(opts).await?;
    println!("API URL: {}", ctx.client.base_url().cyan());
    println!();

    match ctx.session.current_user() {
        Some(user) => {
            println!(
                "{} Signed in as {} ({})",
                "✓".green(),
                user.username.bold(),
                user.rol
            );
            let expiry = ctx
                .session
                .token()
                .and_then(token::decode)
                .and_then(|payload| payload.exp)
                .and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0));
            if let Some(expires) = expiry {
                let remaining = expires.signed_duration_since(Utc::now());
                println!(
                    "{} Session valid (expires in {}h {}m)",
                    "✓".green(),
                    remaining.num_hours(),
                    remaining.num_minutes() % 60
                );
            }
        }
        None if ctx.session.token().is_some() => {
            println!("{} Stored session token could not be read", "⚠".yellow());
            println!("  → Run 'vitacare login' to sign in again");
        }
        None => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run 'vitacare login' to sign in");
        }
    }

    if let Some(pending) = ctx.session.store().get(RETURN_TO_KEY) {
        println!("{} Pending after sign-in: {}", "○".dimmed(), pending.cyan());
    }

    println!();
    Ok(())
}
