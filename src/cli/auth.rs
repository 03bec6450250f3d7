//! Sign-in, registration and session commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;

use crate::auth::CurrentUser;
use crate::auth::gate::take_return_to;
use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, CredentialArgs, OutputFormat};
use crate::client::models::Credentials;
use crate::error::{AuthError, Error, Result};
use crate::output;

/// Sign in, then offer the command that was waiting for it.
pub async fn login(opts: &GlobalOptions, args: CredentialArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts).await?;
    let credentials = prompt_credentials(args, false)?;

    let pb = output::spinner("Signing in...", ctx.format);
    let result = ctx.session.login(&ctx.client, &credentials).await;
    pb.finish_and_clear();

    let user = match result {
        Ok(user) => user.clone(),
        Err(e) => {
            debug!("Login failed: {}", e);
            return Err(AuthError::IncorrectCredentials.into());
        }
    };
    signed_in(&ctx, &user);
    Ok(())
}

/// Create an account and sign in with it.
pub async fn register(opts: &GlobalOptions, args: CredentialArgs) -> Result<()> {
    let mut ctx = CommandContext::new(opts).await?;
    let credentials = prompt_credentials(args, true)?;

    let pb = output::spinner("Creating account...", ctx.format);
    let result = ctx.session.register(&ctx.client, &credentials).await;
    pb.finish_and_clear();

    let user = result?.clone();
    signed_in(&ctx, &user);
    Ok(())
}

/// Forget the stored session. Always succeeds locally.
pub async fn logout(opts: &GlobalOptions) -> Result<()> {
    let mut ctx = CommandContext::new(opts).await?;
    let was = ctx.session.current_user().map(|u| u.username.clone());
    ctx.session.logout().await?;

    match was {
        Some(name) => output::success(&format!("Signed out {}", name), ctx.format),
        None => output::success("Signed out", ctx.format),
    }
    Ok(())
}

/// Print the signed-in user.
pub async fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let principal = ctx.require_login()?;

    if ctx.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&principal.user)?);
    } else {
        println!(
            "{} (id {}, role {})",
            principal.user.username.bold(),
            principal.user.id,
            principal.user.rol
        );
    }
    Ok(())
}

fn signed_in(ctx: &CommandContext, user: &CurrentUser) {
    output::success(
        &format!("Signed in as {} ({})", user.username, user.rol),
        ctx.format,
    );
    if let Some(pending) = take_return_to(ctx.session.store()) {
        println!("Resume with: {}", pending.cyan());
    }
}

/// Fill in whatever the flags left out.
fn prompt_credentials(args: CredentialArgs, confirm: bool) -> Result<Credentials> {
    let theme = ColorfulTheme::default();

    let username = match args.username {
        Some(name) => name,
        None => Input::with_theme(&theme)
            .with_prompt("Username")
            .interact_text()?,
    };
    let username = username.trim().to_string();
    if username.is_empty() {
        return Err(Error::Other("Username is required".to_string()));
    }

    let password = match args.password {
        Some(password) => password,
        None => {
            let prompt = Password::with_theme(&theme).with_prompt("Password");
            if confirm {
                prompt
                    .with_confirmation("Repeat password", "Passwords do not match")
                    .interact()?
            } else {
                prompt.interact()?
            }
        }
    };

    Ok(Credentials::new(username, password))
}
