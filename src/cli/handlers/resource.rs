//! Generic collection command handlers
//!
//! Every collection runs the same flow: gate, build a list view, act on it,
//! print. Collections with extra behaviour (doctor labels, per-patient
//! history) intercept `list` and delegate the rest here.

use colored::Colorize;
use dialoguer::{Input, Select, theme::ColorfulTheme};
use log::debug;
use serde::Serialize;
use tabled::Tabled;

use super::prompt;
use crate::auth::Principal;
use crate::cli::args::{FormArgs, GlobalOptions, ListArgs};
use crate::cli::{CommandContext, OutputFormat, ResourceCommands};
use crate::client::models::parse_id;
use crate::client::{ClinicClient, ResourceApi};
use crate::error::{Error, Result};
use crate::models::Listing;
use crate::output::{self, screen};
use crate::view::form::{FormResource, parse_assignments};
use crate::view::ListView;

/// Gate on sign-in, then run `command` against collection `R`.
pub async fn run<R: Listing>(opts: &GlobalOptions, command: ResourceCommands) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let principal = ctx.require_login()?;
    dispatch::<R>(&ctx, &principal, command).await
}

/// Gate on the admin role, then run `command` against collection `R`.
pub async fn run_admin<R: Listing>(opts: &GlobalOptions, command: ResourceCommands) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let principal = ctx.require_admin()?;
    dispatch::<R>(&ctx, &principal, command).await
}

/// Run `command` for an already admitted `principal`.
pub async fn dispatch<R: Listing>(
    ctx: &CommandContext,
    principal: &Principal,
    command: ResourceCommands,
) -> Result<()> {
    match command {
        ResourceCommands::List { list } => self::list::<R>(ctx, principal, &list).await,
        ResourceCommands::Browse { list } => browse::<R>(ctx, principal, &list).await,
        ResourceCommands::Get { id } => get::<R>(ctx, &id).await,
        ResourceCommands::Create { form } => create::<R>(ctx, principal, &form).await,
        ResourceCommands::Update { id, form } => update::<R>(ctx, principal, &id, &form).await,
        ResourceCommands::Delete { id, yes } => delete::<R>(ctx, principal, &id, yes).await,
    }
}

/// Fetch the view's current page behind a spinner.
///
/// On failure the view's banner is printed before the error is returned.
pub async fn load<R: FormResource>(
    view: &mut ListView<'_, R, ClinicClient>,
    format: OutputFormat,
) -> Result<()> {
    let pb = output::spinner(format!("Loading {}...", R::NOUN_PLURAL), format);
    let result = view.refresh().await;
    pb.finish_and_clear();

    if result.is_err() {
        if let Some(banner) = view.error() {
            output::error_banner(banner);
        }
    }
    result
}

/// Print the view with `rows` as the table body.
pub fn print_view<R: FormResource, T: Tabled + Serialize>(
    view: &ListView<'_, R, ClinicClient>,
    rows: &[T],
    format: OutputFormat,
) -> Result<()> {
    println!("{}", screen::format_screen(&view.render(), rows, format)?);
    Ok(())
}

fn rows_of<R: Listing>(view: &ListView<'_, R, ClinicClient>) -> Vec<R::Row> {
    view.items().iter().map(Listing::row).collect()
}

/// `list`: one page, rendered.
pub async fn list<R: Listing>(
    ctx: &CommandContext,
    principal: &Principal,
    args: &ListArgs,
) -> Result<()> {
    let mut view = ctx.list_view::<R>(principal.is_admin, args);
    load(&mut view, ctx.format).await?;
    print_view(&view, &rows_of(&view), ctx.format)
}

/// `get`: one entity as a single-row table or a JSON object.
pub async fn get<R: Listing>(ctx: &CommandContext, id: &str) -> Result<()> {
    let id = parse_id::<R>(id)?;
    let pb = output::spinner(format!("Loading {}...", R::NOUN), ctx.format);
    let result = ctx.client.get::<R>(&id).await;
    pb.finish_and_clear();

    let item = result?;
    println!("{}", output::format_record(&item.row(), ctx.format)?);
    Ok(())
}

/// Submit the view's open dialog and report the outcome.
async fn submit<R: Listing>(
    view: &mut ListView<'_, R, ClinicClient>,
    format: OutputFormat,
) -> Result<()> {
    match view.submit().await {
        Ok(saved) => {
            if let Some(message) = view.success() {
                output::success(message, format);
            }
            println!("{}", output::format_record(&saved.row(), format)?);
            Ok(())
        }
        Err(Error::Api(e)) => {
            debug!("Save failed: {}", e);
            let message = view.error().map(str::to_string).unwrap_or_else(|| e.to_string());
            Err(Error::Other(message))
        }
        Err(e) => Err(e),
    }
}

/// `create`: fill the form from `-f` assignments and/or prompts, then save.
pub async fn create<R: Listing>(
    ctx: &CommandContext,
    principal: &Principal,
    form: &FormArgs,
) -> Result<()> {
    let assignments = parse_assignments(&form.fields)?;
    let mut view = ctx.list_view::<R>(principal.is_admin, &ListArgs::default());

    let dialog = view.open_create()?;
    dialog.apply(&assignments)?;
    if form.interactive {
        prompt::fill_form(dialog)?;
    }

    submit(&mut view, ctx.format).await
}

/// `update`: prefill from the current entity, apply changes, then save.
pub async fn update<R: Listing>(
    ctx: &CommandContext,
    principal: &Principal,
    id: &str,
    form: &FormArgs,
) -> Result<()> {
    let assignments = parse_assignments(&form.fields)?;
    let id = parse_id::<R>(id)?;
    let mut view = ctx.list_view::<R>(principal.is_admin, &ListArgs::default());
    view.require_manage("edit")?;

    if assignments.is_empty() && !form.interactive {
        return Err(Error::Other(
            "Nothing to change. Pass `-f name=value` or `--interactive`.".to_string(),
        ));
    }

    let current = ctx.client.get::<R>(&id).await?;
    let dialog = view.open_edit(current)?;
    dialog.apply(&assignments)?;
    if form.interactive {
        prompt::fill_form(dialog)?;
    }

    submit(&mut view, ctx.format).await
}

/// `delete`: confirm unless `yes`, then delete.
pub async fn delete<R: Listing>(
    ctx: &CommandContext,
    principal: &Principal,
    id: &str,
    yes: bool,
) -> Result<()> {
    let id = parse_id::<R>(id)?;
    let mut view = ctx.list_view::<R>(principal.is_admin, &ListArgs::default());
    view.require_manage("delete")?;

    let confirmed = yes || prompt::confirm_delete(&format!("{} {}", R::NOUN, id))?;
    match view.delete(&id, confirmed).await {
        Ok(true) => {
            if let Some(message) = view.success() {
                output::success(message, ctx.format);
            }
            Ok(())
        }
        Ok(false) => {
            println!("Cancelled.");
            Ok(())
        }
        Err(Error::Api(e)) => {
            debug!("Delete failed: {}", e);
            let message = view.error().map(str::to_string).unwrap_or_else(|| e.to_string());
            Err(Error::Other(message))
        }
        Err(e) => Err(e),
    }
}

const NEXT: &str = "Next page";
const PREV: &str = "Previous page";
const SEARCH: &str = "Search";
const CREATE: &str = "Create";
const EDIT: &str = "Edit";
const DELETE: &str = "Delete";
const QUIT: &str = "Quit";

/// `browse`: an interactive loop over the list view.
pub async fn browse<R: Listing>(
    ctx: &CommandContext,
    principal: &Principal,
    args: &ListArgs,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let mut view = ctx.list_view::<R>(principal.is_admin, args);
    if let Err(e) = load(&mut view, ctx.format).await {
        debug!("Initial load failed: {}", e);
    }

    loop {
        print_view(&view, &rows_of(&view), ctx.format)?;

        let mut choices = vec![NEXT, PREV, SEARCH];
        if view.can_manage() {
            choices.extend([CREATE, EDIT, DELETE]);
        }
        choices.push(QUIT);

        let picked = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&choices)
            .default(0)
            .interact()?;

        let outcome = match choices[picked] {
            NEXT => view.next_page().await,
            PREV => view.prev_page().await,
            SEARCH => {
                let term: String = Input::with_theme(&theme)
                    .with_prompt("Search")
                    .with_initial_text(view.applied_search())
                    .allow_empty(true)
                    .interact_text()?;
                view.input_search(term);
                view.settle_search().await.map(|_| ())
            }
            CREATE => {
                let dialog = view.open_create()?;
                prompt::fill_form(dialog)?;
                submit(&mut view, ctx.format).await
            }
            EDIT => match pick_row(&view, &theme, "Edit which?")? {
                Some(item) => {
                    let dialog = view.open_edit(item)?;
                    prompt::fill_form(dialog)?;
                    submit(&mut view, ctx.format).await
                }
                None => Ok(()),
            },
            DELETE => match pick_row(&view, &theme, "Delete which?")? {
                Some(item) => {
                    let id = item.id();
                    let confirmed = prompt::confirm_delete(&format!("{} {}", R::NOUN, id))?;
                    view.delete(&id, confirmed).await.map(|_| ())
                }
                None => Ok(()),
            },
            _ => break,
        };

        if let Err(e) = outcome {
            eprintln!("{} {}", "✗".red(), e);
            view.close_dialog();
        }
    }

    Ok(())
}

fn pick_row<R: Listing>(
    view: &ListView<'_, R, ClinicClient>,
    theme: &ColorfulTheme,
    prompt: &str,
) -> Result<Option<R>> {
    let items = view.items();
    if items.is_empty() {
        println!("Nothing on this page.");
        return Ok(None);
    }

    let labels: Vec<String> = items
        .iter()
        .map(|item| format!("{} #{}", R::NOUN, item.id()))
        .collect();
    let picked = Select::with_theme(theme)
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact_opt()?;

    Ok(picked.map(|index| items[index].clone()))
}
