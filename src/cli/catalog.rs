//! Public medication catalogue
//!
//! Read-only and open to signed-out visitors.

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::resource;
use crate::cli::{CatalogCommands, CommandContext};
use crate::client::models::Medication;
use crate::error::Result;
use crate::models::Listing;

/// Run a catalogue subcommand.
pub async fn run(opts: &GlobalOptions, command: CatalogCommands) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;

    match command {
        CatalogCommands::List { list } => {
            let mut view = ctx.list_view::<Medication>(false, &list);
            resource::load(&mut view, ctx.format).await?;
            let rows: Vec<_> = view.items().iter().map(Listing::row).collect();
            resource::print_view(&view, &rows, ctx.format)
        }
        CatalogCommands::Get { id } => resource::get::<Medication>(&ctx, &id).await,
    }
}
