//! Doctor commands
//!
//! Listing labels each doctor's user and specialty with names gathered by
//! bounded scans; everything else is the generic collection flow.

use std::collections::HashMap;

use log::warn;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::resource;
use crate::cli::{CommandContext, ResourceCommands};
use crate::client::models::{Doctor, Specialty, User};
use crate::client::{PageScan, Resource, ResourceApi, ScanOptions};
use crate::error::Result;
use crate::models::{DoctorDisplay, DoctorNames};

/// Run a doctor subcommand.
pub async fn run(opts: &GlobalOptions, command: ResourceCommands) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let principal = ctx.require_login()?;

    let list = match command {
        ResourceCommands::List { list } => list,
        command => return resource::dispatch::<Doctor>(&ctx, &principal, command).await,
    };

    let mut view = ctx.list_view::<Doctor>(principal.is_admin, &list);
    let (loaded, names) = futures::join!(
        resource::load(&mut view, ctx.format),
        resolve_names(&ctx.client, ctx.scan_options()),
    );
    loaded?;

    let rows: Vec<DoctorDisplay> = view
        .items()
        .iter()
        .map(|doctor| DoctorDisplay::with_names(doctor, &names))
        .collect();
    resource::print_view(&view, &rows, ctx.format)
}

/// Gather user and specialty names for labelling doctors.
///
/// Both scans run concurrently. A failed scan is logged and leaves its map
/// empty, so labels fall back to bare ids.
pub async fn resolve_names<C: ResourceApi>(client: &C, options: ScanOptions) -> DoctorNames {
    let (users, specialties) = futures::join!(
        PageScan::<C, User>::new(client, options.clone()).collect(),
        PageScan::<C, Specialty>::new(client, options).collect(),
    );

    DoctorNames {
        users: name_map(users, |u| u.username.clone()),
        specialties: name_map(specialties, |s| s.name.clone()),
    }
}

fn name_map<R: Resource<Id = i64>>(
    scanned: Result<Vec<R>>,
    name: impl Fn(&R) -> String,
) -> HashMap<i64, String> {
    match scanned {
        Ok(items) => items.iter().map(|item| (item.id(), name(item))).collect(),
        Err(e) => {
            warn!("Could not load {} for labels: {}", R::NOUN_PLURAL, e);
            HashMap::new()
        }
    }
}
