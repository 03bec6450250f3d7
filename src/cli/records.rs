//! Medical record commands
//!
//! Admins page through every record. Other users see only the records
//! attached to their own appointments, gathered in one pass and shown as a
//! single page.

use std::collections::HashSet;

use crate::cli::args::{GlobalOptions, ListArgs};
use crate::cli::handlers::resource;
use crate::cli::{CommandContext, ResourceCommands};
use crate::client::models::{Appointment, MedicalRecord, Patient};
use crate::client::{PageScan, Resource, ResourceApi, ScanOptions};
use crate::error::Result;
use crate::models::Listing;
use crate::output::{self, screen};
use crate::view::{ListScreen, Pagination};

/// Run a medical-record subcommand.
pub async fn run(opts: &GlobalOptions, command: ResourceCommands) -> Result<()> {
    let ctx = CommandContext::new(opts).await?;
    let principal = ctx.require_login()?;

    match command {
        ResourceCommands::List { list } if !principal.is_admin => {
            list_own(&ctx, principal.user.id, &list).await
        }
        command => resource::dispatch::<MedicalRecord>(&ctx, &principal, command).await,
    }
}

async fn list_own(ctx: &CommandContext, user_id: i64, args: &ListArgs) -> Result<()> {
    let pb = output::spinner(
        format!("Loading {}...", MedicalRecord::NOUN_PLURAL),
        ctx.format,
    );
    let result = own_records(&ctx.client, user_id, ctx.scan_options()).await;
    pb.finish_and_clear();

    let records = match result {
        Ok(records) => records,
        Err(e) => {
            output::error_banner(&format!("Could not load {}.", MedicalRecord::NOUN_PLURAL));
            return Err(e);
        }
    };

    let search = args.search_term().unwrap_or_default();
    let records = filter_by_text(records, search);
    let rows: Vec<_> = records.iter().map(Listing::row).collect();

    let own = ListScreen {
        title: MedicalRecord::NOUN_PLURAL,
        rows: &records,
        pagination: Pagination {
            current: 1,
            total: 1,
            total_items: Some(records.len()),
        },
        actions: &[],
        search,
        error: None,
        success: None,
    };
    println!("{}", screen::format_screen(&own, &rows, ctx.format)?);
    Ok(())
}

/// Records on appointments of the patient owned by `user_id`.
///
/// Walks patients, then that patient's appointments, then records, each
/// with a bounded scan. A user with no patient profile has no records.
pub async fn own_records<C: ResourceApi>(
    client: &C,
    user_id: i64,
    options: ScanOptions,
) -> Result<Vec<MedicalRecord>> {
    let patients: Vec<Patient> = PageScan::new(client, options.clone()).collect().await?;
    let patient_ids: HashSet<i64> = patients
        .iter()
        .filter(|p| p.user_id == user_id)
        .map(|p| p.id)
        .collect();
    if patient_ids.is_empty() {
        return Ok(Vec::new());
    }

    let appointments: Vec<Appointment> = PageScan::new(client, options.clone()).collect().await?;
    let appointment_ids: HashSet<i64> = appointments
        .iter()
        .filter(|a| patient_ids.contains(&a.patient_id))
        .map(|a| a.id)
        .collect();
    if appointment_ids.is_empty() {
        return Ok(Vec::new());
    }

    let records: Vec<MedicalRecord> = PageScan::new(client, options).collect().await?;
    Ok(records
        .into_iter()
        .filter(|r| appointment_ids.contains(&r.appointment_id))
        .collect())
}

/// Keep records whose diagnosis, treatment or notes contain `term`, ignoring case.
fn filter_by_text(records: Vec<MedicalRecord>, term: &str) -> Vec<MedicalRecord> {
    if term.is_empty() {
        return records;
    }
    let needle = term.to_lowercase();
    records
        .into_iter()
        .filter(|r| {
            [&r.diagnosis, &r.treatment, &r.notes]
                .iter()
                .any(|text| text.to_lowercase().contains(&needle))
        })
        .collect()
}
