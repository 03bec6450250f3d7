//! List screen rendering
//!
//! Turns a [`ListScreen`] snapshot into text: banners, the table, the
//! pagination control and the actions the viewer may take.

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use super::{json, table};
use crate::cli::OutputFormat;
use crate::error::Result;
use crate::view::{Action, ListScreen, Pagination};

#[derive(Serialize)]
struct ScreenJson<'a, T> {
    items: &'a [T],
    pagination: PaginationJson,
    actions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaginationJson {
    page: usize,
    total_pages: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_items: Option<usize>,
}

fn action_name(action: Action) -> &'static str {
    match action {
        Action::Create => "create",
        Action::Edit => "update",
        Action::Delete => "delete",
    }
}

/// Pagination control text, e.g. `Page 1 of 3 (25 total)`
pub fn format_pagination(pagination: &Pagination) -> String {
    let mut text = format!("Page {} of {}", pagination.current, pagination.total);
    if let Some(total) = pagination.total_items {
        text.push_str(&format!(" ({} total)", total));
    }
    if pagination.has_next() {
        text.push_str(&format!(" - next: --page {}", pagination.current + 1));
    }
    text
}

/// Render `screen` with `rows` as its table body.
///
/// `rows` are the display rows for `screen.rows`, built by the caller so
/// that cross-referenced labels can be filled in.
pub fn format_screen<R, T>(
    screen: &ListScreen<'_, R>,
    rows: &[T],
    format: OutputFormat,
) -> Result<String>
where
    T: Tabled + Serialize,
{
    let actions: Vec<&'static str> = screen.actions.iter().copied().map(action_name).collect();

    if format == OutputFormat::Json {
        return Ok(json::format_json(&ScreenJson {
            items: rows,
            pagination: PaginationJson {
                page: screen.pagination.current,
                total_pages: screen.pagination.total,
                total_items: screen.pagination.total_items,
            },
            actions,
            error: screen.error,
        })?);
    }

    let mut out = Vec::new();
    let pretty = format == OutputFormat::Pretty;

    if pretty {
        let mut title = capitalize(screen.title);
        if !screen.search.is_empty() {
            title.push_str(&format!(" matching \"{}\"", screen.search));
        }
        out.push(title.bold().to_string());
    }
    if let Some(error) = screen.error {
        out.push(format!("{} {}", "✗".red(), error.red()));
    }
    if let Some(success) = screen.success {
        out.push(format!("{} {}", "✓".green(), success));
    }

    out.push(table::format_table(rows));
    out.push(format_pagination(&screen.pagination));

    if pretty && !actions.is_empty() {
        out.push(format!("Actions: {}", actions.join(", ")).dimmed().to_string());
    }

    Ok(out.join("\n"))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
