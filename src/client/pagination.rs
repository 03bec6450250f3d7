//! Pagination helpers for API requests
//!
//! List endpoints take `page`, `limit`, `search`, `searchField`, `sort` and
//! `order` query parameters and answer with `{ items, meta }`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire;
use crate::error::ApiError;

/// Rows per page when the caller does not say otherwise
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// List query parameters.
///
/// # Example
/// ```ignore
/// let query = ListQuery::new()
///     .limit(10)
///     .page(2)
///     .search("diabetes", "diagnostico")
///     .sort("createdAt", SortOrder::Desc);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Page number, 1-based
    pub page: usize,
    /// Items per page
    pub limit: usize,
    /// Free-text search term
    pub search: Option<String>,
    /// Field the search term applies to
    pub search_field: Option<String>,
    /// Sort field name
    pub sort: Option<String>,
    /// Sort order
    pub order: Option<SortOrder>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            search_field: None,
            sort: None,
            order: None,
        }
    }
}

/// Sort order for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order (A-Z, 0-9, oldest first)
    Asc,
    /// Descending order (Z-A, 9-0, newest first)
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl ListQuery {
    /// Create a query for the first page with the default page size.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number (values below 1 are clamped to 1).
    pub fn page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Search `term` in `field`. A blank term clears both.
    pub fn search(mut self, term: impl Into<String>, field: Option<&str>) -> Self {
        let term = term.into();
        let trimmed = term.trim();
        if trimmed.is_empty() {
            self.search = None;
            self.search_field = None;
        } else {
            self.search = Some(trimmed.to_string());
            self.search_field = field.map(str::to_string);
        }
        self
    }

    /// Set the sort field and order.
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(field.into());
        self.order = Some(order);
        self
    }

    /// Convert to query string parameters.
    ///
    /// `page` and `limit` are always sent; the rest only when set.
    pub fn to_query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];

        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }

        if let Some(ref field) = self.search_field {
            params.push(("searchField", field.clone()));
        }

        if let Some(ref sort) = self.sort {
            params.push(("sort", sort.clone()));
        }

        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }

        params
    }
}

/// Response metadata for paginated results.
///
/// Every field is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Total number of items across all pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<usize>,

    /// Number of items in this page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,

    /// Items per page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items_per_page: Option<usize>,

    /// Total number of pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,

    /// Current page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_page: Option<usize>,
}

impl PageMeta {
    /// Total pages, treating a missing or zero count as a single page.
    pub fn page_count(&self) -> usize {
        self.total_pages.unwrap_or(1).max(1)
    }
}

/// A page of items with its metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, meta: PageMeta) -> Self {
        Self { items, meta }
    }

    /// A single page holding every item, as produced by client-side joins.
    pub fn single(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            items,
            meta: PageMeta {
                total_items: Some(count),
                item_count: Some(count),
                items_per_page: Some(count),
                total_pages: Some(1),
                current_page: Some(1),
            },
        }
    }
}

impl<T: serde::de::DeserializeOwned> Page<T> {
    /// Parse a list response, normalising the optional `data` envelope.
    ///
    /// A missing `items` array yields an empty page; a missing `meta` yields
    /// empty metadata.
    pub fn from_response(value: Value, what: &str) -> Result<Self, ApiError> {
        let mut payload = wire::unwrap_envelope(value);

        let items = match payload.get_mut("items").map(Value::take) {
            Some(Value::Array(raw)) => raw
                .into_iter()
                .map(|item| {
                    serde_json::from_value(item).map_err(|e| {
                        ApiError::InvalidResponse(format!("Failed to parse {}: {}", what, e))
                    })
                })
                .collect::<Result<Vec<T>, ApiError>>()?,
            _ => Vec::new(),
        };

        let meta = payload
            .get_mut("meta")
            .map(Value::take)
            .and_then(|m| serde_json::from_value(m).ok())
            .unwrap_or_default();

        Ok(Self { items, meta })
    }
}
