//! Bounded, cancellable collection scans
//!
//! Some views need a whole collection (to resolve names, or to join records
//! client-side). A scan walks pages with a fixed page size and stops at the
//! last page, at a short page, at a hard page ceiling, or when cancelled.

use log::debug;
use tokio_util::sync::CancellationToken;

use super::api::ResourceApi;
use super::models::Resource;
use super::pagination::ListQuery;
use crate::error::{ApiError, Result};

/// Page size used while scanning
pub const SCAN_PAGE_SIZE: usize = 100;

/// Default ceiling on pages walked by one scan
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Scan limits and cancellation
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub page_size: usize,
    pub max_pages: usize,
    pub cancel: CancellationToken,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            page_size: SCAN_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            cancel: CancellationToken::new(),
        }
    }
}

impl ScanOptions {
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    pub fn cancel_with(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// Page-by-page walk over a collection.
///
/// # Example
/// ```ignore
/// let users: Vec<User> = PageScan::new(&client, ScanOptions::default())
///     .collect()
///     .await?;
/// ```
pub struct PageScan<'a, C, R>
where
    C: ResourceApi,
    R: Resource,
{
    client: &'a C,
    options: ScanOptions,
    next_page: usize,
    finished: bool,
    _marker: std::marker::PhantomData<fn() -> R>,
}

impl<'a, C, R> PageScan<'a, C, R>
where
    C: ResourceApi,
    R: Resource,
{
    pub fn new(client: &'a C, options: ScanOptions) -> Self {
        Self {
            client,
            options,
            next_page: 1,
            finished: false,
            _marker: std::marker::PhantomData,
        }
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(None)` once the collection is exhausted. Fails with
    /// [`ApiError::ScanLimitExceeded`] when the ceiling is reached with pages
    /// left, and with [`ApiError::Cancelled`] when the token fires.
    pub async fn next_page(&mut self) -> Result<Option<Vec<R>>> {
        if self.finished {
            return Ok(None);
        }

        let page = self.next_page;
        if page > self.options.max_pages {
            self.finished = true;
            return Err(ApiError::ScanLimitExceeded {
                resource: R::NOUN_PLURAL.to_string(),
                pages: self.options.max_pages,
            }
            .into());
        }

        let query = ListQuery::new().page(page).limit(self.options.page_size);

        let client = self.client;
        let cancel = self.options.cancel.clone();
        let fetched = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ApiError::Cancelled.into()),
            result = client.list::<R>(&query) => result,
        };

        let fetched = match fetched {
            Ok(p) => p,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        let total_pages = fetched.meta.page_count();
        let short = fetched.items.len() < self.options.page_size;
        debug!(
            "Scan of {}: page {} of {} ({} items)",
            R::NOUN_PLURAL,
            page,
            total_pages,
            fetched.items.len()
        );

        if page >= total_pages || short {
            self.finished = true;
        }
        self.next_page += 1;

        Ok(Some(fetched.items))
    }

    /// Walk every page and concatenate the items.
    pub async fn collect(mut self) -> Result<Vec<R>> {
        let mut all = Vec::new();
        while let Some(items) = self.next_page().await? {
            all.extend(items);
        }
        Ok(all)
    }
}
