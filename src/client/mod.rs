//! Clinic REST API client

pub mod api;
pub mod clinic;
#[cfg(test)]
pub mod fixtures;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod pagination;
pub mod scan;
pub mod wire;

pub use api::{AuthApi, ResourceApi};
pub use clinic::{BearerSlot, ClinicClient};
#[cfg(test)]
pub use mock::MockClinicClient;
pub use models::Resource;
pub use pagination::{ListQuery, Page, PageMeta, SortOrder};
pub use scan::{PageScan, ScanOptions};
