//! Generic resource API trait

use async_trait::async_trait;

use crate::client::models::Resource;
use crate::client::pagination::{ListQuery, Page};
use crate::error::Result;

/// CRUD operations over a REST collection.
///
/// Every method is generic over the entity, so a single client serves all
/// collections. Failures propagate to the caller; nothing is retried.
#[async_trait]
pub trait ResourceApi: Send + Sync {
    /// `GET PATH?page&limit&search&searchField&sort&order`
    async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Page<R>>;

    /// `GET PATH/:id`
    async fn get<R: Resource>(&self, id: &R::Id) -> Result<R>;

    /// `POST PATH`
    async fn create<R: Resource>(&self, payload: &R::Create) -> Result<R>;

    /// `PATCH|PUT PATH/:id`, depending on the collection
    async fn update<R: Resource>(&self, id: &R::Id, payload: &R::Update) -> Result<R>;

    /// `DELETE PATH/:id`
    async fn delete<R: Resource>(&self, id: &R::Id) -> Result<()>;
}
