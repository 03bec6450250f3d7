//! Mock clinic API client for testing
//!
//! Provides an in-memory implementation of the API traits for unit testing
//! views and scans without making real HTTP calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::api::{AuthApi, ResourceApi};
use super::models::{Credentials, Resource};
use super::pagination::{ListQuery, Page, PageMeta};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Collections are stored as JSON keyed by resource path, so one mock serves
/// every entity type.
///
/// # Example
/// ```ignore
/// let mock = MockClinicClient::new()
///     .with_items(vec![fixtures::patient(1, 10)])
///     .await;
///
/// let page: Page<Patient> = mock.list(&ListQuery::new()).await?;
/// assert_eq!(page.items.len(), 1);
/// ```
#[derive(Default)]
pub struct MockClinicClient {
    /// Stored entities by collection path
    collections: Arc<Mutex<HashMap<&'static str, Vec<Value>>>>,
    /// `meta.totalPages` overrides by collection path
    total_pages: Arc<Mutex<HashMap<&'static str, usize>>>,
    /// Token returned from login/register
    token: Arc<Mutex<Option<String>>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Captured requests for test assertions
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A captured API request for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Operation name: list, get, create, update, delete, login, register
    pub operation: &'static str,
    /// Collection path (or auth endpoint)
    pub path: &'static str,
    /// Entity id for item operations
    pub id: Option<String>,
    /// Query for list operations
    pub query: Option<ListQuery>,
    /// Request body for mutations
    pub body: Option<Value>,
}

impl MockClinicClient {
    /// Create a new mock client with empty collections.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the collection for `R`.
    pub async fn with_items<R: Resource>(self, items: Vec<R>) -> Self {
        let values = items
            .iter()
            .map(|item| serde_json::to_value(item).expect("fixture serializes"))
            .collect();
        self.collections.lock().await.insert(R::PATH, values);
        self
    }

    /// Report `pages` as `meta.totalPages` for `R` regardless of content.
    pub async fn with_total_pages<R: Resource>(self, pages: usize) -> Self {
        self.total_pages.lock().await.insert(R::PATH, pages);
        self
    }

    /// Configure the token returned by login/register.
    pub async fn with_token(self, token: impl Into<String>) -> Self {
        *self.token.lock().await = Some(token.into());
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Arm an error for the next call on an already-built mock.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Get all captured requests for test assertions.
    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Number of list requests made so far.
    pub async fn list_calls(&self) -> usize {
        self.calls_to("list").await
    }

    /// Number of requests made for one operation.
    pub async fn calls_to(&self, operation: &str) -> usize {
        self.captured_requests
            .lock()
            .await
            .iter()
            .filter(|r| r.operation == operation)
            .count()
    }

    /// Current stored entities of `R`.
    pub async fn items<R: Resource>(&self) -> Vec<R> {
        self.collections
            .lock()
            .await
            .get(R::PATH)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| serde_json::from_value(v.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture(&self, request: CapturedRequest) {
        self.captured_requests.lock().await.push(request);
    }

    /// Position of the entity with `id` in the collection of `R`.
    fn position<R: Resource>(values: &[Value], id: &R::Id) -> Option<usize> {
        values.iter().position(|v| {
            serde_json::from_value::<R>(v.clone())
                .map(|item| item.id() == *id)
                .unwrap_or(false)
        })
    }

    fn overlay(base: &Value, patch: &Value) -> Value {
        let mut merged = base.clone();
        if let (Value::Object(target), Value::Object(source)) = (&mut merged, patch) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    fn decode<R: Resource>(value: Value) -> Result<R> {
        serde_json::from_value(value)
            .map_err(|e| ApiError::InvalidResponse(format!("mock entity: {}", e)).into())
    }
}

#[async_trait]
impl AuthApi for MockClinicClient {
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>> {
        self.capture(CapturedRequest {
            operation: "login",
            path: "/auth/login",
            id: None,
            query: None,
            body: serde_json::to_value(credentials).ok(),
        })
        .await;
        self.check_error().await?;
        Ok(self.token.lock().await.clone())
    }

    async fn register(&self, credentials: &Credentials) -> Result<Option<String>> {
        self.capture(CapturedRequest {
            operation: "register",
            path: "/auth/register",
            id: None,
            query: None,
            body: serde_json::to_value(credentials).ok(),
        })
        .await;
        self.check_error().await?;
        Ok(self.token.lock().await.clone())
    }
}

#[async_trait]
impl ResourceApi for MockClinicClient {
    async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Page<R>> {
        self.capture(CapturedRequest {
            operation: "list",
            path: R::PATH,
            id: None,
            query: Some(query.clone()),
            body: None,
        })
        .await;
        self.check_error().await?;

        let values = self
            .collections
            .lock()
            .await
            .get(R::PATH)
            .cloned()
            .unwrap_or_default();

        let total = values.len();
        let start = query.page.saturating_sub(1) * query.limit;
        let slice: Vec<Value> = values.into_iter().skip(start).take(query.limit).collect();
        let computed_pages = total.div_ceil(query.limit).max(1);
        let total_pages = self
            .total_pages
            .lock()
            .await
            .get(R::PATH)
            .copied()
            .unwrap_or(computed_pages);

        let items = slice
            .into_iter()
            .map(Self::decode::<R>)
            .collect::<Result<Vec<R>>>()?;

        let meta = PageMeta {
            total_items: Some(total),
            item_count: Some(items.len()),
            items_per_page: Some(query.limit),
            total_pages: Some(total_pages),
            current_page: Some(query.page),
        };

        Ok(Page::new(items, meta))
    }

    async fn get<R: Resource>(&self, id: &R::Id) -> Result<R> {
        self.capture(CapturedRequest {
            operation: "get",
            path: R::PATH,
            id: Some(id.to_string()),
            query: None,
            body: None,
        })
        .await;
        self.check_error().await?;

        let collections = self.collections.lock().await;
        let values = collections.get(R::PATH).map(Vec::as_slice).unwrap_or(&[]);
        match Self::position::<R>(values, id) {
            Some(index) => Self::decode(values[index].clone()),
            None => Err(ApiError::NotFound(format!("{}/{}", R::PATH, id)).into()),
        }
    }

    async fn create<R: Resource>(&self, payload: &R::Create) -> Result<R> {
        let body = serde_json::to_value(payload)?;
        self.capture(CapturedRequest {
            operation: "create",
            path: R::PATH,
            id: None,
            query: None,
            body: Some(body.clone()),
        })
        .await;
        self.check_error().await?;

        // Echo the payload on top of the first stored entity so the response
        // carries an id and every required field.
        let collections = self.collections.lock().await;
        let template = collections
            .get(R::PATH)
            .and_then(|values| values.first())
            .cloned()
            .ok_or_else(|| ApiError::BadRequest("mock has no template entity".into()))?;
        Self::decode(Self::overlay(&template, &body))
    }

    async fn update<R: Resource>(&self, id: &R::Id, payload: &R::Update) -> Result<R> {
        let body = serde_json::to_value(payload)?;
        self.capture(CapturedRequest {
            operation: "update",
            path: R::PATH,
            id: Some(id.to_string()),
            query: None,
            body: Some(body.clone()),
        })
        .await;
        self.check_error().await?;

        let mut collections = self.collections.lock().await;
        let values = collections.entry(R::PATH).or_default();
        let index = Self::position::<R>(values, id)
            .ok_or_else(|| ApiError::NotFound(format!("{}/{}", R::PATH, id)))?;
        let updated = Self::overlay(&values[index], &body);
        values[index] = updated.clone();
        Self::decode(updated)
    }

    async fn delete<R: Resource>(&self, id: &R::Id) -> Result<()> {
        self.capture(CapturedRequest {
            operation: "delete",
            path: R::PATH,
            id: Some(id.to_string()),
            query: None,
            body: None,
        })
        .await;
        self.check_error().await?;

        let mut collections = self.collections.lock().await;
        let values = collections.entry(R::PATH).or_default();
        let index = Self::position::<R>(values, id)
            .ok_or_else(|| ApiError::NotFound(format!("{}/{}", R::PATH, id)))?;
        values.remove(index);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fixtures;
    use crate::client::models::{Patient, PatientInput};
    use crate::error::Error;

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockClinicClient::new();
        let page: Page<Patient> = mock.list(&ListQuery::new()).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.meta.page_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_client_pages_items() {
        let patients = (1..=25).map(|i| fixtures::patient(i, i + 100)).collect();
        let mock = MockClinicClient::new().with_items::<Patient>(patients).await;

        let page: Page<Patient> = mock.list(&ListQuery::new().page(3)).await.unwrap();
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, 21);
        assert_eq!(page.meta.total_pages, Some(3));
        assert_eq!(page.meta.current_page, Some(3));
    }

    #[tokio::test]
    async fn test_mock_client_with_error_is_consumed() {
        let mock = MockClinicClient::new()
            .with_error(ApiError::ServerError("boom".into()))
            .await;

        let first: Result<Page<Patient>> = mock.list(&ListQuery::new()).await;
        assert!(matches!(first, Err(Error::Api(ApiError::ServerError(_)))));

        let second: Result<Page<Patient>> = mock.list(&ListQuery::new()).await;
        assert!(second.is_ok());
        assert_eq!(mock.list_calls().await, 2);
    }

    #[tokio::test]
    async fn test_mock_client_update_and_delete() {
        let mock = MockClinicClient::new()
            .with_items(vec![fixtures::patient(1, 10), fixtures::patient(2, 20)])
            .await;

        let input = PatientInput {
            id_usuario: 10,
            cedula: "0999999999".into(),
            fecha_nacimiento: "1990-01-01".into(),
            telefono: "555".into(),
            direccion: "Nueva".into(),
        };
        let updated: Patient = mock.update::<Patient>(&1, &input).await.unwrap();
        assert_eq!(updated.national_id, "0999999999");

        mock.delete::<Patient>(&2).await.unwrap();
        assert_eq!(mock.items::<Patient>().await.len(), 1);

        let missing = mock.delete::<Patient>(&2).await;
        assert!(matches!(missing, Err(Error::Api(ApiError::NotFound(_)))));
    }

    #[tokio::test]
    async fn test_mock_client_captures_requests() {
        let mock = MockClinicClient::new().with_token("a.b.c").await;
        let token = mock.login(&Credentials::new("u", "p")).await.unwrap();
        assert_eq!(token.as_deref(), Some("a.b.c"));

        let requests = mock.captured_requests().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].operation, "login");
        assert_eq!(requests[0].body.as_ref().unwrap()["nombre_usuario"], "u");
    }
}
