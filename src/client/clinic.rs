//! Clinic REST API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde_json::Value;
use tokio::sync::RwLock;

use super::api::{AuthApi, ResourceApi};
use super::models::{Credentials, LoginResponse, Resource};
use super::pagination::{ListQuery, Page};
use super::wire;
use crate::error::{ApiError, Result};

/// Client-side ceiling on request rate
const RATE_LIMIT_PER_SECOND: NonZeroU32 = NonZeroU32::new(20).unwrap();

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Bearer token shared between the session and the HTTP client.
///
/// The session writes it whenever the held token changes; the client reads
/// it on every request to build the `Authorization` header.
#[derive(Debug, Clone, Default)]
pub struct BearerSlot(Arc<RwLock<Option<String>>>);

impl BearerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the token, or clear it with `None`
    pub async fn set(&self, token: Option<String>) {
        *self.0.write().await = token;
    }

    pub async fn get(&self) -> Option<String> {
        self.0.read().await.clone()
    }
}

/// Clinic API client
pub struct ClinicClient {
    http: HttpClient,
    base_url: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    bearer: BearerSlot,
}

impl ClinicClient {
    /// Create a client for `base_url` that authenticates with `bearer`
    pub fn new(base_url: impl Into<String>, bearer: BearerSlot) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(RATE_LIMIT_PER_SECOND);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            rate_limiter,
            bearer,
        })
    }

    /// Base URL requests are issued against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and decode the JSON body.
    ///
    /// Empty success bodies (e.g. `204 No Content`) decode to `Value::Null`.
    async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
        authenticated: bool,
    ) -> Result<Value> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("{} {} {:?}", method, url, query);

        let mut request = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if authenticated {
            if let Some(token) = self.bearer.get().await {
                request = request.header("Authorization", format!("Bearer {}", token));
            }
        }
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request.send().await.map_err(ApiError::from)?;
        let status = response.status();
        debug!("{} {} -> {}", method, url, status);

        if status.is_success() {
            let text = response.text().await.map_err(ApiError::from)?;
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            let value = serde_json::from_str(&text).map_err(|e| {
                ApiError::InvalidResponse(format!("Failed to parse response: {}", e))
            })?;
            return Ok(value);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());
        let text = response.text().await.unwrap_or_default();

        Err(status_error(status, &text, path, retry_after).into())
    }

    async fn authenticate(&self, path: &str, credentials: &Credentials) -> Result<Option<String>> {
        let body = serde_json::to_value(credentials)?;
        let value = self.request(Method::POST, path, &[], Some(body), false).await?;
        let response: LoginResponse = serde_json::from_value(value).unwrap_or_default();
        Ok(response.into_token())
    }

    fn item_path<R: Resource>(id: &R::Id) -> String {
        format!("{}/{}", R::PATH, wire::path_segment(&id.to_string()))
    }
}

/// Map a non-success status and its body to an [`ApiError`].
///
/// The server's `message` field is surfaced where present.
fn status_error(status: StatusCode, body: &str, path: &str, retry_after: Option<u64>) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
        StatusCode::FORBIDDEN => ApiError::Forbidden,
        StatusCode::NOT_FOUND => ApiError::NotFound(wire::server_message_or(body, path)),
        StatusCode::TOO_MANY_REQUESTS => {
            ApiError::RateLimit(Duration::from_secs(retry_after.unwrap_or(60)))
        }
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::BadRequest(wire::server_message_or(
                body,
                "The server rejected the request",
            ))
        }
        status if status.is_server_error() => {
            ApiError::ServerError(wire::server_message_or(body, &status.to_string()))
        }
        status => ApiError::InvalidResponse(format!("Unexpected status code: {}", status)),
    }
}

#[async_trait]
impl AuthApi for ClinicClient {
    async fn login(&self, credentials: &Credentials) -> Result<Option<String>> {
        self.authenticate("/auth/login", credentials).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<Option<String>> {
        self.authenticate("/auth/register", credentials).await
    }
}

#[async_trait]
impl ResourceApi for ClinicClient {
    async fn list<R: Resource>(&self, query: &ListQuery) -> Result<Page<R>> {
        let params = query.to_query_params();
        let value = self.request(Method::GET, R::PATH, &params, None, true).await?;
        let page = Page::from_response(value, R::NOUN_PLURAL)?;
        debug!(
            "Fetched {} {} (page {}/{})",
            page.items.len(),
            R::NOUN_PLURAL,
            query.page,
            page.meta.page_count()
        );
        Ok(page)
    }

    async fn get<R: Resource>(&self, id: &R::Id) -> Result<R> {
        let value = self
            .request(Method::GET, &Self::item_path::<R>(id), &[], None, true)
            .await?;
        Ok(wire::decode_entity(value, R::NOUN)?)
    }

    async fn create<R: Resource>(&self, payload: &R::Create) -> Result<R> {
        let body = serde_json::to_value(payload)?;
        let value = self
            .request(Method::POST, R::PATH, &[], Some(body), true)
            .await?;
        Ok(wire::decode_entity(value, R::NOUN)?)
    }

    async fn update<R: Resource>(&self, id: &R::Id, payload: &R::Update) -> Result<R> {
        let body = serde_json::to_value(payload)?;
        let value = self
            .request(
                R::UPDATE_METHOD.as_method(),
                &Self::item_path::<R>(id),
                &[],
                Some(body),
                true,
            )
            .await?;
        Ok(wire::decode_entity(value, R::NOUN)?)
    }

    async fn delete<R: Resource>(&self, id: &R::Id) -> Result<()> {
        self.request(Method::DELETE, &Self::item_path::<R>(id), &[], None, true)
            .await?;
        Ok(())
    }
}
