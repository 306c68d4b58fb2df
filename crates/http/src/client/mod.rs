//! EduPredict API client
//!
//! The bearer credential is read from the store when each request is built,
//! never captured at construction, so a login that lands between two calls is
//! picked up by the second call without rebuilding the client. A 401 response
//! deletes the credential and fires the unauthorized hook before the error is
//! returned, whichever endpoint produced it.

pub mod auth;
pub mod dashboard;
pub mod error;
pub mod predictions;
pub mod students;

use crate::retry::RetryPolicy;
use edupredict_core::{CredentialStore, MemoryCredentialStore};
use error::ClientError;
use reqwest::{header, Client, ClientBuilder};
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, warn};

type UnauthorizedHook = Arc<dyn Fn() + Send + Sync>;

/// EduPredict API client
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
    unauthorized: Arc<Mutex<Option<UnauthorizedHook>>>,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The credential store this client reads on every request
    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.credentials)
    }

    /// Install the hook fired after a 401 tears the credential down.
    ///
    /// Replaces any previously installed hook. The credential is already
    /// removed from the store by the time the hook runs.
    pub fn set_unauthorized_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        *self
            .unauthorized
            .lock()
            .expect("unauthorized hook lock poisoned") = Some(Arc::new(hook));
    }

    /// Remove the unauthorized hook
    pub fn clear_unauthorized_hook(&self) {
        *self
            .unauthorized
            .lock()
            .expect("unauthorized hook lock poisoned") = None;
    }

    pub(crate) fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Create a request builder, attaching the current credential if one
    /// exists in storage at call time
    pub async fn request(
        &self,
        method: reqwest::Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.request(method, url);

        if let Some(token) = self.credentials.get().await? {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        Ok(request)
    }

    /// Execute a request and deserialize the JSON response body
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.check(request.send().await?).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Execute a request and discard the response body
    pub async fn execute_unit(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        self.check(request.send().await?).await.map(|_| ())
    }

    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = error_message(response).await;
        debug!(status = status.as_u16(), "backend returned error: {message}");

        if status == reqwest::StatusCode::UNAUTHORIZED {
            self.teardown_credential().await;
        }

        Err(ClientError::from_status(status, message))
    }

    /// Credential removal completes before the hook runs, so an observer
    /// woken by the hook never reads a token the backend already rejected.
    async fn teardown_credential(&self) {
        if let Err(err) = self.credentials.clear().await {
            warn!("failed to clear rejected credential: {err}");
        }

        let hook = self
            .unauthorized
            .lock()
            .expect("unauthorized hook lock poisoned")
            .clone();
        if let Some(hook) = hook {
            hook();
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the backend's `message` field out of an error body, falling back to
/// the raw text and then the status line
async fn error_message(response: reqwest::Response) -> String {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorBody>(&text) {
        Ok(body) => body.message,
        Err(_) if !text.trim().is_empty() => text,
        Err(_) => status.to_string(),
    }
}

/// In-memory file payload attached to multipart writes
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub(crate) fn into_part(self) -> Result<reqwest::multipart::Part, ClientError> {
        let part = reqwest::multipart::Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.content_type)?;
        Ok(part)
    }
}

/// Builder for ApiClient
#[derive(Default)]
pub struct ApiClientBuilder {
    base_url: Option<String>,
    credentials: Option<Arc<dyn CredentialStore>>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    retry: Option<RetryPolicy>,
}

impl ApiClientBuilder {
    /// Set the base URL (origin only; paths carry the `/api` prefix)
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the credential store shared with the session layer
    pub fn credentials(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.credentials = Some(store);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Set the retry bounds applied to list reads
    pub fn retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = Some(retry);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<ApiClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();

        let mut client_builder = ClientBuilder::new();

        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        if let Some(user_agent) = self.user_agent {
            client_builder = client_builder.user_agent(user_agent);
        } else {
            client_builder = client_builder.user_agent("edupredict-client/0.1.0");
        }

        let client = client_builder.build()?;

        Ok(ApiClient {
            client,
            base_url,
            credentials: self
                .credentials
                .unwrap_or_else(|| Arc::new(MemoryCredentialStore::new())),
            unauthorized: Arc::new(Mutex::new(None)),
            retry: self.retry.unwrap_or_default(),
        })
    }
}
