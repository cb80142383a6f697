//! HTTP transport core.
//!
//! [`ApiClient`] owns one [`reqwest::Client`] (connection pooling, fixed
//! request timeout), the API base URL, and a [`Session`] handle.  All
//! typed endpoint wrappers (`alunos`, `professores`, `invite_codes`,
//! `historico`, `auth`) are `impl ApiClient` blocks in their own modules
//! and go through the uniform helpers here, so every call shares the
//! same bearer-header, error-classification, and 401-teardown path.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::{classify_response, ApiError, ApiResult};
use crate::session::Session;

/// HTTP client for the coaching API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    /// Build a client from configuration.
    ///
    /// Fails only if the underlying TLS/connection setup fails.
    pub fn new(config: &ClientConfig, session: Session) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        tracing::debug!(base_url = %config.base_url, "API client initialized");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The session handle shared with this client.
    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send a prepared request: attach the bearer credential, classify
    /// non-2xx responses, and route 401s through session teardown.
    async fn send(&self, builder: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
        let builder = match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = classify_response(status.as_u16(), &body);
        if matches!(err, ApiError::Unauthorized) {
            self.session.expire();
        }
        tracing::warn!(status = status.as_u16(), error = %err, "API request failed");
        Err(err)
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let mut builder = self.http.get(self.url(path));
        if !query.is_empty() {
            builder = builder.query(query);
        }
        let response = self.send(builder).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> ApiResult<T> {
        let response = self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST whose response body the caller does not consume.
    pub(crate) async fn post_unit(&self, path: &str, body: &Value) -> ApiResult<()> {
        self.send(self.http.post(self.url(path)).json(body)).await?;
        Ok(())
    }

    pub(crate) async fn put_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &Value,
    ) -> ApiResult<T> {
        let response = self.send(self.http.put(self.url(path)).json(body)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn delete(&self, path: &str) -> ApiResult<()> {
        self.send(self.http.delete(self.url(path))).await?;
        Ok(())
    }
}
