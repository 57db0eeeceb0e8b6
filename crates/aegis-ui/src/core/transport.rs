//! HTTP transport pipeline shared by every API wrapper.
//!
//! # Design
//! - Request stage: attach the bearer credential when one is stored; a missing
//!   credential never fails locally, the server decides.
//! - Response stage: classify the body once into [`Payload`], unwrap successful
//!   envelopes, and route every failure through one message-extraction path.
//! - A 401 clears credentials and notifies the [`UnauthorizedHandler`] before
//!   the error reaches the caller. No retries happen here.
//! - The wire is behind [`HttpBackend`] so the browser and native hosts plug in
//!   their own clients.

use crate::core::config::ClientConfig;
use crate::core::envelope::{Payload, extract_message};
use crate::core::error::{ApiError, ApiResult};
use crate::core::storage::CredentialStore;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Write as _;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

/// HTTP status signalling an authentication failure.
pub const STATUS_UNAUTHORIZED: u16 = 401;

/// HTTP verbs used by the console API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `PATCH`
    Patch,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Uppercase verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// Outbound call as described by an API wrapper.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: Method,
    /// Path relative to the API base.
    pub path: String,
    /// Optional JSON body.
    pub body: Option<Value>,
    /// Query pairs, already filtered of absent values.
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    /// Request with no body or query.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    /// `GET path`.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// `POST path`.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// `PUT path`.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    /// `DELETE path`.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when `body` cannot be encoded.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|err| ApiError::validation(format!("request body is not encodable: {err}")))?;
        self.body = Some(value);
        Ok(self)
    }

    /// Add a query pair; `None` values are skipped.
    #[must_use]
    pub fn query<V: ToString>(mut self, key: &str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.query.push((key.to_string(), value.to_string()));
        }
        self
    }
}

/// Request after the request stage, ready for the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedRequest {
    /// HTTP verb.
    pub method: Method,
    /// Absolute or origin-relative URL including the query string.
    pub url: String,
    /// Header pairs to send.
    pub headers: Vec<(String, String)>,
    /// Serialized JSON body.
    pub body: Option<String>,
    /// Timeout the backend should enforce.
    pub timeout: Duration,
}

impl PreparedRequest {
    /// Value of the first header named `name` (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Response as observed on the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct RawResponse {
    /// HTTP status.
    pub status: u16,
    /// Parsed body; see [`crate::core::envelope::parse_body`].
    pub body: Value,
}

impl RawResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// The request produced no response (DNS, connection, timeout, abort).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("network request failed: {detail}")]
pub struct NetworkError {
    /// Backend-provided detail.
    pub detail: String,
}

impl NetworkError {
    /// Wrap any displayable backend failure.
    #[must_use]
    pub fn new(detail: impl ToString) -> Self {
        Self {
            detail: detail.to_string(),
        }
    }
}

/// Wire-level HTTP client.
#[async_trait(?Send)]
pub trait HttpBackend {
    /// Send a prepared request and return the status plus parsed body.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError`] when no response was received.
    async fn send(&self, request: PreparedRequest) -> Result<RawResponse, NetworkError>;
}

/// Receiver of authentication failures.
pub trait UnauthorizedHandler {
    /// Called for every 401 before the error is returned to the caller.
    fn notify_unauthorized(&self);
}

/// The transport pipeline.
#[derive(Clone)]
pub struct Transport {
    config: Rc<ClientConfig>,
    backend: Rc<dyn HttpBackend>,
    credentials: CredentialStore,
    on_unauthorized: Rc<dyn UnauthorizedHandler>,
}

impl Transport {
    /// Assemble a pipeline.
    #[must_use]
    pub fn new(
        config: Rc<ClientConfig>,
        backend: Rc<dyn HttpBackend>,
        credentials: CredentialStore,
        on_unauthorized: Rc<dyn UnauthorizedHandler>,
    ) -> Self {
        Self {
            config,
            backend,
            credentials,
            on_unauthorized,
        }
    }

    /// Credential store this pipeline reads from.
    #[must_use]
    pub const fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Send `request` and decode the unwrapped payload into `T`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for network, domain, HTTP, and decode failures.
    pub async fn request<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let value = self.execute(request).await?;
        serde_json::from_value(value).map_err(|err| ApiError::Decode {
            message: self.config.request_failed_message.clone(),
            detail: err.to_string(),
        })
    }

    /// `GET path`, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.request(ApiRequest::get(path)).await
    }

    /// `POST path` with a JSON body, decoded into `T`.
    ///
    /// # Errors
    ///
    /// See [`Transport::request`].
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        self.request(ApiRequest::post(path).json(body)?).await
    }

    /// Run both pipeline stages and return the unwrapped JSON payload.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] for network, domain, and HTTP failures.
    pub async fn execute(&self, request: ApiRequest) -> ApiResult<Value> {
        let method = request.method;
        let path = request.path.clone();
        let prepared = self.prepare(request);
        tracing::debug!(method = method.as_str(), path = %path, "sending api request");

        let response = match self.backend.send(prepared).await {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(path = %path, error = %err, "api request produced no response");
                return Err(ApiError::Network {
                    message: self.config.request_failed_message.clone(),
                    detail: err.detail,
                });
            }
        };

        if response.is_success() {
            match Payload::classify(response.body) {
                Payload::Data(data) => Ok(data),
                Payload::Rejected { code, body } => {
                    tracing::debug!(path = %path, code, "api envelope reported failure");
                    Err(ApiError::Domain {
                        status: response.status,
                        code,
                        message: self.failure_message(&body),
                        body,
                    })
                }
                Payload::Raw(body) => Ok(body),
            }
        } else {
            Err(self.reject(&path, response))
        }
    }

    fn prepare(&self, request: ApiRequest) -> PreparedRequest {
        let mut url = self.config.endpoint(&request.path);
        for (index, (key, value)) in request.query.iter().enumerate() {
            let separator = if index == 0 && !url.contains('?') { '?' } else { '&' };
            let _ = write!(
                url,
                "{separator}{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            );
        }
        let mut headers = vec![("Content-Type".to_string(), "application/json".to_string())];
        if let Some(token) = self.credentials.access_token() {
            headers.push(("Authorization".to_string(), format!("Bearer {token}")));
        }
        PreparedRequest {
            method: request.method,
            url,
            headers,
            body: request.body.map(|body| body.to_string()),
            timeout: self.config.request_timeout,
        }
    }

    fn reject(&self, path: &str, response: RawResponse) -> ApiError {
        if response.status == STATUS_UNAUTHORIZED {
            tracing::warn!(path = %path, "api request rejected as unauthorized");
            self.credentials.clear();
            self.on_unauthorized.notify_unauthorized();
            let message = extract_message(&response.body)
                .unwrap_or_else(|| self.config.session_expired_message.clone());
            return ApiError::Unauthorized {
                body: response.body,
                message,
            };
        }
        ApiError::Status {
            status: response.status,
            message: self.failure_message(&response.body),
            body: response.body,
        }
    }

    fn failure_message(&self, body: &Value) -> String {
        extract_message(body).unwrap_or_else(|| self.config.request_failed_message.clone())
    }
}
