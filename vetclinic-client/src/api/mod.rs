//! Request gateway for the clinic backend.
//!
//! Every call goes through [`ApiClient::request`]: the path is appended to the
//! configured base URL, JSON headers are set, the stored bearer token is
//! attached, and the response is returned as JSON or text depending on its
//! content type. Any status outside 2xx becomes [`ApiError::RequestFailed`].

mod appointments;
mod auth;
mod owners;
mod pets;

use std::sync::Arc;

use reqwest::{
    Client, Method, StatusCode,
    header::{self, HeaderMap, HeaderName, HeaderValue},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::{config::ClientConfig, models::ErrorBody};
use tracing::{debug, warn};

use crate::{
    error::ApiError,
    storage::{AUTH_TOKEN_KEY, SessionStorage},
};

const JSON_CONTENT_TYPE: &str = "application/json";

/// Per-request options for [`ApiClient::request`].
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method; `GET` by default.
    pub method: Method,
    /// Body, already serialized to JSON by the caller.
    pub body: Option<String>,
    /// Headers replacing the JSON defaults of the same name.
    pub headers: HeaderMap,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl RequestOptions {
    /// Options for `method` with no body and no extra headers.
    #[must_use]
    pub fn new(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: HeaderMap::new(),
        }
    }

    /// Attaches a pre-serialized JSON body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }
}

/// A successful response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The response declared a JSON content type.
    Json(Value),
    /// Anything else, including empty bodies.
    Text(String),
}

impl Payload {
    /// The JSON document, if this is one.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            Self::Text(_) => None,
        }
    }

    /// The raw text, if the body was not JSON.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Json(_) => None,
            Self::Text(text) => Some(text),
        }
    }

    /// Decodes a JSON payload into `T`.
    ///
    /// # Errors
    /// Returns [`ApiError::MalformedResponse`] when the body is text or does not
    /// match `T`.
    pub fn decode<T: DeserializeOwned>(self, path: &str) -> Result<T, ApiError> {
        match self {
            Self::Json(value) => serde_json::from_value(value)
                .map_err(|err| ApiError::malformed(path, err.to_string())),
            Self::Text(text) => Err(ApiError::malformed(
                path,
                format!("expected a JSON body, got {} bytes of text", text.len()),
            )),
        }
    }
}

/// Gateway to the clinic backend.
///
/// Cloning is cheap: clones share the HTTP connection pool and the session
/// storage.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: Client,
    storage: Arc<dyn SessionStorage>,
}

impl ApiClient {
    /// Creates a gateway for `base_url` using `storage` for the session.
    pub fn new(base_url: &str, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            storage,
        }
    }

    /// Creates a gateway from configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(
        config: &ClientConfig,
        storage: Arc<dyn SessionStorage>,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|err| {
                ApiError::request_failed(None, format!("failed to build HTTP client: {err}"))
            })?;
        Ok(Self {
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            client,
            storage,
        })
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Storage holding the session keys.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn SessionStorage> {
        &self.storage
    }

    /// Absolute URL for a backend path.
    #[must_use]
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Performs one HTTP exchange.
    ///
    /// # Errors
    /// * [`ApiError::RequestFailed`] for transport failures and non-2xx
    ///   statuses. The message is the body's `error` field, else its `message`
    ///   field, else `HTTP {status}: {body}`.
    /// * [`ApiError::MalformedResponse`] for a 2xx body that claims to be JSON
    ///   but does not parse.
    /// * [`ApiError::Storage`] if the token cannot be read.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Payload, ApiError> {
        let url = self.api_url(path);
        let headers = self.request_headers(options.headers)?;

        debug!(method = %options.method, url = %url, "sending request");
        let mut request = self
            .client
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|err| {
            warn!(method = %options.method, url = %url, error = %err, "request failed");
            ApiError::request_failed(None, err.to_string())
        })?;

        let status = response.status();
        let is_json = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains(JSON_CONTENT_TYPE));
        let raw = response
            .text()
            .await
            .map_err(|err| ApiError::request_failed(Some(status.as_u16()), err.to_string()))?;
        debug!(
            method = %options.method,
            url = %url,
            status = status.as_u16(),
            json = is_json,
            "received response"
        );

        let parsed = (is_json && !raw.trim().is_empty())
            .then(|| serde_json::from_str::<Value>(&raw));

        if !status.is_success() {
            let body = parsed.as_ref().and_then(|result| result.as_ref().ok());
            let message = failure_message(status, body, &raw);
            warn!(
                method = %options.method,
                url = %url,
                status = status.as_u16(),
                message = %message,
                "backend rejected request"
            );
            return Err(ApiError::request_failed(Some(status.as_u16()), message));
        }

        match parsed {
            None => Ok(Payload::Text(raw)),
            Some(Ok(value)) => Ok(Payload::Json(value)),
            Some(Err(err)) => Err(ApiError::malformed(path, format!("invalid JSON body: {err}"))),
        }
    }

    /// `GET path`.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str) -> Result<Payload, ApiError> {
        self.request(path, RequestOptions::new(Method::GET)).await
    }

    /// `POST path` with `body` serialized as JSON.
    ///
    /// # Errors
    /// See [`ApiClient::request`]; also fails if `body` cannot be serialized.
    pub async fn post<B>(&self, path: &str, body: &B) -> Result<Payload, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::new(Method::POST).with_body(encode_body(body)?);
        self.request(path, options).await
    }

    /// `PUT path` with `body` serialized as JSON.
    ///
    /// # Errors
    /// See [`ApiClient::request`]; also fails if `body` cannot be serialized.
    pub async fn put<B>(&self, path: &str, body: &B) -> Result<Payload, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let options = RequestOptions::new(Method::PUT).with_body(encode_body(body)?);
        self.request(path, options).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str) -> Result<Payload, ApiError> {
        self.request(path, RequestOptions::new(Method::DELETE)).await
    }

    pub(crate) async fn get_as<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get(path).await?.decode(path)
    }

    pub(crate) async fn post_as<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post(path, body).await?.decode(path)
    }

    pub(crate) async fn put_as<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.put(path, body).await?.decode(path)
    }

    fn request_headers(&self, overrides: HeaderMap) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        headers.insert(header::ACCEPT, HeaderValue::from_static(JSON_CONTENT_TYPE));
        for (name, value) in &overrides {
            headers.insert(name.clone(), value.clone());
        }

        if let Some(token) = self.stored_token()? {
            let value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                ApiError::CorruptSession(format!(
                    "stored `{AUTH_TOKEN_KEY}` is not a valid header value"
                ))
            })?;
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }
}

fn encode_body<B: Serialize + ?Sized>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|err| {
        ApiError::request_failed(None, format!("failed to encode request body: {err}"))
    })
}

/// Message for a rejected request: `error`, else `message`, else `HTTP {status}: {raw}`.
pub(crate) fn failure_message(status: StatusCode, body: Option<&Value>, raw: &str) -> String {
    body.map(ErrorBody::from_json)
        .and_then(|body| body.best_message().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}: {raw}", status.as_u16()))
}
