//! The request/response pair that flows through the middleware chain, and the
//! [`Transport`] that finally puts it on the wire.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header::HeaderMap, Method, StatusCode};
use url::Url;

use crate::OpenAIResult;

/// An outgoing request, relative to the client's base URL.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ApiRequest {
    /// Creates a request without headers or body. `path` must start with a slash.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// A raw response. Status codes are not interpreted at this level.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }
}

/// Sends a request to `base_url` + the request path and hands back whatever came back.
///
/// Implement this to swap out the HTTP stack, or to stub the API in tests.
/// Failures that aren't a [`reqwest::Error`] should be reported as
/// [`crate::OpenAIError::Transport`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(
        &self,
        request: ApiRequest,
        base_url: &Url,
        operation_id: &str,
    ) -> OpenAIResult<ApiResponse>;
}

/// The default transport, backed by a [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client, e.g. one with timeouts or a proxy.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(
        &self,
        request: ApiRequest,
        base_url: &Url,
        operation_id: &str,
    ) -> OpenAIResult<ApiResponse> {
        let ApiRequest {
            method,
            path,
            headers,
            body,
        } = request;
        let url = endpoint_url(base_url, &path);

        tracing::debug!(operation_id, %method, %url, "sending request");

        let mut builder = self.client.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(ApiResponse {
            status,
            headers,
            body,
        })
    }
}

// `Url::join` would drop the last segment of a base like `https://api.openai.com/v1`,
// so the path is appended to the base path instead. The base query is kept.
pub(crate) fn endpoint_url(base_url: &Url, path: &str) -> Url {
    let mut url = base_url.clone();
    let path = format!("{}{path}", base_url.path().trim_end_matches('/'));
    url.set_path(&path);
    url
}
