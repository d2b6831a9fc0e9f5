//! Outbound calls to the storefront REST backend.
//!
//! [`BackendInvoker`] is the seam between the action pipeline and the
//! network: the production implementation is [`http::HttpBackend`], tests use
//! the `mockall` double from [`mock`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;

use crate::domain::file::FileUpload;
use crate::domain::types::BearerToken;
use crate::pagination::PageRequest;

pub mod http;
#[cfg(feature = "test-mocks")]
pub mod mock;

/// Payload attached to a [`BackendRequest`].
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Multipart(FileUpload),
}

/// One request against the backend, relative to its base URL.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    pub bearer: Option<BearerToken>,
    pub timeout: Option<Duration>,
}

impl BackendRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
            bearer: None,
            timeout: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Serializes `body` as the JSON payload.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, serde_json::Error> {
        self.body = RequestBody::Json(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn multipart(mut self, file: FileUpload) -> Self {
        self.body = RequestBody::Multipart(file);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    pub fn page(self, page: &PageRequest) -> Self {
        self.query_pairs(page.to_query())
    }

    pub fn bearer(mut self, token: BearerToken) -> Self {
        self.bearer = Some(token);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Terminal outcome of one backend invocation. No retries are attempted.
#[derive(Clone, Debug, PartialEq)]
pub enum RawResult {
    /// 2xx response; `body` is `None` when the response had no content.
    Success {
        status: u16,
        body: Option<serde_json::Value>,
    },
    /// Non-2xx response with the best message that could be extracted.
    HttpError { status: u16, message: String },
    /// The request never produced a response (DNS, connect, timeout).
    NetworkError { message: String },
}

#[async_trait]
pub trait BackendInvoker: Send + Sync {
    async fn invoke(&self, request: BackendRequest) -> RawResult;
}
