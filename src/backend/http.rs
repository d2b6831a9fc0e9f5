use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};

use crate::backend::{BackendInvoker, BackendRequest, RawResult, RequestBody};
use crate::domain::file::FileUpload;

/// [`BackendInvoker`] backed by a shared `reqwest` client.
#[derive(Clone, Debug)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Builds a client with default settings. No global timeout is applied.
    pub fn connect(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("storefront-admin/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::new(client, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }
}

fn multipart_form(file: FileUpload) -> Form {
    let FileUpload {
        file_name,
        content_type,
        bytes,
    } = file;
    let part = Part::bytes(bytes.clone()).file_name(file_name.clone());
    let part = match part.mime_str(&content_type) {
        Ok(part) => part,
        Err(err) => {
            log::warn!("Ignoring invalid content type `{content_type}` for upload: {err}");
            Part::bytes(bytes).file_name(file_name)
        }
    };
    Form::new().part("file", part)
}

fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("Request timed out: {err}")
    } else if err.is_connect() {
        format!("Connection failed: {err}")
    } else {
        format!("Request failed: {err}")
    }
}

/// Extracts `message` (or `error`) from a JSON error body.
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || format!("HTTP {}", status.as_u16());
    if body.trim().is_empty() {
        return fallback();
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => ["message", "error"]
            .iter()
            .find_map(|key| {
                value
                    .get(key)
                    .and_then(|v| v.as_str())
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(fallback),
        Err(_) => fallback(),
    }
}

async fn read_response(response: Response) -> RawResult {
    let status = response.status();
    let text = match response.text().await {
        Ok(text) => text,
        Err(err) => {
            return RawResult::NetworkError {
                message: describe_transport_error(&err),
            };
        }
    };

    if !status.is_success() {
        return RawResult::HttpError {
            status: status.as_u16(),
            message: error_message(status, &text),
        };
    }

    let body = if text.trim().is_empty() {
        None
    } else {
        // A non-JSON success body is handed on verbatim and rejected when decoded.
        Some(serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text)))
    };

    RawResult::Success {
        status: status.as_u16(),
        body,
    }
}

#[async_trait]
impl BackendInvoker for HttpBackend {
    async fn invoke(&self, request: BackendRequest) -> RawResult {
        let BackendRequest {
            method,
            path,
            query,
            body,
            bearer,
            timeout,
        } = request;

        let mut builder = self
            .client
            .request(method.clone(), self.url(&path))
            .header(ACCEPT, "application/json");

        if !query.is_empty() {
            builder = builder.query(&query);
        }
        if let Some(token) = &bearer {
            builder = builder.bearer_auth(token.as_str());
        }
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder = match body {
            RequestBody::Empty => builder.header(CONTENT_TYPE, "application/json"),
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => builder.multipart(multipart_form(file)),
        };

        log::debug!("{method} {path}");

        match builder.send().await {
            Ok(response) => read_response(response).await,
            Err(err) => RawResult::NetworkError {
                message: describe_transport_error(&err),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_message_field() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"message":"Validation failed","error":"name"}"#,
        );
        assert_eq!(message, "Validation failed");
    }

    #[test]
    fn error_message_uses_error_field() {
        let message = error_message(StatusCode::NOT_FOUND, r#"{"error":"Not found"}"#);
        assert_eq!(message, "Not found");
    }

    #[test]
    fn error_message_falls_back_to_status() {
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "HTTP 502");
        assert_eq!(
            error_message(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>"),
            "HTTP 500"
        );
        assert_eq!(
            error_message(StatusCode::FORBIDDEN, r#"{"message":"  "}"#),
            "HTTP 403"
        );
    }

    #[test]
    fn url_joins_paths() {
        let backend = HttpBackend::new(Client::new(), "http://api.local/v1/");
        assert_eq!(backend.base_url(), "http://api.local/v1");
        assert_eq!(backend.url("/brands"), "http://api.local/v1/brands");
        assert_eq!(backend.url("brands"), "http://api.local/v1/brands");
    }
}
