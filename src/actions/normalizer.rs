//! Folds raw backend outcomes and action errors into [`ApiEnvelope`]s.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::actions::errors::{ActionError, ActionResult};
use crate::backend::RawResult;
use crate::domain::envelope::ApiEnvelope;

pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized - Please login";
pub const GENERIC_ERROR: &str = "An unexpected error occurred";

/// Error details that may be shown to users outside development.
pub const SAFE_ERROR_FRAGMENTS: [&str; 5] = [
    "Invalid credentials",
    "Unauthorized",
    "Not found",
    "Bad request",
    "Validation failed",
];

/// Decides how much of an error detail reaches the caller.
///
/// The allow-list is a plain substring match; it is not a security boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ErrorSanitizer {
    expose_details: bool,
}

impl ErrorSanitizer {
    pub const fn development() -> Self {
        Self {
            expose_details: true,
        }
    }

    pub const fn production() -> Self {
        Self {
            expose_details: false,
        }
    }

    pub const fn exposes_details(self) -> bool {
        self.expose_details
    }

    pub fn sanitize(self, detail: &str) -> String {
        if self.expose_details
            || SAFE_ERROR_FRAGMENTS
                .iter()
                .any(|fragment| detail.contains(fragment))
        {
            detail.to_string()
        } else {
            GENERIC_ERROR.to_string()
        }
    }
}

/// Decodes a backend outcome into a typed envelope.
///
/// A body that already has the envelope shape is returned as-is; any other
/// JSON body becomes the `data` of a success envelope, and an empty body
/// yields a success envelope without data.
pub fn decode<T>(raw: RawResult, success_message: &str) -> ActionResult<ApiEnvelope<T>>
where
    T: DeserializeOwned,
{
    match raw {
        RawResult::Success { body: None, .. } => Ok(ApiEnvelope::completed(success_message)),
        RawResult::Success {
            body: Some(body), ..
        } => {
            if is_envelope(&body) {
                let wire: ApiEnvelope<Value> = serde_json::from_value(body)
                    .map_err(|e| ActionError::Unexpected(format!("Malformed envelope: {e}")))?;
                retype(wire, success_message)
            } else {
                let data = serde_json::from_value(body)
                    .map_err(|e| ActionError::Unexpected(format!("Unexpected payload: {e}")))?;
                Ok(ApiEnvelope::success(success_message, data))
            }
        }
        RawResult::HttpError { status, message } => Err(ActionError::Http { status, message }),
        RawResult::NetworkError { message } => Err(ActionError::Network(message)),
    }
}

fn is_envelope(body: &Value) -> bool {
    body.get("success").is_some_and(Value::is_boolean)
}

fn retype<T>(wire: ApiEnvelope<Value>, success_message: &str) -> ActionResult<ApiEnvelope<T>>
where
    T: DeserializeOwned,
{
    let wire = wire.normalized();
    let data = match wire.data {
        Some(value) if !value.is_null() => Some(
            serde_json::from_value(value)
                .map_err(|e| ActionError::Unexpected(format!("Unexpected payload: {e}")))?,
        ),
        _ => None,
    };
    let message = if wire.message.is_empty() && wire.success {
        success_message.to_string()
    } else {
        wire.message
    };
    Ok(ApiEnvelope {
        success: wire.success,
        message,
        data,
        error: wire.error,
        created_at: wire.created_at,
    })
}

/// Builds the failure envelope for `err`, logging according to `sanitizer`.
pub fn failure<T>(err: &ActionError, fallback: &str, sanitizer: ErrorSanitizer) -> ApiEnvelope<T> {
    if let ActionError::Unauthenticated = err {
        log::debug!("{fallback}: no authenticated session");
        return ApiEnvelope::failure(UNAUTHORIZED_MESSAGE, err.to_string());
    }

    let detail = err.to_string();
    if sanitizer.exposes_details() {
        log::error!("{fallback}: {detail}");
    } else {
        log::error!("{fallback}");
    }
    ApiEnvelope::failure(fallback, sanitizer.sanitize(&detail))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, serde::Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn production_sanitizer_hides_unknown_details() {
        let sanitizer = ErrorSanitizer::production();
        assert_eq!(
            sanitizer.sanitize("connection refused at 10.0.0.4:5432"),
            GENERIC_ERROR
        );
        assert_eq!(
            sanitizer.sanitize("HTTP 401: Invalid credentials"),
            "HTTP 401: Invalid credentials"
        );
    }

    #[test]
    fn development_sanitizer_passes_everything() {
        let sanitizer = ErrorSanitizer::development();
        assert_eq!(sanitizer.sanitize("stack trace"), "stack trace");
    }

    #[test]
    fn envelope_body_is_returned_as_is() {
        let raw = RawResult::Success {
            status: 200,
            body: Some(json!({"success": true, "message": "Found", "data": {"id": "b-1"}})),
        };
        let envelope: ApiEnvelope<Item> = decode(raw, "ok").unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message, "Found");
        assert_eq!(
            envelope.data,
            Some(Item {
                id: "b-1".to_string()
            })
        );
    }

    #[test]
    fn bare_body_is_wrapped() {
        let raw = RawResult::Success {
            status: 200,
            body: Some(json!({"id": "b-2"})),
        };
        let envelope: ApiEnvelope<Item> = decode(raw, "Loaded").unwrap();
        assert_eq!(envelope.message, "Loaded");
        assert_eq!(envelope.data.unwrap().id, "b-2");
    }

    #[test]
    fn empty_body_is_completed() {
        let raw = RawResult::Success {
            status: 204,
            body: None,
        };
        let envelope: ApiEnvelope<()> = decode(raw, "Deleted").unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message, "Deleted");
        assert!(envelope.data.is_none());
    }

    #[test]
    fn failed_envelope_drops_data_without_decoding() {
        let raw = RawResult::Success {
            status: 200,
            body: Some(json!({"success": false, "message": "No", "data": "garbage"})),
        };
        let envelope: ApiEnvelope<Item> = decode(raw, "ok").unwrap();
        assert!(!envelope.success);
        assert!(envelope.data.is_none());
    }

    #[test]
    fn non_json_success_body_is_unexpected() {
        let raw = RawResult::Success {
            status: 200,
            body: Some(Value::String("<html/>".to_string())),
        };
        let result: ActionResult<ApiEnvelope<Item>> = decode(raw, "ok");
        assert!(matches!(result, Err(ActionError::Unexpected(_))));
    }

    #[test]
    fn http_error_maps_to_failure_with_fallback() {
        let raw = RawResult::HttpError {
            status: 404,
            message: "Not found".to_string(),
        };
        let err = decode::<Item>(raw, "ok").unwrap_err();
        let envelope: ApiEnvelope<Item> =
            failure(&err, "Failed to fetch brand", ErrorSanitizer::production());
        assert_eq!(envelope.message, "Failed to fetch brand");
        assert_eq!(envelope.error.as_deref(), Some("HTTP 404: Not found"));
        assert!(envelope.data.is_none());
    }

    #[test]
    fn unauthenticated_failure_uses_login_message() {
        let envelope: ApiEnvelope<Item> = failure(
            &ActionError::Unauthenticated,
            "Failed to create brand",
            ErrorSanitizer::production(),
        );
        assert_eq!(envelope.message, UNAUTHORIZED_MESSAGE);
        assert_eq!(envelope.error.as_deref(), Some("No authentication token"));
    }
}
