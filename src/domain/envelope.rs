//! Uniform result wrapper exchanged with the backend and returned by every action.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Success/failure wrapper shared by the backend API and the server actions.
///
/// A failed envelope never carries `data`; constructors and
/// [`ApiEnvelope::normalized`] keep that invariant.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default = "none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

// `#[serde(default)]` on `Option<T>` would require `T: Default`.
fn none<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    /// Successful result carrying a payload.
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
            created_at: None,
        }
    }

    /// Successful result of a mutation that returns nothing.
    pub fn completed(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
            created_at: None,
        }
    }

    /// Failed result with a user-facing message and an error detail.
    pub fn failure(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            error: Some(error.into()),
            created_at: None,
        }
    }

    /// Drops any payload attached to a failed envelope.
    pub fn normalized(mut self) -> Self {
        if !self.success {
            self.data = None;
        }
        self
    }

    /// Transforms the payload while keeping the rest of the envelope intact.
    pub fn map_data<U, F>(self, f: F) -> ApiEnvelope<U>
    where
        F: FnOnce(T) -> U,
    {
        ApiEnvelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
            error: self.error,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn failure_serializes_null_data() {
        let envelope: ApiEnvelope<u32> = ApiEnvelope::failure("Failed", "boom");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"success": false, "message": "Failed", "data": null, "error": "boom"})
        );
    }

    #[test]
    fn deserializes_backend_envelope_with_timestamp() {
        let envelope: ApiEnvelope<Vec<u32>> = serde_json::from_value(json!({
            "success": true,
            "message": "ok",
            "data": [1, 2],
            "createdAt": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(envelope.data, Some(vec![1, 2]));
        assert!(envelope.created_at.is_some());
        assert!(envelope.error.is_none());
    }

    #[test]
    fn normalized_clears_data_on_failure() {
        let envelope = ApiEnvelope {
            success: false,
            message: "nope".to_string(),
            data: Some(1),
            error: None,
            created_at: None,
        };
        assert_eq!(envelope.normalized().data, None);
    }
}
