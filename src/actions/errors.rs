use thiserror::Error;

use crate::domain::types::TypeConstraintError;

/// Every way an action can fail before it is folded into a failure envelope.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    #[error("No authentication token")]
    Unauthenticated,

    #[error("{}", describe_http(.status, .message))]
    Http { status: u16, message: String },

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Unexpected(String),
}

pub type ActionResult<T> = Result<T, ActionError>;

fn describe_http(status: &u16, message: &str) -> String {
    if message == format!("HTTP {status}") {
        message.to_string()
    } else {
        format!("HTTP {status}: {message}")
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(err: serde_json::Error) -> Self {
        ActionError::Unexpected(format!("Serialization error: {err}"))
    }
}

impl From<TypeConstraintError> for ActionError {
    fn from(err: TypeConstraintError) -> Self {
        ActionError::Unexpected(format!("Invalid input: {err}"))
    }
}
