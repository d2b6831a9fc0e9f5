//! Strongly-typed value objects used by the action pipeline.
//!
//! These wrappers enforce basic invariants (non-empty tokens, path-safe
//! identifiers) so that once a value reaches the backend invoker it can be
//! spliced into a request without further checks.
use std::fmt::{Debug, Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided string contained no non-whitespace characters.
    #[error("value cannot be empty")]
    EmptyString,
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Trims the input and rejects empty results.
fn non_empty<S: Into<String>>(value: S) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        return Err(TypeConstraintError::EmptyString);
    }
    Ok(trimmed)
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

non_empty_string_newtype!(
    BearerToken,
    "Opaque backend credential issued at login. `Debug` never prints the secret."
);

impl BearerToken {
    /// Wraps a trimmed, non-empty token.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Ok(Self(non_empty(value)?))
    }
}

impl Debug for BearerToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(***)")
    }
}

non_empty_string_newtype!(
    ResourceId,
    "Identifier of a backend resource, safe to use as a single URL path segment."
);

impl ResourceId {
    /// Trims the identifier and rejects values that would escape their path segment.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let id = non_empty(value)?;
        if id.contains(['/', '\\', '?', '#', '%']) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "identifier `{id}` contains reserved characters"
            )));
        }
        if id == "." || id == ".." {
            return Err(TypeConstraintError::InvalidValue(format!(
                "identifier `{id}` is a relative path segment"
            )));
        }
        Ok(Self(id))
    }
}

impl Debug for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ResourceId").field(&self.0).finish()
    }
}

impl Display for ResourceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_rejects_blank_values() {
        assert_eq!(BearerToken::new("   "), Err(TypeConstraintError::EmptyString));
        assert_eq!(BearerToken::new(" abc ").unwrap().as_str(), "abc");
    }

    #[test]
    fn bearer_token_debug_is_redacted() {
        let token = BearerToken::new("super-secret").unwrap();
        assert_eq!(format!("{token:?}"), "BearerToken(***)");
    }

    #[test]
    fn resource_id_rejects_path_separators() {
        assert!(ResourceId::new("cat-1").is_ok());
        assert!(matches!(
            ResourceId::new("../admin"),
            Err(TypeConstraintError::InvalidValue(_))
        ));
        assert!(matches!(
            ResourceId::new("1?x=2"),
            Err(TypeConstraintError::InvalidValue(_))
        ));
        assert_eq!(ResourceId::new(""), Err(TypeConstraintError::EmptyString));
    }

    #[test]
    fn resource_id_rejects_dot_segments_and_escapes() {
        for id in [".", "..", " .. ", "a%2Fb", "%2e%2e", "a\\b"] {
            assert!(
                matches!(ResourceId::new(id), Err(TypeConstraintError::InvalidValue(_))),
                "{id} should be rejected"
            );
        }
        assert!(ResourceId::new("v1.2").is_ok());
        assert!(ResourceId::new("...").is_ok());
    }

    #[test]
    fn resource_id_deserialization_enforces_constraints() {
        let parsed: Result<ResourceId, _> = serde_json::from_str("\"a/b\"");
        assert!(parsed.is_err());
        let parsed: ResourceId = serde_json::from_str("\" p-7 \"").unwrap();
        assert_eq!(parsed.as_str(), "p-7");
    }
}
