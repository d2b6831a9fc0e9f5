use serde::{Deserialize, Serialize};

use crate::domain::types::BearerToken;

/// Role claimed by the signed-in user. Only `ADMIN` has a dedicated variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Admin,
    Other(String),
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case(crate::ADMIN_ROLE) {
            Role::Admin
        } else {
            Role::Other(value)
        }
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Admin => crate::ADMIN_ROLE.to_string(),
            Role::Other(name) => name,
        }
    }
}

/// Server-side session as stored in the identity cookie.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub backend_token: Option<BearerToken>,
}

/// Authenticated view of a [`Session`]; always holds a backend token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Principal {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub backend_token: BearerToken,
}

impl Session {
    /// Returns the principal, or `None` when the session carries no backend token.
    pub fn principal(&self) -> Option<Principal> {
        let backend_token = self.backend_token.clone()?;
        Some(Principal {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
            role: self.role.clone(),
            backend_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(token: Option<&str>) -> Session {
        Session {
            user_id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            backend_token: token.map(|t| BearerToken::new(t).unwrap()),
        }
    }

    #[test]
    fn session_without_token_has_no_principal() {
        assert!(session(None).principal().is_none());
    }

    #[test]
    fn session_with_token_yields_principal() {
        let principal = session(Some("tok")).principal().unwrap();
        assert_eq!(principal.backend_token.as_str(), "tok");
        assert!(principal.role.is_admin());
    }

    #[test]
    fn role_parsing_is_case_insensitive_for_admin() {
        assert_eq!(Role::from("admin".to_string()), Role::Admin);
        assert_eq!(
            Role::from("CASHIER".to_string()),
            Role::Other("CASHIER".to_string())
        );
        assert_eq!(String::from(Role::Admin), "ADMIN");
    }
}
