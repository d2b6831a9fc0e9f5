use serde::{Deserialize, Serialize};

use crate::domain::session::{Role, Session};
use crate::domain::types::BearerToken;

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Credentials returned by `/auth/login` and `/auth/register`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: BearerToken,
    #[serde(alias = "id")]
    pub user_id: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<AuthResponse> for Session {
    fn from(response: AuthResponse) -> Self {
        Session {
            user_id: response.user_id,
            email: response.email,
            role: response.role,
            backend_token: Some(response.token),
        }
    }
}
