use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::{LoginRequest, RegisterRequest};

#[derive(Deserialize, Validate)]
/// Credentials submitted to the login route.
pub struct LoginForm {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Deserialize, Validate)]
/// Account details submitted to the registration route.
pub struct RegisterForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    /// Minimum length mirrors the backend's password policy.
    #[validate(length(min = 6))]
    pub password: String,
}

impl From<LoginForm> for LoginRequest {
    fn from(form: LoginForm) -> Self {
        Self {
            email: form.email.trim().to_string(),
            password: form.password,
        }
    }
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        Self {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            password: form.password,
        }
    }
}
