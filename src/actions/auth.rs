//! Login and registration. These are the only actions that run without a session.

use crate::actions::{ActionContext, Messages};
use crate::backend::{BackendInvoker, BackendRequest};
use crate::domain::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::domain::envelope::ApiEnvelope;

const LOGIN: Messages = Messages::new("Login successful", "Login failed");
const REGISTER: Messages = Messages::new("Registration successful", "Registration failed");

pub async fn login<B>(
    ctx: &ActionContext<'_, B>,
    request: &LoginRequest,
) -> ApiEnvelope<AuthResponse>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run_public(LOGIN, || Ok(BackendRequest::post("/auth/login").json(request)?)).await
}

pub async fn register<B>(
    ctx: &ActionContext<'_, B>,
    request: &RegisterRequest,
) -> ApiEnvelope<AuthResponse>
where
    B: BackendInvoker + ?Sized,
{
    ctx.run_public(REGISTER, || {
        Ok(BackendRequest::post("/auth/register").json(request)?)
    })
    .await
}
