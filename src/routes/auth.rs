use actix_identity::Identity;
use actix_web::{HttpMessage, HttpRequest, Responder, post, web};
use serde::Serialize;
use validator::Validate;

use crate::actions::{ActionContext, ActionSettings, auth};
use crate::domain::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::domain::envelope::ApiEnvelope;
use crate::domain::session::{Role, Session};
use crate::forms::FormError;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::routes::{SharedBackend, respond};
use crate::session::SessionCodec;

const LOGIN_FAILED: &str = "Login failed";
const REGISTER_FAILED: &str = "Registration failed";
const MISSING_CREDENTIALS: &str = "Backend returned no credentials";

/// Account details returned to the browser. The backend token stays in the
/// signed session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedIn {
    pub user_id: String,
    pub email: String,
    pub role: Role,
    pub name: Option<String>,
}

impl From<AuthResponse> for SignedIn {
    fn from(response: AuthResponse) -> Self {
        Self {
            user_id: response.user_id,
            email: response.email,
            role: response.role,
            name: response.name,
        }
    }
}

fn store_session(
    req: &HttpRequest,
    codec: &SessionCodec,
    session: &Session,
) -> Result<(), String> {
    let token = codec.encode(session).map_err(|e| e.to_string())?;
    Identity::login(&req.extensions(), token).map_err(|e| e.to_string())?;
    Ok(())
}

/// Opens a session for a successful auth envelope.
fn sign_in(
    req: &HttpRequest,
    codec: &SessionCodec,
    settings: &ActionSettings,
    envelope: ApiEnvelope<AuthResponse>,
    failure: &str,
) -> ApiEnvelope<SignedIn> {
    if !envelope.success {
        return envelope.map_data(SignedIn::from);
    }
    let Some(response) = envelope.data.as_ref() else {
        log::error!("{failure}: {MISSING_CREDENTIALS}");
        return ApiEnvelope::failure(failure, settings.sanitizer.sanitize(MISSING_CREDENTIALS));
    };

    let session = Session::from(response.clone());
    if let Err(e) = store_session(req, codec, &session) {
        log::error!("Failed to store session: {e}");
        return ApiEnvelope::failure(failure, settings.sanitizer.sanitize(&e));
    }
    log::info!(
        "Signed in {} (admin: {})",
        session.email,
        session.role.is_admin()
    );
    envelope.map_data(SignedIn::from)
}

fn invalid_form(
    e: validator::ValidationErrors,
    failure: &str,
    settings: &ActionSettings,
) -> ApiEnvelope<SignedIn> {
    let e = FormError::from(e);
    log::warn!("{failure}: {e}");
    ApiEnvelope::failure(failure, settings.sanitizer.sanitize(&e.to_string()))
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    web::Json(form): web::Json<LoginForm>,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
    codec: web::Data<SessionCodec>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return respond(invalid_form(e, LOGIN_FAILED, &settings));
    }
    let ctx = ActionContext::new(backend.get_ref(), None, *settings.get_ref());
    let envelope = auth::login(&ctx, &LoginRequest::from(form)).await;
    respond(sign_in(&req, &codec, &settings, envelope, LOGIN_FAILED))
}

#[post("/register")]
pub async fn register(
    req: HttpRequest,
    web::Json(form): web::Json<RegisterForm>,
    backend: SharedBackend,
    settings: web::Data<ActionSettings>,
    codec: web::Data<SessionCodec>,
) -> impl Responder {
    if let Err(e) = form.validate() {
        return respond(invalid_form(e, REGISTER_FAILED, &settings));
    }
    let ctx = ActionContext::new(backend.get_ref(), None, *settings.get_ref());
    let envelope = auth::register(&ctx, &RegisterRequest::from(form)).await;
    respond(sign_in(&req, &codec, &settings, envelope, REGISTER_FAILED))
}

#[post("/logout")]
pub async fn logout(identity: Option<Identity>) -> impl Responder {
    if let Some(identity) = identity {
        identity.logout();
    }
    respond(ApiEnvelope::<()>::completed("Logged out successfully"))
}
