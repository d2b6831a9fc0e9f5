//! Server actions: session-gated backend calls that always return an envelope.
//!
//! Every action is a specialization of [`ActionContext::run`]: resolve the
//! principal, build a [`BackendRequest`], invoke it with the bearer token and
//! normalize the outcome. Nothing escapes as an error.

use std::time::Duration;

use serde::de::{DeserializeOwned, IgnoredAny};

use crate::actions::errors::{ActionError, ActionResult};
use crate::actions::normalizer::ErrorSanitizer;
use crate::backend::{BackendInvoker, BackendRequest};
use crate::domain::envelope::ApiEnvelope;
use crate::domain::session::Session;
use crate::domain::types::{BearerToken, ResourceId};

pub mod auth;
pub mod brands;
pub mod categories;
pub mod errors;
pub mod files;
pub mod normalizer;
pub mod products;
pub mod sales;

/// Upload deadline applied when no configuration overrides it.
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(45);

/// Deployment-wide knobs shared by all actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionSettings {
    pub sanitizer: ErrorSanitizer,
    pub upload_timeout: Duration,
}

impl Default for ActionSettings {
    fn default() -> Self {
        Self {
            sanitizer: ErrorSanitizer::production(),
            upload_timeout: DEFAULT_UPLOAD_TIMEOUT,
        }
    }
}

/// User-facing messages of one operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Messages {
    pub success: &'static str,
    pub failure: &'static str,
}

impl Messages {
    pub const fn new(success: &'static str, failure: &'static str) -> Self {
        Self { success, failure }
    }
}

/// Explicit per-request context handed to every action.
pub struct ActionContext<'a, B: ?Sized> {
    backend: &'a B,
    session: Option<&'a Session>,
    settings: ActionSettings,
}

impl<'a, B> ActionContext<'a, B>
where
    B: BackendInvoker + ?Sized,
{
    pub fn new(backend: &'a B, session: Option<&'a Session>, settings: ActionSettings) -> Self {
        Self {
            backend,
            session,
            settings,
        }
    }

    pub fn settings(&self) -> ActionSettings {
        self.settings
    }

    /// Runs an authenticated action. Without a backend token the backend is
    /// never contacted and `build` is never called.
    pub async fn run<T, F>(&self, messages: Messages, build: F) -> ApiEnvelope<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> ActionResult<BackendRequest>,
    {
        let outcome = match self.session.and_then(Session::principal) {
            Some(principal) => {
                self.execute(messages, build, Some(principal.backend_token)).await
            }
            None => Err(ActionError::Unauthenticated),
        };
        self.finish(messages, outcome)
    }

    /// Runs an authenticated mutation with no result. Whatever `data` the
    /// backend sends back is discarded without being decoded.
    pub async fn run_void<F>(&self, messages: Messages, build: F) -> ApiEnvelope<()>
    where
        F: FnOnce() -> ActionResult<BackendRequest>,
    {
        let envelope: ApiEnvelope<IgnoredAny> = self.run(messages, build).await;
        ApiEnvelope {
            data: None,
            ..envelope.map_data(|_| ())
        }
    }

    /// Runs an action that does not require a session (login, registration).
    pub async fn run_public<T, F>(&self, messages: Messages, build: F) -> ApiEnvelope<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> ActionResult<BackendRequest>,
    {
        let outcome = self.execute(messages, build, None).await;
        self.finish(messages, outcome)
    }

    async fn execute<T, F>(
        &self,
        messages: Messages,
        build: F,
        token: Option<BearerToken>,
    ) -> ActionResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
        F: FnOnce() -> ActionResult<BackendRequest>,
    {
        let mut request = build()?;
        if let Some(token) = token {
            request = request.bearer(token);
        }
        let raw = self.backend.invoke(request).await;
        normalizer::decode(raw, messages.success)
    }

    fn finish<T>(
        &self,
        messages: Messages,
        outcome: ActionResult<ApiEnvelope<T>>,
    ) -> ApiEnvelope<T> {
        match outcome {
            Ok(envelope) => envelope,
            Err(err) => normalizer::failure(&err, messages.failure, self.settings.sanitizer),
        }
    }
}

/// `{collection}/{id}` with the identifier checked for path safety.
pub(crate) fn resource_path(collection: &str, id: &str) -> ActionResult<String> {
    let id = ResourceId::new(id)?;
    Ok(format!("{collection}/{id}"))
}
