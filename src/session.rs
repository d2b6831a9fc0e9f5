//! Session resolution: signed session tokens and the request extractor.
//!
//! The identity cookie holds a JWT signed with the server secret. Resolving a
//! session never fails; anything unreadable is treated as "no session".

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::session::{Role, Session};
use crate::domain::types::BearerToken;

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    email: String,
    role: Role,
    #[serde(default)]
    backend_token: Option<String>,
    exp: i64,
}

/// Signs and verifies the session tokens stored in the identity cookie.
#[derive(Clone)]
pub struct SessionCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl SessionCodec {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Produces the token stored at login.
    pub fn encode(&self, session: &Session) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = SessionClaims {
            sub: session.user_id.clone(),
            email: session.email.clone(),
            role: session.role.clone(),
            backend_token: session
                .backend_token
                .as_ref()
                .map(|token| token.as_str().to_string()),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
    }

    /// Verifies `token` and returns the session it carries.
    pub fn resolve(&self, token: Option<&str>) -> Option<Session> {
        let token = token?.trim();
        if token.is_empty() {
            return None;
        }
        let data = match decode::<SessionClaims>(
            token,
            &self.decoding,
            &Validation::new(Algorithm::HS256),
        ) {
            Ok(data) => data,
            Err(err) => {
                log::debug!("Discarding unreadable session: {err}");
                return None;
            }
        };
        let claims = data.claims;
        Some(Session {
            user_id: claims.sub,
            email: claims.email,
            role: claims.role,
            backend_token: claims
                .backend_token
                .and_then(|token| BearerToken::new(token).ok()),
        })
    }
}

#[cfg(feature = "server")]
mod extract {
    use std::future::{Ready, ready};

    use actix_identity::IdentityExt;
    use actix_web::dev::Payload;
    use actix_web::{FromRequest, HttpRequest, web};

    use super::SessionCodec;
    use crate::domain::session::Session;

    /// Session of the current request, if any. Extraction never rejects.
    #[derive(Debug, Default)]
    pub struct CurrentSession(pub Option<Session>);

    impl CurrentSession {
        pub fn session(&self) -> Option<&Session> {
            self.0.as_ref()
        }
    }

    impl FromRequest for CurrentSession {
        type Error = actix_web::Error;
        type Future = Ready<Result<Self, Self::Error>>;

        fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
            ready(Ok(CurrentSession(resolve_request(req))))
        }
    }

    fn resolve_request(req: &HttpRequest) -> Option<Session> {
        let codec = req.app_data::<web::Data<SessionCodec>>()?;
        let identity = req.get_identity().ok()?;
        let token = identity.id().ok()?;
        codec.resolve(Some(&token))
    }
}

#[cfg(feature = "server")]
pub use extract::CurrentSession;

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> SessionCodec {
        SessionCodec::new("test-secret", Duration::hours(1))
    }

    fn session(token: Option<&str>) -> Session {
        Session {
            user_id: "u-1".to_string(),
            email: "admin@example.com".to_string(),
            role: Role::Admin,
            backend_token: token.map(|t| BearerToken::new(t).unwrap()),
        }
    }

    #[test]
    fn encoded_session_resolves() {
        let codec = codec();
        let token = codec.encode(&session(Some("backend"))).unwrap();

        let resolved = codec.resolve(Some(&token)).unwrap();

        assert_eq!(resolved, session(Some("backend")));
        assert!(resolved.principal().is_some());
    }

    #[test]
    fn missing_or_blank_token_is_no_session() {
        let codec = codec();
        assert!(codec.resolve(None).is_none());
        assert!(codec.resolve(Some("  ")).is_none());
        assert!(codec.resolve(Some("not-a-jwt")).is_none());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = SessionCodec::new("other", Duration::hours(1))
            .encode(&session(Some("backend")))
            .unwrap();
        assert!(codec().resolve(Some(&token)).is_none());
    }

    #[test]
    fn expired_token_is_rejected() {
        let expired = SessionCodec::new("test-secret", Duration::hours(-2));
        let token = expired.encode(&session(Some("backend"))).unwrap();
        assert!(codec().resolve(Some(&token)).is_none());
    }

    #[test]
    fn session_without_backend_token_has_no_principal() {
        let codec = codec();
        let token = codec.encode(&session(None)).unwrap();

        let resolved = codec.resolve(Some(&token)).unwrap();

        assert!(resolved.backend_token.is_none());
        assert!(resolved.principal().is_none());
    }
}
