#[cfg(feature = "server")]
use std::sync::Arc;

#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_identity::IdentityMiddleware;
#[cfg(feature = "server")]
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
#[cfg(feature = "server")]
use actix_web::cookie::Key;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::backend::BackendInvoker;
#[cfg(feature = "server")]
use crate::backend::http::HttpBackend;
#[cfg(feature = "server")]
use crate::models::config::{Environment, ServerConfig};
#[cfg(feature = "server")]
use crate::session::SessionCodec;

#[cfg(feature = "data")]
pub mod actions;
#[cfg(feature = "data")]
pub mod backend;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod forms;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "data")]
pub mod session;

pub const ADMIN_ROLE: &str = "ADMIN";

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let backend = HttpBackend::connect(&server_config.backend_api_url)
        .map_err(|e| std::io::Error::other(format!("Failed to build backend client: {e}")))?;
    log::info!("Forwarding actions to {}", backend.base_url());
    let backend: Arc<dyn BackendInvoker> = Arc::new(backend);
    let backend = web::Data::from(backend);

    let settings = web::Data::new(server_config.action_settings());
    let session_ttl = server_config.session_ttl().ok_or_else(|| {
        std::io::Error::other(format!(
            "Invalid session_ttl_hours: {}",
            server_config.session_ttl_hours
        ))
    })?;
    let codec = web::Data::new(SessionCodec::new(&server_config.secret, session_ttl));

    // Keys and stores for identity and sessions.
    let secret_key = Key::try_from(server_config.secret.as_bytes())
        .map_err(|e| std::io::Error::other(format!("Invalid session secret: {e}")))?;
    let secure_cookies = server_config.environment == Environment::Production;

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(secure_cookies)
                    .cookie_domain(Some(format!(".{}", server_config.domain)))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .app_data(backend.clone())
            .app_data(settings.clone())
            .app_data(codec.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
