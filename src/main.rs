use std::env;

use config::Config;
use dotenvy::dotenv;

use storefront_admin::models::config::ServerConfig;

#[actix_web::main]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        // Add settings from the environment (with a prefix of APP)
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {}", err);
            std::process::exit(1);
        }
    };

    if server_config.session_ttl().is_none() {
        log::error!(
            "Error loading server config: invalid session_ttl_hours {}",
            server_config.session_ttl_hours
        );
        std::process::exit(1);
    }

    if let Err(err) = storefront_admin::run(server_config).await {
        log::error!("Server stopped: {}", err);
        std::process::exit(1);
    }
}
