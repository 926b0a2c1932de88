//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

use quill_core::ports::TokenVerifier;

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config).await;

    // Identity verification (tokens are issued by the external provider)
    #[cfg(feature = "auth")]
    let verifier: Arc<dyn TokenVerifier> = Arc::new(quill_infra::JwtVerifier::from_env());
    #[cfg(not(feature = "auth"))]
    let verifier: Arc<dyn TokenVerifier> = Arc::new(DenyAllVerifier);

    // Rate limiter for mutation-heavy clients
    #[cfg(feature = "rate-limit")]
    let limiter: Arc<dyn quill_core::ports::RateLimiter> =
        Arc::new(quill_infra::InMemoryRateLimiter::from_env());

    // Start HTTP server
    HttpServer::new(move || {
        let app = App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(verifier.clone()));

        #[cfg(feature = "rate-limit")]
        let app = app.wrap(middleware::rate_limit::RateLimitMiddleware::new(
            limiter.clone(),
        ));

        app.configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

/// Placeholder verifier for builds without the `auth` feature: every
/// authenticated route answers 401.
#[cfg(not(feature = "auth"))]
struct DenyAllVerifier;

#[cfg(not(feature = "auth"))]
impl TokenVerifier for DenyAllVerifier {
    fn verify(
        &self,
        _token: &str,
    ) -> Result<quill_core::ports::IdentityClaims, quill_core::ports::AuthError> {
        Err(quill_core::ports::AuthError::InvalidToken(
            "Authentication is not enabled on this build".to_string(),
        ))
    }
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,quill_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
