//! HTTP handlers and route configuration.

mod health;
mod posts;
mod profile;

use actix_web::web;

/// Configure all application routes.
///
/// Reads are public; mutations require a bearer token (enforced by the
/// `Identity` extractor inside each handler).
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Post routes
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list))
                    .route("", web::post().to(posts::create))
                    .route("/{slug}", web::get().to(posts::get))
                    .route("/{slug}", web::put().to(posts::update))
                    .route("/{slug}", web::delete().to(posts::delete))
                    .route("/{slug}/related", web::get().to(posts::related)),
            )
            // Profile routes
            .route("/profile", web::post().to(profile::ensure)),
    );
}
