//! Health check endpoint.

use actix_web::HttpResponse;
use serde::Serialize;

use quill_shared::ApiResponse;

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
}

/// GET /api/health - liveness probe, wrapped in the standard envelope
/// like every other route. The envelope carries the timestamp.
pub async fn health_check() -> HttpResponse {
    let status = HealthStatus {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    };

    HttpResponse::Ok().json(ApiResponse::ok(status))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test, web};

    #[actix_web::test]
    async fn test_health_answers_in_envelope() {
        let app = test::init_service(
            App::new().route("/api/health", web::get().to(health_check)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "ok");
        assert!(body.get("timestamp").is_some());
    }
}
