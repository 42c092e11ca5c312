//! src/routes/health_check.rs
use actix_web::HttpResponse;

/// Liveness probe, always answers 200 with an empty body.
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}
