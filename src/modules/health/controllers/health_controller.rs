use actix_web::{web, HttpResponse};
use sqlx::MySqlPool;

use crate::core::AppError;

/// Liveness probe, open to unauthenticated callers
/// GET /health
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "fareledger"
    }))
}

/// Database connectivity probe
/// GET /health/db
pub async fn db_check(pool: web::Data<MySqlPool>) -> Result<HttpResponse, AppError> {
    sqlx::query("SELECT 1").execute(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "database": "reachable"
    })))
}

/// Configure health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/db", web::get().to(db_check)),
    );
}
