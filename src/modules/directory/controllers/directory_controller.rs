use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::{ApiEnvelope, AppError};
use crate::modules::directory::models::DirectoryKind;
use crate::modules::directory::services::directory_service::DirectoryService;

/// Query parameters for directory search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Free-text filter over name, code and phone
    pub q: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    20
}

/// Search one directory
/// GET /directory/{kind}?q=...
pub async fn search_directory(
    service: web::Data<Arc<DirectoryService>>,
    path: web::Path<String>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse, AppError> {
    let kind: DirectoryKind = path
        .into_inner()
        .parse()
        .map_err(AppError::NotFound)?;

    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let entries = service
        .search(kind, query.q.as_deref(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(ApiEnvelope::data(entries)))
}

/// Configure directory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/directory").route("/{kind}", web::get().to(search_directory)));
}
