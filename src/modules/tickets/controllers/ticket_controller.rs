use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::{ApiEnvelope, AppError};
use crate::modules::tickets::models::{LedgerForm, TicketForm};
use crate::modules::tickets::services::ticket_service::TicketService;

/// Query parameters for listing tickets
#[derive(Debug, Deserialize)]
pub struct ListTicketsQuery {
    /// Free-text filter over booking ref, passenger and PNR
    pub q: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Create a new ticket
/// POST /tickets
pub async fn create_ticket(
    service: web::Data<Arc<TicketService>>,
    form: web::Json<TicketForm>,
) -> Result<HttpResponse, AppError> {
    let ticket = service.create_ticket(form.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiEnvelope::data(ticket)))
}

/// Get a ticket by id or booking reference
/// GET /tickets/{id}
pub async fn get_ticket(
    service: web::Data<Arc<TicketService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ticket = service.get_ticket(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiEnvelope::data(ticket)))
}

/// List tickets
/// GET /tickets
pub async fn list_tickets(
    service: web::Data<Arc<TicketService>>,
    query: web::Query<ListTicketsQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.clamp(1, 100);
    let offset = query.offset.max(0);

    let tickets = service
        .list_tickets(query.q.as_deref(), limit, offset)
        .await?;

    Ok(HttpResponse::Ok().json(ApiEnvelope::data(tickets)))
}

/// Update a ticket and recompute its ledger
/// PUT /tickets/{id}
pub async fn update_ticket(
    service: web::Data<Arc<TicketService>>,
    path: web::Path<String>,
    form: web::Json<TicketForm>,
) -> Result<HttpResponse, AppError> {
    let ticket = service
        .update_ticket(&path.into_inner(), form.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(ApiEnvelope::data(ticket)))
}

/// Soft-delete a ticket
/// DELETE /tickets/{id}
pub async fn delete_ticket(
    service: web::Data<Arc<TicketService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_ticket(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiEnvelope::with_message((), "Ticket deleted")))
}

/// Void a booking
/// POST /tickets/{id}/void
pub async fn void_ticket(
    service: web::Data<Arc<TicketService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let ticket = service.void_ticket(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiEnvelope::with_message(ticket, "Ticket voided")))
}

/// Recompute a ledger preview without persisting
/// POST /tickets/preview
pub async fn preview_ledger(
    service: web::Data<Arc<TicketService>>,
    form: web::Json<LedgerForm>,
) -> Result<HttpResponse, AppError> {
    let derived = service.preview(&form.into_inner());

    Ok(HttpResponse::Ok().json(ApiEnvelope::data(derived)))
}

/// Configure ticket routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tickets")
            .route("", web::post().to(create_ticket))
            .route("", web::get().to(list_tickets))
            .route("/preview", web::post().to(preview_ledger))
            .route("/{id}", web::get().to(get_ticket))
            .route("/{id}", web::put().to(update_ticket))
            .route("/{id}", web::delete().to(delete_ticket))
            .route("/{id}/void", web::post().to(void_ticket)),
    );
}
