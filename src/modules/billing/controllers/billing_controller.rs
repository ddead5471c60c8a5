use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::{ApiEnvelope, AppError};
use crate::modules::billing::models::VendorBillRequest;
use crate::modules::billing::services::billing_service::BillingService;

/// Generate a vendor bill for an issue-date range
/// POST /billing/vendor-bills
pub async fn generate_vendor_bill(
    service: web::Data<Arc<BillingService>>,
    request: web::Json<VendorBillRequest>,
) -> Result<HttpResponse, AppError> {
    let bill = service.generate_vendor_bill(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiEnvelope::data(bill)))
}

/// Configure billing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/billing").route("/vendor-bills", web::post().to(generate_vendor_bill)),
    );
}
