use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::core::{AppError, Result};
use crate::modules::billing::models::{VendorBill, VendorBillLine, VendorBillRequest};
use crate::modules::tickets::models::Ticket;
use crate::modules::tickets::repositories::ticket_repository::TicketRepository;
use crate::modules::tickets::services::fare_ledger::FareLedgerCalculator;

/// Service for generating vendor bills
pub struct BillingService {
    tickets: Arc<TicketRepository>,
    calculator: FareLedgerCalculator,
}

impl BillingService {
    pub fn new(tickets: Arc<TicketRepository>, calculator: FareLedgerCalculator) -> Self {
        Self {
            tickets,
            calculator,
        }
    }

    /// Generate a bill for one vendor over an issue-date range.
    ///
    /// Every ticket's ledger is recomputed with the current rules before it
    /// is billed, so the bill reflects today's withholding constants even
    /// for tickets persisted under older ones. A range with no tickets
    /// yields an empty bill, not an error.
    pub async fn generate_vendor_bill(&self, request: VendorBillRequest) -> Result<VendorBill> {
        validate_period(request.from, request.to)?;

        if request.vendor_id.trim().is_empty() {
            return Err(AppError::validation("Vendor id cannot be empty"));
        }

        let tickets = self
            .tickets
            .find_by_vendor(&request.vendor_id, request.from, request.to)
            .await?;

        let bill = build_bill(&self.calculator, request, &tickets);

        if bill.is_empty() {
            warn!(
                vendor_id = %bill.vendor_id,
                from = %bill.from,
                to = %bill.to,
                "vendor bill generated with no tickets"
            );
        } else {
            info!(
                vendor_id = %bill.vendor_id,
                lines = bill.lines.len(),
                total_due = %bill.total_due,
                "vendor bill generated"
            );
        }

        Ok(bill)
    }
}

/// Pure assembly step, separated from the repository so it is testable
/// without a database
pub fn build_bill(
    calculator: &FareLedgerCalculator,
    request: VendorBillRequest,
    tickets: &[Ticket],
) -> VendorBill {
    let lines = tickets
        .iter()
        .map(|ticket| {
            let derived = calculator.recompute(&ticket.ledger);
            VendorBillLine {
                booking_ref: ticket.booking_ref.clone(),
                passenger_name: ticket.passenger_name.clone(),
                issue_date: ticket.issue_date,
                vendor_amount: derived.vendor_amount,
                vendor_paid: ticket.ledger.vendor_paid,
                vendor_due: derived.vendor_due,
            }
        })
        .collect();

    VendorBill::assemble(request.vendor_id, request.from, request.to, lines)
}

fn validate_period(from: NaiveDate, to: NaiveDate) -> Result<()> {
    if from > to {
        return Err(AppError::validation(format!(
            "from ({}) must be before or equal to to ({})",
            from, to
        )));
    }

    let days = (to - from).num_days();
    if days > 366 {
        return Err(AppError::validation(format!(
            "Billing period too large: {} days (maximum 366 days)",
            days
        )));
    }

    Ok(())
}
