use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Result};
use crate::modules::tickets::models::{LedgerDerived, LedgerForm, Ticket, TicketForm};
use crate::modules::tickets::repositories::ticket_repository::TicketRepository;
use crate::modules::tickets::services::fare_ledger::FareLedgerCalculator;

/// Service for ticket business logic.
///
/// Every write path funnels through the calculator so persisted derived
/// columns always match the current inputs and rules; nothing a client
/// sends for those fields is trusted.
pub struct TicketService {
    repo: Arc<TicketRepository>,
    calculator: FareLedgerCalculator,
}

impl TicketService {
    pub fn new(repo: Arc<TicketRepository>, calculator: FareLedgerCalculator) -> Self {
        Self { repo, calculator }
    }

    /// Create a ticket from the booking form
    pub async fn create_ticket(&self, form: TicketForm) -> Result<Ticket> {
        let ledger = form.ledger.to_inputs();
        let derived = self.calculator.recompute(&ledger);

        let ticket = Ticket::from_form(&form, ledger, derived)?;
        let created = self.repo.create(&ticket).await?;

        info!(
            booking_ref = %created.booking_ref,
            vendor_amount = %created.derived.vendor_amount,
            "ticket created"
        );

        Ok(created)
    }

    /// Fetch by id or booking reference
    pub async fn get_ticket(&self, id_or_ref: &str) -> Result<Ticket> {
        self.repo
            .find_by_ref(id_or_ref)
            .await?
            .ok_or_else(|| AppError::not_found("Ticket not found"))
    }

    /// Paginated listing with optional free-text search
    pub async fn list_tickets(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ticket>> {
        self.repo.list(search, limit, offset).await
    }

    /// Update inputs and recompute every derived figure
    pub async fn update_ticket(&self, id: &str, form: TicketForm) -> Result<Ticket> {
        let mut ticket = self.get_ticket(id).await?;

        let ledger = form.ledger.to_inputs();
        let derived = self.calculator.recompute(&ledger);

        ticket.apply_form(&form, ledger, derived)?;
        self.repo.update(&ticket).await?;

        info!(
            booking_ref = %ticket.booking_ref,
            vendor_due = %ticket.derived.vendor_due,
            "ticket updated"
        );

        Ok(ticket)
    }

    /// Void a booking, keeping the record
    pub async fn void_ticket(&self, id: &str) -> Result<Ticket> {
        let mut ticket = self.get_ticket(id).await?;

        ticket.void()?;
        self.repo.update(&ticket).await?;

        info!(booking_ref = %ticket.booking_ref, "ticket voided");

        Ok(ticket)
    }

    /// Soft delete
    pub async fn delete_ticket(&self, id: &str) -> Result<()> {
        let ticket = self.get_ticket(id).await?;
        let id = ticket
            .id
            .as_deref()
            .ok_or_else(|| AppError::internal("Ticket row is missing its id"))?;

        self.repo.soft_delete(id).await?;

        info!(booking_ref = %ticket.booking_ref, "ticket deleted");

        Ok(())
    }

    /// Run the calculator over a raw form without persisting anything.
    ///
    /// Backs the as-you-type preview in the booking screen; accepts partial
    /// entry and never errors.
    pub fn preview(&self, form: &LedgerForm) -> LedgerDerived {
        self.calculator.recompute(&form.to_inputs())
    }
}
