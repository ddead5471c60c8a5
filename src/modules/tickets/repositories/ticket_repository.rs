// MySQL persistence for tickets.
//
// Soft-deleted rows are invisible to every query here; callers never see
// `deleted_at` set. Derived columns are written exactly as computed by the
// service layer.

use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::tickets::models::Ticket;

const TICKET_COLUMNS: &str = r#"
    id, booking_ref, pnr, passenger_name,
    airline_id, customer_id, vendor_id, agent_id,
    flight_no, sector, issue_date,
    base_fare, tax_bd, tax_ut, tax_e5, tax_e3, tax_g4,
    tax_ow, tax_p7, tax_p8, tax_tt, tax_yq, tax_other,
    commission_rate_pct, plb, service_charge_taxable, service_charge_extra,
    vendor_paid, customer_deal, customer_paid,
    total_taxes, advance_tax, vendor_amount, vendor_due, customer_due, profit,
    status, created_at, updated_at, deleted_at
"#;

/// Repository for ticket database operations
pub struct TicketRepository {
    pool: MySqlPool,
}

impl TicketRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Insert a new ticket row
    pub async fn create(&self, ticket: &Ticket) -> Result<Ticket> {
        sqlx::query(
            r#"
            INSERT INTO tickets (
                id, booking_ref, pnr, passenger_name,
                airline_id, customer_id, vendor_id, agent_id,
                flight_no, sector, issue_date,
                base_fare, tax_bd, tax_ut, tax_e5, tax_e3, tax_g4,
                tax_ow, tax_p7, tax_p8, tax_tt, tax_yq, tax_other,
                commission_rate_pct, plb, service_charge_taxable, service_charge_extra,
                vendor_paid, customer_deal, customer_paid,
                total_taxes, advance_tax, vendor_amount, vendor_due, customer_due, profit,
                status, created_at, updated_at
            ) VALUES (
                ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                ?, ?, ?, ?, ?, ?, ?,
                ?, ?, ?, ?, ?, ?,
                ?, ?, ?
            )
            "#,
        )
        .bind(&ticket.id)
        .bind(&ticket.booking_ref)
        .bind(&ticket.pnr)
        .bind(&ticket.passenger_name)
        .bind(&ticket.airline_id)
        .bind(&ticket.customer_id)
        .bind(&ticket.vendor_id)
        .bind(&ticket.agent_id)
        .bind(&ticket.flight_no)
        .bind(&ticket.sector)
        .bind(ticket.issue_date)
        .bind(ticket.ledger.base_fare)
        .bind(ticket.ledger.taxes.bd)
        .bind(ticket.ledger.taxes.ut)
        .bind(ticket.ledger.taxes.e5)
        .bind(ticket.ledger.taxes.e3)
        .bind(ticket.ledger.taxes.g4)
        .bind(ticket.ledger.taxes.ow)
        .bind(ticket.ledger.taxes.p7)
        .bind(ticket.ledger.taxes.p8)
        .bind(ticket.ledger.taxes.tt)
        .bind(ticket.ledger.taxes.yq)
        .bind(ticket.ledger.taxes.other)
        .bind(ticket.ledger.commission_rate_pct)
        .bind(ticket.ledger.plb)
        .bind(ticket.ledger.service_charge_taxable)
        .bind(ticket.ledger.service_charge_extra)
        .bind(ticket.ledger.vendor_paid)
        .bind(ticket.ledger.customer_deal)
        .bind(ticket.ledger.customer_paid)
        .bind(ticket.derived.total_taxes)
        .bind(ticket.derived.advance_tax)
        .bind(ticket.derived.vendor_amount)
        .bind(ticket.derived.vendor_due)
        .bind(ticket.derived.customer_due)
        .bind(ticket.derived.profit)
        .bind(ticket.status)
        .bind(ticket.created_at)
        .bind(ticket.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Ticket with booking reference '{}' already exists",
                        ticket.booking_ref
                    ));
                }
            }
            AppError::Database(e)
        })?;

        Ok(ticket.clone())
    }

    /// Fetch one live ticket by id or booking reference
    pub async fn find_by_ref(&self, id_or_ref: &str) -> Result<Option<Ticket>> {
        let ticket = sqlx::query_as::<_, Ticket>(&format!(
            r#"
            SELECT {TICKET_COLUMNS}
            FROM tickets
            WHERE (id = ? OR booking_ref = ?) AND deleted_at IS NULL
            LIMIT 1
            "#,
        ))
        .bind(id_or_ref)
        .bind(id_or_ref)
        .fetch_optional(&self.pool)
        .await?;

        Ok(ticket)
    }

    /// List live tickets, newest first, with an optional free-text filter
    /// over booking reference, passenger name and PNR
    pub async fn list(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Ticket>> {
        let tickets = match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, Ticket>(&format!(
                    r#"
                    SELECT {TICKET_COLUMNS}
                    FROM tickets
                    WHERE deleted_at IS NULL
                      AND (booking_ref LIKE ? OR passenger_name LIKE ? OR pnr LIKE ?)
                    ORDER BY created_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                ))
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Ticket>(&format!(
                    r#"
                    SELECT {TICKET_COLUMNS}
                    FROM tickets
                    WHERE deleted_at IS NULL
                    ORDER BY created_at DESC
                    LIMIT ? OFFSET ?
                    "#,
                ))
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(tickets)
    }

    /// Live, non-void tickets issued for one vendor within a date range
    pub async fn find_by_vendor(
        &self,
        vendor_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Ticket>> {
        let tickets = sqlx::query_as::<_, Ticket>(&format!(
            r#"
            SELECT {TICKET_COLUMNS}
            FROM tickets
            WHERE vendor_id = ?
              AND deleted_at IS NULL
              AND status = 'active'
              AND issue_date BETWEEN ? AND ?
            ORDER BY issue_date, booking_ref
            "#,
        ))
        .bind(vendor_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(tickets)
    }

    /// Persist every editable column of an existing ticket
    pub async fn update(&self, ticket: &Ticket) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE tickets SET
                booking_ref = ?, pnr = ?, passenger_name = ?,
                airline_id = ?, customer_id = ?, vendor_id = ?, agent_id = ?,
                flight_no = ?, sector = ?, issue_date = ?,
                base_fare = ?, tax_bd = ?, tax_ut = ?, tax_e5 = ?, tax_e3 = ?, tax_g4 = ?,
                tax_ow = ?, tax_p7 = ?, tax_p8 = ?, tax_tt = ?, tax_yq = ?, tax_other = ?,
                commission_rate_pct = ?, plb = ?, service_charge_taxable = ?, service_charge_extra = ?,
                vendor_paid = ?, customer_deal = ?, customer_paid = ?,
                total_taxes = ?, advance_tax = ?, vendor_amount = ?, vendor_due = ?,
                customer_due = ?, profit = ?,
                status = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&ticket.booking_ref)
        .bind(&ticket.pnr)
        .bind(&ticket.passenger_name)
        .bind(&ticket.airline_id)
        .bind(&ticket.customer_id)
        .bind(&ticket.vendor_id)
        .bind(&ticket.agent_id)
        .bind(&ticket.flight_no)
        .bind(&ticket.sector)
        .bind(ticket.issue_date)
        .bind(ticket.ledger.base_fare)
        .bind(ticket.ledger.taxes.bd)
        .bind(ticket.ledger.taxes.ut)
        .bind(ticket.ledger.taxes.e5)
        .bind(ticket.ledger.taxes.e3)
        .bind(ticket.ledger.taxes.g4)
        .bind(ticket.ledger.taxes.ow)
        .bind(ticket.ledger.taxes.p7)
        .bind(ticket.ledger.taxes.p8)
        .bind(ticket.ledger.taxes.tt)
        .bind(ticket.ledger.taxes.yq)
        .bind(ticket.ledger.taxes.other)
        .bind(ticket.ledger.commission_rate_pct)
        .bind(ticket.ledger.plb)
        .bind(ticket.ledger.service_charge_taxable)
        .bind(ticket.ledger.service_charge_extra)
        .bind(ticket.ledger.vendor_paid)
        .bind(ticket.ledger.customer_deal)
        .bind(ticket.ledger.customer_paid)
        .bind(ticket.derived.total_taxes)
        .bind(ticket.derived.advance_tax)
        .bind(ticket.derived.vendor_amount)
        .bind(ticket.derived.vendor_due)
        .bind(ticket.derived.customer_due)
        .bind(ticket.derived.profit)
        .bind(ticket.status)
        .bind(ticket.updated_at)
        .bind(&ticket.id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::validation(format!(
                        "Ticket with booking reference '{}' already exists",
                        ticket.booking_ref
                    ));
                }
            }
            AppError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Ticket not found"));
        }

        Ok(())
    }

    /// Soft delete; a second delete of the same row reports not-found
    pub async fn soft_delete(&self, id: &str) -> Result<()> {
        let result = sqlx::query(
            "UPDATE tickets SET deleted_at = NOW() WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Ticket not found"));
        }

        Ok(())
    }
}
