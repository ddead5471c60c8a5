// Ticket record.
//
// One row per issued air ticket, carrying the clerk's ledger inputs next to
// the server-computed derived figures. Derived columns are persisted for
// reporting but always recomputed before a write; the API never accepts
// them from a client. Deletion is soft: the row keeps its history and
// drops out of every read path.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::ledger::{LedgerDerived, LedgerForm, LedgerInputs};
use crate::core::{AppError, Result};

/// Booking lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "VARCHAR(10)", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Booked and accounted for
    Active,
    /// Booking cancelled; the record stays for the audit trail
    Void,
}

impl Default for TicketStatus {
    fn default() -> Self {
        TicketStatus::Active
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TicketStatus::Active => write!(f, "active"),
            TicketStatus::Void => write!(f, "void"),
        }
    }
}

/// An issued air ticket with its ledger
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ticket {
    pub id: Option<String>,

    /// Agency booking reference, unique across the office
    pub booking_ref: String,

    /// Airline record locator
    pub pnr: Option<String>,

    pub passenger_name: String,

    /// Directory references selected in the booking form
    pub airline_id: Option<String>,
    pub customer_id: Option<String>,
    pub vendor_id: Option<String>,
    pub agent_id: Option<String>,

    pub flight_no: Option<String>,
    pub sector: Option<String>,
    pub issue_date: NaiveDate,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub ledger: LedgerInputs,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub derived: LedgerDerived,

    pub status: TicketStatus,

    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(skip_serializing)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create/update payload from the booking form.
///
/// Ledger fields arrive as raw strings and go through parse-or-zero
/// coercion; everything else is validated here.
#[derive(Debug, Clone, Deserialize)]
pub struct TicketForm {
    pub booking_ref: String,
    pub passenger_name: String,
    pub pnr: Option<String>,
    pub airline_id: Option<String>,
    pub customer_id: Option<String>,
    pub vendor_id: Option<String>,
    pub agent_id: Option<String>,
    pub flight_no: Option<String>,
    pub sector: Option<String>,
    pub issue_date: NaiveDate,

    #[serde(flatten)]
    pub ledger: LedgerForm,
}

impl TicketForm {
    pub fn validate(&self) -> Result<()> {
        if self.booking_ref.trim().is_empty() {
            return Err(AppError::validation("Booking reference cannot be empty"));
        }

        if self.booking_ref.len() > 30 {
            return Err(AppError::validation(
                "Booking reference cannot exceed 30 characters",
            ));
        }

        if self.passenger_name.trim().is_empty() {
            return Err(AppError::validation("Passenger name cannot be empty"));
        }

        if self.passenger_name.len() > 120 {
            return Err(AppError::validation(
                "Passenger name cannot exceed 120 characters",
            ));
        }

        Ok(())
    }
}

impl Ticket {
    /// Build a fresh ticket from a validated form plus computed figures
    pub fn from_form(form: &TicketForm, ledger: LedgerInputs, derived: LedgerDerived) -> Result<Self> {
        form.validate()?;

        let now = Utc::now();

        Ok(Self {
            id: Some(Uuid::new_v4().to_string()),
            booking_ref: form.booking_ref.trim().to_string(),
            pnr: form.pnr.clone(),
            passenger_name: form.passenger_name.trim().to_string(),
            airline_id: form.airline_id.clone(),
            customer_id: form.customer_id.clone(),
            vendor_id: form.vendor_id.clone(),
            agent_id: form.agent_id.clone(),
            flight_no: form.flight_no.clone(),
            sector: form.sector.clone(),
            issue_date: form.issue_date,
            ledger,
            derived,
            status: TicketStatus::Active,
            created_at: Some(now),
            updated_at: Some(now),
            deleted_at: None,
        })
    }

    /// Whether edits are still allowed
    pub fn is_mutable(&self) -> bool {
        self.status == TicketStatus::Active && self.deleted_at.is_none()
    }

    /// Overwrite the editable fields from a form, recomputed figures included
    pub fn apply_form(
        &mut self,
        form: &TicketForm,
        ledger: LedgerInputs,
        derived: LedgerDerived,
    ) -> Result<()> {
        form.validate()?;

        if !self.is_mutable() {
            return Err(AppError::validation(format!(
                "Ticket {} is {} and cannot be edited",
                self.booking_ref, self.status
            )));
        }

        self.booking_ref = form.booking_ref.trim().to_string();
        self.pnr = form.pnr.clone();
        self.passenger_name = form.passenger_name.trim().to_string();
        self.airline_id = form.airline_id.clone();
        self.customer_id = form.customer_id.clone();
        self.vendor_id = form.vendor_id.clone();
        self.agent_id = form.agent_id.clone();
        self.flight_no = form.flight_no.clone();
        self.sector = form.sector.clone();
        self.issue_date = form.issue_date;
        self.ledger = ledger;
        self.derived = derived;
        self.updated_at = Some(Utc::now());

        Ok(())
    }

    /// Mark the booking cancelled
    pub fn void(&mut self) -> Result<()> {
        if self.status == TicketStatus::Void {
            return Err(AppError::validation(format!(
                "Ticket {} is already void",
                self.booking_ref
            )));
        }

        self.status = TicketStatus::Void;
        self.updated_at = Some(Utc::now());

        Ok(())
    }
}
