// Vendor bill types.
//
// A bill is a statement of what the agency owes one fare-supplying vendor
// for tickets issued in a period. It is assembled on demand from live
// tickets and never persisted; the ticket rows stay the source of truth.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for bill generation
#[derive(Debug, Clone, Deserialize)]
pub struct VendorBillRequest {
    pub vendor_id: String,
    /// First issue date included
    pub from: NaiveDate,
    /// Last issue date included
    pub to: NaiveDate,
}

/// One ticket's share of a vendor bill
#[derive(Debug, Clone, Serialize)]
pub struct VendorBillLine {
    pub booking_ref: String,
    pub passenger_name: String,
    pub issue_date: NaiveDate,
    pub vendor_amount: Decimal,
    pub vendor_paid: Decimal,
    pub vendor_due: Decimal,
}

/// Statement of payables to one vendor over a period
#[derive(Debug, Clone, Serialize)]
pub struct VendorBill {
    pub vendor_id: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub lines: Vec<VendorBillLine>,
    pub total_amount: Decimal,
    pub total_paid: Decimal,
    /// Sum of per-line dues; lines already clamp at zero, so an overpaid
    /// ticket never offsets another ticket's balance
    pub total_due: Decimal,
    pub generated_at: DateTime<Utc>,
}

impl VendorBill {
    /// Assemble a bill from its lines, summing the totals
    pub fn assemble(
        vendor_id: String,
        from: NaiveDate,
        to: NaiveDate,
        lines: Vec<VendorBillLine>,
    ) -> Self {
        let total_amount = lines.iter().map(|line| line.vendor_amount).sum();
        let total_paid = lines.iter().map(|line| line.vendor_paid).sum();
        let total_due = lines.iter().map(|line| line.vendor_due).sum();

        Self {
            vendor_id,
            from,
            to,
            lines,
            total_amount,
            total_paid,
            total_due,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
