// Tests for vendor bill assembly.
//
// Exercises the pure half of billing: given a set of tickets, the bill's
// lines must carry freshly recomputed vendor figures and the totals must
// sum the clamped per-line dues.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fareledger::billing::models::VendorBillRequest;
use fareledger::billing::services::build_bill;
use fareledger::tickets::models::{
    LedgerDerived, LedgerForm, LedgerInputs, TaxBreakdown, Ticket, TicketForm,
};
use fareledger::tickets::services::fare_ledger::FareLedgerCalculator;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ticket(booking_ref: &str, issue_date: NaiveDate, ledger: LedgerInputs) -> Ticket {
    let form = TicketForm {
        booking_ref: booking_ref.to_string(),
        passenger_name: "Passenger".to_string(),
        pnr: None,
        airline_id: None,
        customer_id: None,
        vendor_id: Some("vendor-1".to_string()),
        agent_id: None,
        flight_no: None,
        sector: None,
        issue_date,
        ledger: LedgerForm::default(),
    };

    // Derived columns are recomputed by build_bill; stale values here must
    // not leak into the bill
    Ticket::from_form(&form, ledger, LedgerDerived::default()).unwrap()
}

fn request() -> VendorBillRequest {
    VendorBillRequest {
        vendor_id: "vendor-1".to_string(),
        from: date(2024, 4, 1),
        to: date(2024, 4, 30),
    }
}

#[test]
fn test_bill_lines_carry_recomputed_figures() {
    let calc = FareLedgerCalculator::default();

    let tickets = vec![ticket(
        "TKT-1001",
        date(2024, 4, 3),
        LedgerInputs {
            base_fare: dec!(10000),
            taxes: TaxBreakdown {
                bd: dec!(500),
                ut: dec!(300),
                e5: dec!(200),
                yq: dec!(1000),
                ..Default::default()
            },
            commission_rate_pct: dec!(5),
            vendor_paid: dec!(5000),
            ..Default::default()
        },
    )];

    let bill = build_bill(&calc, request(), &tickets);

    assert_eq!(bill.lines.len(), 1);
    let line = &bill.lines[0];
    assert_eq!(line.booking_ref, "TKT-1001");
    assert_eq!(line.vendor_amount, dec!(11533));
    assert_eq!(line.vendor_paid, dec!(5000));
    assert_eq!(line.vendor_due, dec!(6533));
}

#[test]
fn test_bill_totals_sum_clamped_dues() {
    let calc = FareLedgerCalculator::default();

    let tickets = vec![
        // Owes 10030 (10000 fare + 30 AIT), nothing paid
        ticket(
            "TKT-2001",
            date(2024, 4, 5),
            LedgerInputs {
                base_fare: dec!(10000),
                ..Default::default()
            },
        ),
        // Overpaid: due clamps to zero instead of offsetting the first line
        ticket(
            "TKT-2002",
            date(2024, 4, 9),
            LedgerInputs {
                base_fare: dec!(5000),
                vendor_paid: dec!(9000),
                ..Default::default()
            },
        ),
    ];

    let bill = build_bill(&calc, request(), &tickets);

    assert_eq!(bill.total_amount, dec!(10030) + dec!(5015));
    assert_eq!(bill.total_paid, dec!(9000));
    assert_eq!(bill.total_due, dec!(10030));
}

#[test]
fn test_empty_range_yields_empty_bill() {
    let calc = FareLedgerCalculator::default();
    let bill = build_bill(&calc, request(), &[]);

    assert!(bill.is_empty());
    assert_eq!(bill.total_amount, Decimal::ZERO);
    assert_eq!(bill.total_paid, Decimal::ZERO);
    assert_eq!(bill.total_due, Decimal::ZERO);
    assert_eq!(bill.vendor_id, "vendor-1");
}
