// Tests for the raw-form coercion boundary.
//
// The booking screens post whatever the clerk has typed so far; every
// numeric field arrives as an optional string and must coerce to a typed
// ledger without ever failing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fareledger::tickets::models::LedgerForm;
use fareledger::tickets::services::fare_ledger::FareLedgerCalculator;

fn form_field(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[test]
fn test_empty_form_coerces_to_zero_inputs() {
    let inputs = LedgerForm::default().to_inputs();

    assert_eq!(inputs.base_fare, Decimal::ZERO);
    assert_eq!(inputs.taxes.total(), Decimal::ZERO);
    assert_eq!(inputs.commission_rate_pct, Decimal::ZERO);
    assert_eq!(inputs.customer_deal, Decimal::ZERO);
}

#[test]
fn test_partial_entry_never_breaks_the_preview() {
    // Mid-entry state: fare typed, taxes half-typed, one field garbage
    let form = LedgerForm {
        base_fare: form_field("10000"),
        bd: form_field("5"),
        ut: form_field("."),
        yq: form_field("1,000"),
        commission_rate_pct: form_field("5"),
        ..Default::default()
    };

    let derived = FareLedgerCalculator::default().recompute(&form.to_inputs());

    // "." and "1,000" both coerce to zero rather than erroring
    assert_eq!(derived.total_taxes, dec!(5));
    assert!(derived.vendor_amount > Decimal::ZERO);
}

#[test]
fn test_numeric_strings_parse_with_decimals() {
    let form = LedgerForm {
        base_fare: form_field("10500.75"),
        service_charge_taxable: form_field(" 250 "),
        ..Default::default()
    };

    let inputs = form.to_inputs();
    assert_eq!(inputs.base_fare, dec!(10500.75));
    assert_eq!(inputs.service_charge_taxable, dec!(250));
}

#[test]
fn test_blank_and_whitespace_fields_are_zero() {
    let form = LedgerForm {
        base_fare: form_field(""),
        plb: form_field("   "),
        vendor_paid: None,
        ..Default::default()
    };

    let inputs = form.to_inputs();
    assert_eq!(inputs.base_fare, Decimal::ZERO);
    assert_eq!(inputs.plb, Decimal::ZERO);
    assert_eq!(inputs.vendor_paid, Decimal::ZERO);
}

#[test]
fn test_negative_entries_clamp_to_zero() {
    let form = LedgerForm {
        base_fare: form_field("-10000"),
        customer_paid: form_field("-1"),
        ..Default::default()
    };

    let inputs = form.to_inputs();
    assert_eq!(inputs.base_fare, Decimal::ZERO);
    assert_eq!(inputs.customer_paid, Decimal::ZERO);
}

#[test]
fn test_commission_rate_clamps_to_one_hundred() {
    let form = LedgerForm {
        commission_rate_pct: form_field("250"),
        ..Default::default()
    };

    assert_eq!(form.to_inputs().commission_rate_pct, dec!(100));
}

#[test]
fn test_coercion_is_stable() {
    let form = LedgerForm {
        base_fare: form_field("10000"),
        bd: form_field("500"),
        customer_deal: form_field("13000"),
        ..Default::default()
    };

    assert_eq!(form.to_inputs(), form.to_inputs());
}

#[test]
fn test_form_deserializes_from_sparse_json() {
    // The edit screen only posts the fields the clerk has touched
    let form: LedgerForm =
        serde_json::from_str(r#"{"base_fare": "9000", "yq": "750"}"#).unwrap();

    let inputs = form.to_inputs();
    assert_eq!(inputs.base_fare, dec!(9000));
    assert_eq!(inputs.taxes.yq, dec!(750));
    assert_eq!(inputs.taxes.bd, Decimal::ZERO);
}

#[test]
fn test_form_accepts_bare_json_numbers() {
    // Older clients post numbers instead of text-field strings
    let form: LedgerForm =
        serde_json::from_str(r#"{"base_fare": 9000, "bd": 500.5, "ut": null}"#).unwrap();

    let inputs = form.to_inputs();
    assert_eq!(inputs.base_fare, dec!(9000));
    assert_eq!(inputs.taxes.bd, dec!(500.5));
    assert_eq!(inputs.taxes.ut, Decimal::ZERO);
}
