// Property-based tests for the fare ledger calculation.
//
// Covers the contract the booking screens rely on:
// - recompute is deterministic and total over its inputs
// - derived figures are non-negative apart from profit
// - exempt tax codes raise total taxes without touching the withholding
// - vendor amount moves against the commission rate
// - due balances clamp at zero on overpayment

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fareledger::tickets::models::{LedgerInputs, LedgerRules, TaxBreakdown, TaxCode};
use fareledger::tickets::services::fare_ledger::FareLedgerCalculator;

/// Whole-taka inputs assembled from generated integers
#[allow(clippy::too_many_arguments)]
fn inputs(
    base_fare: u64,
    bd: u64,
    ut: u64,
    e5: u64,
    yq: u64,
    other: u64,
    commission_rate_pct: u64,
    plb: u64,
    sc_taxable: u64,
    sc_extra: u64,
    vendor_paid: u64,
    customer_deal: u64,
    customer_paid: u64,
) -> LedgerInputs {
    LedgerInputs {
        base_fare: Decimal::from(base_fare),
        taxes: TaxBreakdown {
            bd: Decimal::from(bd),
            ut: Decimal::from(ut),
            e5: Decimal::from(e5),
            yq: Decimal::from(yq),
            other: Decimal::from(other),
            ..Default::default()
        },
        commission_rate_pct: Decimal::from(commission_rate_pct),
        plb: Decimal::from(plb),
        service_charge_taxable: Decimal::from(sc_taxable),
        service_charge_extra: Decimal::from(sc_extra),
        vendor_paid: Decimal::from(vendor_paid),
        customer_deal: Decimal::from(customer_deal),
        customer_paid: Decimal::from(customer_paid),
    }
}

proptest! {
    #[test]
    fn test_recompute_is_idempotent(
        base_fare in 0u64..10_000_000u64,
        bd in 0u64..100_000u64,
        ut in 0u64..100_000u64,
        e5 in 0u64..100_000u64,
        yq in 0u64..100_000u64,
        rate in 0u64..=100u64,
        plb in 0u64..50_000u64,
        deal in 0u64..10_000_000u64,
    ) {
        let calc = FareLedgerCalculator::default();
        let ledger = inputs(base_fare, bd, ut, e5, yq, 0, rate, plb, 0, 0, 0, deal, 0);

        let first = calc.recompute(&ledger);
        let second = calc.recompute(&ledger);

        prop_assert_eq!(first, second, "recompute must be deterministic");
    }

    #[test]
    fn test_derived_figures_are_non_negative(
        base_fare in 0u64..10_000_000u64,
        bd in 0u64..100_000u64,
        yq in 0u64..100_000u64,
        rate in 0u64..=100u64,
        plb in 0u64..10_000_000u64,
        sc_taxable in 0u64..100_000u64,
        sc_extra in 0u64..100_000u64,
        vendor_paid in 0u64..20_000_000u64,
        deal in 0u64..10_000_000u64,
        paid in 0u64..20_000_000u64,
    ) {
        let calc = FareLedgerCalculator::default();
        let derived = calc.recompute(&inputs(
            base_fare, bd, 0, 0, yq, 0, rate, plb, sc_taxable, sc_extra, vendor_paid, deal, paid,
        ));

        prop_assert!(derived.total_taxes >= Decimal::ZERO);
        prop_assert!(derived.advance_tax >= Decimal::ZERO);
        prop_assert!(derived.vendor_amount >= Decimal::ZERO);
        prop_assert!(derived.vendor_due >= Decimal::ZERO);
        prop_assert!(derived.customer_due >= Decimal::ZERO);
        // profit is the one signed figure; no assertion on its sign
    }

    #[test]
    fn test_exempt_codes_do_not_move_the_withholding(
        base_fare in 0u64..1_000_000u64,
        bump in 1u64..50_000u64,
        yq in 0u64..50_000u64,
    ) {
        let calc = FareLedgerCalculator::default();

        let before = calc.recompute(&inputs(base_fare, 0, 0, 0, yq, 0, 0, 0, 0, 0, 0, 0, 0));

        for code in [TaxCode::Bd, TaxCode::Ut, TaxCode::E5] {
            let mut taxes = TaxBreakdown {
                yq: Decimal::from(yq),
                ..Default::default()
            };
            match code {
                TaxCode::Bd => taxes.bd = Decimal::from(bump),
                TaxCode::Ut => taxes.ut = Decimal::from(bump),
                TaxCode::E5 => taxes.e5 = Decimal::from(bump),
                _ => unreachable!(),
            }
            let bumped = calc.recompute(&LedgerInputs {
                base_fare: Decimal::from(base_fare),
                taxes,
                ..Default::default()
            });

            prop_assert_eq!(
                bumped.total_taxes,
                before.total_taxes + Decimal::from(bump),
                "exempt code must still count toward total taxes"
            );
            prop_assert_eq!(
                bumped.advance_tax,
                before.advance_tax,
                "exempt code must not move the withholding"
            );
        }
    }

    #[test]
    fn test_non_exempt_codes_raise_the_withholding_base(
        base_fare in 0u64..1_000_000u64,
        bump in 1_000u64..50_000u64,
    ) {
        let calc = FareLedgerCalculator::default();

        let before = calc.recompute(&inputs(base_fare, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0));
        let bumped = calc.recompute(&inputs(base_fare, 0, 0, 0, bump, 0, 0, 0, 0, 0, 0, 0, 0));

        prop_assert_eq!(bumped.total_taxes, before.total_taxes + Decimal::from(bump));
        prop_assert!(
            bumped.advance_tax >= before.advance_tax,
            "a non-exempt tax can only grow the withholding base"
        );
    }

    #[test]
    fn test_vendor_amount_moves_against_commission_rate(
        base_fare in 1u64..10_000_000u64,
        yq in 0u64..100_000u64,
        low_rate in 0u64..50u64,
        rate_step in 1u64..50u64,
    ) {
        let calc = FareLedgerCalculator::default();
        let high_rate = low_rate + rate_step;

        let at_low = calc.recompute(&inputs(base_fare, 0, 0, 0, yq, 0, low_rate, 0, 0, 0, 0, 0, 0));
        let at_high = calc.recompute(&inputs(base_fare, 0, 0, 0, yq, 0, high_rate, 0, 0, 0, 0, 0, 0));

        prop_assert!(
            at_high.vendor_amount <= at_low.vendor_amount,
            "a higher commission cannot raise the vendor amount: {} vs {}",
            at_high.vendor_amount,
            at_low.vendor_amount
        );
    }

    #[test]
    fn test_dues_clamp_on_overpayment(
        base_fare in 0u64..1_000_000u64,
        deal in 0u64..1_000_000u64,
        overshoot in 1u64..500_000u64,
    ) {
        let calc = FareLedgerCalculator::default();

        let reference = calc.recompute(&inputs(base_fare, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, deal, 0));

        // Pay more than the computed amounts on both sides
        let vendor_paid = reference.vendor_amount + Decimal::from(overshoot);
        let customer_paid = Decimal::from(deal + overshoot);

        let derived = calc.recompute(&LedgerInputs {
            base_fare: Decimal::from(base_fare),
            vendor_paid,
            customer_deal: Decimal::from(deal),
            customer_paid,
            ..Default::default()
        });

        prop_assert_eq!(derived.vendor_due, Decimal::ZERO);
        prop_assert_eq!(derived.customer_due, Decimal::ZERO);
    }

    #[test]
    fn test_profit_is_deal_minus_vendor_amount(
        base_fare in 0u64..1_000_000u64,
        yq in 0u64..100_000u64,
        rate in 0u64..=100u64,
        deal in 0u64..2_000_000u64,
    ) {
        let calc = FareLedgerCalculator::default();
        let derived = calc.recompute(&inputs(base_fare, 0, 0, 0, yq, 0, rate, 0, 0, 0, 0, deal, 0));

        prop_assert_eq!(derived.profit, Decimal::from(deal) - derived.vendor_amount);
    }
}

#[test]
fn test_all_zero_inputs_derive_to_zero() {
    let calc = FareLedgerCalculator::default();
    let derived = calc.recompute(&LedgerInputs::default());

    assert_eq!(derived.total_taxes, Decimal::ZERO);
    assert_eq!(derived.advance_tax, Decimal::ZERO);
    assert_eq!(derived.vendor_amount, Decimal::ZERO);
    assert_eq!(derived.vendor_due, Decimal::ZERO);
    assert_eq!(derived.customer_due, Decimal::ZERO);
    assert_eq!(derived.profit, Decimal::ZERO);
}

#[test]
fn test_reference_booking() {
    // The worked example every release is checked against
    let calc = FareLedgerCalculator::default();
    let derived = calc.recompute(&LedgerInputs {
        base_fare: dec!(10000),
        taxes: TaxBreakdown {
            bd: dec!(500),
            ut: dec!(300),
            e5: dec!(200),
            yq: dec!(1000),
            ..Default::default()
        },
        commission_rate_pct: dec!(5),
        customer_deal: dec!(13000),
        customer_paid: dec!(5000),
        ..Default::default()
    });

    assert_eq!(derived.total_taxes, dec!(2000));
    assert_eq!(derived.advance_tax, dec!(33));
    assert_eq!(derived.vendor_amount, dec!(11533));
    assert_eq!(derived.vendor_due, dec!(11533));
    assert_eq!(derived.profit, dec!(1467));
    assert_eq!(derived.customer_due, dec!(8000));
}

#[test]
fn test_withholding_rounds_half_up() {
    // base 10000, yq 250: withholding base 10250, 0.3% = 30.75 -> 31
    let calc = FareLedgerCalculator::default();
    let derived = calc.recompute(&LedgerInputs {
        base_fare: dec!(10000),
        taxes: TaxBreakdown {
            yq: dec!(250),
            ..Default::default()
        },
        ..Default::default()
    });

    assert_eq!(derived.advance_tax, dec!(31));
}

#[test]
fn test_fractional_commission_stays_unrounded_until_vendor_amount() {
    // 2.5% of 9999 = 249.975; vendor amount rounds once at the end:
    // 9999 + 30 (AIT) - 249.975 = 9779.025 -> 9779
    let calc = FareLedgerCalculator::default();
    let derived = calc.recompute(&LedgerInputs {
        base_fare: dec!(9999),
        commission_rate_pct: dec!(2.5),
        ..Default::default()
    });

    assert_eq!(derived.advance_tax, dec!(30));
    assert_eq!(derived.vendor_amount, dec!(9779));
}

#[test]
fn test_custom_rules_change_exemptions() {
    let calc = FareLedgerCalculator::new(LedgerRules {
        advance_tax_rate: dec!(0.003),
        advance_tax_exempt: vec![TaxCode::Yq],
    });

    let derived = calc.recompute(&LedgerInputs {
        base_fare: dec!(10000),
        taxes: TaxBreakdown {
            bd: dec!(1000),
            yq: dec!(1000),
            ..Default::default()
        },
        ..Default::default()
    });

    // base 10000 + taxes 2000, YQ exempt: (12000 - 1000) * 0.3% = 33
    assert_eq!(derived.advance_tax, dec!(33));
}
