// Fare ledger calculation.
//
// Derives every money figure a ticket carries from the clerk's inputs:
// total taxes, AIT withholding, vendor payable, both due balances and the
// profit. Runs on every field change in the booking form, so it is total
// over its inputs and never errors.

use rust_decimal::Decimal;

use crate::core::round_whole;
use crate::modules::tickets::models::{LedgerDerived, LedgerInputs, LedgerRules};

/// Recomputes derived ticket figures from ledger inputs.
///
/// Pure and synchronous; holds only the regulatory constants it applies.
/// Calling it twice with the same inputs yields identical outputs, and no
/// derived field survives from a previous call.
#[derive(Debug, Clone, Default)]
pub struct FareLedgerCalculator {
    rules: LedgerRules,
}

impl FareLedgerCalculator {
    pub fn new(rules: LedgerRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &LedgerRules {
        &self.rules
    }

    /// Recompute all derived figures for one ticket.
    ///
    /// Each rounded step rounds half-up to the whole currency unit;
    /// the commission and transaction intermediates stay unrounded until
    /// they feed a rounded step. Due balances clamp at zero, profit keeps
    /// its sign.
    pub fn recompute(&self, inputs: &LedgerInputs) -> LedgerDerived {
        let total_taxes = round_whole(inputs.taxes.total()).max(Decimal::ZERO);

        let commission = inputs.base_fare * inputs.commission_rate_pct / Decimal::ONE_HUNDRED;

        // Withholding base: fare + taxes + the taxable surcharge, minus the
        // codes the exemption list carves out.
        let transaction_amount = inputs.base_fare + total_taxes + inputs.service_charge_taxable;
        let exempt: Decimal = self
            .rules
            .advance_tax_exempt
            .iter()
            .map(|code| inputs.taxes.amount(*code))
            .sum();

        let advance_tax = round_whole((transaction_amount - exempt) * self.rules.advance_tax_rate)
            .max(Decimal::ZERO);

        let vendor_amount = round_whole(
            inputs.base_fare
                + total_taxes
                + advance_tax
                + inputs.service_charge_taxable
                + inputs.service_charge_extra
                - commission
                - inputs.plb,
        )
        .max(Decimal::ZERO);

        let vendor_due = round_whole(vendor_amount - inputs.vendor_paid).max(Decimal::ZERO);
        let profit = round_whole(inputs.customer_deal - vendor_amount);
        let customer_due =
            round_whole(inputs.customer_deal - inputs.customer_paid).max(Decimal::ZERO);

        LedgerDerived {
            total_taxes,
            advance_tax,
            vendor_amount,
            vendor_due,
            customer_due,
            profit,
        }
    }
}
