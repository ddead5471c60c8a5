use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds an amount to the whole currency unit, half-up.
///
/// The agency books ticket ledgers in whole taka; every derived figure
/// passes through this before it is stored or compared. Half-up matches
/// how the airlines print fare breakdowns, so `.round()`-style banker's
/// rounding is deliberately not used.
pub fn round_whole(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}
