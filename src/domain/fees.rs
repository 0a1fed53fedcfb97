use rust_decimal::{Decimal, RoundingStrategy};

/// Result of applying a fee schedule to an amount.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct FeeBreakdown {
    pub fee: Decimal,
    pub net: Decimal,
}

/// Applies a percentage plus optional fixed fee to an amount.
///
/// `fee = round_half_up(amount * percentage) + fixed_fee`, rounded
/// half-away-from-zero at the currency's smallest unit. Pure decimal
/// arithmetic throughout; identical inputs always produce identical output.
pub fn calculate(amount: Decimal, percentage: Decimal, fixed_fee: Option<Decimal>) -> FeeBreakdown {
    let percentage_fee =
        (amount * percentage).round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let fee = percentage_fee + fixed_fee.unwrap_or(Decimal::ZERO);
    FeeBreakdown {
        fee,
        net: amount - fee,
    }
}
