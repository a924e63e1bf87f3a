use rust_decimal::{Decimal, RoundingStrategy};

/// Prices are exact decimals in US dollars with two fractional digits.
pub const CURRENCY_SYMBOL: &str = "$";

/// Round to whole cents, half away from zero (how receipts round).
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an amount for display, always with two decimals: `$74.97`, `$0.00`.
pub fn format_price(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{CURRENCY_SYMBOL}{:.2}", rounded.abs())
    } else {
        format!("{CURRENCY_SYMBOL}{:.2}", rounded.abs())
    }
}
