use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::round_cents;

/// Promotional codes accepted at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromoCode {
    /// 10% off.
    Farm10,
    /// 20% off.
    Fresh20,
}

impl PromoCode {
    pub fn as_str(self) -> &'static str {
        match self {
            PromoCode::Farm10 => "FARM10",
            PromoCode::Fresh20 => "FRESH20",
        }
    }

    /// Discount as a fraction of the subtotal.
    pub fn discount_rate(self) -> Decimal {
        match self {
            PromoCode::Farm10 => Decimal::new(10, 2),
            PromoCode::Fresh20 => Decimal::new(20, 2),
        }
    }

    /// Case-insensitive lookup. Unknown codes give `None`, which simply means
    /// no discount.
    pub fn parse(code: &str) -> Option<PromoCode> {
        code.parse().ok()
    }
}

impl fmt::Display for PromoCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromoCode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "farm10" => Ok(PromoCode::Farm10),
            "fresh20" => Ok(PromoCode::Fresh20),
            other => Err(format!("unknown promo code '{other}'")),
        }
    }
}

/// Order summary shown next to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub subtotal: Decimal,
    pub promo: Option<PromoCode>,
    pub discount_rate: Decimal,
    pub discount: Decimal,
    /// Shipping is free on every order.
    pub shipping: Decimal,
    pub total: Decimal,
}

impl CheckoutSummary {
    pub fn compute(subtotal: Decimal, promo: Option<PromoCode>) -> Self {
        let discount_rate = promo.map_or(Decimal::ZERO, PromoCode::discount_rate);
        let discount = round_cents(subtotal * discount_rate);
        let shipping = Decimal::ZERO;
        Self {
            subtotal,
            promo,
            discount_rate,
            discount,
            shipping,
            total: subtotal - discount + shipping,
        }
    }

    /// Discount as a whole percentage, for display ("10% discount applied!").
    pub fn discount_percent(&self) -> Decimal {
        (self.discount_rate * Decimal::ONE_HUNDRED).normalize()
    }
}
