//! Order totals derived from cart line items.
//!
//! Everything is computed at full decimal precision and each field is rounded
//! to cents exactly once, when the summary is produced. A summary is never
//! persisted; derive it again whenever the items change.
//!
//! Amounts too large for a `Decimal` saturate at `Decimal::MAX` instead of
//! overflowing.
use super::cart::LineItem;
use super::config::PricingConfig;
use super::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Orders whose items price reaches this amount ship free
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);
/// Shipping charged below the free shipping threshold
pub const SHIPPING_SURCHARGE: Decimal = Decimal::from_parts(5_000, 0, 0, false, 0);
/// 18%
pub const TAX_RATE: Decimal = Decimal::from_parts(18, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSummary {
    pub items_price: Money,
    pub shipping_price: Money,
    pub tax_price: Money,
    pub total_price: Money,
}

pub fn derive(items: &[LineItem], config: &PricingConfig) -> PriceSummary {
    let items_price = items
        .iter()
        .map(LineItem::line_total)
        .fold(Decimal::ZERO, saturating_add);

    let shipping_price = if items_price < config.free_shipping_threshold {
        config.shipping_surcharge
    } else {
        Decimal::ZERO
    };
    let tax_price = config
        .tax_rate
        .checked_mul(items_price)
        .unwrap_or(Decimal::MAX);
    let total_price = saturating_add(saturating_add(items_price, shipping_price), tax_price);

    PriceSummary {
        items_price: Money::round_cents(items_price),
        shipping_price: Money::round_cents(shipping_price),
        tax_price: Money::round_cents(tax_price),
        total_price: Money::round_cents(total_price),
    }
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(Decimal::MAX)
}
