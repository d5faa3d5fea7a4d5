//! Cart contents: line items, shipping address and payment method
use super::error::ParsePaymentMethodError;
use super::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One product in the cart. Product fields arrive already fetched from the catalog.
#[derive(
    Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[n(0)]
    pub product_id: String,
    #[n(1)]
    pub name: String,
    #[n(2)]
    pub image: String,
    #[n(3)]
    pub price: Money,
    #[n(4)]
    pub count_in_stock: u32,
    #[n(5)]
    pub qty: u32,
}

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    minicbor::Encode,
    minicbor::Decode,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    #[n(0)]
    pub address: String,
    #[n(1)]
    pub city: String,
    #[n(2)]
    pub postal_code: String,
    #[n(3)]
    pub country: String,
}

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    minicbor::Encode,
    minicbor::Decode,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    #[n(0)]
    PayPal,
    #[n(1)]
    Stripe,
}

/// Everything the shopper has accumulated for one identity. This is the unit
/// of persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct CartState {
    #[n(0)]
    pub items: Vec<LineItem>,
    #[n(1)]
    pub shipping_address: ShippingAddress,
    #[n(2)]
    pub payment_method: Option<PaymentMethod>,
}

impl LineItem {
    pub fn new(
        product_id: impl Into<String>,
        name: impl Into<String>,
        image: impl Into<String>,
        price: Money,
        count_in_stock: u32,
        qty: u32,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            name: name.into(),
            image: image.into(),
            price,
            count_in_stock,
            qty,
        }
    }
    /// `price * qty` at full precision, saturating at `Decimal::MAX`
    pub fn line_total(&self) -> Decimal {
        self.price
            .amount()
            .checked_mul(Decimal::from(self.qty))
            .unwrap_or(Decimal::MAX)
    }
}

impl ShippingAddress {
    pub fn new(
        address: impl Into<String>,
        city: impl Into<String>,
        postal_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            address: address.into(),
            city: city.into(),
            postal_code: postal_code.into(),
            country: country.into(),
        }
    }
    // country is the minimum field an order can ship with
    pub fn is_set(&self) -> bool {
        !self.country.trim().is_empty()
    }
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayPal => "paypal",
            Self::Stripe => "stripe",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = ParsePaymentMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "paypal" => Ok(Self::PayPal),
            "stripe" => Ok(Self::Stripe),
            _ => Err(ParsePaymentMethodError(s.to_string())),
        }
    }
}

impl CartState {
    pub fn new() -> Self {
        Self::default()
    }
    /// Replace the line with the same product id in place, or append.
    /// A repeat add overwrites quantity, it never increments it.
    pub fn upsert_item(&mut self, item: LineItem) {
        match self
            .items
            .iter_mut()
            .find(|existing| existing.product_id == item.product_id)
        {
            Some(existing) => *existing = item,
            None => self.items.push(item),
        }
    }
    /// Returns whether a line was removed
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.product_id != product_id);
        self.items.len() != before
    }
    pub fn item(&self, product_id: &str) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
