//! Checkout progress derived from who is signed in and what the cart holds.
use super::cart::CartState;
use super::identity::Identity;

/// Checkout screens in the order a shopper walks through them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CheckoutStep {
    SignIn,
    Shipping,
    Payment,
    PlaceOrder,
}

impl CheckoutStep {
    pub fn path(&self) -> &'static str {
        match self {
            Self::SignIn => "/login",
            Self::Shipping => "/shipping",
            Self::Payment => "/payment",
            Self::PlaceOrder => "/placeorder",
        }
    }
}

/// First step the shopper has not satisfied yet.
pub fn next_step(identity: &Identity, cart: &CartState) -> CheckoutStep {
    if identity.is_guest() {
        CheckoutStep::SignIn
    } else if !cart.shipping_address.is_set() {
        CheckoutStep::Shipping
    } else if cart.payment_method.is_none() {
        CheckoutStep::Payment
    } else {
        CheckoutStep::PlaceOrder
    }
}
