//! Identity-scoped shopping cart session.
//!
//! A [`CartStore`] keeps the cart of whoever is currently signed in (or the
//! guest), writes every change through to a [`KeyedStore`], and switches carts
//! when the identity changes. [`pricing::derive`] computes totals and
//! [`order::place_order`] validates and submits the cart; [`order::PendingOrder`]
//! does the same without holding the cart across the wait.

pub mod cart;
pub mod checkout;
pub mod config;
pub mod error;
pub mod gateway;
pub mod identity;
pub mod money;
pub mod order;
pub mod pricing;
pub mod session;
pub mod store;

pub use cart::{CartState, LineItem, PaymentMethod, ShippingAddress};
pub use money::Money;
pub use session::CartStore;
pub use store::{KeyedStore, MemoryStore, SledStore};
