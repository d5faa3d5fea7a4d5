//! The cart state machine for the active identity.
//!
//! `CartStore` holds the materialized [`CartState`] for one identity at a
//! time. Every mutation writes through to the [`KeyedStore`] before it
//! returns, so memory and storage never disagree from the caller's side.
//!
//! The store remembers which identity it last materialized. [`CartStore::reset`]
//! only rereads storage when the resolved identity differs from that one; a
//! reset fired late for the same shopper must not replace a mutation that was
//! just applied with an older stored copy.
use super::cart::{CartState, LineItem, PaymentMethod, ShippingAddress};
use super::checkout::{self, CheckoutStep};
use super::config::PricingConfig;
use super::identity::{AuthState, Identity, current_identity};
use super::pricing::{self, PriceSummary};
use super::store::KeyedStore;

pub struct CartStore<S, A> {
    store: S,
    auth: A,
    identity: Identity,
    state: CartState,
}

impl<S: KeyedStore, A: AuthState> CartStore<S, A> {
    /// Build a store and materialize the cart of whoever is signed in now.
    pub fn new(store: S, auth: A) -> Self {
        let identity = current_identity(&auth);
        let state = load_state(&store, &identity);
        tracing::debug!(%identity, items = state.items.len(), "cart initialized");

        Self {
            store,
            auth,
            identity,
            state,
        }
    }

    /// Resolve the identity and unconditionally load its cart.
    pub fn initialize(&mut self) -> &CartState {
        let identity = current_identity(&self.auth);
        self.materialize(identity);
        &self.state
    }

    pub fn add_item(&mut self, item: LineItem) {
        tracing::debug!(identity = %self.identity, product_id = %item.product_id, qty = item.qty, "add item");
        self.state.upsert_item(item);
        self.persist();
    }

    pub fn remove_item(&mut self, product_id: &str) {
        let removed = self.state.remove_item(product_id);
        tracing::debug!(identity = %self.identity, product_id, removed, "remove item");
        self.persist();
    }

    pub fn set_shipping_address(&mut self, address: ShippingAddress) {
        self.state.shipping_address = address;
        self.persist();
    }

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) {
        self.state.payment_method = method;
        self.persist();
    }

    /// Empty the cart and delete its stored entry.
    pub fn clear(&mut self) {
        tracing::debug!(identity = %self.identity, "clear cart");
        self.state = CartState::default();
        self.store.remove(&self.identity.cart_key());
    }

    /// Clear the cart belonging to `identity`. For any identity other than the
    /// materialized one only its stored entry is removed.
    pub fn clear_for(&mut self, identity: &Identity) {
        if *identity == self.identity {
            self.clear();
        } else {
            tracing::debug!(%identity, current = %self.identity, "removing cart of inactive identity");
            self.store.remove(&identity.cart_key());
        }
    }

    /// Re-resolve the identity and switch carts if it changed.
    pub fn reset(&mut self) -> &CartState {
        let identity = current_identity(&self.auth);

        if identity == self.identity {
            tracing::debug!(%identity, "identity unchanged, keeping materialized cart");
        } else {
            tracing::info!(from = %self.identity, to = %identity, "identity changed, switching cart");
            self.materialize(identity);
        }

        &self.state
    }

    /// Hook for login and logout.
    pub fn on_identity_change(&mut self) -> &CartState {
        self.reset()
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }
    pub fn items(&self) -> &[LineItem] {
        &self.state.items
    }
    pub fn shipping_address(&self) -> &ShippingAddress {
        &self.state.shipping_address
    }
    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.state.payment_method
    }
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
    pub fn item_count(&self) -> u64 {
        self.state.item_count()
    }
    pub fn summary(&self, config: &PricingConfig) -> PriceSummary {
        pricing::derive(&self.state.items, config)
    }
    pub fn checkout_step(&self) -> CheckoutStep {
        checkout::next_step(&self.identity, &self.state)
    }
    pub fn store(&self) -> &S {
        &self.store
    }

    fn materialize(&mut self, identity: Identity) {
        self.state = load_state(&self.store, &identity);
        tracing::debug!(%identity, items = self.state.items.len(), "cart materialized");
        self.identity = identity;
    }

    fn persist(&self) {
        self.store.save(&self.identity.cart_key(), &self.state);
    }
}

fn load_state<S: KeyedStore>(store: &S, identity: &Identity) -> CartState {
    store.load(&identity.cart_key()).unwrap_or_default()
}
