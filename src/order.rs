//! Turning a cart into an order.
use super::cart::{CartState, LineItem, PaymentMethod, ShippingAddress};
use super::config::PricingConfig;
use super::error::{SubmissionError, ValidationError};
use super::identity::{AuthState, Identity};
use super::pricing::{self, PriceSummary};
use super::session::CartStore;
use super::store::KeyedStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::instrument;

/// The JSON document handed to the order-creation API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub order_items: Vec<LineItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    #[serde(flatten)]
    pub prices: PriceSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub order_id: String, // assigned by the order API
    pub created_at: DateTime<Utc>,
}

/// Order-creation API. An error's display text is shown to the shopper as is.
pub trait OrderGateway {
    fn create_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = anyhow::Result<OrderReceipt>>;
}

/// Validate the cart and package it with freshly derived totals.
pub fn prepare_submission(
    cart: &CartState,
    config: &PricingConfig,
) -> Result<OrderPayload, ValidationError> {
    if cart.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    if !cart.shipping_address.is_set() {
        return Err(ValidationError::MissingShippingAddress);
    }
    let Some(payment_method) = cart.payment_method else {
        return Err(ValidationError::MissingPaymentMethod);
    };

    Ok(OrderPayload {
        order_items: cart.items.clone(),
        shipping_address: cart.shipping_address.clone(),
        payment_method,
        prices: pricing::derive(&cart.items, config),
    })
}

/// A validated order detached from the cart.
///
/// It holds its own copy of the payload, so the cart stays readable and
/// editable while [`PendingOrder::submit`] waits on the order API. Keeping a
/// second submission from starting meanwhile is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    identity: Identity,
    payload: OrderPayload,
}

impl PendingOrder {
    pub fn prepare<S, A>(
        cart: &CartStore<S, A>,
        config: &PricingConfig,
    ) -> Result<Self, ValidationError>
    where
        S: KeyedStore,
        A: AuthState,
    {
        let payload = prepare_submission(cart.state(), config).inspect_err(|e| {
            tracing::debug!(code = e.code(), "cart not submittable");
        })?;

        Ok(Self {
            identity: cart.identity().clone(),
            payload,
        })
    }
    /// Identity whose cart the order was taken from
    pub fn identity(&self) -> &Identity {
        &self.identity
    }
    pub fn payload(&self) -> &OrderPayload {
        &self.payload
    }

    #[instrument(skip_all, fields(identity = %self.identity))]
    pub async fn submit<G>(&self, gateway: &G) -> Result<OrderReceipt, SubmissionError>
    where
        G: OrderGateway + ?Sized,
    {
        match gateway.create_order(&self.payload).await {
            Ok(receipt) => {
                tracing::info!(order_id = %receipt.order_id, total = %self.payload.prices.total_price, "order created");
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, "order creation failed, cart kept for retry");
                Err(SubmissionError::Rejected(e.to_string()))
            }
        }
    }

    /// Clear the originating cart once the order API has confirmed the order.
    /// Targets the identity the order was prepared for, even if the shopper
    /// has switched since.
    pub fn complete<S, A>(&self, cart: &mut CartStore<S, A>, receipt: &OrderReceipt)
    where
        S: KeyedStore,
        A: AuthState,
    {
        tracing::debug!(order_id = %receipt.order_id, identity = %self.identity, "clearing ordered cart");
        cart.clear_for(&self.identity);
    }
}

/// Prepare, submit and complete in one call.
///
/// Holds the cart for the whole round trip. Use [`PendingOrder`] directly to
/// keep the cart editable while the order API responds. On rejection the
/// cart is left exactly as it was so the shopper can retry.
#[instrument(skip_all, fields(identity = %cart.identity()))]
pub async fn place_order<S, A, G>(
    cart: &mut CartStore<S, A>,
    gateway: &G,
    config: &PricingConfig,
) -> Result<OrderReceipt, SubmissionError>
where
    S: KeyedStore,
    A: AuthState,
    G: OrderGateway + ?Sized,
{
    let order = PendingOrder::prepare(cart, config)?;
    let receipt = order.submit(gateway).await?;
    order.complete(cart, &receipt);

    Ok(receipt)
}
