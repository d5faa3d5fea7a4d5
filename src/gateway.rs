//! In-process order book implementing [`OrderGateway`].
//!
//! Accepted orders are kept as the JSON documents the remote API would have
//! received. Useful offline and for exercising the retry path.
use super::order::{OrderGateway, OrderPayload, OrderReceipt};
use bech32::Bech32m;
use chrono::Utc;
use std::cell::RefCell;
use uuid7::uuid7;

const ORDER_ID_HRP: &str = "order";

#[derive(Debug, Clone, PartialEq)]
pub struct StoredOrder {
    pub receipt: OrderReceipt,
    pub document: serde_json::Value,
}

#[derive(Debug, Default)]
pub struct LocalOrderBook {
    orders: RefCell<Vec<StoredOrder>>,
    reject_next: RefCell<Option<String>>,
}

impl LocalOrderBook {
    pub fn new() -> Self {
        Self::default()
    }
    /// Fail the next `create_order` call with `message`
    pub fn reject_next(&self, message: impl Into<String>) {
        *self.reject_next.borrow_mut() = Some(message.into());
    }
    pub fn orders(&self) -> Vec<StoredOrder> {
        self.orders.borrow().clone()
    }
    pub fn get(&self, order_id: &str) -> Option<StoredOrder> {
        self.orders
            .borrow()
            .iter()
            .find(|order| order.receipt.order_id == order_id)
            .cloned()
    }
    pub fn len(&self) -> usize {
        self.orders.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.orders.borrow().is_empty()
    }

    fn record(&self, payload: &OrderPayload) -> anyhow::Result<OrderReceipt> {
        if let Some(message) = self.reject_next.borrow_mut().take() {
            return Err(anyhow::Error::msg(message));
        }

        let document = serde_json::to_value(payload)?;
        let receipt = OrderReceipt {
            order_id: new_order_id()?,
            created_at: Utc::now(),
        };
        self.orders.borrow_mut().push(StoredOrder {
            receipt: receipt.clone(),
            document,
        });

        Ok(receipt)
    }
}

impl OrderGateway for LocalOrderBook {
    async fn create_order(&self, payload: &OrderPayload) -> anyhow::Result<OrderReceipt> {
        self.record(payload)
    }
}

// uuid7 so ids sort by creation, bech32m so they carry a readable prefix
fn new_order_id() -> anyhow::Result<String> {
    let hrp = bech32::Hrp::parse(ORDER_ID_HRP)?;
    let encoded = bech32::encode::<Bech32m>(hrp, uuid7().as_bytes())?;
    Ok(encoded)
}
