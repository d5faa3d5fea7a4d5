//! Walks one shopper through a guest cart, sign-in and checkout against a
//! sled database.
//!
//! ```sh
//! RUST_LOG=cart_session=debug cargo run --example checkout
//! ```

use cart_session::{
    CartStore, LineItem, Money, PaymentMethod, ShippingAddress, SledStore,
    config::CartConfig,
    gateway::LocalOrderBook,
    identity::{AuthenticatedUser, SessionAuth},
    order::place_order,
};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "cart_session=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = CartConfig::from_env()?;
    let store = SledStore::open(&config.db_path)?;
    let auth = SessionAuth::new();
    let orders = LocalOrderBook::new();

    let mut cart = CartStore::new(store, auth.clone());
    cart.add_item(LineItem::new(
        "5f8d0d55b54764421b7156c1",
        "Airpods Wireless Bluetooth Headphones",
        "/images/airpods.jpg",
        Money::new(Decimal::new(8999, 0)),
        10,
        1,
    ));
    tracing::info!(step = cart.checkout_step().path(), "guest browsing");

    auth.login(AuthenticatedUser::new(
        "5f8d0d55b54764421b7156c9",
        "John Doe",
        "john@example.com",
    ));
    cart.on_identity_change();

    cart.add_item(LineItem::new(
        "5f8d0d55b54764421b7156c2",
        "iPhone 11 Pro 256GB Memory",
        "/images/phone.jpg",
        Money::new(Decimal::new(59999, 0)),
        7,
        2,
    ));
    cart.set_shipping_address(ShippingAddress::new(
        "12 MG Road",
        "Bengaluru",
        "560001",
        "India",
    ));
    cart.set_payment_method(Some(PaymentMethod::PayPal));

    let summary = cart.summary(&config.pricing);
    tracing::info!(
        items = cart.item_count(),
        items_price = %summary.items_price,
        shipping = %summary.shipping_price,
        tax = %summary.tax_price,
        total = %summary.total_price,
        "ready to place order"
    );

    let receipt = place_order(&mut cart, &orders, &config.pricing).await?;
    tracing::info!(order_id = %receipt.order_id, created_at = %receipt.created_at, "order placed");

    if let Some(order) = orders.get(&receipt.order_id) {
        tracing::info!(document = %serde_json::to_string_pretty(&order.document)?, "order document");
    }

    auth.logout();
    let guest = cart.on_identity_change();
    tracing::info!(items = guest.items.len(), "back to the guest cart");

    Ok(())
}
