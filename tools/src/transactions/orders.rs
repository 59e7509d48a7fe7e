use goose::prelude::*;
use shop_models::{CancelOrderRequest, MyOrder, PlaceOrderRequest, paths};

use super::{
    Body, NO_BODY, cart::add_to_cart, catalog::fetch_products,
    is_authenticated, parse_success, send, session,
};
use crate::faker;

pub async fn get_orders(user: &mut GooseUser) -> TransactionResult {
    if !is_authenticated(user) {
        return Ok(());
    }
    let goose =
        send(user, GooseMethod::Get, paths::ORDERS, "get orders", NO_BODY)
            .await?;
    if let Some(orders) = parse_success::<MyOrder>(goose).await {
        session(user).store_orders(orders);
    }
    Ok(())
}

/// Refreshes the catalog, puts something in the cart, orders it and
/// refreshes the order list.
pub async fn add_order(user: &mut GooseUser) -> TransactionResult {
    if !is_authenticated(user) {
        return Ok(());
    }
    fetch_products(user).await?;
    add_to_cart(user).await?;
    let request = PlaceOrderRequest {
        delivery_address: faker::delivery_address(&mut rand::rng()),
    };
    let _ = send(
        user,
        GooseMethod::Post,
        paths::ORDERS_ADD,
        "add order",
        Body::Form(&request),
    )
    .await?;
    get_orders(user).await
}

/// Cancels a random known order. Never attempted without a cached,
/// non-empty order list.
pub async fn cancel_order(user: &mut GooseUser) -> TransactionResult {
    if !is_authenticated(user) {
        return Ok(());
    }
    let Some(order_id) = session(user)
        .pick_order(&mut rand::rng())
        .and_then(|o| o.id)
    else {
        return Ok(());
    };
    let _ = send(
        user,
        GooseMethod::Delete,
        paths::ORDERS_CANCEL,
        "cancel order",
        Body::Json(&CancelOrderRequest { order_id }),
    )
    .await?;
    get_orders(user).await
}
