use goose::prelude::*;
use rand::Rng;
use shop_models::{AddToCartRequest, MyCart, RemoveFromCartRequest, paths};

use super::{
    Body, NO_BODY, catalog::fetch_products, is_authenticated, parse_success,
    send, session,
};
use crate::config::LoadtestConfig;

pub async fn get_cart(user: &mut GooseUser) -> TransactionResult {
    if !is_authenticated(user) {
        return Ok(());
    }
    let goose =
        send(user, GooseMethod::Get, paths::CART, "get cart", NO_BODY).await?;
    if let Some(cart) = parse_success::<MyCart>(goose).await {
        session(user).store_cart(cart);
    }
    Ok(())
}

/// Adds a random product from the cached catalog, fetching the catalog
/// first when there is none yet, then refreshes the cart.
pub async fn add_to_cart(user: &mut GooseUser) -> TransactionResult {
    if !is_authenticated(user) {
        return Ok(());
    }
    if session(user).products().is_none() {
        fetch_products(user).await?;
    }
    let request = {
        let mut rng = rand::rng();
        let max_quantity = LoadtestConfig::active().max_quantity.max(1);
        session(user)
            .pick_product(&mut rng)
            .and_then(|p| p.id)
            .map(|item_id| AddToCartRequest {
                item_id,
                quantity: rng.random_range(1..=max_quantity),
            })
    };
    let Some(request) = request else {
        return Ok(());
    };
    let _ = send(
        user,
        GooseMethod::Put,
        paths::CART_ADD,
        "add to cart",
        Body::Json(&request),
    )
    .await?;
    get_cart(user).await
}

/// Removes the last line of the cached cart. Does nothing when the cart is
/// unknown or empty.
pub async fn remove_from_cart(user: &mut GooseUser) -> TransactionResult {
    if !is_authenticated(user) {
        return Ok(());
    }
    let Some(item_id) = session(user).last_cart_item_id() else {
        return Ok(());
    };
    let _ = send(
        user,
        GooseMethod::Delete,
        paths::CART_REMOVE,
        "remove from cart",
        Body::Json(&RemoveFromCartRequest { item_id }),
    )
    .await?;
    get_cart(user).await
}
