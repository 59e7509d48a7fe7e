use goose::prelude::*;
use shop_models::{ProductList, paths};

use super::{Body, NO_BODY, parse_success, send, session};

pub(crate) async fn fetch_products(
    user: &mut GooseUser,
) -> TransactionResult {
    let goose =
        send(user, GooseMethod::Get, paths::PRODUCTS, "get products", NO_BODY)
            .await?;
    if let Some(list) = parse_success::<ProductList>(goose).await {
        session(user).store_products(list.into_products());
    }
    Ok(())
}

pub async fn get_products(user: &mut GooseUser) -> TransactionResult {
    fetch_products(user).await
}

/// Searches for a product by one of the names remembered from the first
/// catalog. Hits replace the cached catalog.
pub async fn search_product(user: &mut GooseUser) -> TransactionResult {
    if session(user).product_names().is_empty() {
        fetch_products(user).await?;
    }
    let Some(name) = session(user)
        .pick_product_name(&mut rand::rng())
        .map(str::to_string)
    else {
        return Ok(());
    };
    let query = [(paths::TITLE_QUERY, name.as_str())];
    let goose = send(
        user,
        GooseMethod::Get,
        paths::PRODUCTS,
        "search product",
        Body::Query(&query),
    )
    .await?;
    if let Some(list) = parse_success::<ProductList>(goose).await {
        session(user).store_products(list.into_products());
    }
    Ok(())
}
