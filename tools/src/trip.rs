//! One shopaholic trip: sign up, fill a cart by searching products by name,
//! change their mind about part of it, order, maybe cancel, sign out.

use rand::{Rng, seq::SliceRandom};
use shop_models::MyCart;
use tracing::{debug, warn};

use crate::{
    client::{ClientError, ShopClient},
    config::LoadtestConfig,
    faker,
    session::SessionState,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripReport {
    pub requests: u64,
    pub items_added: u32,
    pub items_removed: u32,
    pub order_id: Option<i64>,
    pub cancelled: bool,
}

/// How many products the trip tries to put in the cart.
pub fn cart_adds<R: Rng + ?Sized>(config: &LoadtestConfig, rng: &mut R) -> u32 {
    rng.random_range(config.min_cart_adds..=config.max_cart_adds)
}

/// Item ids to remove, one entry per unit. Fewer removals than the cart has
/// lines minus one; carts with fewer than two lines are left alone.
pub fn removal_plan<R: Rng + ?Sized>(cart: &MyCart, rng: &mut R) -> Vec<i64> {
    let lines = cart.items().len();
    let keep = if lines < 2 {
        0
    } else {
        rng.random_range(0..lines - 1)
    };
    let mut ids: Vec<i64> = cart
        .items()
        .iter()
        .filter_map(|item| item.id.map(|id| (id, item.quantity)))
        .flat_map(|(id, quantity)| std::iter::repeat_n(id, quantity as usize))
        .collect();
    ids.shuffle(rng);
    ids.truncate(keep);
    ids
}

pub fn should_cancel<R: Rng + ?Sized>(
    config: &LoadtestConfig,
    rng: &mut R,
) -> bool {
    rng.random_bool(config.cancel_chance)
}

fn ignore_failure<T>(op: &str, result: Result<T, ClientError>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            debug!("{op} failed, ignoring: {e}");
            None
        }
    }
}

/// Runs a whole trip against `client`. Only a failed register or login
/// aborts the trip; every other failure is logged and skipped.
///
/// `session` is left anonymous afterwards unless the trip aborted.
pub async fn run_trip<R: Rng + Send + ?Sized>(
    client: &ShopClient,
    config: &LoadtestConfig,
    session: &mut SessionState,
    rng: &mut R,
) -> Result<TripReport, ClientError> {
    let mut report = TripReport::default();

    let user = faker::user(rng);
    report.requests += 1;
    client.register(&user).await?;
    session.register(user.clone());

    report.requests += 1;
    let token = client.login(&user).await?;
    if let Err(e) = session.authenticate(token.clone()) {
        warn!("session rejected login token: {e}");
    }

    report.requests += 1;
    if let Some(products) =
        ignore_failure("get products", client.products().await)
    {
        session.store_products(products);
    }

    for _ in 0..cart_adds(config, rng) {
        let Some(name) = session.pick_product_name(rng).map(str::to_string)
        else {
            break;
        };
        report.requests += 1;
        let found = ignore_failure(
            "search product",
            client.search_products(&name).await,
        );
        let Some(id) = found.and_then(|hits| hits.first().and_then(|p| p.id))
        else {
            continue;
        };
        report.requests += 1;
        let added = ignore_failure(
            "add to cart",
            client.add_to_cart(&token, id, 1).await,
        );
        if added.is_some() {
            report.items_added += 1;
        }
    }

    report.requests += 1;
    if let Some(cart) = ignore_failure("get cart", client.cart(&token).await) {
        debug!("cart holds {} units before removals", cart.unit_count());
        session.store_cart(cart);
    }
    let removals = session
        .cart()
        .map(|cart| removal_plan(cart, rng))
        .unwrap_or_default();
    for id in removals {
        report.requests += 1;
        let removed = ignore_failure(
            "remove from cart",
            client.remove_from_cart(&token, id).await,
        );
        if removed.is_some() {
            report.items_removed += 1;
        }
    }

    let address = faker::delivery_address(rng);
    report.requests += 1;
    report.order_id = ignore_failure(
        "place order",
        client.place_order(&token, &address).await,
    );

    report.requests += 1;
    if let Some(orders) =
        ignore_failure("get orders", client.orders(&token).await)
    {
        session.store_orders(orders);
    }

    if let Some(order_id) = report.order_id {
        if should_cancel(config, rng) {
            report.requests += 1;
            report.cancelled = ignore_failure(
                "cancel order",
                client.cancel_order(&token, order_id).await,
            )
            .is_some();
        }
    }

    report.requests += 1;
    ignore_failure("logout", client.logout(&token).await);
    session.logout();

    Ok(report)
}
