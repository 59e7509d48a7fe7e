//! Goose transactions for the shop API.
//!
//! Each transaction issues its request through the goose user so goose
//! records it, then folds the parsed response into the user's
//! [`SessionState`]. Only `register` and `login` fail the transaction on a
//! bad status; everything else leaves the state untouched and moves on.

mod auth;
mod cart;
mod catalog;
mod orders;

pub use auth::{login, logout, register};
pub use cart::{add_to_cart, get_cart, remove_from_cart};
pub use catalog::{get_products, search_product};
pub use orders::{add_order, cancel_order, get_orders};

use goose::goose::GooseResponse;
use goose::prelude::*;
use rand::Rng;
use serde::{Serialize, de::DeserializeOwned};

use crate::{config::LoadtestConfig, session::SessionState};

pub(crate) enum Body<'a, T: Serialize + ?Sized> {
    Empty,
    Json(&'a T),
    Form(&'a T),
    Query(&'a T),
}

pub(crate) const NO_BODY: Body<'static, ()> = Body::Empty;

/// Session data of `user`, created on first access.
pub(crate) fn session(user: &mut GooseUser) -> &mut SessionState {
    if user.get_session_data::<SessionState>().is_none() {
        user.set_session_data(SessionState::default());
    }
    user.get_session_data_unchecked_mut::<SessionState>()
}

pub(crate) fn is_authenticated(user: &mut GooseUser) -> bool {
    session(user).is_authenticated()
}

pub(crate) async fn send<T: Serialize + ?Sized>(
    user: &mut GooseUser,
    method: GooseMethod,
    path: &str,
    name: &str,
    body: Body<'_, T>,
) -> Result<GooseResponse, Box<TransactionError>> {
    let cookie = session(user).token().map(|t| t.cookie().to_string());
    let mut builder = user.get_request_builder(&method, path)?;
    if let Some(cookie) = cookie {
        builder = builder.header("Cookie", cookie);
    }
    let builder = match body {
        Body::Empty => builder,
        Body::Json(b) => builder.json(b),
        Body::Form(b) => builder.form(b),
        Body::Query(b) => builder.query(b),
    };
    let request = GooseRequest::builder()
        .method(method)
        .path(path)
        .name(name)
        .set_request_builder(builder)
        .build();
    user.request(request).await
}

/// Parsed body of a successful response; `None` for anything else.
pub(crate) async fn parse_success<T: DeserializeOwned>(
    goose: GooseResponse,
) -> Option<T> {
    let response = goose.response.ok()?;
    if !response.status().is_success() {
        tracing::debug!("ignoring {} response", response.status());
        return None;
    }
    response.json::<T>().await.ok()
}

/// Failure tag for a response that must have succeeded.
pub(crate) fn rejection(goose: &GooseResponse, op: &str) -> Option<String> {
    match &goose.response {
        Ok(r) if r.status().is_success() => None,
        Ok(r) => Some(format!("{op} rejected: {}", r.status())),
        Err(e) => Some(format!("{op} failed: {e}")),
    }
}

/// Sleeps for a random duration within the configured wait range.
pub(crate) async fn pause() {
    let (min, max) = LoadtestConfig::active().wait_range();
    let wait = if min >= max {
        min
    } else {
        rand::rng().random_range(min..=max)
    };
    tokio::time::sleep(wait).await;
}
