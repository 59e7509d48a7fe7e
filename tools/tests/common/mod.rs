//! In-process stand-in for the shop API, close enough to the real server's
//! contract for the client and trip flows.

#![allow(dead_code)]

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde_json::json;
use shop_models::{
    AddToCartRequest, CancelOrderRequest, LoginRequest, Order,
    PlaceOrderRequest, Product, ProductInMyCart, RegisterRequest,
    RemoveFromCartRequest, paths,
};

#[derive(Default)]
pub struct Shop {
    pub catalog: Vec<Product>,
    accounts: HashMap<String, (String, String)>,
    sessions: HashMap<String, String>,
    carts: HashMap<String, Vec<(i64, u32)>>,
    orders: HashMap<String, Vec<Order>>,
    next_session: u64,
    next_order: i64,
    pub cancelled: Vec<i64>,
    pub logouts: u32,
    pub catalog_requests: u32,
    pub removals: u32,
    pub cancel_requests: u32,
    /// Answer every registration with 503.
    pub refuse_register: bool,
}

pub type SharedShop = Arc<Mutex<Shop>>;

pub fn catalog() -> Vec<Product> {
    [(1, "Kettle", 19.5), (2, "Mug", 4.5), (3, "Spoon", 1.25)]
        .into_iter()
        .map(|(id, name, price)| Product {
            id: Some(id),
            name: name.to_string(),
            price,
            manufacturer: Some("Acme".to_string()),
            type_name: None,
        })
        .collect()
}

fn message(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

impl Shop {
    fn owner(&self, headers: &HeaderMap) -> Option<String> {
        let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
        cookies
            .split(';')
            .filter_map(|pair| pair.trim().strip_prefix("session="))
            .find_map(|token| self.sessions.get(token).cloned())
    }

    fn price_of(&self, id: i64) -> Option<(String, f64)> {
        self.catalog
            .iter()
            .find(|p| p.id == Some(id))
            .map(|p| (p.name.clone(), p.price))
    }

    fn cart_lines(&self, owner: &str) -> Vec<ProductInMyCart> {
        self.carts
            .get(owner)
            .into_iter()
            .flatten()
            .filter_map(|&(id, quantity)| {
                let (product, price) = self.price_of(id)?;
                Some(ProductInMyCart {
                    id: Some(id),
                    product,
                    price,
                    quantity,
                })
            })
            .collect()
    }

    pub fn cart_units(&self, email: &str) -> u32 {
        self.carts
            .get(email)
            .map(|lines| lines.iter().map(|(_, q)| q).sum())
            .unwrap_or(0)
    }

    pub fn order_count(&self, email: &str) -> usize {
        self.orders.get(email).map(Vec::len).unwrap_or(0)
    }

    pub fn total_cart_units(&self) -> u32 {
        self.carts.values().flatten().map(|(_, q)| q).sum()
    }

    pub fn total_orders(&self) -> usize {
        self.orders.values().map(Vec::len).sum()
    }

    pub fn account_count(&self) -> usize {
        self.accounts.len()
    }
}

async fn register(
    State(shop): State<SharedShop>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let mut shop = shop.lock().unwrap();
    if shop.refuse_register {
        return message(StatusCode::SERVICE_UNAVAILABLE, "Try again later.");
    }
    if !req.email.contains('@') {
        return message(StatusCode::BAD_REQUEST, "Invalid email.");
    }
    if shop.accounts.contains_key(&req.email) {
        return message(StatusCode::BAD_REQUEST, "User already exists.");
    }
    shop.accounts
        .insert(req.email, (req.name.clone(), req.password));
    Json(json!({ "username": req.name })).into_response()
}

async fn login(
    State(shop): State<SharedShop>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let mut shop = shop.lock().unwrap();
    let name = match shop.accounts.get(&req.email) {
        Some((name, password)) if *password == req.password => name.clone(),
        _ => return message(StatusCode::UNAUTHORIZED, "Invalid credentials."),
    };
    shop.next_session += 1;
    let token = format!("tok{}", shop.next_session);
    shop.sessions.insert(token.clone(), req.email);
    (
        [(
            header::SET_COOKIE,
            format!("session={token}; Path=/; HttpOnly"),
        )],
        Json(json!({ "username": name })),
    )
        .into_response()
}

async fn logout(
    State(shop): State<SharedShop>,
    headers: HeaderMap,
) -> Response {
    let mut shop = shop.lock().unwrap();
    if let Some(owner) = shop.owner(&headers) {
        shop.sessions.retain(|_, email| *email != owner);
    }
    shop.logouts += 1;
    message(StatusCode::OK, "Successfully logged out")
}

async fn products(
    State(shop): State<SharedShop>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut shop = shop.lock().unwrap();
    shop.catalog_requests += 1;
    let shop = &*shop;
    let hits: Vec<&Product> = match params.get(paths::TITLE_QUERY) {
        Some(title) => shop
            .catalog
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(title))
            .collect(),
        None => shop.catalog.iter().collect(),
    };
    if hits.is_empty() {
        return Json(json!({ "products": null })).into_response();
    }
    Json(json!({ "products": hits })).into_response()
}

async fn cart(State(shop): State<SharedShop>, headers: HeaderMap) -> Response {
    let shop = shop.lock().unwrap();
    let Some(owner) = shop.owner(&headers) else {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized.");
    };
    let lines = shop.cart_lines(&owner);
    let total: f64 = lines.iter().map(ProductInMyCart::subtotal).sum();
    let cart = if lines.is_empty() { None } else { Some(lines) };
    Json(json!({ "total": total, "cart": cart })).into_response()
}

async fn cart_add(
    State(shop): State<SharedShop>,
    headers: HeaderMap,
    Json(req): Json<AddToCartRequest>,
) -> Response {
    let mut shop = shop.lock().unwrap();
    let Some(owner) = shop.owner(&headers) else {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized.");
    };
    let lines = shop.carts.entry(owner).or_default();
    match lines.iter_mut().find(|(id, _)| *id == req.item_id) {
        Some((_, quantity)) => *quantity += req.quantity,
        None => lines.push((req.item_id, req.quantity)),
    }
    message(StatusCode::OK, "Product added to cart.")
}

async fn cart_remove(
    State(shop): State<SharedShop>,
    headers: HeaderMap,
    Json(req): Json<RemoveFromCartRequest>,
) -> Response {
    let mut shop = shop.lock().unwrap();
    shop.removals += 1;
    let Some(owner) = shop.owner(&headers) else {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized.");
    };
    let lines = shop.carts.entry(owner).or_default();
    if let Some((_, quantity)) =
        lines.iter_mut().find(|(id, _)| *id == req.item_id)
    {
        *quantity = quantity.saturating_sub(1);
    }
    lines.retain(|(_, quantity)| *quantity > 0);
    message(StatusCode::OK, "Product removed from cart.")
}

async fn orders(
    State(shop): State<SharedShop>,
    headers: HeaderMap,
) -> Response {
    let shop = shop.lock().unwrap();
    let Some(owner) = shop.owner(&headers) else {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized.");
    };
    let orders = shop.orders.get(&owner).filter(|o| !o.is_empty());
    Json(json!({ "orders": orders })).into_response()
}

async fn orders_add(
    State(shop): State<SharedShop>,
    headers: HeaderMap,
    Form(req): Form<PlaceOrderRequest>,
) -> Response {
    let mut shop = shop.lock().unwrap();
    let Some(owner) = shop.owner(&headers) else {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized.");
    };
    let lines = shop.cart_lines(&owner);
    if lines.is_empty() {
        return message(StatusCode::BAD_REQUEST, "cart is empty");
    }
    shop.next_order += 1;
    let id = shop.next_order;
    let order = Order {
        id: Some(id),
        delivery_address: Some(req.delivery_address),
        order_date: Some("2024-01-01T00:00:00Z".to_string()),
        total_price: lines.iter().map(ProductInMyCart::subtotal).sum(),
        cart_items: Some(lines),
    };
    shop.carts.remove(&owner);
    shop.orders.entry(owner).or_default().push(order);
    Json(json!({ "order_id": id })).into_response()
}

async fn orders_cancel(
    State(shop): State<SharedShop>,
    headers: HeaderMap,
    Json(req): Json<CancelOrderRequest>,
) -> Response {
    let mut shop = shop.lock().unwrap();
    shop.cancel_requests += 1;
    let Some(owner) = shop.owner(&headers) else {
        return message(StatusCode::UNAUTHORIZED, "Unauthorized.");
    };
    let orders = shop.orders.entry(owner).or_default();
    let before = orders.len();
    orders.retain(|o| o.id != Some(req.order_id));
    if orders.len() == before {
        return message(StatusCode::NOT_FOUND, "Order not found.");
    }
    shop.cancelled.push(req.order_id);
    message(StatusCode::OK, "Order cancelled successfully.")
}

pub fn router(shop: SharedShop) -> Router {
    Router::new()
        .route(paths::REGISTER, post(register))
        .route(paths::LOGIN, post(login))
        .route(paths::LOGOUT, post(logout))
        .route(paths::PRODUCTS, get(products))
        .route(paths::CART, get(cart))
        .route(paths::CART_ADD, put(cart_add))
        .route(paths::CART_REMOVE, delete(cart_remove))
        .route(paths::ORDERS, get(orders))
        .route(paths::ORDERS_ADD, post(orders_add))
        .route(paths::ORDERS_CANCEL, delete(orders_cancel))
        .with_state(shop)
}

/// Serves a fresh mock shop on an ephemeral port.
pub async fn spawn_shop() -> (String, SharedShop) {
    let shop: SharedShop = Arc::new(Mutex::new(Shop {
        catalog: catalog(),
        ..Default::default()
    }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock shop");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    let app = router(shop.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock shop server");
    });
    (format!("http://{addr}"), shop)
}
