mod error;

pub use error::ClientError;

use reqwest::{
    Client, Method, RequestBuilder, StatusCode,
    header::{COOKIE, HeaderMap, SET_COOKIE},
};
use serde::de::DeserializeOwned;
use shop_models::{
    AddToCartRequest, ApiMessage, CancelOrderRequest, MyCart, MyOrder,
    OrderPlaced, PlaceOrderRequest, Product, ProductList,
    RemoveFromCartRequest, User, Username, paths,
};
use tokio::time::Instant;
use tracing::{debug, info};

use crate::session::SessionToken;

/// Target for the per-request log lines.
pub const REQUEST_LOG_TARGET: &str = "shop_loadtest::requests";

/// HTTP client for one shop instance.
///
/// Authenticated endpoints take the [`SessionToken`] obtained from
/// [`ShopClient::login`], so they cannot be called before a login succeeded.
#[derive(Clone, Debug)]
pub struct ShopClient {
    client: Client,
    base_url: String,
}

struct Exchange {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
}

impl Exchange {
    fn expect_success(self) -> Result<Self, ClientError> {
        if self.status.is_success() {
            return Ok(self);
        }
        let message = serde_json::from_str::<ApiMessage>(&self.body)
            .map(|m| m.message)
            .unwrap_or(self.body);
        Err(ClientError::api_error(self.status.as_u16(), message))
    }

    fn json<T: DeserializeOwned>(self) -> Result<T, ClientError> {
        let exchange = self.expect_success()?;
        serde_json::from_str(&exchange.body)
            .map_err(ClientError::SerializationError)
    }
}

impl ShopClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("shop-loadtest/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::RequestFailed)?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&SessionToken>,
    ) -> RequestBuilder {
        let builder =
            self.client.request(method, format!("{}{}", self.base_url, path));
        match token {
            Some(token) => builder.header(COOKIE, token.cookie()),
            None => builder,
        }
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
    ) -> Result<Exchange, ClientError> {
        debug!(
            target: REQUEST_LOG_TARGET,
            "Request: {} {}{}", method, self.base_url, path
        );
        let t = Instant::now();
        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().await?;
        info!(
            target: REQUEST_LOG_TARGET,
            "Response: {} {} {} (Duration: {} ms)",
            method,
            path,
            status,
            t.elapsed().as_millis()
        );
        Ok(Exchange {
            status,
            headers,
            body,
        })
    }

    /// `POST /register`. Any non-success status is an error.
    pub async fn register(&self, user: &User) -> Result<Username, ClientError> {
        let builder = self
            .request(Method::POST, paths::REGISTER, None)
            .json(&user.register_request());
        self.execute(Method::POST, paths::REGISTER, builder)
            .await?
            .json()
    }

    /// `POST /login`, returning the session cookie the server set.
    pub async fn login(
        &self,
        user: &User,
    ) -> Result<SessionToken, ClientError> {
        let builder = self
            .request(Method::POST, paths::LOGIN, None)
            .json(&user.login_request());
        let exchange = self
            .execute(Method::POST, paths::LOGIN, builder)
            .await?
            .expect_success()?;
        exchange
            .headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(SessionToken::from_set_cookie)
            .ok_or(ClientError::MissingSessionCookie)
    }

    pub async fn logout(
        &self,
        token: &SessionToken,
    ) -> Result<StatusCode, ClientError> {
        let builder = self.request(Method::POST, paths::LOGOUT, Some(token));
        Ok(self.execute(Method::POST, paths::LOGOUT, builder).await?.status)
    }

    pub async fn products(&self) -> Result<Vec<Product>, ClientError> {
        let builder = self.request(Method::GET, paths::PRODUCTS, None);
        let list: ProductList = self
            .execute(Method::GET, paths::PRODUCTS, builder)
            .await?
            .json()?;
        Ok(list.into_products())
    }

    /// `GET /products?title=...`
    pub async fn search_products(
        &self,
        title: &str,
    ) -> Result<Vec<Product>, ClientError> {
        let builder = self
            .request(Method::GET, paths::PRODUCTS, None)
            .query(&[(paths::TITLE_QUERY, title)]);
        let list: ProductList = self
            .execute(Method::GET, paths::PRODUCTS, builder)
            .await?
            .json()?;
        Ok(list.into_products())
    }

    pub async fn cart(
        &self,
        token: &SessionToken,
    ) -> Result<MyCart, ClientError> {
        let builder = self.request(Method::GET, paths::CART, Some(token));
        self.execute(Method::GET, paths::CART, builder).await?.json()
    }

    pub async fn add_to_cart(
        &self,
        token: &SessionToken,
        item_id: i64,
        quantity: u32,
    ) -> Result<StatusCode, ClientError> {
        let builder = self
            .request(Method::PUT, paths::CART_ADD, Some(token))
            .json(&AddToCartRequest { item_id, quantity });
        Ok(self.execute(Method::PUT, paths::CART_ADD, builder).await?.status)
    }

    pub async fn remove_from_cart(
        &self,
        token: &SessionToken,
        item_id: i64,
    ) -> Result<StatusCode, ClientError> {
        let builder = self
            .request(Method::DELETE, paths::CART_REMOVE, Some(token))
            .json(&RemoveFromCartRequest { item_id });
        Ok(self
            .execute(Method::DELETE, paths::CART_REMOVE, builder)
            .await?
            .status)
    }

    pub async fn orders(
        &self,
        token: &SessionToken,
    ) -> Result<MyOrder, ClientError> {
        let builder = self.request(Method::GET, paths::ORDERS, Some(token));
        self.execute(Method::GET, paths::ORDERS, builder).await?.json()
    }

    /// `POST /my/orders/add`, returning the id of the new order.
    pub async fn place_order(
        &self,
        token: &SessionToken,
        delivery_address: &str,
    ) -> Result<i64, ClientError> {
        let builder = self
            .request(Method::POST, paths::ORDERS_ADD, Some(token))
            .form(&PlaceOrderRequest {
                delivery_address: delivery_address.to_string(),
            });
        let placed: OrderPlaced = self
            .execute(Method::POST, paths::ORDERS_ADD, builder)
            .await?
            .json()?;
        Ok(placed.order_id)
    }

    pub async fn cancel_order(
        &self,
        token: &SessionToken,
        order_id: i64,
    ) -> Result<StatusCode, ClientError> {
        let builder = self
            .request(Method::DELETE, paths::ORDERS_CANCEL, Some(token))
            .json(&CancelOrderRequest { order_id });
        Ok(self
            .execute(Method::DELETE, paths::ORDERS_CANCEL, builder)
            .await?
            .status)
    }
}
