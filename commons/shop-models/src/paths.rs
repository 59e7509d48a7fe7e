//! Routes exposed by the shop API.

pub const REGISTER: &str = "/register";
pub const LOGIN: &str = "/login";
pub const LOGOUT: &str = "/logout";
pub const PRODUCTS: &str = "/products";
pub const CART: &str = "/my/cart";
pub const CART_ADD: &str = "/my/cart/add";
pub const CART_REMOVE: &str = "/my/cart/remove";
pub const ORDERS: &str = "/my/orders";
pub const ORDERS_ADD: &str = "/my/orders/add";
pub const ORDERS_CANCEL: &str = "/my/orders/cancel";

/// Query parameter used by `GET /products` to search by name.
pub const TITLE_QUERY: &str = "title";
