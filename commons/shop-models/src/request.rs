//! Request and acknowledgement bodies exchanged with the shop API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddToCartRequest {
    pub item_id: i64,
    pub quantity: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RemoveFromCartRequest {
    pub item_id: i64,
}

/// Sent form-encoded; the server reads it as a form value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceOrderRequest {
    pub delivery_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CancelOrderRequest {
    pub order_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderPlaced {
    pub order_id: i64,
}

/// Body of a successful register or login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Username {
    pub username: String,
}

/// Generic `{"message": ...}` body used for acknowledgements and errors.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: String,
}
