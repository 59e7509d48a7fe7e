use serde::{Deserialize, Serialize};

use crate::cart::ProductInMyCart;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_date: Option<String>,
    pub total_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_items: Option<Vec<ProductInMyCart>>,
}

/// Snapshot of `GET /my/orders`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MyOrder {
    #[serde(default)]
    pub orders: Option<Vec<Order>>,
}

impl MyOrder {
    pub fn orders(&self) -> &[Order] {
        self.orders.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.orders().is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Order> {
        self.orders().iter().find(|order| order.id == Some(id))
    }
}
