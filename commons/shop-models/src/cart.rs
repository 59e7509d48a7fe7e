use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductInMyCart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub product: String,
    pub price: f64,
    pub quantity: u32,
}

impl ProductInMyCart {
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// Snapshot of `GET /my/cart`. The server sends `cart: null` for an empty cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MyCart {
    #[serde(default)]
    pub cart: Option<Vec<ProductInMyCart>>,
    pub total: f64,
}

impl MyCart {
    pub fn items(&self) -> &[ProductInMyCart] {
        self.cart.as_deref().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn last_item(&self) -> Option<&ProductInMyCart> {
        self.items().last()
    }

    /// Sum of price × quantity over the items currently present.
    pub fn computed_total(&self) -> f64 {
        self.items().iter().map(ProductInMyCart::subtotal).sum()
    }

    /// Whether the server-reported total agrees with the items it listed.
    pub fn total_matches(&self, epsilon: f64) -> bool {
        (self.total - self.computed_total()).abs() <= epsilon
    }

    /// Number of units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.items().iter().map(|item| item.quantity).sum()
    }
}
