use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
}

/// Envelope returned by `GET /products`, with or without a title filter.
/// An empty search comes back as `products: null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductList {
    #[serde(default)]
    pub products: Option<Vec<Product>>,
}

impl ProductList {
    pub fn products(&self) -> &[Product] {
        self.products.as_deref().unwrap_or_default()
    }

    pub fn into_products(self) -> Vec<Product> {
        self.products.unwrap_or_default()
    }
}
