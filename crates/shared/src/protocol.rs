use serde::{Deserialize, Serialize};

use crate::domain::ProductId;

pub fn products_route() -> &'static str {
    "products"
}

pub fn product_route(id: ProductId) -> String {
    format!("products/{}", id.0)
}

/// Editable fields sent on create and update. Never carries an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: f64,
    pub sku: String,
}
