use std::sync::{
    atomic::{AtomicI64, Ordering},
    Mutex,
};

use async_trait::async_trait;
use shared::{
    domain::{Product, ProductId},
    protocol::ProductInput,
};

use crate::{
    error::{ClientError, ClientResult},
    ProductApi,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Get(ProductId),
    Create(ProductInput),
    Update(ProductId, ProductInput),
    Delete(ProductId),
}

/// In-memory stand-in for the catalog API that records every call.
pub struct FakeProductApi {
    products: Mutex<Vec<Product>>,
    calls: Mutex<Vec<ApiCall>>,
    next_id: AtomicI64,
    missing_letter: String,
    fail_with: Option<(u16, Option<String>)>,
}

impl FakeProductApi {
    pub fn with_products(products: Vec<Product>) -> Self {
        let next_id = products.iter().map(|p| p.id.0).max().unwrap_or(0) + 1;
        Self {
            products: Mutex::new(products),
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(next_id),
            missing_letter: "e".to_string(),
            fail_with: None,
        }
    }

    pub fn empty() -> Self {
        Self::with_products(Vec::new())
    }

    pub fn failing(status: u16, message: Option<&str>) -> Self {
        let mut api = Self::empty();
        api.fail_with = Some((status, message.map(str::to_string)));
        api
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().expect("calls lock").clone()
    }

    pub fn save_calls(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, ApiCall::Create(_) | ApiCall::Update(..)))
            .count()
    }

    /// Mutates server state without going through the client.
    pub fn insert_out_of_band(&self, product: Product) {
        self.products.lock().expect("products lock").push(product);
    }

    fn record(&self, call: ApiCall) -> ClientResult<()> {
        self.calls.lock().expect("calls lock").push(call);
        match &self.fail_with {
            Some((status, message)) => Err(ClientError::Status {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found() -> ClientError {
    ClientError::Status {
        status: 404,
        message: Some("Product not found".to_string()),
    }
}

pub fn product(id: i64, name: &str, price: f64, sku: &str) -> Product {
    Product {
        id: ProductId(id),
        name: name.to_string(),
        price,
        sku: sku.to_string(),
        missing_letter: "x".to_string(),
    }
}

pub fn products(ids: &[i64]) -> Vec<Product> {
    ids.iter()
        .map(|id| product(*id, &format!("Product {id}"), *id as f64, &format!("SKU-{id}")))
        .collect()
}

#[async_trait]
impl ProductApi for FakeProductApi {
    async fn list(&self) -> ClientResult<Vec<Product>> {
        self.record(ApiCall::List)?;
        Ok(self.products.lock().expect("products lock").clone())
    }

    async fn get(&self, id: ProductId) -> ClientResult<Product> {
        self.record(ApiCall::Get(id))?;
        self.products
            .lock()
            .expect("products lock")
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create(&self, input: &ProductInput) -> ClientResult<Product> {
        self.record(ApiCall::Create(input.clone()))?;
        let created = Product {
            id: ProductId(self.next_id.fetch_add(1, Ordering::SeqCst)),
            name: input.name.clone(),
            price: input.price,
            sku: input.sku.clone(),
            missing_letter: self.missing_letter.clone(),
        };
        self.products
            .lock()
            .expect("products lock")
            .push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: ProductId, input: &ProductInput) -> ClientResult<Product> {
        self.record(ApiCall::Update(id, input.clone()))?;
        let mut products = self.products.lock().expect("products lock");
        let existing = products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(not_found)?;
        existing.name = input.name.clone();
        existing.price = input.price;
        existing.sku = input.sku.clone();
        Ok(existing.clone())
    }

    async fn delete(&self, id: ProductId) -> ClientResult<()> {
        self.record(ApiCall::Delete(id))?;
        let mut products = self.products.lock().expect("products lock");
        let before = products.len();
        products.retain(|product| product.id != id);
        if products.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}
