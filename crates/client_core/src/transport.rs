use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Product, ProductId},
    error::ApiError,
    protocol::{product_route, products_route, ProductInput},
};
use tracing::debug;
use url::Url;

use crate::{
    error::{ClientError, ClientResult},
    ProductApi,
};

pub struct HttpProductApi {
    http: Client,
    base_url: Url,
}

impl HttpProductApi {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> ClientResult<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(http, base_url)
    }

    pub fn with_client(http: Client, base_url: &str) -> ClientResult<Self> {
        Ok(Self {
            http,
            base_url: normalize_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> ClientResult<Url> {
        Ok(self.base_url.join(path)?)
    }
}

/// Parses the configured base URL and makes sure it ends in `/` so that
/// relative joins land under it instead of replacing its last segment.
pub fn normalize_base_url(raw: &str) -> ClientResult<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Ok(Url::parse(&raw)?)
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await?;
    let message = serde_json::from_slice::<ApiError>(&body)
        .ok()
        .and_then(|error| error.message)
        .filter(|message| !message.trim().is_empty());
    Err(ClientError::Status {
        status: status.as_u16(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let body = ensure_success(response).await?.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl ProductApi for HttpProductApi {
    async fn list(&self) -> ClientResult<Vec<Product>> {
        let url = self.endpoint(products_route())?;
        debug!(%url, "GET products");
        decode(self.http.get(url).send().await?).await
    }

    async fn get(&self, id: ProductId) -> ClientResult<Product> {
        let url = self.endpoint(&product_route(id))?;
        debug!(%url, "GET product");
        decode(self.http.get(url).send().await?).await
    }

    async fn create(&self, input: &ProductInput) -> ClientResult<Product> {
        let url = self.endpoint(products_route())?;
        debug!(%url, sku = %input.sku, "POST product");
        decode(self.http.post(url).json(input).send().await?).await
    }

    async fn update(&self, id: ProductId, input: &ProductInput) -> ClientResult<Product> {
        let url = self.endpoint(&product_route(id))?;
        debug!(%url, sku = %input.sku, "PUT product");
        decode(self.http.put(url).json(input).send().await?).await
    }

    async fn delete(&self, id: ProductId) -> ClientResult<()> {
        let url = self.endpoint(&product_route(id))?;
        debug!(%url, "DELETE product");
        ensure_success(self.http.delete(url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
