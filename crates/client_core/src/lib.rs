//! Client-side state and synchronization for the product catalog.
//!
//! [`RecordBrowser`] owns the cached collection and the search filter and
//! composes a [`RecordEditor`] for create/edit. Both talk to the catalog API
//! through the [`ProductApi`] seam; [`HttpProductApi`] is the reqwest-backed
//! implementation.

use async_trait::async_trait;
use shared::{domain::Product, domain::ProductId, protocol::ProductInput};

pub mod browser;
pub mod editor;
pub mod error;
pub mod transport;

pub use browser::{BrowserState, RecordBrowser, RequestKind, RequestTicket};
pub use editor::{EditorMode, RecordEditor, SaveRequest, SubmitOutcome};
pub use error::{ClientError, ClientResult};
pub use transport::HttpProductApi;

/// REST operations over the `/products` resource.
#[async_trait]
pub trait ProductApi: Send + Sync {
    async fn list(&self) -> ClientResult<Vec<Product>>;
    async fn get(&self, id: ProductId) -> ClientResult<Product>;
    async fn create(&self, input: &ProductInput) -> ClientResult<Product>;
    async fn update(&self, id: ProductId, input: &ProductInput) -> ClientResult<Product>;
    async fn delete(&self, id: ProductId) -> ClientResult<()>;
}

#[cfg(any(test, feature = "test-support"))]
#[path = "tests/support.rs"]
pub mod test_support;
