//! Draft state for creating or editing one product.

use shared::{
    domain::{Product, ProductId},
    protocol::ProductInput,
};
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, ClientResult},
    ProductApi,
};

pub const VALIDATION_MESSAGE: &str = "Please fill all fields correctly.";
pub const SAVE_FALLBACK_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorMode {
    #[default]
    Create,
    Edit(Product),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SaveRequest {
    Create(ProductInput),
    Update(ProductId, ProductInput),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Server accepted the save; carries the record it returned.
    Saved(Product),
    /// Local validation rejected the draft. No request was made.
    Invalid,
    /// The request was made and failed.
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct RecordEditor {
    mode: EditorMode,
    name: String,
    price: String,
    sku: String,
    validation_error: Option<String>,
}

impl RecordEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the draft with `product` and switches to edit mode.
    pub fn load_for_edit(&mut self, product: Product) {
        self.name = product.name.clone();
        self.price = product.price.to_string();
        self.sku = product.sku.clone();
        self.mode = EditorMode::Edit(product);
        self.validation_error = None;
    }

    pub fn reset_for_create(&mut self) {
        self.mode = EditorMode::Create;
        self.clear_draft();
        self.validation_error = None;
    }

    fn clear_draft(&mut self) {
        self.name.clear();
        self.price.clear();
        self.sku.clear();
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Edit(_))
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Product"
        } else {
            "Add Product"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update"
        } else {
            "Create"
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price_text(&self) -> &str {
        &self.price
    }

    /// Parsed price, or `None` when the text is empty or not a finite number.
    pub fn price_value(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite())
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_price_text(&mut self, price: impl Into<String>) {
        self.price = price.into();
    }

    pub fn set_sku(&mut self, sku: impl Into<String>) {
        self.sku = sku.into();
    }

    pub fn validate(&self) -> ClientResult<ProductInput> {
        if self.name.trim().is_empty() {
            return Err(ClientError::Validation("name is blank".into()));
        }
        if self.sku.trim().is_empty() {
            return Err(ClientError::Validation("sku is blank".into()));
        }
        let price = match self.price_value() {
            Some(price) if price > 0.0 => price,
            _ => {
                return Err(ClientError::Validation(format!(
                    "price {:?} is not a positive number",
                    self.price
                )))
            }
        };

        Ok(ProductInput {
            name: self.name.clone(),
            price,
            sku: self.sku.clone(),
        })
    }

    /// Validates the draft and builds the request for the current mode.
    /// On failure the fixed validation message is set and `None` returned.
    pub fn prepare(&mut self) -> Option<SaveRequest> {
        match self.validate() {
            Ok(input) => Some(match &self.mode {
                EditorMode::Create => SaveRequest::Create(input),
                EditorMode::Edit(product) => SaveRequest::Update(product.id, input),
            }),
            Err(err) => {
                debug!(%err, "editor: draft rejected");
                self.validation_error = Some(VALIDATION_MESSAGE.to_string());
                None
            }
        }
    }

    pub fn apply_save_result(&mut self, result: ClientResult<Product>) -> SubmitOutcome {
        match result {
            Ok(product) => {
                info!(id = %product.id, mode = self.submit_label(), "editor: product saved");
                if self.mode == EditorMode::Create {
                    self.clear_draft();
                }
                self.validation_error = None;
                SubmitOutcome::Saved(product)
            }
            Err(err) => {
                warn!(%err, "editor: save failed");
                self.validation_error = Some(
                    err.server_message()
                        .unwrap_or(SAVE_FALLBACK_MESSAGE)
                        .to_string(),
                );
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit(&mut self, api: &dyn ProductApi) -> SubmitOutcome {
        let Some(request) = self.prepare() else {
            return SubmitOutcome::Invalid;
        };

        let result = match &request {
            SaveRequest::Create(input) => api.create(input).await,
            SaveRequest::Update(id, input) => api.update(*id, input).await,
        };
        self.apply_save_result(result)
    }
}

#[cfg(test)]
#[path = "tests/editor_tests.rs"]
mod tests;
