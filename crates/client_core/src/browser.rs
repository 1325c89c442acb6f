//! Collection cache, search filter and mutation orchestration.
//!
//! [`BrowserState`] holds every state slot and exposes one pure transition
//! per action; [`RecordBrowser`] performs the network calls and feeds their
//! results back through those transitions.

use std::sync::Arc;

use shared::domain::{Product, ProductId};
use tracing::{debug, error, info, warn};

use crate::{
    editor::{RecordEditor, SubmitOutcome},
    error::{ClientError, ClientResult},
    ProductApi,
};

pub const SEARCH_NOT_FOUND_MESSAGE: &str = "Product not found.";
pub const DELETE_OK_NOTICE: &str = "Product deleted successfully.";
pub const DELETE_FAILED_NOTICE: &str = "Error deleting product.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Refresh,
    Search,
}

/// Tag for an issued request. Responses carrying a ticket older than the
/// last one applied for the same kind are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    kind: RequestKind,
    seq: u64,
}

#[derive(Debug, Clone, Default)]
struct Sequencer {
    issued: u64,
    applied: u64,
}

impl Sequencer {
    fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    fn accept(&mut self, seq: u64) -> bool {
        if seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }

    /// Marks everything issued so far as stale.
    fn invalidate(&mut self) {
        self.applied = self.issued;
    }
}

#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    collection: Vec<Product>,
    active_filter: Option<Product>,
    edit_target: Option<Product>,
    search_id: String,
    search_error: Option<String>,
    form_open: bool,
    pending_delete: Option<ProductId>,
    notice: Option<String>,
    refresh_seq: Sequencer,
    search_seq: Sequencer,
}

impl BrowserState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection(&self) -> &[Product] {
        &self.collection
    }

    pub fn active_filter(&self) -> Option<&Product> {
        self.active_filter.as_ref()
    }

    pub fn edit_target(&self) -> Option<&Product> {
        self.edit_target.as_ref()
    }

    pub fn search_id(&self) -> &str {
        &self.search_id
    }

    pub fn search_error(&self) -> Option<&str> {
        self.search_error.as_deref()
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn pending_delete(&self) -> Option<ProductId> {
        self.pending_delete
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The active filter as a singleton when set, otherwise the whole collection.
    pub fn visible(&self) -> &[Product] {
        match &self.active_filter {
            Some(product) => std::slice::from_ref(product),
            None => &self.collection,
        }
    }

    pub fn begin_refresh(&mut self) -> RequestTicket {
        RequestTicket {
            kind: RequestKind::Refresh,
            seq: self.refresh_seq.issue(),
        }
    }

    /// Replaces the collection on success. Failures and stale responses
    /// leave it as is. Returns whether the response was applied.
    pub fn apply_refresh(
        &mut self,
        ticket: RequestTicket,
        result: ClientResult<Vec<Product>>,
    ) -> bool {
        debug_assert_eq!(ticket.kind, RequestKind::Refresh);
        match result {
            Ok(products) => {
                if !self.refresh_seq.accept(ticket.seq) {
                    debug!(seq = ticket.seq, "browser: dropping stale refresh response");
                    return false;
                }
                info!(count = products.len(), "browser: collection refreshed");
                self.collection = products;
                true
            }
            Err(err) => {
                error!(%err, "browser: error fetching products");
                false
            }
        }
    }

    pub fn set_search_id(&mut self, search_id: impl Into<String>) {
        self.search_id = search_id.into();
    }

    /// Returns `None` when `id` is blank, in which case nothing changes.
    pub fn begin_search(&mut self, id: &str) -> Option<RequestTicket> {
        if id.trim().is_empty() {
            return None;
        }
        Some(RequestTicket {
            kind: RequestKind::Search,
            seq: self.search_seq.issue(),
        })
    }

    pub fn apply_search(&mut self, ticket: RequestTicket, result: ClientResult<Product>) -> bool {
        debug_assert_eq!(ticket.kind, RequestKind::Search);
        if !self.search_seq.accept(ticket.seq) {
            debug!(seq = ticket.seq, "browser: dropping stale search response");
            return false;
        }
        match result {
            Ok(product) => {
                self.active_filter = Some(product);
                self.search_error = None;
            }
            Err(err) => {
                debug!(%err, "browser: search failed");
                self.search_error = Some(SEARCH_NOT_FOUND_MESSAGE.to_string());
                self.active_filter = None;
            }
        }
        true
    }

    /// Also invalidates any search still in flight.
    pub fn clear_search(&mut self) {
        self.search_id.clear();
        self.active_filter = None;
        self.search_error = None;
        self.search_seq.invalidate();
    }

    pub fn apply_delete(&mut self, id: ProductId, result: &ClientResult<()>) {
        match result {
            Ok(()) => {
                self.collection.retain(|product| product.id != id);
                if self
                    .active_filter
                    .as_ref()
                    .is_some_and(|product| product.id == id)
                {
                    self.active_filter = None;
                }
                info!(%id, "browser: product deleted");
                self.notice = Some(DELETE_OK_NOTICE.to_string());
            }
            Err(err) => {
                warn!(%id, %err, "browser: error deleting product");
                self.notice = Some(DELETE_FAILED_NOTICE.to_string());
            }
        }
    }

    pub fn request_delete(&mut self, id: ProductId) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn take_pending_delete(&mut self) -> Option<ProductId> {
        self.pending_delete.take()
    }

    pub fn begin_edit(&mut self, product: Product) {
        self.edit_target = Some(product);
        self.form_open = true;
    }

    pub fn begin_create(&mut self) {
        self.edit_target = None;
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn finish_save(&mut self) {
        self.edit_target = None;
        self.form_open = false;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }
}

pub struct RecordBrowser {
    api: Arc<dyn ProductApi>,
    state: BrowserState,
    editor: RecordEditor,
}

impl RecordBrowser {
    pub fn new(api: Arc<dyn ProductApi>) -> Self {
        Self {
            api,
            state: BrowserState::new(),
            editor: RecordEditor::new(),
        }
    }

    /// Builds a browser and performs the initial fetch.
    pub async fn mount(api: Arc<dyn ProductApi>) -> Self {
        let mut browser = Self::new(api);
        browser.refresh().await;
        browser
    }

    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    pub fn editor(&self) -> &RecordEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut RecordEditor {
        &mut self.editor
    }

    pub fn visible(&self) -> &[Product] {
        self.state.visible()
    }

    pub async fn refresh(&mut self) {
        let ticket = self.state.begin_refresh();
        let result = self.api.list().await;
        self.state.apply_refresh(ticket, result);
    }

    pub fn set_search_id(&mut self, search_id: impl Into<String>) {
        self.state.set_search_id(search_id);
    }

    /// Types `id` into the search box and runs the search. Blank input
    /// leaves the box and the filter untouched.
    pub async fn search(&mut self, id: &str) {
        if id.trim().is_empty() {
            return;
        }
        self.state.set_search_id(id);
        self.search_current().await;
    }

    pub async fn search_current(&mut self) {
        let raw = self.state.search_id().trim().to_string();
        let Some(ticket) = self.state.begin_search(&raw) else {
            return;
        };
        let result = match raw.parse::<ProductId>() {
            Ok(id) => self.api.get(id).await,
            Err(_) => Err(ClientError::InvalidId(raw)),
        };
        self.state.apply_search(ticket, result);
    }

    pub fn clear_search(&mut self) {
        self.state.clear_search();
    }

    pub async fn delete(&mut self, id: ProductId) -> ClientResult<()> {
        let result = self.api.delete(id).await;
        self.state.apply_delete(id, &result);
        result
    }

    pub fn request_delete(&mut self, id: ProductId) {
        self.state.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    /// Deletes the pending id, if any. The prompt is cleared either way.
    pub async fn confirm_delete(&mut self) -> Option<ClientResult<()>> {
        let id = self.state.take_pending_delete()?;
        Some(self.delete(id).await)
    }

    pub fn begin_edit(&mut self, product: Product) {
        self.editor.load_for_edit(product.clone());
        self.state.begin_edit(product);
    }

    pub fn begin_create(&mut self) {
        self.editor.reset_for_create();
        self.state.begin_create();
    }

    pub fn close_form(&mut self) {
        self.state.close_form();
    }

    pub async fn on_child_saved(&mut self, product: Product) {
        debug!(id = %product.id, "browser: child saved, refreshing");
        self.state.finish_save();
        self.editor.reset_for_create();
        self.refresh().await;
    }

    pub async fn submit_editor(&mut self) -> SubmitOutcome {
        let outcome = self.editor.submit(self.api.as_ref()).await;
        if let SubmitOutcome::Saved(product) = &outcome {
            self.on_child_saved(product.clone()).await;
        }
        outcome
    }

    pub fn dismiss_notice(&mut self) {
        self.state.dismiss_notice();
    }
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
