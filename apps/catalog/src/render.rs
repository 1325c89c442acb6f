//! Plain-text rendering of browser and editor state.

use std::fmt::Write as _;

use client_core::{BrowserState, RecordEditor};
use shared::domain::Product;

pub fn product_card(product: &Product) -> String {
    format!(
        "Name: {}\nPrice: ${:.2}\nSKU: {}\nMissing Letter: {}",
        product.name, product.price, product.sku, product.missing_letter
    )
}

pub fn browser_view(state: &BrowserState) -> String {
    let mut out = String::new();
    if let Some(error) = state.search_error() {
        let _ = writeln!(out, "! {error}");
    }
    out.push_str("Product List\n");

    let visible = state.visible();
    if visible.is_empty() {
        out.push_str("(no products)\n");
    }
    for product in visible {
        let _ = writeln!(out, "\n[#{}]\n{}", product.id, product_card(product));
    }

    if let Some(notice) = state.notice() {
        let _ = writeln!(out, "\n* {notice}");
    }
    out
}

pub fn editor_view(editor: &RecordEditor) -> String {
    let mut out = format!(
        "{}\n  name:  {}\n  price: {}\n  sku:   {}\n",
        editor.title(),
        editor.name(),
        editor.price_text(),
        editor.sku()
    );
    if let Some(error) = editor.validation_error() {
        let _ = writeln!(out, "! {error}");
    }
    let _ = writeln!(out, "(type `save` to {})", editor.submit_label().to_lowercase());
    out
}
