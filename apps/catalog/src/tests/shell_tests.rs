use super::*;
use std::sync::Arc;

use client_core::test_support::{product, FakeProductApi};

fn seeded() -> Arc<FakeProductApi> {
    Arc::new(FakeProductApi::with_products(vec![product(1, "Lamp", 12.5, "L-1")]))
}

#[test]
fn parses_commands_and_arguments() {
    assert_eq!(parse_line("  list "), Ok(ShellCommand::List));
    assert_eq!(parse_line("SEARCH 42"), Ok(ShellCommand::Search("42".into())));
    assert_eq!(parse_line("edit 7"), Ok(ShellCommand::Edit(ProductId(7))));
    assert_eq!(
        parse_line("name Desk Lamp  "),
        Ok(ShellCommand::Name("Desk Lamp".into()))
    );
    assert_eq!(parse_line("price abc"), Ok(ShellCommand::Price("abc".into())));
    assert_eq!(parse_line("rm 3"), Ok(ShellCommand::Delete(ProductId(3))));
    assert_eq!(parse_line(""), Err(String::new()));
    assert!(parse_line("delete x").is_err());
    assert!(parse_line("frobnicate").is_err());
}

#[tokio::test]
async fn create_flow_through_the_shell() {
    let mut browser = RecordBrowser::mount(seeded()).await;

    let out = execute(&mut browser, ShellCommand::Name("Desk".into())).await;
    assert!(out.starts_with("no form is open"));

    let out = execute(&mut browser, ShellCommand::New).await;
    assert!(out.starts_with("Add Product"));
    execute(&mut browser, ShellCommand::Name("Desk".into())).await;
    execute(&mut browser, ShellCommand::Price("abc".into())).await;
    execute(&mut browser, ShellCommand::Sku("D-2".into())).await;

    let out = execute(&mut browser, ShellCommand::Save).await;
    assert!(out.contains("Please fill all fields correctly."));

    execute(&mut browser, ShellCommand::Price("80".into())).await;
    let out = execute(&mut browser, ShellCommand::Save).await;
    assert!(out.starts_with("saved #2"));
    assert!(out.contains("Name: Desk\nPrice: $80.00\nSKU: D-2\nMissing Letter: e"));
    assert!(!browser.state().is_form_open());
}

#[tokio::test]
async fn delete_needs_confirmation() {
    let mut browser = RecordBrowser::mount(seeded()).await;

    let out = execute(&mut browser, ShellCommand::Delete(ProductId(1))).await;
    assert!(out.contains("(yes/no)"));
    assert_eq!(
        execute(&mut browser, ShellCommand::No).await,
        "delete cancelled\n"
    );
    assert_eq!(browser.visible().len(), 1);

    execute(&mut browser, ShellCommand::Delete(ProductId(1))).await;
    let out = execute(&mut browser, ShellCommand::Yes).await;
    assert!(out.contains("(no products)"));
    assert!(out.contains("* Product deleted successfully."));

    let out = execute(&mut browser, ShellCommand::List).await;
    assert!(!out.contains("Product deleted successfully."));
}

#[tokio::test]
async fn edit_unknown_id_is_reported() {
    let mut browser = RecordBrowser::mount(seeded()).await;

    let out = execute(&mut browser, ShellCommand::Edit(ProductId(9))).await;
    assert_eq!(out, "no product #9 in the current list\n");

    let out = execute(&mut browser, ShellCommand::Edit(ProductId(1))).await;
    assert!(out.starts_with("Edit Product\n  name:  Lamp\n"));
}

#[tokio::test]
async fn search_shows_not_found_above_full_list() {
    let mut browser = RecordBrowser::mount(seeded()).await;

    let out = execute(&mut browser, ShellCommand::Search("5".into())).await;
    assert!(out.starts_with("! Product not found.\nProduct List\n"));
    assert!(out.contains("Name: Lamp"));
}
