//! Line-oriented interactive front end. One command is handled at a time,
//! so user actions are serialized on a single task.

use std::io::Write as _;

use anyhow::Result;
use client_core::{RecordBrowser, SubmitOutcome};
use shared::domain::ProductId;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::render::{browser_view, editor_view};

pub const HELP: &str = "\
commands:
  list | refresh         show the product list (refresh re-fetches it)
  search <id> | clear    filter by id / drop the filter
  new | edit <id>        open the form for a new or existing product
  name|price|sku <text>  set a draft field
  save | cancel          submit or close the form
  delete <id>            ask to delete a product (answer yes/no)
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    List,
    Refresh,
    Search(String),
    Clear,
    New,
    Edit(ProductId),
    Name(String),
    Price(String),
    Sku(String),
    Save,
    Cancel,
    Delete(ProductId),
    Yes,
    No,
    Help,
    Quit,
}

fn parse_id(arg: &str) -> Result<ProductId, String> {
    arg.parse()
        .map_err(|_| format!("expected a numeric product id, got {arg:?}"))
}

pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "list" | "ls" => ShellCommand::List,
        "refresh" => ShellCommand::Refresh,
        "search" => ShellCommand::Search(rest.to_string()),
        "clear" => ShellCommand::Clear,
        "new" | "create" => ShellCommand::New,
        "edit" => ShellCommand::Edit(parse_id(rest)?),
        "name" => ShellCommand::Name(rest.to_string()),
        "price" => ShellCommand::Price(rest.to_string()),
        "sku" => ShellCommand::Sku(rest.to_string()),
        "save" => ShellCommand::Save,
        "cancel" => ShellCommand::Cancel,
        "delete" | "rm" => ShellCommand::Delete(parse_id(rest)?),
        "yes" | "y" => ShellCommand::Yes,
        "no" | "n" => ShellCommand::No,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        "" => return Err(String::new()),
        other => return Err(format!("unknown command {other:?}; type `help`")),
    };
    Ok(command)
}

fn require_form(browser: &RecordBrowser) -> Option<String> {
    if browser.state().is_form_open() {
        None
    } else {
        Some("no form is open; use `new` or `edit <id>` first\n".to_string())
    }
}

/// Runs one command against the browser and returns what to print.
pub async fn execute(browser: &mut RecordBrowser, command: ShellCommand) -> String {
    browser.dismiss_notice();
    match command {
        ShellCommand::List => browser_view(browser.state()),
        ShellCommand::Refresh => {
            browser.refresh().await;
            browser_view(browser.state())
        }
        ShellCommand::Search(id) => {
            browser.search(&id).await;
            browser_view(browser.state())
        }
        ShellCommand::Clear => {
            browser.clear_search();
            browser_view(browser.state())
        }
        ShellCommand::New => {
            browser.begin_create();
            editor_view(browser.editor())
        }
        ShellCommand::Edit(id) => {
            let found = browser
                .state()
                .collection()
                .iter()
                .chain(browser.state().active_filter())
                .find(|product| product.id == id)
                .cloned();
            match found {
                Some(product) => {
                    browser.begin_edit(product);
                    editor_view(browser.editor())
                }
                None => format!("no product #{id} in the current list\n"),
            }
        }
        ShellCommand::Name(text) => require_form(browser).unwrap_or_else(|| {
            browser.editor_mut().set_name(text);
            editor_view(browser.editor())
        }),
        ShellCommand::Price(text) => require_form(browser).unwrap_or_else(|| {
            browser.editor_mut().set_price_text(text);
            editor_view(browser.editor())
        }),
        ShellCommand::Sku(text) => require_form(browser).unwrap_or_else(|| {
            browser.editor_mut().set_sku(text);
            editor_view(browser.editor())
        }),
        ShellCommand::Save => {
            if let Some(message) = require_form(browser) {
                return message;
            }
            match browser.submit_editor().await {
                SubmitOutcome::Saved(product) => {
                    format!("saved #{}\n\n{}", product.id, browser_view(browser.state()))
                }
                SubmitOutcome::Invalid | SubmitOutcome::Failed => editor_view(browser.editor()),
            }
        }
        ShellCommand::Cancel => {
            browser.close_form();
            browser_view(browser.state())
        }
        ShellCommand::Delete(id) => {
            browser.request_delete(id);
            format!("Are you sure you want to delete product #{id}? (yes/no)\n")
        }
        ShellCommand::Yes => match browser.confirm_delete().await {
            Some(_) => browser_view(browser.state()),
            None => "nothing to confirm\n".to_string(),
        },
        ShellCommand::No => {
            browser.cancel_delete();
            "delete cancelled\n".to_string()
        }
        ShellCommand::Help => format!("{HELP}\n"),
        ShellCommand::Quit => String::new(),
    }
}

pub async fn run(browser: &mut RecordBrowser) -> Result<()> {
    let mut stdout = std::io::stdout();
    write!(stdout, "{}\n> ", browser_view(browser.state()))?;
    stdout.flush()?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let output = match parse_line(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(browser, command).await,
            Err(message) if message.is_empty() => String::new(),
            Err(message) => format!("{message}\n"),
        };
        write!(stdout, "{output}> ")?;
        stdout.flush()?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
