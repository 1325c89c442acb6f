use std::{sync::Arc, time::Duration};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{HttpProductApi, RecordBrowser, SubmitOutcome};
use shared::domain::ProductId;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod render;
mod shell;

use config::load_settings;
use render::{browser_view, editor_view};

#[derive(Parser, Debug)]
#[command(name = "catalog", about = "Browse and edit the product catalog")]
struct Cli {
    /// Overrides the configured API base URL.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print every product.
    List,
    /// Show a single product by id.
    Search { id: String },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        sku: String,
    },
    /// Change some fields of an existing product.
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        sku: Option<String>,
    },
    Delete {
        id: i64,
        /// Confirm the deletion without prompting.
        #[arg(long)]
        yes: bool,
    },
    /// Interactive session.
    Shell,
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    init_tracing(&settings.log_filter);

    let api = HttpProductApi::with_timeout(
        &settings.api_base_url,
        Duration::from_secs(settings.request_timeout_secs),
    )
    .with_context(|| format!("invalid api base url '{}'", settings.api_base_url))?;
    info!(api = %api.base_url(), "catalog: connecting");

    let mut browser = RecordBrowser::mount(Arc::new(api)).await;
    run_command(cli.command, &mut browser).await
}

async fn save(browser: &mut RecordBrowser) -> Result<()> {
    match browser.submit_editor().await {
        SubmitOutcome::Saved(product) => {
            println!("saved #{}\n", product.id);
            print!("{}", browser_view(browser.state()));
            Ok(())
        }
        SubmitOutcome::Invalid | SubmitOutcome::Failed => {
            print!("{}", editor_view(browser.editor()));
            bail!(
                "save failed: {}",
                browser.editor().validation_error().unwrap_or_default()
            )
        }
    }
}

async fn run_command(command: Command, browser: &mut RecordBrowser) -> Result<()> {
    match command {
        Command::List => print!("{}", browser_view(browser.state())),
        Command::Search { id } => {
            browser.search(&id).await;
            print!("{}", browser_view(browser.state()));
        }
        Command::Create { name, price, sku } => {
            browser.begin_create();
            let editor = browser.editor_mut();
            editor.set_name(name);
            editor.set_price_text(price);
            editor.set_sku(sku);
            save(browser).await?;
        }
        Command::Edit {
            id,
            name,
            price,
            sku,
        } => {
            let id = ProductId(id);
            let Some(product) = browser
                .state()
                .collection()
                .iter()
                .find(|product| product.id == id)
                .cloned()
            else {
                bail!("no product #{id} on the server");
            };
            browser.begin_edit(product);
            let editor = browser.editor_mut();
            if let Some(name) = name {
                editor.set_name(name);
            }
            if let Some(price) = price {
                editor.set_price_text(price);
            }
            if let Some(sku) = sku {
                editor.set_sku(sku);
            }
            save(browser).await?;
        }
        Command::Delete { id, yes } => {
            let id = ProductId(id);
            browser.request_delete(id);
            if !yes {
                browser.cancel_delete();
                println!("Are you sure you want to delete product #{id}? Re-run with --yes to confirm.");
                return Ok(());
            }
            if let Some(Err(err)) = browser.confirm_delete().await {
                print!("{}", browser_view(browser.state()));
                return Err(err).context(format!("failed to delete product #{id}"));
            }
            print!("{}", browser_view(browser.state()));
        }
        Command::Shell => shell::run(browser).await?,
    }
    Ok(())
}
