use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    AddressListController, ControllerConfig, HttpAddressStore, DEFAULT_MAP_BASE_URL,
    DEFAULT_MAX_VISIBLE_PAGES, DEFAULT_PAGE_SIZE,
};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;
use url::Url;

mod commands;
mod dialogs;
mod prompt;
mod render;
mod shell;

use prompt::Prompt;
use shell::Shell;

#[derive(Parser, Debug)]
#[command(about = "Browse and edit the address book from a terminal")]
struct Args {
    /// Base URL of the address server.
    #[arg(long, default_value = "http://127.0.0.1:5000")]
    server_url: String,
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: usize,
    #[arg(long, default_value_t = DEFAULT_MAX_VISIBLE_PAGES)]
    max_visible_pages: usize,
    #[arg(long, default_value = DEFAULT_MAP_BASE_URL)]
    map_base_url: Url,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();
    let args = Args::parse();

    let store = HttpAddressStore::new(&args.server_url)
        .with_context(|| format!("invalid server url '{}'", args.server_url))?;
    let controller = AddressListController::new(
        store,
        ControllerConfig {
            page_size: args.page_size,
            max_visible_pages: args.max_visible_pages,
            map_base_url: args.map_base_url,
        },
    );

    let prompt = Prompt::new(BufReader::new(tokio::io::stdin()));
    let mut shell = Shell::new(controller, prompt);
    shell.run().await;
    Ok(())
}
