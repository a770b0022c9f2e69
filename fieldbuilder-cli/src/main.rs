mod api;
mod config;
mod draft;
mod form;
mod tui;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use crate::api::FieldsClient;
use crate::draft::DraftStore;
use crate::tui::Runtime;
use crate::tui::apps::FieldsApp;
use crate::tui::apps::fields::FieldsParams;

/// Terminal dashboard for viewing and creating configurable fields.
#[derive(Parser)]
#[command(name = "fieldbuilder", version, about)]
struct Cli {
    /// GraphQL endpoint of the field backend.
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();
    let config = config::Config::load(cli.api_url)?;
    config::init(config)?;

    let api = Arc::new(FieldsClient::new(config::global().api_url.clone()));
    let store = DraftStore::default_location()?;

    Runtime::<FieldsApp>::new(FieldsParams { api, store })
        .run()
        .await
}
