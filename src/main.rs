use std::sync::Arc;

use clap::Parser;
use tasklist::cli::commands::Cli;
use tasklist::io::store::CsvFileStore;
use tasklist::service::TaskService;
use tasklist::web;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = cli.resolve()?;

    let store = CsvFileStore::new(&config.data_file);
    store.ensure_exists()?;
    tracing::info!(data_file = %config.data_file.display(), "using task file");

    let service = Arc::new(TaskService::new(store));
    let router = web::create_router(service);

    web::server::run(&config.socket_addr(), router).await
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tasklist=info,tower_http=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}
