use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;

use salesdesk::api::RestClient;
use salesdesk::cancel::{os_shutdown_signal, CancelToken};
use salesdesk::cli::{Cli, Command, ServeArgs};
use salesdesk::config::Config;
use salesdesk::logging::{init_tracing, LogTarget};
use salesdesk::model::Sales;
use salesdesk::server::{ResourceServer, SalesRepository};
use salesdesk::store::EntityStore;
use salesdesk::ui::{runtime, Route};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().context("Failed to load configuration")?;

    match cli.command() {
        Command::Ui(args) => run_ui(&cli, &config, args.route).await,
        Command::Serve(args) => run_server(&cli, &config, args).await,
    }
}

/// Cancel `token` on Ctrl-C or SIGTERM.
fn cancel_on_signal(token: &CancelToken) {
    let token = token.clone();
    tokio::spawn(async move {
        os_shutdown_signal().await;
        token.cancel();
    });
}

async fn run_ui(cli: &Cli, config: &Config, route: Route) -> Result<()> {
    let target = LogTarget::for_ui(cli.log_file.as_deref(), &config.logging);
    if let Some(path) = init_tracing(target, &config.logging) {
        tracing::info!(path = %path.display(), "Logging to file");
    }
    tracing::info!(base_url = %config.api.base_url, route = %route, "Starting terminal client");

    let client = RestClient::<Sales>::new(&config.api).context("Failed to create HTTP client")?;
    let store = EntityStore::new(Arc::new(client));

    let shutdown = CancelToken::new();
    cancel_on_signal(&shutdown);

    runtime::run(store, &config.ui, route, shutdown)
        .await
        .context("Terminal client failed")?;
    Ok(())
}

async fn run_server(cli: &Cli, config: &Config, args: ServeArgs) -> Result<()> {
    init_tracing(
        LogTarget::for_server(cli.log_file.as_deref(), &config.logging),
        &config.logging,
    );

    let repo = if config.server.seed_demo_data && !args.no_seed {
        SalesRepository::with_demo_data()
    } else {
        SalesRepository::new()
    };

    let server = ResourceServer::bind(&config.server.bind_addr, Arc::new(repo)).await?;
    println!("Serving {}/api/sales", server.base_url());

    let shutdown = CancelToken::new();
    cancel_on_signal(&shutdown);
    server.run(shutdown).await?;
    Ok(())
}
