mod bootstrap;

use crate::bootstrap::cli::{self, Cli};
use crate::bootstrap::{config, logging};
use anyhow::Result;
use clap::Parser;
use docstore_handler::DocumentHandler;
use docstore_storage::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    logging::initialize();

    let args = Cli::parse();
    let config_path = config::resolve_path(args.config);
    let config = config::load(&config_path).await?;

    let handler = DocumentHandler::new(&config.handler)?;

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, cancelling pending operation");
            shutdown.cancel();
        }
    });

    let result = cli::run(&handler, args.command, &cancel).await;
    handler.close();
    result
}
