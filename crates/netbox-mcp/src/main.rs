mod cli;
mod error;

use clap::Parser;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use netbox_core::Gateway;
use netbox_mcp::McpServer;

use crate::cli::Cli;
use crate::error::StartupError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // stdout carries the protocol
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), StartupError> {
    let config = netbox_config::load(cli.config.as_deref(), &cli.overrides())?;
    let gateway_config = config.to_gateway_config()?;
    let gateway = Gateway::connect(&gateway_config)?;

    info!(version = env!("CARGO_PKG_VERSION"), "serving MCP over stdio");
    McpServer::new(gateway)
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;
    Ok(())
}
