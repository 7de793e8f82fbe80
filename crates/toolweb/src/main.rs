//! Toolweb CLI binary.

use anyhow::Result;
use toolweb::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the toolweb CLI.
///
/// Uses tokio's current_thread runtime; the only async work is reading the
/// config and registry files.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Logs go to stderr so `--json` output on stdout stays parseable.
    // Example: RUST_LOG=toolweb=debug,toolweb_graph=trace toolweb cycles
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("toolweb=info,toolweb_graph=info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting toolweb CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Toolweb CLI completed successfully");
    Ok(())
}
