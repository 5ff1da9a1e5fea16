//! Terminal chat console for the Porchlight leasing assistant.

use clap::Parser;
use log::info;

/// Command-line options for the chat console.
#[derive(Parser)]
#[command(name = "porchlight-tui", version)]
struct Cli {
    /// Base URL of the Porchlight service
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    endpoint: String,
}

/// Entry point for the Porchlight chat console.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    info!("starting chat console (endpoint={})", cli.endpoint);
    porchlight_tui::run(cli.endpoint).await
}
