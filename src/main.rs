//! chat-relay binary entry point

use std::net::SocketAddr;

use clap::Parser;
use color_eyre::Result;

use chat_relay::config::{ProviderKind, RelayConfig};
use chat_relay::server;

/// chat-relay: forward chat conversations to an LLM provider
#[derive(Debug, Parser)]
#[command(name = "chat-relay")]
#[command(about = "HTTP relay that forwards chat conversations to an LLM provider", long_about = None)]
#[command(version)]
struct Cli {
    /// Provider variant to relay to
    #[arg(long, env = "RELAY_PROVIDER", value_enum, default_value_t = ProviderKind::Gemini)]
    provider: ProviderKind,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Model identifier override
    #[arg(long, env = "RELAY_MODEL")]
    model: Option<String>,

    /// Provider base URL override
    #[arg(long, env = "RELAY_BASE_URL")]
    base_url: Option<String>,

    /// Outbound request timeout in seconds
    #[arg(long, env = "RELAY_TIMEOUT_SECS", default_value_t = 120)]
    timeout_secs: u64,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install error handler
    color_eyre::install()?;

    // Load .env before parsing so env-backed flags see it
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging
    tracing_subscriber::fmt()
        .with_env_filter(if cli.verbose {
            "chat_relay=debug"
        } else {
            "chat_relay=info"
        })
        .init();

    let mut config = RelayConfig::from_env(cli.provider)?.with_timeout_secs(cli.timeout_secs);
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }
    if let Some(base_url) = cli.base_url {
        config = config.with_base_url(base_url);
    }

    let app = server::app(&config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(provider = %config.provider, model = %config.model, "listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
