//! paylink
//!
//! Shows a payment amount handed over through a `paymentapp://` launch URL,
//! or loaded from the remote payment endpoint, and offers the fallback
//! website when neither works.

mod config;
mod shell;
mod shutdown;

use clap::Parser;
use config::{ConfigLoader, Overrides, RemoteSettings};
use paylink_core::{PaymentDataResolver, Session, Variant};
use paylink_sdk::client::PaymentClient;
use shell::{RenderMode, open_url, spawn_renderer};
use shutdown::shutdown_signal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// paylink - payment display for paymentapp:// links
#[derive(Parser, Debug)]
#[command(name = "paylink")]
#[command(version, about, long_about = None)]
struct Args {
    /// Launch URL passed by the OS (e.g. paymentapp://app?data=...)
    launch_url: Option<String>,

    /// Path to the configuration file
    #[arg(short, long, default_value = "./paylink.toml")]
    config: PathBuf,

    /// Override the resolver variant (dual-path or redirecting)
    #[arg(long)]
    variant: Option<Variant>,

    /// Override the remote payment endpoint
    #[arg(long, env = "PAYLINK_ENDPOINT")]
    endpoint: Option<Url>,

    /// Open the fallback website once the payment is resolved
    #[arg(long, default_value = "false")]
    open: bool,

    /// Print states as JSON lines instead of text
    #[arg(long, default_value = "false")]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting paylink v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(
        &args.config,
        Overrides {
            variant: args.variant,
            endpoint: args.endpoint.clone(),
        },
    );
    let loaded_config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::info!(
        variant = ?loaded_config.resolver.variant,
        endpoint = %loaded_config.remote.endpoint,
        "Configuration loaded"
    );

    let client = build_client(&loaded_config.remote);
    let resolver = Arc::new(PaymentDataResolver::new(loaded_config.resolver, client));
    let mut session = Session::new(resolver);

    let mode = if args.json {
        RenderMode::Json
    } else {
        RenderMode::Text
    };
    let renderer = spawn_renderer(session.subscribe(), mode);

    session.start(args.launch_url.as_deref());

    let closed = tokio::select! {
        _ = session.next_completion() => false,
        _ = shutdown_signal() => true,
    };
    if closed {
        session.close();
    } else if args.open {
        if let Err(e) = open_url(session.website_url()) {
            tracing::error!("Failed to open website: {}", e);
        }
    }

    // Dropping the session closes the store and lets the renderer finish.
    drop(session);
    if let Err(e) = renderer.await {
        tracing::warn!("Renderer task failed: {}", e);
    }
    tracing::info!("paylink finished");

    Ok(())
}

/// Build the payment endpoint client with the configured timeout.
fn build_client(remote: &RemoteSettings) -> PaymentClient {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = remote.timeout {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().unwrap_or_else(|e| {
        tracing::warn!("Falling back to default HTTP client: {}", e);
        reqwest::Client::new()
    });
    PaymentClient::new(remote.endpoint.clone()).with_http_client(http)
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so they do not interleave with rendered states.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
