use clap::Parser;
use cortex_osc_bridge::{
    config::BridgeConfig, osc::OscSender, replay::ReplayClient, session::SessionOrchestrator,
    types::StreamKind,
};
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Bridge Emotiv Cortex telemetry streams to an OSC consumer.
///
/// The shipped binary replays a recorded cortex event log; a live headset
/// client plugs in behind the `CortexClient` trait.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Recorded cortex event log to replay (JSON lines, one event per line)
    #[arg(long)]
    replay: PathBuf,

    /// Delay between replayed events in milliseconds
    #[arg(long)]
    pace_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cortex_osc_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = BridgeConfig::from_env()?;

    info!("Starting cortex-osc-bridge v{}", VERSION);
    info!("   Cortex client id: {}", config.client_id);
    info!("   OSC target: {}:{}", config.osc_host, config.osc_port);
    info!("   OSC address: {}", config.osc_address);

    let sink = OscSender::new(&config.osc_host, config.osc_port)?;
    let client = ReplayClient::new(cli.replay, cli.pace_ms);

    let mut session =
        SessionOrchestrator::new(Box::new(client), Box::new(sink), config.osc_address.clone());

    let (tx, rx) = mpsc::channel(256);
    let streams = [
        StreamKind::PerformanceMetric,
        StreamKind::BandPower,
        StreamKind::Device,
    ];
    session
        .start(&streams, config.headset_id.as_deref(), tx)
        .await?;

    session.run(rx).await;
    session.close().await;

    Ok(())
}
