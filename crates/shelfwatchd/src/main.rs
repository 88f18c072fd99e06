//! shelfwatchd — the shelfwatch daemon.
//!
//! Single binary that wires everything together:
//! - Shared watch state
//! - Inventory client (upstream poller)
//! - Webhook notifier + alert gate
//! - Stock monitor loop
//! - Status web server
//!
//! Every flag falls back to an environment variable, so a container can
//! be configured entirely through its environment:
//!
//! ```text
//! WECOM_WEBHOOK_URL=https://… TARGET_SKU_ATTR_ID=7711440 shelfwatchd
//! ```

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tokio::sync::watch;
use tracing::{info, warn};

use shelfwatch_monitor::{MonitorConfig, StockMonitor};
use shelfwatch_notify::{Notifier, WebhookNotifier};
use shelfwatch_state::WatchState;
use shelfwatch_upstream::{InventoryClient, UpstreamConfig};
use shelfwatch_web::WebState;

#[derive(Parser)]
#[command(name = "shelfwatchd", about = "Watches one product variant's stock level")]
struct Cli {
    /// Webhook to notify; notifications are disabled when absent.
    #[arg(long, env = "WECOM_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Attribute-value id identifying the tracked variant.
    #[arg(long, env = "TARGET_SKU_ATTR_ID", default_value_t = 7711440)]
    target_attr_id: i64,

    /// Display name used in notifications and on the dashboard.
    #[arg(long, env = "TARGET_PRODUCT_NAME", default_value = "washed black")]
    product_name: String,

    /// Store id, used in the endpoint query and the X-StoreId header.
    #[arg(long, env = "STORE_ID", default_value = "1272")]
    store_id: String,

    /// Product id, used to build the fetch endpoint.
    #[arg(long, env = "PRODUCT_ID", default_value = "213743")]
    product_id: String,

    /// Upstream API base URL.
    #[arg(long, env = "API_BASE", default_value = "https://shopapi.haomaitong.com")]
    api_base: String,

    /// Poll interval in seconds.
    #[arg(long, env = "CHECK_INTERVAL", default_value_t = 60)]
    check_interval: u64,

    /// Session cookie forwarded to the upstream when present.
    #[arg(long, env = "USER_COOKIE")]
    cookie: Option<String>,

    /// Port for the status server.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shelfwatch=debug,shelfwatchd=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    info!(
        product = %cli.product_name,
        attr_id = cli.target_attr_id,
        interval_secs = cli.check_interval,
        "shelfwatch starting"
    );

    // ── Assemble subsystems ────────────────────────────────────

    let state = WatchState::new();

    let client = InventoryClient::new(&UpstreamConfig {
        api_base: cli.api_base,
        store_id: cli.store_id,
        product_id: cli.product_id,
        cookie: cli.cookie,
    })?;
    info!(url = %client.url(), "inventory client ready");

    let notifier = WebhookNotifier::new(cli.webhook_url)?;
    if notifier.is_configured() {
        info!("webhook notifications enabled");
    } else {
        warn!("no webhook configured, notifications disabled");
    }

    let monitor = StockMonitor::new(
        MonitorConfig {
            product_name: cli.product_name.clone(),
            target_attr_id: cli.target_attr_id,
            interval: Duration::from_secs(cli.check_interval),
        },
        client,
        notifier.clone(),
        state.clone(),
    );

    // ── Shutdown signal ────────────────────────────────────────

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // ── Start the monitor loop ─────────────────────────────────

    let monitor_handle = tokio::spawn(async move {
        monitor.run(shutdown_rx).await;
    });

    // ── Start the status server ────────────────────────────────

    let router = shelfwatch_web::build_router(WebState {
        watch: state,
        product_name: cli.product_name,
    });
    let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));

    info!(%addr, "status server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        shutdown_signal().await;
        info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    server.await?;

    // Best-effort farewell; bounded by the notifier's own send timeout.
    notifier.send("stock watch stopping").await;

    let _ = monitor_handle.await;

    info!("shelfwatch stopped");
    Ok(())
}

/// Completes on CTRL+C or, on unix, SIGTERM (what Docker sends on stop).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
