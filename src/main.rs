use adelaide_realtime::api::GtfsClient;
use adelaide_realtime::config::AppConfig;
use adelaide_realtime::dashboard::Dashboard;
use adelaide_realtime::{poller, server};
use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

#[actix_web::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level))
        )
        .init();

    tracing::info!(title = %config.page_title, "Adelaide realtime vehicle map");

    let client = GtfsClient::new(config.feed_url.clone(), config.request_timeout())
        .context("Failed to create HTTP client")?;
    tracing::info!(url = %config.feed_url, "GTFS-RT client ready");

    let dashboard = Dashboard::new(config.page_title.clone(), config.refresh_interval_secs);
    let ctx = CancellationToken::new();

    let refresher = tokio::spawn(poller::run_refresh_loop(
        ctx.clone(),
        client,
        config.map_settings(),
        dashboard.clone(),
        config.refresh_interval(),
    ));

    let server = server::build(dashboard, &config.bind_addr, config.port)
        .with_context(|| format!("Failed to bind {}:{}", config.bind_addr, config.port))?;
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res.context("Dashboard server failed")?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received Ctrl-C, shutting down");
            handle.stop(true).await;
        }
    }

    ctx.cancel();
    refresher.await.context("Refresh task panicked")?;

    tracing::info!("Shutdown complete");
    Ok(())
}
