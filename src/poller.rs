use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::api::GtfsClient;
use crate::dashboard::{CycleReport, Dashboard};
use crate::map::{render, MapSettings};
use crate::models::Notifier;

/// Run one fetch → render → publish cycle and return the number of vehicles shown
pub async fn refresh_once(
    client: &GtfsClient,
    settings: &MapSettings,
    dashboard: &Dashboard,
) -> usize {
    let report = CycleReport::new();
    let vehicles = client.fetch_vehicles(&report).await;

    let view = if vehicles.is_empty() {
        report.warning("No vehicle data available.");
        None
    } else {
        report.success(&format!("Showing {} active vehicles.", vehicles.len()));
        Some(render(&vehicles, settings))
    };

    let cycle = dashboard.publish(report.into_messages(), view);
    info!(cycle, count = vehicles.len(), "Refresh cycle complete");
    vehicles.len()
}

/// Refresh the dashboard every `interval` until `ctx` is cancelled.
///
/// The first cycle runs immediately. Feed failures never end the loop; they
/// show up on the dashboard and the next tick tries again.
pub async fn run_refresh_loop(
    ctx: CancellationToken,
    client: GtfsClient,
    settings: MapSettings,
    dashboard: Dashboard,
    interval: Duration,
) {
    info!(
        url = client.url(),
        interval_secs = interval.as_secs(),
        "Starting refresh loop"
    );

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ctx.cancelled() => {
                info!("Received shutdown signal, stopping refresh loop");
                break;
            }
            _ = ticker.tick() => {
                debug!("Refresh tick");
                tokio::select! {
                    _ = ctx.cancelled() => {
                        info!("Shutdown during refresh, abandoning cycle");
                        break;
                    }
                    _ = refresh_once(&client, &settings, &dashboard) => {}
                }
            }
        }
    }
}
