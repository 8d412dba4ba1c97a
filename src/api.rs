use bytes::Bytes;
use prost::Message;
use std::time::Duration;
use thiserror::Error;

use crate::gtfs_realtime::FeedMessage;
use crate::models::{Notifier, VehicleRecord};

/// Adelaide Metro vehicle positions feed
pub const VEHICLE_POSITIONS_URL: &str =
    "https://gtfs.adelaidemetro.com.au/v1/realtime/vehicle_positions";

/// Reasons a refresh can come back without vehicles
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("API returned error status: {0}")]
    Status(reqwest::StatusCode),

    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    #[error("{0}")]
    Decode(#[from] prost::DecodeError),
}

impl FeedError {
    /// Text shown on the dashboard for this failure
    pub fn user_message(&self) -> String {
        match self {
            FeedError::Decode(e) => format!("Failed to decode GTFS Realtime data: {}", e),
            other => format!("Failed to fetch GTFS Realtime data: {}", other),
        }
    }
}

/// GTFS-RT client for a vehicle positions endpoint
pub struct GtfsClient {
    client: reqwest::Client,
    url: String,
}

impl GtfsClient {
    /// Create a client for `url` with the given request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
            url: url.into(),
        })
    }

    /// Endpoint this client polls
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch the raw feed body
    pub async fn fetch_feed(&self) -> Result<Bytes, FeedError> {
        tracing::debug!(url = %self.url, "Fetching vehicle positions");

        let response = self.client
            .get(&self.url)
            .send()
            .await
            .map_err(FeedError::Network)?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let bytes = response.bytes().await.map_err(FeedError::Body)?;

        tracing::debug!(bytes = bytes.len(), "Received data from API");
        Ok(bytes)
    }

    /// Fetch and decode the feed, reporting any failure through `notifier`.
    ///
    /// Every failure yields exactly one error notification and an empty list.
    pub async fn fetch_vehicles(&self, notifier: &dyn Notifier) -> Vec<VehicleRecord> {
        match self.fetch_feed().await {
            Ok(data) => decode_vehicles(&data, notifier),
            Err(e) => {
                tracing::warn!(error = %e, url = %self.url, "Feed request failed");
                notifier.error(&e.user_message());
                Vec::new()
            }
        }
    }
}

/// Decode a feed and extract one record per vehicle entity
pub fn parse_feed(data: &[u8]) -> Result<Vec<VehicleRecord>, FeedError> {
    let feed = FeedMessage::decode(data)?;

    tracing::debug!(
        entities = feed.entity.len(),
        feed_timestamp = ?feed.header.timestamp,
        "Decoded protobuf feed"
    );

    let vehicles: Vec<VehicleRecord> = feed
        .entity
        .into_iter()
        .filter_map(|entity| entity.vehicle)
        .map(|v| {
            let id = v.vehicle.and_then(|d| d.id).unwrap_or_default();
            let route = v.trip.and_then(|t| t.route_id).unwrap_or_default();
            let (lat, lon) = v
                .position
                .map(|p| (f64::from(p.latitude), f64::from(p.longitude)))
                .unwrap_or((0.0, 0.0));

            VehicleRecord { id, route, lat, lon }
        })
        .collect();

    tracing::info!(count = vehicles.len(), "Parsed vehicle positions");
    Ok(vehicles)
}

/// Like [`parse_feed`], but a decode failure becomes one error notification
/// and an empty list
pub fn decode_vehicles(data: &[u8], notifier: &dyn Notifier) -> Vec<VehicleRecord> {
    match parse_feed(data) {
        Ok(vehicles) => vehicles,
        Err(e) => {
            tracing::warn!(error = %e, bytes = data.len(), "Feed decode failed");
            notifier.error(&e.user_message());
            Vec::new()
        }
    }
}
