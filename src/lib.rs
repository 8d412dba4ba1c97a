//! Live Adelaide Metro vehicle positions on a browser map.
//!
//! The GTFS-RT vehicle positions feed is fetched on a fixed interval,
//! decoded into [`models::VehicleRecord`]s, rendered into a
//! [`map::MapView`] and published to a small actix-web dashboard.

pub mod api;
pub mod config;
pub mod dashboard;
pub mod gtfs_realtime;
pub mod map;
pub mod models;
pub mod poller;
pub mod server;
