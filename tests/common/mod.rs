use actix_web::http::StatusCode;
use actix_web::{web, App, HttpResponse, HttpServer};
use adelaide_realtime::gtfs_realtime::{
    FeedEntity, FeedHeader, FeedMessage, Position, TripDescriptor, VehicleDescriptor,
    VehiclePosition,
};
use prost::Message;
use std::time::Duration;

/// Serve `body` with `status` on a random local port and return the feed URL
pub fn spawn_upstream(status: StatusCode, body: Vec<u8>) -> String {
    let server = HttpServer::new(move || {
        let body = body.clone();
        App::new().route(
            "/vehicle_positions",
            web::get().to(move || {
                let body = body.clone();
                async move {
                    HttpResponse::build(status)
                        .content_type("application/x-protobuf")
                        .body(body)
                }
            }),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}/vehicle_positions", addr)
}

/// Accept the request but hold the response for `delay`
pub fn spawn_slow_upstream(delay: Duration) -> String {
    let server = HttpServer::new(move || {
        App::new().route(
            "/vehicle_positions",
            web::get().to(move || async move {
                actix_web::rt::time::sleep(delay).await;
                HttpResponse::Ok().body(Vec::<u8>::new())
            }),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .unwrap();

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{}/vehicle_positions", addr)
}

/// A URL nothing is listening on
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/vehicle_positions", addr)
}

pub fn vehicle_entity(id: &str, vehicle_id: &str, route: &str, lat: f32, lon: f32) -> FeedEntity {
    FeedEntity {
        id: id.to_string(),
        is_deleted: None,
        vehicle: Some(VehiclePosition {
            trip: Some(TripDescriptor {
                route_id: Some(route.to_string()),
                ..Default::default()
            }),
            vehicle: Some(VehicleDescriptor {
                id: Some(vehicle_id.to_string()),
                ..Default::default()
            }),
            position: Some(Position {
                latitude: lat,
                longitude: lon,
                ..Default::default()
            }),
            ..Default::default()
        }),
    }
}

pub fn encode_feed(entity: Vec<FeedEntity>) -> Vec<u8> {
    FeedMessage {
        header: FeedHeader {
            gtfs_realtime_version: "2.0".to_string(),
            timestamp: Some(1_700_000_000),
        },
        entity,
    }
    .encode_to_vec()
}
