use adelaide_realtime::api::GtfsClient;
use adelaide_realtime::config::AppConfig;
use adelaide_realtime::gtfs_realtime::FeedMessage;
use prost::Message;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;
    let client = GtfsClient::new(config.feed_url.clone(), config.request_timeout())?;

    println!("Fetching from: {}", client.url());
    let bytes = client.fetch_feed().await?;

    println!("Received {} bytes", bytes.len());

    let feed = FeedMessage::decode(&bytes[..])?;

    println!("Feed header version: {:?}", feed.header.gtfs_realtime_version);
    println!("Feed timestamp: {:?}", feed.header.timestamp);
    println!("Number of entities: {}", feed.entity.len());

    let with_vehicle = feed.entity.iter().filter(|e| e.vehicle.is_some()).count();
    println!("Entities with vehicle data: {}", with_vehicle);

    for (i, entity) in feed.entity.iter().enumerate() {
        println!("\n--- Entity {} ---", i);
        println!("Entity ID: {}", entity.id);

        let Some(vehicle) = &entity.vehicle else {
            println!("Has vehicle data: NO");
            continue;
        };

        match &vehicle.vehicle {
            Some(veh) => println!("  Vehicle ID: {:?} (label {:?})", veh.id, veh.label),
            None => println!("  Vehicle descriptor: NONE"),
        }

        match &vehicle.trip {
            Some(trip) => println!(
                "  Route {:?}, trip {:?}, direction {:?}",
                trip.route_id, trip.trip_id, trip.direction_id
            ),
            None => println!("  Trip data: NONE"),
        }

        match &vehicle.position {
            Some(pos) => println!(
                "  Position: {}, {} (bearing {:?}, speed {:?})",
                pos.latitude, pos.longitude, pos.bearing, pos.speed
            ),
            None => println!("  Position: NONE"),
        }

        println!(
            "  Timestamp: {:?}, current stop: {:?} ({:?})",
            vehicle.timestamp, vehicle.current_stop_sequence, vehicle.stop_id
        );
    }

    Ok(())
}
