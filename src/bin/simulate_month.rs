// Scripted month of activity against a registry, printed as JSON
//
// Usage: simulate_month [config.json]
// Log verbosity follows RUST_LOG (default: info).

use anyhow::{Context, Result};
use hotel_reservation_engine::{BookingEngine, EngineConfig, HotelRegistry, RoomType};
use serde_json::json;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config() -> Result<EngineConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("reading config file {}", path))?;
            let config = EngineConfig::from_json_str(&raw)
                .with_context(|| format!("parsing config file {}", path))?;
            info!(path = %path, "Loaded engine config");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

fn main() -> Result<()> {
    init_tracing();
    let registry = HotelRegistry::new(load_config()?)?;

    registry.create_hotel("Seaside")?;
    registry.create_hotel("Mountain Lodge")?;
    registry.add_rooms_batch("Seaside", 201, 4, RoomType::Standard)?;
    registry.add_room("Seaside", 301, 2000.0, RoomType::Deluxe)?;
    registry.add_room("Mountain Lodge", 10, 900.0, RoomType::Executive)?;

    // Weekends cost more, the first week is quiet
    registry.set_day_modifier_range("Seaside", 1, 7, 80)?;
    for weekend_day in [6, 7, 13, 14, 20, 21, 27, 28] {
        registry.set_day_modifier("Seaside", weekend_day, 120)?;
    }

    let bookings = [
        ("Seaside", 201, "Ada Lovelace", 2, 6),
        ("Seaside", 202, "Alan Turing", 12, 16),
        ("Seaside", 301, "Grace Hopper", 25, 31),
        ("Seaside", 201, "Edsger Dijkstra", 5, 9),
        ("Mountain Lodge", 10, "Barbara Liskov", 14, 15),
    ];
    for (hotel, room, guest, check_in, check_out) in bookings {
        if let Err(e) = registry.book_room(hotel, room, guest, check_in, check_out) {
            warn!(hotel = %hotel, room, guest = %guest, error = %e, "Booking rejected");
        }
    }

    let discounts = [
        ("Seaside", 202, 12, 16, "STAY4_GET1"),
        ("Seaside", 301, 25, 31, "PAYDAY"),
        ("Mountain Lodge", 10, 14, 15, "PAYDAY"),
        ("Seaside", 201, 2, 6, "PAYDAY"),
    ];
    for (hotel, room, check_in, check_out, code) in discounts {
        if let Err(e) = registry.apply_discount(hotel, room, check_in, check_out, code) {
            warn!(hotel = %hotel, room, code = %code, error = %e, "Discount rejected");
        }
    }

    registry.cancel_booking("Seaside", 201, 2, 6)?;

    let mut hotels = Vec::new();
    for name in registry.hotel_names() {
        hotels.push(json!({
            "summary": registry.hotel_summary(&name)?,
            "occupancy_day_15": registry.occupancy_on(&name, 15)?,
            "occupancy_last_week": registry.occupancy_between(&name, 25, 31)?,
            "booked_rooms": registry.list_booked_rooms(&name, None)?,
        }));
    }

    let report = json!({
        "hotels": hotels,
        "stats": registry.stats(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
