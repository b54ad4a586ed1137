// Hotel registry: the entry point every presentation layer talks to
//
// Each hotel sits behind its own mutex so bookings in different hotels never
// contend. Lock order is always registry map first, then a single hotel.

use crate::availability::DayAvailability;
use crate::config::{ConfigError, EngineConfig};
use crate::error::{BookingError, BookingResult};
use crate::hotel::{Hotel, HotelSummary, Occupancy, RoomBatchReport};
use crate::reservation::{ReservationDetails, ReservationRequest};
use crate::room::RoomSummary;
use crate::room_type::RoomType;
use crate::stats::{EngineStats, EngineStatsReport};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub type SharedHotel = Arc<Mutex<Hotel>>;

// Operations offered to a presentation layer. Every failure comes back as a
// BookingError value; nothing here prompts, prints or blocks on input.
pub trait BookingEngine: Send + Sync + 'static {
    fn create_hotel(&self, name: &str) -> BookingResult<HotelSummary>;

    fn delete_hotel(&self, name: &str) -> BookingResult<HotelSummary>;

    fn rename_hotel(&self, old_name: &str, new_name: &str) -> BookingResult<()>;

    fn hotel_names(&self) -> Vec<String>;

    fn hotel_summary(&self, hotel: &str) -> BookingResult<HotelSummary>;

    fn add_room(
        &self,
        hotel: &str,
        number: u32,
        price: f64,
        room_type: RoomType,
    ) -> BookingResult<RoomSummary>;

    // Partial failures are reported per room instead of failing the call
    fn add_rooms_batch(
        &self,
        hotel: &str,
        start_number: u32,
        count: u32,
        room_type: RoomType,
    ) -> BookingResult<RoomBatchReport>;

    // Returns the reservations that were dropped with the room
    fn remove_room(&self, hotel: &str, number: u32) -> BookingResult<Vec<ReservationDetails>>;

    fn update_all_room_prices(&self, hotel: &str, new_price: f64) -> BookingResult<usize>;

    fn set_day_modifier(&self, hotel: &str, day: u32, percent: u32) -> BookingResult<()>;

    fn set_day_modifier_range(
        &self,
        hotel: &str,
        first_day: u32,
        last_day: u32,
        percent: u32,
    ) -> BookingResult<()>;

    fn book_room(
        &self,
        hotel: &str,
        room: u32,
        guest_name: &str,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<ReservationDetails>;

    fn cancel_booking(
        &self,
        hotel: &str,
        room: u32,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<ReservationDetails>;

    fn apply_discount(
        &self,
        hotel: &str,
        room: u32,
        check_in: u32,
        check_out: u32,
        code: &str,
    ) -> BookingResult<ReservationDetails>;

    fn list_available_rooms(&self, hotel: &str, day: Option<u32>)
        -> BookingResult<Vec<RoomSummary>>;

    fn list_booked_rooms(&self, hotel: &str, day: Option<u32>) -> BookingResult<Vec<RoomSummary>>;

    fn occupancy_on(&self, hotel: &str, day: u32) -> BookingResult<Occupancy>;

    fn occupancy_between(
        &self,
        hotel: &str,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<Occupancy>;

    fn estimate_earnings(&self, hotel: &str) -> BookingResult<f64>;

    fn get_reservation_details(
        &self,
        hotel: &str,
        room: u32,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<ReservationDetails>;

    fn get_room_month_availability(
        &self,
        hotel: &str,
        room: u32,
    ) -> BookingResult<Vec<DayAvailability>>;

    fn room_details(&self, hotel: &str, room: u32) -> BookingResult<RoomSummary>;

    fn stats(&self) -> EngineStatsReport;
}

// Hotel names are unique ignoring case and surrounding whitespace
fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

fn validated_name(name: &str) -> BookingResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(BookingError::InvalidHotelName(name.to_string()));
    }
    Ok(trimmed)
}

pub struct HotelRegistry {
    config: EngineConfig,
    hotels: RwLock<HashMap<String, SharedHotel>>,
    stats: EngineStats,
}

impl Default for HotelRegistry {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
            hotels: RwLock::new(HashMap::new()),
            stats: EngineStats::default(),
        }
    }
}

impl HotelRegistry {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.hotels.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.read().is_empty()
    }

    /// Registers a new hotel with its default room.
    pub fn add_hotel(&self, name: &str) -> BookingResult<SharedHotel> {
        let name = validated_name(name)?;
        let key = normalize(name);

        let mut hotels = self.hotels.write();
        if hotels.contains_key(&key) {
            warn!(hotel = %name, "Duplicate hotel name rejected");
            return Err(BookingError::DuplicateHotelName(name.to_string()));
        }
        let hotel = Arc::new(Mutex::new(Hotel::new(name, &self.config)));
        hotels.insert(key, Arc::clone(&hotel));
        drop(hotels);

        EngineStats::bump(&self.stats.hotels_created);
        EngineStats::bump(&self.stats.rooms_added);
        info!(hotel = %name, "Hotel created");
        Ok(hotel)
    }

    // Removal ignores any reservations the hotel still holds
    pub fn remove_hotel(&self, name: &str) -> BookingResult<SharedHotel> {
        let removed = self
            .hotels
            .write()
            .remove(&normalize(name))
            .ok_or_else(|| BookingError::HotelNotFound(name.to_string()))?;

        EngineStats::bump(&self.stats.hotels_removed);
        info!(hotel = %name, "Hotel removed");
        Ok(removed)
    }

    pub fn find_by_name(&self, name: &str) -> Option<SharedHotel> {
        let found = self.hotels.read().get(&normalize(name)).cloned();
        debug!(hotel = %name, found = found.is_some(), "Hotel lookup");
        found
    }

    fn handle(&self, name: &str) -> BookingResult<SharedHotel> {
        self.find_by_name(name)
            .ok_or_else(|| BookingError::HotelNotFound(name.to_string()))
    }

    // The registry lock is released before the hotel lock is taken
    fn with_hotel<T>(
        &self,
        name: &str,
        f: impl FnOnce(&Hotel) -> BookingResult<T>,
    ) -> BookingResult<T> {
        let handle = self.handle(name)?;
        let hotel = handle.lock();
        f(&hotel)
    }

    fn with_hotel_mut<T>(
        &self,
        name: &str,
        f: impl FnOnce(&mut Hotel) -> BookingResult<T>,
    ) -> BookingResult<T> {
        let handle = self.handle(name)?;
        let mut hotel = handle.lock();
        f(&mut hotel)
    }
}

impl BookingEngine for HotelRegistry {
    fn create_hotel(&self, name: &str) -> BookingResult<HotelSummary> {
        let hotel = self.add_hotel(name)?;
        let summary = hotel.lock().summary();
        Ok(summary)
    }

    fn delete_hotel(&self, name: &str) -> BookingResult<HotelSummary> {
        let hotel = self.remove_hotel(name)?;
        let summary = hotel.lock().summary();
        Ok(summary)
    }

    fn rename_hotel(&self, old_name: &str, new_name: &str) -> BookingResult<()> {
        let new_name = validated_name(new_name)?;
        let old_key = normalize(old_name);
        let new_key = normalize(new_name);

        let mut hotels = self.hotels.write();
        if old_key != new_key && hotels.contains_key(&new_key) {
            warn!(hotel = %old_name, new_name = %new_name, "Rename to existing name rejected");
            return Err(BookingError::DuplicateHotelName(new_name.to_string()));
        }
        let hotel = hotels
            .remove(&old_key)
            .ok_or_else(|| BookingError::HotelNotFound(old_name.to_string()))?;
        hotel.lock().set_name(new_name);
        hotels.insert(new_key, hotel);

        info!(hotel = %old_name, new_name = %new_name, "Hotel renamed");
        Ok(())
    }

    fn hotel_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .hotels
            .read()
            .values()
            .map(|hotel| hotel.lock().name().to_string())
            .collect();
        names.sort_by_key(|name| name.to_lowercase());
        names
    }

    fn hotel_summary(&self, hotel: &str) -> BookingResult<HotelSummary> {
        self.with_hotel(hotel, |h| Ok(h.summary()))
    }

    fn add_room(
        &self,
        hotel: &str,
        number: u32,
        price: f64,
        room_type: RoomType,
    ) -> BookingResult<RoomSummary> {
        let summary = self.with_hotel_mut(hotel, |h| h.add_room(number, price, room_type))?;
        EngineStats::bump(&self.stats.rooms_added);
        Ok(summary)
    }

    fn add_rooms_batch(
        &self,
        hotel: &str,
        start_number: u32,
        count: u32,
        room_type: RoomType,
    ) -> BookingResult<RoomBatchReport> {
        let report =
            self.with_hotel_mut(hotel, |h| h.add_rooms(start_number, count, room_type))?;
        EngineStats::add(&self.stats.rooms_added, report.added_count());
        Ok(report)
    }

    fn remove_room(&self, hotel: &str, number: u32) -> BookingResult<Vec<ReservationDetails>> {
        let dropped = self.with_hotel_mut(hotel, |h| {
            let dropped = h.remove_room(number)?;
            Ok(dropped
                .iter()
                .map(|reservation| reservation.details(h.name()))
                .collect::<Vec<_>>())
        })?;
        EngineStats::bump(&self.stats.rooms_removed);
        EngineStats::add(&self.stats.reservations_cancelled, dropped.len());
        Ok(dropped)
    }

    fn update_all_room_prices(&self, hotel: &str, new_price: f64) -> BookingResult<usize> {
        self.with_hotel_mut(hotel, |h| h.update_room_price(new_price))
    }

    fn set_day_modifier(&self, hotel: &str, day: u32, percent: u32) -> BookingResult<()> {
        self.with_hotel_mut(hotel, |h| h.set_day_modifier(day, percent))
    }

    fn set_day_modifier_range(
        &self,
        hotel: &str,
        first_day: u32,
        last_day: u32,
        percent: u32,
    ) -> BookingResult<()> {
        self.with_hotel_mut(hotel, |h| {
            h.set_day_modifier_range(first_day, last_day, percent)
        })
    }

    fn book_room(
        &self,
        hotel: &str,
        room: u32,
        guest_name: &str,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<ReservationDetails> {
        let result = ReservationRequest::new(room, guest_name, check_in, check_out)
            .and_then(|request| self.with_hotel_mut(hotel, |h| h.make_reservation(request)));

        match &result {
            Ok(_) => EngineStats::bump(&self.stats.reservations_made),
            Err(_) => EngineStats::bump(&self.stats.reservations_rejected),
        }
        result
    }

    fn cancel_booking(
        &self,
        hotel: &str,
        room: u32,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<ReservationDetails> {
        let cancelled = self.with_hotel_mut(hotel, |h| {
            let reservation = h.cancel_reservation(room, check_in, check_out)?;
            Ok(reservation.details(h.name()))
        })?;
        EngineStats::bump(&self.stats.reservations_cancelled);
        Ok(cancelled)
    }

    fn apply_discount(
        &self,
        hotel: &str,
        room: u32,
        check_in: u32,
        check_out: u32,
        code: &str,
    ) -> BookingResult<ReservationDetails> {
        let result =
            self.with_hotel_mut(hotel, |h| h.apply_discount(room, check_in, check_out, code));
        match &result {
            Ok(_) => EngineStats::bump(&self.stats.discounts_applied),
            Err(_) => EngineStats::bump(&self.stats.discounts_rejected),
        }
        result
    }

    fn list_available_rooms(
        &self,
        hotel: &str,
        day: Option<u32>,
    ) -> BookingResult<Vec<RoomSummary>> {
        self.with_hotel(hotel, |h| h.available_rooms(day))
    }

    fn list_booked_rooms(&self, hotel: &str, day: Option<u32>) -> BookingResult<Vec<RoomSummary>> {
        self.with_hotel(hotel, |h| h.booked_rooms(day))
    }

    fn occupancy_on(&self, hotel: &str, day: u32) -> BookingResult<Occupancy> {
        self.with_hotel(hotel, |h| h.occupancy_on(day))
    }

    fn occupancy_between(
        &self,
        hotel: &str,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<Occupancy> {
        self.with_hotel(hotel, |h| h.occupancy_between(check_in, check_out))
    }

    fn estimate_earnings(&self, hotel: &str) -> BookingResult<f64> {
        self.with_hotel(hotel, |h| Ok(h.estimate_earnings()))
    }

    fn get_reservation_details(
        &self,
        hotel: &str,
        room: u32,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<ReservationDetails> {
        self.with_hotel(hotel, |h| h.reservation_details(room, check_in, check_out))
    }

    fn get_room_month_availability(
        &self,
        hotel: &str,
        room: u32,
    ) -> BookingResult<Vec<DayAvailability>> {
        self.with_hotel(hotel, |h| h.room_month_availability(room))
    }

    fn room_details(&self, hotel: &str, room: u32) -> BookingResult<RoomSummary> {
        self.with_hotel(hotel, |h| h.room_details(room))
    }

    fn stats(&self) -> EngineStatsReport {
        self.stats.report()
    }
}
