// Hotel aggregate: rooms, the hotel-wide reservation index and day modifiers
//
// A reservation is owned by its room. The hotel keeps an ordered index from
// reservation id to room number so hotel-wide listings stay in booking order.
// Both are updated inside the same &mut self call.

use crate::availability::{DayAvailability, DayRange};
use crate::config::EngineConfig;
use crate::error::{BookingError, BookingResult};
use crate::pricing::{self, DayModifierTable, DiscountCode};
use crate::reservation::{Reservation, ReservationDetails, ReservationId, ReservationRequest};
use crate::room::{Room, RoomSummary};
use crate::room_type::RoomType;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const MIN_ROOMS: usize = 1;

#[derive(Debug, Clone)]
pub struct Hotel {
    name: String,
    config: EngineConfig,
    rooms: BTreeMap<u32, Room>,
    reservation_index: BTreeMap<ReservationId, u32>,
    day_modifiers: DayModifierTable,
    next_reservation_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HotelSummary {
    pub name: String,
    pub room_count: usize,
    pub booked_room_count: usize,
    pub reservation_count: usize,
    pub estimated_earnings: f64,
}

// Room counts over an inclusive day range; a single day has check_in == check_out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Occupancy {
    pub check_in: u32,
    pub check_out: u32,
    pub available: usize,
    pub booked: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRoom {
    pub number: u32,
    pub reason: BookingError,
}

// Outcome of a batch add: one entry per attempted room number
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoomBatchReport {
    pub added: Vec<u32>,
    pub skipped: Vec<SkippedRoom>,
}

impl RoomBatchReport {
    pub fn added_count(&self) -> usize {
        self.added.len()
    }
}

impl Hotel {
    /// Creates a hotel holding the single default room required by the room-count bounds.
    ///
    /// `config` must already be validated; hotels are only built through a registry.
    pub(crate) fn new(name: &str, config: &EngineConfig) -> Self {
        let mut rooms = BTreeMap::new();
        rooms.insert(
            config.default_room_number,
            Room::new(
                config.default_room_number,
                config.default_room_price,
                RoomType::Standard,
            ),
        );

        Self {
            name: name.to_string(),
            config: config.clone(),
            rooms,
            reservation_index: BTreeMap::new(),
            day_modifiers: DayModifierTable::default(),
            next_reservation_id: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn room(&self, number: u32) -> Option<&Room> {
        self.rooms.get(&number)
    }

    // Ascending room number
    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservation_index.len()
    }

    // Booking order across every room
    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> {
        self.reservation_index
            .iter()
            .filter_map(|(id, number)| self.rooms.get(number)?.reservation(*id))
    }

    pub fn day_modifiers(&self) -> &DayModifierTable {
        &self.day_modifiers
    }

    fn room_or_not_found(&self, number: u32) -> BookingResult<&Room> {
        self.rooms.get(&number).ok_or_else(|| BookingError::RoomNotFound {
            hotel: self.name.clone(),
            room: number,
        })
    }

    pub fn add_room(
        &mut self,
        number: u32,
        price: f64,
        room_type: RoomType,
    ) -> BookingResult<RoomSummary> {
        if number == 0 {
            return Err(BookingError::InvalidRoomNumber(number));
        }
        if !self.config.is_valid_price(price) {
            return Err(BookingError::InvalidPrice(price));
        }
        if self.rooms.len() >= self.config.max_rooms_per_hotel {
            warn!(hotel = %self.name, room = number, "Room limit reached");
            return Err(BookingError::MaxRoomsExceeded {
                max: self.config.max_rooms_per_hotel,
            });
        }
        if self.rooms.contains_key(&number) {
            return Err(BookingError::DuplicateRoomNumber(number));
        }

        let room = Room::new(number, price, room_type);
        let summary = room.summary();
        self.rooms.insert(number, room);
        info!(hotel = %self.name, room = number, %room_type, price, "Room added");
        Ok(summary)
    }

    /// Adds `count` consecutive rooms from `start_number` at the default price.
    ///
    /// Only a hotel that is already full rejects the whole batch. After that each
    /// number is tried in turn; collisions and numbers beyond the room limit are
    /// reported as skipped and the batch carries on.
    pub fn add_rooms(
        &mut self,
        start_number: u32,
        count: u32,
        room_type: RoomType,
    ) -> BookingResult<RoomBatchReport> {
        if self.rooms.len() >= self.config.max_rooms_per_hotel {
            warn!(hotel = %self.name, "Room limit reached, batch rejected");
            return Err(BookingError::MaxRoomsExceeded {
                max: self.config.max_rooms_per_hotel,
            });
        }
        if start_number == 0 || start_number.checked_add(count.saturating_sub(1)).is_none() {
            return Err(BookingError::InvalidRoomNumber(start_number));
        }

        let price = self.config.default_room_price;
        let mut report = RoomBatchReport::default();
        for number in (0..count).map(|offset| start_number + offset) {
            match self.add_room(number, price, room_type) {
                Ok(_) => report.added.push(number),
                Err(reason) => {
                    debug!(hotel = %self.name, room = number, %reason, "Skipping room in batch");
                    report.skipped.push(SkippedRoom { number, reason });
                }
            }
        }

        info!(
            hotel = %self.name,
            added = report.added.len(),
            skipped = report.skipped.len(),
            "Room batch processed"
        );
        Ok(report)
    }

    /// Removes a room together with its reservations, which are returned cancelled.
    pub fn remove_room(&mut self, number: u32) -> BookingResult<Vec<Reservation>> {
        if self.rooms.len() <= MIN_ROOMS {
            warn!(hotel = %self.name, room = number, "Refusing to remove last room");
            return Err(BookingError::MinRoomsViolation { min: MIN_ROOMS });
        }
        let mut room = self
            .rooms
            .remove(&number)
            .ok_or_else(|| BookingError::RoomNotFound {
                hotel: self.name.clone(),
                room: number,
            })?;

        let dropped: Vec<Reservation> = room
            .take_reservations()
            .into_iter()
            .map(|reservation| {
                self.reservation_index.remove(&reservation.id());
                reservation.cancel()
            })
            .collect();

        info!(
            hotel = %self.name,
            room = number,
            dropped_reservations = dropped.len(),
            "Room removed"
        );
        Ok(dropped)
    }

    // Resets the base price of every room; only allowed while nothing is booked
    pub fn update_room_price(&mut self, new_price: f64) -> BookingResult<usize> {
        if !self.config.is_valid_price(new_price) {
            return Err(BookingError::InvalidPrice(new_price));
        }
        if !self.reservation_index.is_empty() {
            warn!(
                hotel = %self.name,
                reservations = self.reservation_index.len(),
                "Price change rejected"
            );
            return Err(BookingError::ReservationsExistPriceChangeRejected {
                count: self.reservation_index.len(),
            });
        }

        for room in self.rooms.values_mut() {
            room.set_base_price(new_price);
        }
        info!(hotel = %self.name, new_price, rooms = self.rooms.len(), "Room prices updated");
        Ok(self.rooms.len())
    }

    pub fn set_day_modifier(&mut self, day: u32, percent: u32) -> BookingResult<()> {
        self.day_modifiers.set(day, percent)?;
        info!(hotel = %self.name, day, percent, "Day modifier set");
        Ok(())
    }

    pub fn set_day_modifier_range(
        &mut self,
        first_day: u32,
        last_day: u32,
        percent: u32,
    ) -> BookingResult<()> {
        self.day_modifiers.set_range(first_day, last_day, percent)?;
        info!(hotel = %self.name, first_day, last_day, percent, "Day modifier range set");
        Ok(())
    }

    pub fn make_reservation(
        &mut self,
        request: ReservationRequest,
    ) -> BookingResult<ReservationDetails> {
        let id = ReservationId(self.next_reservation_id);
        let room_number = request.room_number();
        let stay = request.stay();
        let room = self
            .rooms
            .get_mut(&room_number)
            .ok_or_else(|| BookingError::RoomNotFound {
                hotel: self.name.clone(),
                room: room_number,
            })?;

        if !room.is_available(stay) {
            warn!(
                hotel = %self.name,
                room = room_number,
                check_in = stay.check_in(),
                check_out = stay.check_out(),
                "Overlapping reservation rejected"
            );
            return Err(BookingError::OverlappingReservation {
                room: room_number,
                check_in: stay.check_in(),
                check_out: stay.check_out(),
            });
        }

        let total = pricing::compute_total_price(room, &self.day_modifiers, stay);
        let reservation = Reservation::new(
            id,
            room_number,
            request.guest_name(),
            *stay,
            room.nightly_rate(),
            total,
        );
        let details = reservation.details(&self.name);
        room.insert_reservation(reservation);

        self.reservation_index.insert(id, room_number);
        self.next_reservation_id += 1;

        info!(
            hotel = %self.name,
            room = details.room_number,
            reservation = %id,
            check_in = details.check_in,
            check_out = details.check_out,
            total = details.total_price,
            "Reservation made"
        );
        Ok(details)
    }

    /// Cancels the reservation on `room_number` whose range is exactly `[check_in, check_out]`.
    pub fn cancel_reservation(
        &mut self,
        room_number: u32,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<Reservation> {
        let room = self
            .rooms
            .get_mut(&room_number)
            .ok_or_else(|| BookingError::RoomNotFound {
                hotel: self.name.clone(),
                room: room_number,
            })?;

        let not_found = BookingError::ReservationNotFound {
            room: room_number,
            check_in,
            check_out,
        };
        let id = room
            .find_reservation(check_in, check_out)
            .map(Reservation::id)
            .ok_or_else(|| not_found.clone())?;
        let removed = room.remove_reservation(id).ok_or(not_found)?;
        self.reservation_index.remove(&id);

        info!(
            hotel = %self.name,
            room = room_number,
            reservation = %removed.id(),
            check_in,
            check_out,
            "Reservation cancelled"
        );
        Ok(removed.cancel())
    }

    pub fn apply_discount(
        &mut self,
        room_number: u32,
        check_in: u32,
        check_out: u32,
        code: &str,
    ) -> BookingResult<ReservationDetails> {
        let room = self
            .rooms
            .get_mut(&room_number)
            .ok_or_else(|| BookingError::RoomNotFound {
                hotel: self.name.clone(),
                room: room_number,
            })?;
        let reservation = room.find_reservation_mut(check_in, check_out).ok_or(
            BookingError::ReservationNotFound {
                room: room_number,
                check_in,
                check_out,
            },
        )?;

        let applied: DiscountCode = pricing::apply_discount(reservation, code)?;
        info!(
            hotel = %self.name,
            room = room_number,
            code = %applied,
            total = reservation.total_price(),
            "Discount applied"
        );
        Ok(reservation.details(&self.name))
    }

    pub fn reservation_details(
        &self,
        room_number: u32,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<ReservationDetails> {
        self.room_or_not_found(room_number)?
            .find_reservation(check_in, check_out)
            .map(|reservation| reservation.details(&self.name))
            .ok_or(BookingError::ReservationNotFound {
                room: room_number,
                check_in,
                check_out,
            })
    }

    pub fn room_details(&self, number: u32) -> BookingResult<RoomSummary> {
        Ok(self.room_or_not_found(number)?.summary())
    }

    // Without a day: rooms with no reservation at all. With a day: rooms free on that day.
    pub fn available_rooms(&self, day: Option<u32>) -> BookingResult<Vec<RoomSummary>> {
        self.rooms_where(day, false)
    }

    pub fn booked_rooms(&self, day: Option<u32>) -> BookingResult<Vec<RoomSummary>> {
        self.rooms_where(day, true)
    }

    fn rooms_where(&self, day: Option<u32>, booked: bool) -> BookingResult<Vec<RoomSummary>> {
        if let Some(day) = day {
            DayRange::single_day(day)?;
        }
        Ok(self
            .rooms
            .values()
            .filter(|room| match day {
                Some(day) => room.is_booked_on_date(day) == booked,
                None => room.is_booked() == booked,
            })
            .map(Room::summary)
            .collect())
    }

    pub fn occupancy_on(&self, day: u32) -> BookingResult<Occupancy> {
        self.occupancy_between(day, day)
    }

    // A room counts as booked if any of its reservations overlaps the range
    pub fn occupancy_between(&self, check_in: u32, check_out: u32) -> BookingResult<Occupancy> {
        let stay = DayRange::new(check_in, check_out)?;
        let available = self
            .rooms
            .values()
            .filter(|room| room.is_available(&stay))
            .count();
        Ok(Occupancy {
            check_in,
            check_out,
            available,
            booked: self.rooms.len() - available,
        })
    }

    pub fn room_month_availability(&self, number: u32) -> BookingResult<Vec<DayAvailability>> {
        Ok(self.room_or_not_found(number)?.month_availability())
    }

    pub fn estimate_earnings(&self) -> f64 {
        self.reservations().map(Reservation::total_price).sum()
    }

    pub fn summary(&self) -> HotelSummary {
        HotelSummary {
            name: self.name.clone(),
            room_count: self.rooms.len(),
            booked_room_count: self.rooms.values().filter(|room| room.is_booked()).count(),
            reservation_count: self.reservation_index.len(),
            estimated_earnings: self.estimate_earnings(),
        }
    }
}
