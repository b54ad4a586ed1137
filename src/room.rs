// A room and the reservations made against it

use crate::availability::{self, DayAvailability, DayRange};
use crate::reservation::{Reservation, ReservationId};
use crate::room_type::RoomType;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Room {
    number: u32,
    base_price: f64,
    room_type: RoomType,
    reservations: BTreeMap<ReservationId, Reservation>,
}

impl Room {
    pub fn new(number: u32, base_price: f64, room_type: RoomType) -> Self {
        Self {
            number,
            base_price,
            room_type,
            reservations: BTreeMap::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    /// Price before the type multiplier. Never scaled in place.
    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn room_type(&self) -> RoomType {
        self.room_type
    }

    pub fn nightly_rate(&self) -> f64 {
        self.base_price * self.room_type.multiplier()
    }

    pub fn is_booked(&self) -> bool {
        !self.reservations.is_empty()
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.len()
    }

    // In booking order
    pub fn reservations(&self) -> impl Iterator<Item = &Reservation> {
        self.reservations.values()
    }

    pub fn reservation(&self, id: ReservationId) -> Option<&Reservation> {
        self.reservations.get(&id)
    }

    fn stays(&self) -> impl Iterator<Item = &DayRange> {
        self.reservations.values().map(Reservation::stay)
    }

    pub fn is_available(&self, stay: &DayRange) -> bool {
        availability::is_available(self.stays(), stay)
    }

    pub fn is_booked_on_date(&self, day: u32) -> bool {
        availability::is_booked_on_date(self.stays(), day)
    }

    pub fn month_availability(&self) -> Vec<DayAvailability> {
        availability::month_availability(self.stays())
    }

    pub fn find_reservation(&self, check_in: u32, check_out: u32) -> Option<&Reservation> {
        self.reservations
            .values()
            .find(|reservation| reservation.matches(check_in, check_out))
    }

    pub(crate) fn find_reservation_mut(
        &mut self,
        check_in: u32,
        check_out: u32,
    ) -> Option<&mut Reservation> {
        self.reservations
            .values_mut()
            .find(|reservation| reservation.matches(check_in, check_out))
    }

    pub(crate) fn set_base_price(&mut self, price: f64) {
        self.base_price = price;
    }

    pub(crate) fn insert_reservation(&mut self, reservation: Reservation) {
        self.reservations.insert(reservation.id(), reservation);
    }

    pub(crate) fn remove_reservation(&mut self, id: ReservationId) -> Option<Reservation> {
        self.reservations.remove(&id)
    }

    pub(crate) fn take_reservations(&mut self) -> Vec<Reservation> {
        std::mem::take(&mut self.reservations).into_values().collect()
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            number: self.number,
            room_type: self.room_type,
            base_price: self.base_price,
            nightly_rate: self.nightly_rate(),
            is_booked: self.is_booked(),
            reservation_count: self.reservations.len(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoomSummary {
    pub number: u32,
    pub room_type: RoomType,
    pub base_price: f64,
    pub nightly_rate: f64,
    pub is_booked: bool,
    pub reservation_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking(id: u64, check_in: u32, check_out: u32) -> Reservation {
        let stay = DayRange::new(check_in, check_out).unwrap();
        Reservation::new(ReservationId(id), 101, "Guest", stay, 100.0, 100.0)
    }

    #[test]
    fn test_type_multiplier_applied_at_read() {
        let room = Room::new(301, 1000.0, RoomType::Executive);
        assert_eq!(room.base_price(), 1000.0);
        assert_eq!(room.nightly_rate(), 1350.0);
    }

    #[test]
    fn test_is_booked_tracks_reservations() {
        let mut room = Room::new(101, 1299.0, RoomType::Standard);
        assert!(!room.is_booked());

        room.insert_reservation(booking(1, 1, 3));
        room.insert_reservation(booking(2, 10, 12));
        assert!(room.is_booked());
        assert_eq!(room.reservation_count(), 2);

        assert!(room.remove_reservation(ReservationId(1)).is_some());
        assert!(room.is_booked());
        assert!(room.remove_reservation(ReservationId(2)).is_some());
        assert!(!room.is_booked());
        assert!(room.remove_reservation(ReservationId(2)).is_none());
    }

    #[test]
    fn test_availability_queries() {
        let mut room = Room::new(101, 1299.0, RoomType::Standard);
        room.insert_reservation(booking(1, 5, 8));

        assert!(!room.is_available(&DayRange::new(8, 9).unwrap()));
        assert!(room.is_available(&DayRange::new(9, 12).unwrap()));
        assert!(room.is_booked_on_date(5));
        assert!(room.is_booked_on_date(8));
        assert!(!room.is_booked_on_date(9));

        let month = room.month_availability();
        let booked: Vec<u32> = month.iter().filter(|d| !d.available).map(|d| d.day).collect();
        assert_eq!(booked, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_find_reservation_exact_match() {
        let mut room = Room::new(101, 1299.0, RoomType::Standard);
        room.insert_reservation(booking(3, 5, 8));
        assert_eq!(room.find_reservation(5, 8).map(|r| r.id()), Some(ReservationId(3)));
        assert!(room.find_reservation(5, 7).is_none());
    }

    #[test]
    fn test_take_reservations_empties_room() {
        let mut room = Room::new(101, 1299.0, RoomType::Deluxe);
        room.insert_reservation(booking(1, 1, 2));
        room.insert_reservation(booking(2, 4, 5));
        let taken = room.take_reservations();
        assert_eq!(taken.len(), 2);
        assert!(!room.is_booked());
        assert!(!room.summary().is_booked);
    }
}
