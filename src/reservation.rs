// Reservations: one room, one guest, one inclusive day range

use crate::availability::DayRange;
use crate::error::{BookingError, BookingResult};
use crate::pricing::{self, DiscountCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ReservationId(pub u64);

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{:05}", self.0)
    }
}

// A requested booking is a ReservationRequest; it only becomes a Reservation
// once it is stored, Active. There is no way back from Cancelled and no
// in-place modification: changing dates means cancelling and booking again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReservationStatus {
    Active,
    Cancelled,
}

/// Validated booking input that has not yet been checked against a room.
///
/// Only [`ReservationRequest::new`] builds one, so the guest name is never blank
/// and the stay is always a valid range.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservationRequest {
    room_number: u32,
    guest_name: String,
    stay: DayRange,
}

impl ReservationRequest {
    pub fn new(
        room_number: u32,
        guest_name: &str,
        check_in: u32,
        check_out: u32,
    ) -> BookingResult<Self> {
        if guest_name.trim().is_empty() {
            return Err(BookingError::InvalidGuestName(guest_name.to_string()));
        }
        Ok(Self {
            room_number,
            guest_name: guest_name.trim().to_string(),
            stay: DayRange::new(check_in, check_out)?,
        })
    }

    pub fn room_number(&self) -> u32 {
        self.room_number
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    pub fn stay(&self) -> &DayRange {
        &self.stay
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reservation {
    id: ReservationId,
    room_number: u32,
    guest_name: String,
    stay: DayRange,
    nightly_rate: f64,
    total_price: f64,
    applied_discounts: Vec<DiscountCode>,
    status: ReservationStatus,
    booked_at: DateTime<Utc>,
}

impl Reservation {
    pub(crate) fn new(
        id: ReservationId,
        room_number: u32,
        guest_name: &str,
        stay: DayRange,
        nightly_rate: f64,
        total_price: f64,
    ) -> Self {
        Self {
            id,
            room_number,
            guest_name: guest_name.to_string(),
            stay,
            nightly_rate,
            total_price,
            applied_discounts: Vec::new(),
            status: ReservationStatus::Active,
            booked_at: Utc::now(),
        }
    }

    pub fn id(&self) -> ReservationId {
        self.id
    }

    pub fn room_number(&self) -> u32 {
        self.room_number
    }

    pub fn guest_name(&self) -> &str {
        &self.guest_name
    }

    pub fn stay(&self) -> &DayRange {
        &self.stay
    }

    pub fn check_in(&self) -> u32 {
        self.stay.check_in()
    }

    pub fn check_out(&self) -> u32 {
        self.stay.check_out()
    }

    pub fn nights(&self) -> u32 {
        self.stay.nights()
    }

    /// Room rate (base price times type multiplier) captured when the booking was made.
    pub fn nightly_rate(&self) -> f64 {
        self.nightly_rate
    }

    pub fn total_price(&self) -> f64 {
        self.total_price
    }

    pub fn applied_discounts(&self) -> &[DiscountCode] {
        &self.applied_discounts
    }

    pub fn status(&self) -> ReservationStatus {
        self.status
    }

    pub fn booked_at(&self) -> DateTime<Utc> {
        self.booked_at
    }

    pub fn matches(&self, check_in: u32, check_out: u32) -> bool {
        self.stay.check_in() == check_in && self.stay.check_out() == check_out
    }

    pub(crate) fn record_discount(&mut self, code: DiscountCode, new_total: f64) {
        self.total_price = new_total;
        self.applied_discounts.push(code);
    }

    pub(crate) fn cancel(mut self) -> Self {
        self.status = ReservationStatus::Cancelled;
        self
    }

    pub fn details(&self, hotel_name: &str) -> ReservationDetails {
        ReservationDetails {
            id: self.id,
            hotel_name: hotel_name.to_string(),
            room_number: self.room_number,
            guest_name: self.guest_name.clone(),
            check_in: self.stay.check_in(),
            check_out: self.stay.check_out(),
            nights: self.stay.nights(),
            total_price: self.total_price,
            price_per_night: pricing::price_per_night(self),
            applied_discounts: self.applied_discounts.clone(),
            status: self.status,
            booked_at: self.booked_at,
        }
    }
}

// Read model handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationDetails {
    pub id: ReservationId,
    pub hotel_name: String,
    pub room_number: u32,
    pub guest_name: String,
    pub check_in: u32,
    pub check_out: u32,
    pub nights: u32,
    pub total_price: f64,
    pub price_per_night: f64,
    pub applied_discounts: Vec<DiscountCode>,
    pub status: ReservationStatus,
    pub booked_at: DateTime<Utc>,
}
