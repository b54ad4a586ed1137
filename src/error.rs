// Error kinds surfaced by every engine operation

use serde::Serialize;
use thiserror::Error;

// Serialized externally tagged, e.g. {"HotelNotFound":"Ritz"}
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum BookingError {
    #[error("Hotel not found: {0}")]
    HotelNotFound(String),

    #[error("Room {room} not found in hotel {hotel}")]
    RoomNotFound { hotel: String, room: u32 },

    #[error("No reservation for room {room} from day {check_in} to day {check_out}")]
    ReservationNotFound {
        room: u32,
        check_in: u32,
        check_out: u32,
    },

    #[error("A hotel named {0} already exists")]
    DuplicateHotelName(String),

    #[error("Room number {0} already exists")]
    DuplicateRoomNumber(u32),

    #[error("Hotel already has the maximum of {max} rooms")]
    MaxRoomsExceeded { max: usize },

    #[error("Hotel must keep at least {min} room")]
    MinRoomsViolation { min: usize },

    #[error("Invalid room price: {0}")]
    InvalidPrice(f64),

    #[error("Invalid day modifier: day {day}, percent {percent}")]
    InvalidDayModifier { day: u32, percent: u32 },

    #[error("Invalid day range: {start} to {end}")]
    InvalidDateRange { start: u32, end: u32 },

    #[error("Room {room} is already booked between day {check_in} and day {check_out}")]
    OverlappingReservation {
        room: u32,
        check_in: u32,
        check_out: u32,
    },

    #[error("Hotel has {count} reservation(s), room prices cannot change")]
    ReservationsExistPriceChangeRejected { count: usize },

    #[error("Discount {code} not applicable: {reason}")]
    DiscountNotApplicable { code: String, reason: String },

    #[error("Unsupported discount code: {0}")]
    UnsupportedDiscountCode(String),

    #[error("Invalid hotel name: {0:?}")]
    InvalidHotelName(String),

    #[error("Invalid guest name: {0:?}")]
    InvalidGuestName(String),

    #[error("Invalid room number: {0}")]
    InvalidRoomNumber(u32),
}

pub type BookingResult<T> = Result<T, BookingError>;
