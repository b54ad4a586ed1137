// Main library file for the hotel reservation engine

// Domain modules, bottom-up
pub mod availability;
pub mod config;
pub mod error;
pub mod hotel;
pub mod pricing;
pub mod registry;
pub mod reservation;
pub mod room;
pub mod room_type;
pub mod stats;

// Re-export key types for convenience
pub use availability::{DayAvailability, DayRange};
pub use config::{ConfigError, EngineConfig, MAX_ROOMS_LIMIT};
pub use error::{BookingError, BookingResult};
pub use hotel::{Hotel, HotelSummary, Occupancy, RoomBatchReport, SkippedRoom, MIN_ROOMS};
pub use pricing::{DayModifierTable, DiscountCode};
pub use registry::{BookingEngine, HotelRegistry, SharedHotel};
pub use reservation::{
    Reservation, ReservationDetails, ReservationId, ReservationRequest, ReservationStatus,
};
pub use room::{Room, RoomSummary};
pub use room_type::RoomType;
pub use stats::{EngineStats, EngineStatsReport};
