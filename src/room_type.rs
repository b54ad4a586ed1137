// Room categories and their price multipliers

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum RoomType {
    #[default]
    Standard,
    Deluxe,
    Executive,
}

impl RoomType {
    pub const ALL: [RoomType; 3] = [RoomType::Standard, RoomType::Deluxe, RoomType::Executive];

    /// Factor applied to a room's base price when it is read for pricing.
    pub fn multiplier(self) -> f64 {
        match self {
            RoomType::Standard => 1.0,
            RoomType::Deluxe => 1.2,
            RoomType::Executive => 1.35,
        }
    }
}

impl fmt::Display for RoomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoomType::Standard => "Standard",
            RoomType::Deluxe => "Deluxe",
            RoomType::Executive => "Executive",
        };
        f.write_str(name)
    }
}
