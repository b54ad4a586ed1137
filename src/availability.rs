// Availability checks over inclusive day-of-month ranges
//
// Occupied days of a stay are [check_in, check_out] inclusive; nights billed are
// check_out - check_in. The same convention drives overlap, pricing and cancellation.

use crate::error::{BookingError, BookingResult};
use serde::{Deserialize, Serialize};

pub const FIRST_DAY: u32 = 1;
pub const LAST_DAY: u32 = 31;
pub const DAYS_IN_MONTH: usize = LAST_DAY as usize;

pub fn is_valid_day(day: u32) -> bool {
    (FIRST_DAY..=LAST_DAY).contains(&day)
}

/// A validated stay: both days within the month and `check_in <= check_out`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "RawDayRange")]
pub struct DayRange {
    check_in: u32,
    check_out: u32,
}

// Wire shape of a DayRange before validation
#[derive(Deserialize)]
struct RawDayRange {
    check_in: u32,
    check_out: u32,
}

impl TryFrom<RawDayRange> for DayRange {
    type Error = BookingError;

    fn try_from(raw: RawDayRange) -> Result<Self, Self::Error> {
        DayRange::new(raw.check_in, raw.check_out)
    }
}

impl DayRange {
    pub fn new(check_in: u32, check_out: u32) -> BookingResult<Self> {
        if !is_valid_day(check_in) || !is_valid_day(check_out) || check_out < check_in {
            return Err(BookingError::InvalidDateRange {
                start: check_in,
                end: check_out,
            });
        }
        Ok(Self {
            check_in,
            check_out,
        })
    }

    pub fn single_day(day: u32) -> BookingResult<Self> {
        Self::new(day, day)
    }

    pub fn check_in(&self) -> u32 {
        self.check_in
    }

    pub fn check_out(&self) -> u32 {
        self.check_out
    }

    pub fn nights(&self) -> u32 {
        self.check_out - self.check_in
    }

    // Days that are priced: check_in up to, but excluding, check_out
    pub fn billed_days(&self) -> impl Iterator<Item = u32> {
        self.check_in..self.check_out
    }

    pub fn contains_day(&self, day: u32) -> bool {
        self.check_in <= day && day <= self.check_out
    }

    pub fn overlaps(&self, other: &DayRange) -> bool {
        overlaps(self, other)
    }
}

pub fn overlaps(a: &DayRange, b: &DayRange) -> bool {
    a.check_in <= b.check_out && b.check_in <= a.check_out
}

// True when none of the existing stays overlaps the requested one
pub fn is_available<'a, I>(existing: I, requested: &DayRange) -> bool
where
    I: IntoIterator<Item = &'a DayRange>,
{
    !existing.into_iter().any(|range| overlaps(range, requested))
}

pub fn is_booked_on_date<'a, I>(existing: I, day: u32) -> bool
where
    I: IntoIterator<Item = &'a DayRange>,
{
    existing.into_iter().any(|range| range.contains_day(day))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub day: u32,
    pub available: bool,
}

pub fn month_availability<'a, I>(existing: I) -> Vec<DayAvailability>
where
    I: IntoIterator<Item = &'a DayRange>,
{
    let ranges: Vec<&DayRange> = existing.into_iter().collect();
    (FIRST_DAY..=LAST_DAY)
        .map(|day| DayAvailability {
            day,
            available: !ranges.iter().any(|range| range.contains_day(day)),
        })
        .collect()
}
