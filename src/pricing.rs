// Pricing: per-day modifier table, stay totals and discount codes

use crate::availability::{is_valid_day, DayRange, DAYS_IN_MONTH};
use crate::error::{BookingError, BookingResult};
use crate::reservation::Reservation;
use crate::room::Room;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_MODIFIER_PERCENT: u32 = 100;
pub const MIN_MODIFIER_PERCENT: u32 = 50;
pub const MAX_MODIFIER_PERCENT: u32 = 150;

const PAYDAY_MID_MONTH: u32 = 15;
const PAYDAY_MONTH_END: u32 = 31;
const STAY4_GET1_MIN_NIGHTS: u32 = 5;

/// Percent applied to the nightly rate on each day of the month, indexed 1..=31.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayModifierTable {
    percents: [u32; DAYS_IN_MONTH],
}

impl Default for DayModifierTable {
    fn default() -> Self {
        Self {
            percents: [DEFAULT_MODIFIER_PERCENT; DAYS_IN_MONTH],
        }
    }
}

impl DayModifierTable {
    // Returns None for a day outside the month
    pub fn get(&self, day: u32) -> Option<u32> {
        if !is_valid_day(day) {
            return None;
        }
        self.percents.get(day as usize - 1).copied()
    }

    pub fn set(&mut self, day: u32, percent: u32) -> BookingResult<()> {
        validate_modifier(day, percent)?;
        self.percents[day as usize - 1] = percent;
        Ok(())
    }

    // Either every day in [first, last] is updated or none is
    pub fn set_range(&mut self, first: u32, last: u32, percent: u32) -> BookingResult<()> {
        validate_modifier(first, percent)?;
        validate_modifier(last, percent)?;
        if first > last {
            return Err(BookingError::InvalidDateRange {
                start: first,
                end: last,
            });
        }
        for day in first..=last {
            self.percents[day as usize - 1] = percent;
        }
        Ok(())
    }

    pub fn factor(&self, day: u32) -> f64 {
        self.get(day).unwrap_or(DEFAULT_MODIFIER_PERCENT) as f64 / 100.0
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.percents
    }
}

fn validate_modifier(day: u32, percent: u32) -> BookingResult<()> {
    if !is_valid_day(day) || !(MIN_MODIFIER_PERCENT..=MAX_MODIFIER_PERCENT).contains(&percent) {
        return Err(BookingError::InvalidDayModifier { day, percent });
    }
    Ok(())
}

pub fn compute_total_price(room: &Room, modifiers: &DayModifierTable, stay: &DayRange) -> f64 {
    total_for_rate(room.nightly_rate(), modifiers, stay)
}

pub fn total_for_rate(nightly_rate: f64, modifiers: &DayModifierTable, stay: &DayRange) -> f64 {
    stay.billed_days()
        .map(|day| nightly_rate * modifiers.factor(day))
        .sum()
}

pub fn price_per_night(reservation: &Reservation) -> f64 {
    let nights = reservation.nights();
    if nights == 0 {
        return 0.0;
    }
    reservation.total_price() / nights as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum DiscountCode {
    #[serde(rename = "I_WORK_HERE")]
    IWorkHere,
    #[serde(rename = "STAY4_GET1")]
    Stay4Get1,
    #[serde(rename = "PAYDAY")]
    Payday,
}

impl DiscountCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountCode::IWorkHere => "I_WORK_HERE",
            DiscountCode::Stay4Get1 => "STAY4_GET1",
            DiscountCode::Payday => "PAYDAY",
        }
    }
}

impl fmt::Display for DiscountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscountCode {
    type Err = BookingError;

    // Codes are matched exactly, case included
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "I_WORK_HERE" => Ok(DiscountCode::IWorkHere),
            "STAY4_GET1" => Ok(DiscountCode::Stay4Get1),
            "PAYDAY" => Ok(DiscountCode::Payday),
            other => Err(BookingError::UnsupportedDiscountCode(other.to_string())),
        }
    }
}

// Computes the discounted total without touching the reservation
pub fn discounted_total(reservation: &Reservation, code: DiscountCode) -> BookingResult<f64> {
    let total = reservation.total_price();
    let stay = reservation.stay();

    match code {
        DiscountCode::IWorkHere => Ok(total * 0.90),
        DiscountCode::Stay4Get1 => {
            if stay.nights() >= STAY4_GET1_MIN_NIGHTS {
                Ok(total - reservation.nightly_rate())
            } else {
                Err(BookingError::DiscountNotApplicable {
                    code: code.to_string(),
                    reason: format!(
                        "requires at least {} nights, stay has {}",
                        STAY4_GET1_MIN_NIGHTS,
                        stay.nights()
                    ),
                })
            }
        }
        DiscountCode::Payday => {
            let covers_mid_month =
                stay.check_in() <= PAYDAY_MID_MONTH && PAYDAY_MID_MONTH < stay.check_out();
            let covers_month_end = stay.check_out() == PAYDAY_MONTH_END;
            if covers_mid_month || covers_month_end {
                Ok(total * 0.93)
            } else {
                Err(BookingError::DiscountNotApplicable {
                    code: code.to_string(),
                    reason: "stay must include day 15 or day 31".to_string(),
                })
            }
        }
    }
}

/// Applies `code` to the reservation's current total.
///
/// Discounts stack only through repeated calls, each one working from the total
/// left by the previous call, so the caller decides the order. Each code applies
/// at most once per reservation. On error the reservation is left unchanged.
pub fn apply_discount(reservation: &mut Reservation, code: &str) -> BookingResult<DiscountCode> {
    let code: DiscountCode = code.parse()?;
    if reservation.applied_discounts().contains(&code) {
        return Err(BookingError::DiscountNotApplicable {
            code: code.to_string(),
            reason: "already applied to this reservation".to_string(),
        });
    }
    let total = discounted_total(reservation, code)?;
    reservation.record_discount(code, total);
    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reservation::ReservationId;
    use crate::room_type::RoomType;
    use test_case::test_case;

    fn stay(check_in: u32, check_out: u32) -> DayRange {
        DayRange::new(check_in, check_out).unwrap()
    }

    fn reservation_at_rate(nightly_rate: f64, check_in: u32, check_out: u32) -> Reservation {
        let stay = stay(check_in, check_out);
        let total = total_for_rate(nightly_rate, &DayModifierTable::default(), &stay);
        Reservation::new(ReservationId(1), 101, "Guest", stay, nightly_rate, total)
    }

    #[test]
    fn test_standard_room_total_with_flat_modifiers() {
        let room = Room::new(101, 1299.0, RoomType::Standard);
        let total = compute_total_price(&room, &DayModifierTable::default(), &stay(1, 4));
        assert_eq!(total, 3897.0);
    }

    #[test_case(RoomType::Standard; "#1 standard")]
    #[test_case(RoomType::Deluxe; "#2 deluxe")]
    #[test_case(RoomType::Executive; "#3 executive")]
    fn test_total_equals_rate_times_nights(room_type: RoomType) {
        let room = Room::new(201, 1000.0, room_type);
        let total = compute_total_price(&room, &DayModifierTable::default(), &stay(10, 17));
        let expected = 1000.0 * room_type.multiplier() * 7.0;
        assert!((total - expected).abs() < 1e-9, "{} != {}", total, expected);
    }

    #[test]
    fn test_modifiers_apply_to_billed_nights_only() {
        let mut modifiers = DayModifierTable::default();
        modifiers.set(2, 150).unwrap();
        modifiers.set(4, 50).unwrap();

        // Nights 1, 2, 3 are billed; day 4 is the departure day
        let total = total_for_rate(200.0, &modifiers, &stay(1, 4));
        assert_eq!(total, 200.0 + 300.0 + 200.0);
    }

    #[test_case(0, 100; "#1 day zero")]
    #[test_case(32, 100; "#2 day past month end")]
    #[test_case(5, 49; "#3 percent too low")]
    #[test_case(5, 151; "#4 percent too high")]
    fn test_invalid_day_modifier(day: u32, percent: u32) {
        let mut modifiers = DayModifierTable::default();
        assert_eq!(
            modifiers.set(day, percent),
            Err(BookingError::InvalidDayModifier { day, percent })
        );
        assert_eq!(modifiers, DayModifierTable::default());
    }

    #[test]
    fn test_modifier_bounds_are_inclusive() {
        let mut modifiers = DayModifierTable::default();
        assert!(modifiers.set(1, 50).is_ok());
        assert!(modifiers.set(31, 150).is_ok());
        assert_eq!(modifiers.get(1), Some(50));
        assert_eq!(modifiers.get(31), Some(150));
        assert_eq!(modifiers.get(0), None);
    }

    #[test]
    fn test_set_range() {
        let mut modifiers = DayModifierTable::default();
        modifiers.set_range(10, 12, 120).unwrap();
        assert_eq!(modifiers.get(9), Some(100));
        assert_eq!(modifiers.get(10), Some(120));
        assert_eq!(modifiers.get(12), Some(120));
        assert_eq!(modifiers.get(13), Some(100));

        assert_eq!(
            modifiers.set_range(12, 10, 120),
            Err(BookingError::InvalidDateRange { start: 12, end: 10 })
        );
        assert_eq!(
            modifiers.set_range(30, 32, 120),
            Err(BookingError::InvalidDayModifier {
                day: 32,
                percent: 120
            })
        );
        assert_eq!(modifiers.get(30), Some(100));
    }

    #[test]
    fn test_price_per_night() {
        let reservation = reservation_at_rate(250.0, 3, 7);
        assert_eq!(price_per_night(&reservation), 250.0);

        let zero_nights = reservation_at_rate(250.0, 3, 3);
        assert_eq!(zero_nights.total_price(), 0.0);
        assert_eq!(price_per_night(&zero_nights), 0.0);
    }

    #[test]
    fn test_i_work_here() {
        let mut reservation = reservation_at_rate(500.0, 1, 3);
        assert_eq!(reservation.total_price(), 1000.0);
        assert_eq!(
            apply_discount(&mut reservation, "I_WORK_HERE"),
            Ok(DiscountCode::IWorkHere)
        );
        assert_eq!(reservation.total_price(), 900.0);
        assert_eq!(reservation.applied_discounts(), &[DiscountCode::IWorkHere]);
    }

    #[test]
    fn test_stay4_get1() {
        let mut five_nights = reservation_at_rate(200.0, 1, 6);
        assert_eq!(five_nights.total_price(), 1000.0);
        apply_discount(&mut five_nights, "STAY4_GET1").unwrap();
        assert_eq!(five_nights.total_price(), 800.0);

        let mut three_nights = reservation_at_rate(200.0, 1, 4);
        let result = apply_discount(&mut three_nights, "STAY4_GET1");
        assert!(matches!(
            result,
            Err(BookingError::DiscountNotApplicable { .. })
        ));
        assert_eq!(three_nights.total_price(), 600.0);
        assert!(three_nights.applied_discounts().is_empty());
    }

    #[test_case(14, 16, true; "#1 spans the 15th")]
    #[test_case(15, 16, true; "#2 checks in on the 15th")]
    #[test_case(10, 15, false; "#3 leaves on the 15th")]
    #[test_case(28, 31, true; "#4 ends on the 31st")]
    #[test_case(16, 30, false; "#5 misses both")]
    #[test_case(1, 31, true; "#6 whole month")]
    fn test_payday(check_in: u32, check_out: u32, applicable: bool) {
        let mut reservation = reservation_at_rate(100.0, check_in, check_out);
        let before = reservation.total_price();
        let result = apply_discount(&mut reservation, "PAYDAY");
        if applicable {
            assert_eq!(result, Ok(DiscountCode::Payday));
            assert!((reservation.total_price() - before * 0.93).abs() < 1e-9);
        } else {
            assert!(matches!(
                result,
                Err(BookingError::DiscountNotApplicable { .. })
            ));
            assert_eq!(reservation.total_price(), before);
        }
    }

    #[test_case("SUMMER"; "#1 unknown code")]
    #[test_case("i_work_here"; "#2 wrong case")]
    #[test_case(""; "#3 empty")]
    fn test_unsupported_code(code: &str) {
        let mut reservation = reservation_at_rate(100.0, 1, 2);
        assert_eq!(
            apply_discount(&mut reservation, code),
            Err(BookingError::UnsupportedDiscountCode(code.to_string()))
        );
    }

    #[test_case("I_WORK_HERE"; "#1 staff rate")]
    #[test_case("STAY4_GET1"; "#2 free night")]
    #[test_case("PAYDAY"; "#3 payday")]
    fn test_code_applies_once(code: &str) {
        let mut modifiers = DayModifierTable::default();
        modifiers.set_range(1, 31, MIN_MODIFIER_PERCENT).unwrap();
        let stay = stay(11, 16);
        let total = total_for_rate(200.0, &modifiers, &stay);
        let mut reservation = Reservation::new(ReservationId(1), 101, "Guest", stay, 200.0, total);
        assert_eq!(reservation.total_price(), 500.0);

        apply_discount(&mut reservation, code).unwrap();
        let after_first = reservation.total_price();
        assert!(matches!(
            apply_discount(&mut reservation, code),
            Err(BookingError::DiscountNotApplicable { .. })
        ));
        assert_eq!(reservation.total_price(), after_first);
        assert_eq!(reservation.applied_discounts().len(), 1);
        assert!(reservation.total_price() > 0.0);
    }

    #[test]
    fn test_discount_order_matters() {
        let mut first = reservation_at_rate(200.0, 1, 6);
        apply_discount(&mut first, "I_WORK_HERE").unwrap();
        apply_discount(&mut first, "STAY4_GET1").unwrap();

        let mut second = reservation_at_rate(200.0, 1, 6);
        apply_discount(&mut second, "STAY4_GET1").unwrap();
        apply_discount(&mut second, "I_WORK_HERE").unwrap();

        assert!((first.total_price() - 700.0).abs() < 1e-9);
        assert!((second.total_price() - 720.0).abs() < 1e-9);
        assert_eq!(
            second.applied_discounts(),
            &[DiscountCode::Stay4Get1, DiscountCode::IWorkHere]
        );
    }
}
