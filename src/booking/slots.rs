use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};

use crate::error::AppError;
use crate::models::slot::Slot;

pub const SLOTS_PER_DAY: u32 = 14;
pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const SLOT_TIME_FORMAT: &str = "%I:%M %p";

const FIRST_SLOT_HOUR: u32 = 10;
const SLOT_LENGTH_MINUTES: u32 = 30;

/// The bookable half-hour labels of a day, `10:00 AM` through `04:30 PM`.
pub fn generate_time_slots() -> Vec<String> {
    (0..SLOTS_PER_DAY)
        .filter_map(|i| {
            let minutes = FIRST_SLOT_HOUR * 60 + i * SLOT_LENGTH_MINUTES;
            NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
        })
        .map(|t| t.format(SLOT_TIME_FORMAT).to_string())
        .collect()
}

pub fn is_bookable_time(time: &str) -> bool {
    generate_time_slots().iter().any(|slot| slot == time)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| AppError::Validation(format!("{} is not a date in YYYY-MM-DD form", raw)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Every slot of the day, booked iff its label is in `booked`.
pub fn day_slots(booked: &[String]) -> Vec<Slot> {
    generate_time_slots()
        .into_iter()
        .map(|time| {
            let booked = booked.iter().any(|b| *b == time);
            Slot { time, booked }
        })
        .collect()
}

/// Slots for `date`, or `None` when the date falls on a weekend.
pub fn slots_for_date(date: NaiveDate, booked: &[String]) -> Option<Vec<Slot>> {
    if is_weekend(date) {
        None
    } else {
        Some(day_slots(booked))
    }
}
