//! Calendar date validation for the day/month/year triples typed into the
//! birth and death fields.
//!
//! A triple is valid only if it survives a round trip through the calendar:
//! building the date and reading back its year/month/day must give the same
//! numbers. That rejects overflow such as February 30, which a lenient
//! calendar would silently roll into March.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

pub const MIN_YEAR: i64 = 1900;
pub const MAX_YEAR: i64 = 2500;

/// A validated calendar date. Only obtainable through [`DateTriple::from_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTriple {
    date: NaiveDate,
}

impl DateTriple {
    /// Validates raw field values. `None` stands for a missing field.
    pub fn from_parts(day: Option<i64>, month: Option<i64>, year: Option<i64>) -> Option<Self> {
        let (day, month, year) = (day?, month?, year?);

        // Zero and negative values count as missing
        if day <= 0 || month <= 0 || year <= 0 {
            return None;
        }

        if !(1..=31).contains(&day) || !(1..=12).contains(&month) {
            return None;
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }

        let (day, month, year) = (day as u32, month as u32, year as i32);
        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        if date.year() != year || date.month() != month || date.day() != day {
            return None;
        }

        Some(Self { date })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Local midnight at the start of this date.
    pub fn instant(&self) -> NaiveDateTime {
        self.date().and_time(NaiveTime::MIN)
    }
}

/// Returns true when (day, month, year) names a real calendar date in range.
pub fn is_valid_date(day: i64, month: i64, year: i64) -> bool {
    DateTriple::from_parts(Some(day), Some(month), Some(year)).is_some()
}
