use anyhow::{anyhow, Result};
use chrono::{Days, NaiveDate};
use chrono_english::{parse_date_string, Dialect};

use super::clock::Clock;

/// This is the standard way of converting a date to a record key in scrun.
pub fn date_to_record_name(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Local calendar date of the clock's current moment.
pub fn today_date(clock: &dyn Clock) -> NaiveDate {
    clock.now().date_naive()
}

pub fn tomorrow_date(clock: &dyn Clock) -> Result<NaiveDate> {
    next_day(today_date(clock))
}

/// Returns the following calendar date. Fails only for the last date chrono can represent.
pub fn next_day(date: NaiveDate) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(1))
        .ok_or_else(|| anyhow!("{date} has no following day"))
}

/// Parses a date typed by the user. `YYYY-MM-DD` is tried first, anything else goes through
/// chrono_english relative to the clock, so "yesterday" or "15/03/2025" work too.
pub fn parse_user_date(value: &str, clock: &dyn Clock, dialect: Dialect) -> Result<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    parse_date_string(value, clock.now(), dialect)
        .map(|v| v.date_naive())
        .map_err(|e| anyhow!("Can't parse {value} into a date: {e}"))
}
