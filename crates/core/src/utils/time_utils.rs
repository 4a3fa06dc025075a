use chrono::{Datelike, Months, NaiveDate};

use crate::constants::{DATE_FORMAT, MONTH_FORMAT};
use crate::errors::{Error, Result};

/// First and last calendar day (inclusive) of the month containing `today`.
pub fn month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = today.with_day(1).unwrap_or(today);
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(today);
    (first, last)
}

/// Year-month key such as `2024-03`.
pub fn month_key(date: NaiveDate) -> String {
    date.format(MONTH_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::invalid_field(field, "expected a date in YYYY-MM-DD form"));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| Error::invalid_field(field, format!("'{value}' is not a calendar date")))
}

/// Parses a strict `YYYY-MM` month key and returns it normalised.
pub fn parse_month(field: &str, value: &str) -> Result<String> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 7
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(Error::invalid_field(field, "expected a month in YYYY-MM form"));
    }
    let first = format!("{value}-01");
    NaiveDate::parse_from_str(&first, DATE_FORMAT)
        .map(month_key)
        .map_err(|_| Error::invalid_field(field, format!("'{value}' is not a calendar month")))
}
