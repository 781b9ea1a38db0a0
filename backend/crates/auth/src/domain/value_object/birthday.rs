//! Birthday parsing
//!
//! Dates travel as `YYYY-MM-DD`. An absent or empty string means "no birthday".

use chrono::NaiveDate;
use thiserror::Error;

pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("birthday '{0}' is not a valid YYYY-MM-DD date")]
pub struct BirthdayError(pub String);

pub fn parse_birthday(raw: Option<&str>) -> Result<Option<NaiveDate>, BirthdayError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, BIRTHDAY_FORMAT)
            .map(Some)
            .map_err(|_| BirthdayError(s.to_string())),
    }
}

pub fn format_birthday(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(BIRTHDAY_FORMAT).to_string())
        .unwrap_or_default()
}
