//! Helpers for the date labels carried in the analysis payload.
//!
//! The backend is not consistent about label shape: series and forecast dates
//! come as `YYYY-MM-DD`, validation dates as `YYYY-MM-DD HH:MM:SS`.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_TIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"];

/// Calendar day a label refers to, if it is a date or a date-time.
pub fn calendar_day(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    if let Ok(date) = NaiveDate::parse_from_str(label, DATE_FORMAT) {
        return Some(date);
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(label, format).ok())
        .map(|date_time| date_time.date())
}
