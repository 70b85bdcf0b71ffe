//! `MM/YYYY` month labels.
//!
//! Labels are compared as calendar months, never as strings. A label that is
//! not a valid month sorts after every valid one, by its text.

use chrono::{Datelike, NaiveDate};
use std::cmp::Ordering;

/// Parses `"03/2024"` or `"3/2024"` into the first day of that month.
pub fn parse(label: &str) -> Option<NaiveDate> {
    let (month, year) = label.trim().split_once('/')?;
    if year.len() != 4 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Rewrites a valid label with a two-digit month. Invalid labels are returned as-is.
pub fn zero_pad(label: &str) -> String {
    match parse(label) {
        Some(date) => format!("{:02}/{}", date.month(), date.year()),
        None => label.to_string(),
    }
}

/// Chronological ordering of two labels.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (parse(a), parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}
