//! Utility functions for the sales_forecast crate

use chrono::{Datelike, Duration, NaiveDate};

/// Date parsing for the spellings commonly found in sales exports
pub mod date_parser {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    /// Date-only formats, tried in order. Month-first wins on ambiguity.
    ///
    /// `%Y` accepts one to four digits, so formats using it are only tried
    /// when the input carries a four-digit year.
    const DATE_FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%m/%d/%Y",
        "%m-%d-%Y",
        "%m/%d/%y",
        "%m-%d-%y",
        "%d %B %Y",
        "%d %b %Y",
        "%B %d, %Y",
        "%b %d, %Y",
    ];

    /// Date-and-time formats, tried in order
    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
        "%Y/%m/%d %H:%M:%S",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%m/%d/%y %H:%M:%S",
        "%m/%d/%y %H:%M",
    ];

    fn has_four_digit_year(input: &str) -> bool {
        input
            .split(|c: char| !c.is_ascii_digit())
            .any(|run| run.len() == 4)
    }

    /// Parse a date or timestamp string, returning `None` if no format matches
    pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(dt.naive_local());
        }

        let long_year = has_four_digit_year(input);
        let usable = |format: &&&str| long_year || !format.contains("%Y");

        for format in DATETIME_FORMATS.iter().filter(usable) {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
                return Some(dt);
            }
        }

        DATE_FORMATS
            .iter()
            .filter(usable)
            .find_map(|format| NaiveDate::parse_from_str(input, format).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    }
}

/// Number of months since year zero, used to bucket dates by calendar month
pub fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// Last day of the month with the given [`month_index`]
pub fn month_end_from_index(index: i32) -> Option<NaiveDate> {
    let year = index.div_euclid(12);
    let month0 = index.rem_euclid(12) as u32;
    let first_of_next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)?
    };
    Some(first_of_next - Duration::days(1))
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    month_end_from_index(month_index(date))
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

/// Month-end labels for the `horizon` months after the month containing `last`
pub fn future_month_ends(last: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    let start = month_index(last);
    (1..=horizon as i32)
        .filter_map(|offset| month_end_from_index(start + offset))
        .collect()
}
