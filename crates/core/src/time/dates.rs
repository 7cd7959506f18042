use crate::error::ResultError;
use anyhow::Context;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc, Weekday};

pub const QUERY_DATE_FORMAT: &str = "%Y/%m/%d";
pub const DISPLAY_DATE_FORMAT: &str = "%Y/%m/%d";

pub const ALLOWED_DAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

// "latest" covers this many days before today, plus today.
const DEFAULT_WINDOW_DAYS_BACK: i64 = 3;

/// Parses a `YYYY/MM/DD` query date. `field` names the parameter in the error.
///
/// Only the zero-padded form is accepted; `2022/8/1` and `2022-08-01` are rejected even
/// though they name valid dates.
pub fn parse_query_date(value: &str, field: &'static str) -> Result<NaiveDate, ResultError> {
    let bytes = value.as_bytes();
    let shape_ok = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'/',
            _ => b.is_ascii_digit(),
        });
    if !shape_ok {
        return Err(ResultError::InvalidDateFormat { field });
    }

    NaiveDate::parse_from_str(value, QUERY_DATE_FORMAT)
        .map_err(|_| ResultError::InvalidDateFormat { field })
}

/// Three-letter English abbreviation, matching [`ALLOWED_DAYS`].
pub fn weekday_abbrev(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

pub fn utc_offset(hours: i32) -> anyhow::Result<FixedOffset> {
    FixedOffset::east_opt(hours * 3600).with_context(|| format!("invalid UTC offset: {hours}h"))
}

/// Calendar date at `now_utc` in the zone at `offset`.
pub fn local_today(now_utc: DateTime<Utc>, offset: &FixedOffset) -> NaiveDate {
    now_utc.with_timezone(offset).date_naive()
}

/// Inclusive date window a query covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ResultError> {
        if end < start {
            return Err(ResultError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(day: NaiveDate) -> Self {
        Self { start: day, end: day }
    }

    pub fn today(today: NaiveDate) -> Self {
        Self::single(today)
    }

    pub fn yesterday(today: NaiveDate) -> Self {
        Self::single(today - Duration::days(1))
    }

    pub fn default_window(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(DEFAULT_WINDOW_DAYS_BACK),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn parses_padded_dates() {
        assert_eq!(parse_query_date("2022/08/01", "start_date").unwrap(), d(2022, 8, 1));
        assert_eq!(parse_query_date("2024/02/29", "start_date").unwrap(), d(2024, 2, 29));
    }

    #[test]
    fn rejects_other_formats() {
        for bad in [
            "2022-08-01",
            "2022/8/1",
            "08/01/2022",
            "2022/08/01 ",
            " 2022/08/01",
            "2022/13/01",
            "2023/02/29",
            "",
            "yesterday",
        ] {
            let err = parse_query_date(bad, "end_date").unwrap_err();
            assert!(
                matches!(err, ResultError::InvalidDateFormat { field: "end_date" }),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn weekday_abbrevs_match_allowed_days() {
        // 2022-08-01 is a Monday.
        for (i, expected) in ALLOWED_DAYS.iter().enumerate() {
            assert_eq!(weekday_abbrev(d(2022, 8, 1 + i as u32)), *expected);
        }
    }

    #[test]
    fn local_today_shifts_across_midnight() {
        // 2022-08-11 17:30 UTC is already 2022-08-12 in Manila.
        let now = Utc.with_ymd_and_hms(2022, 8, 11, 17, 30, 0).unwrap();
        assert_eq!(local_today(now, &utc_offset(8).unwrap()), d(2022, 8, 12));
        assert_eq!(local_today(now, &utc_offset(0).unwrap()), d(2022, 8, 11));
        assert_eq!(local_today(now, &utc_offset(-10).unwrap()), d(2022, 8, 11));
    }

    #[test]
    fn rejects_impossible_offset() {
        assert!(utc_offset(30).is_err());
    }

    #[test]
    fn windows_relative_to_today() {
        let today = d(2022, 8, 1);
        assert_eq!(DateWindow::today(today), DateWindow::single(today));
        assert_eq!(DateWindow::yesterday(today), DateWindow::single(d(2022, 7, 31)));
        let latest = DateWindow::default_window(today);
        assert_eq!(latest.start, d(2022, 7, 29));
        assert_eq!(latest.end, today);
        assert!(latest.contains(d(2022, 7, 29)));
        assert!(!latest.contains(d(2022, 7, 28)));
    }

    #[test]
    fn rejects_inverted_window() {
        let err = DateWindow::new(d(2022, 8, 12), d(2022, 8, 1)).unwrap_err();
        assert!(matches!(err, ResultError::InvalidDateRange { .. }));
        assert!(DateWindow::new(d(2022, 8, 1), d(2022, 8, 1)).is_ok());
    }
}
