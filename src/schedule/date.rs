use chrono::{DateTime, Datelike, Duration, Local, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern of the listing's broadcast time text, e.g.
/// `12/23（土）22:00～22:54`. The weekday glyphs and the range separator are
/// skipped as arbitrary non-digit runs.
static BROADCAST_RANGE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d{2})/(\d{2})\D*(\d{2}):(\d{2})\D(\d{2}):(\d{2})")
        .expect("broadcast range pattern compiles")
});

/// Parses a broadcast date-range string into absolute local timestamps.
///
/// The text carries no year, so both timestamps are dated in the year of
/// `now`; a range parsed near a year boundary can therefore land in the
/// wrong year. Ranges that cross midnight end on the following day. Seconds
/// are zeroed. Returns `None` for text that does not match the pattern or
/// does not name a real calendar date; callers skip such nodes rather than
/// fail.
pub fn parse_broadcast_range(
    raw: &str,
    now: DateTime<Local>,
) -> Option<(DateTime<Local>, DateTime<Local>)> {
    let caps = BROADCAST_RANGE_RE.captures(raw)?;

    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let start_hour: u32 = caps[3].parse().ok()?;
    let start_min: u32 = caps[4].parse().ok()?;
    let end_hour: u32 = caps[5].parse().ok()?;
    let end_min: u32 = caps[6].parse().ok()?;

    let year = now.year();
    let start = Local
        .with_ymd_and_hms(year, month, day, start_hour, start_min, 0)
        .single()?;
    let mut end = Local
        .with_ymd_and_hms(year, month, day, end_hour, end_min, 0)
        .single()?;

    if end < start {
        end += Duration::days(1);
    }

    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn at(year: i32) -> DateTime<Local> {
        Local.with_ymd_and_hms(year, 6, 1, 12, 0, 0).single().unwrap()
    }

    #[test]
    fn test_parses_listing_format() {
        let (start, end) = parse_broadcast_range("12/23（土）22:00～22:54", at(2024)).unwrap();

        assert_eq!(start.year(), 2024);
        assert_eq!(start.month(), 12);
        assert_eq!(start.month0(), 11);
        assert_eq!(start.day(), 23);
        assert_eq!((start.hour(), start.minute(), start.second()), (22, 0, 0));
        assert_eq!(end.year(), 2024);
        assert_eq!((end.hour(), end.minute(), end.second()), (22, 54, 0));
        assert!(end >= start);
    }

    #[test]
    fn test_year_comes_from_clock() {
        let (start, _) = parse_broadcast_range("01/05（金）08:00～08:30", at(2031)).unwrap();
        assert_eq!(start.year(), 2031);
    }

    #[test]
    fn test_midnight_crossing_ends_next_day() {
        let (start, end) = parse_broadcast_range("12/23（土）23:30～00:24", at(2024)).unwrap();
        assert!(end >= start);
        assert_eq!(end.day(), 24);
    }

    #[test]
    fn test_malformed_strings_yield_none() {
        for raw in [
            "",
            "ニュース7",
            "12/23",
            "22:00～22:54",
            "12-23 22:00～22:54",
            "2/3（土）2:00～3:00",
        ] {
            assert!(parse_broadcast_range(raw, at(2024)).is_none(), "{:?}", raw);
        }
    }

    #[test]
    fn test_impossible_calendar_date_yields_none() {
        assert!(parse_broadcast_range("13/45（土）22:00～22:54", at(2024)).is_none());
        assert!(parse_broadcast_range("02/30（金）22:00～22:54", at(2024)).is_none());
        assert!(parse_broadcast_range("12/23（土）25:00～26:00", at(2024)).is_none());
    }
}
