use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

// ── Formats ───────────────────────────────────────────────────────────────────

/// Creation timestamp as it appears in the exported posts, always UTC.
pub const RAW_TIMESTAMP_FORMAT: &str = "%a %b %d %H:%M:%S +0000 %Y";

/// Fixed-width, lexicographically sortable timestamp stored on every post.
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Minute-resolution prefix used for range bounds over stored timestamps.
pub const WINDOW_BOUND_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Calendar day format accepted for report days.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

// ── Conversion ────────────────────────────────────────────────────────────────

/// Parse an export timestamp such as `"Sat Feb 14 10:30:00 +0000 2015"`.
///
/// The weekday must agree with the date.
pub fn parse_raw_timestamp(s: &str) -> crate::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, RAW_TIMESTAMP_FORMAT)
        .map_err(|e| crate::AnalyticsError::TimestampParse(format!("{s:?}: {e}")))
}

/// Reformat an export timestamp into the stored representation.
///
/// The UTC wall-clock value is kept as-is; no zone conversion happens here.
pub fn convert_raw_timestamp(s: &str) -> crate::Result<String> {
    Ok(parse_raw_timestamp(s)?
        .format(STORED_TIMESTAMP_FORMAT)
        .to_string())
}

/// Parse a `YYYY-MM-DD` report day.
pub fn parse_day(s: &str) -> crate::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DAY_FORMAT)
        .map_err(|e| crate::AnalyticsError::Config(format!("invalid day {s:?}: {e}")))
}

// ── HourWindow ────────────────────────────────────────────────────────────────

/// One local clock hour on one day, with the stored-timestamp bounds that
/// select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourWindow {
    /// The requested day.
    pub day: NaiveDate,
    /// The requested (uncompensated) hour, used as the report label.
    pub hour: u32,
    /// Inclusive lower bound, e.g. `"2015-02-14 10:00"`.
    pub start: String,
    /// Exclusive upper bound, e.g. `"2015-02-14 11:00"`.
    pub end: String,
}

impl HourWindow {
    /// Build the window for `hour` on `day`, moving both bounds forward by
    /// `shift_hours`.
    ///
    /// Bounds that cross midnight roll over onto the adjacent day.
    pub fn new(day: NaiveDate, hour: u32, shift_hours: i64) -> crate::Result<Self> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0).ok_or_else(|| {
            crate::AnalyticsError::Config(format!("hour {hour} is outside 0-23"))
        })?;
        let out_of_range = || {
            crate::AnalyticsError::Config(format!(
                "hour shift {shift_hours} moves {day} {hour}:00 out of range"
            ))
        };
        let start = TimeDelta::try_hours(shift_hours)
            .and_then(|shift| day.and_time(time).checked_add_signed(shift))
            .ok_or_else(out_of_range)?;
        let end = start
            .checked_add_signed(TimeDelta::hours(1))
            .ok_or_else(out_of_range)?;

        Ok(Self {
            day,
            hour,
            start: start.format(WINDOW_BOUND_FORMAT).to_string(),
            end: end.format(WINDOW_BOUND_FORMAT).to_string(),
        })
    }

    /// The day in `YYYY-MM-DD` form.
    pub fn day_label(&self) -> String {
        self.day.format(DAY_FORMAT).to_string()
    }
}

/// Build every window in day-major, hour-ascending order.
pub fn hour_windows(
    days: &[NaiveDate],
    first_hour: u32,
    last_hour: u32,
    shift_hours: i64,
) -> crate::Result<Vec<HourWindow>> {
    if first_hour > last_hour {
        return Err(crate::AnalyticsError::Config(format!(
            "first hour {first_hour} is after last hour {last_hour}"
        )));
    }

    let mut windows = Vec::with_capacity(days.len() * (last_hour - first_hour + 1) as usize);
    for day in days {
        for hour in first_hour..=last_hour {
            windows.push(HourWindow::new(*day, hour, shift_hours)?);
        }
    }
    Ok(windows)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn day(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn parse_stored_timestamp(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, STORED_TIMESTAMP_FORMAT).unwrap()
    }

    // ── convert_raw_timestamp ─────────────────────────────────────────────────

    #[test]
    fn test_convert_raw_timestamp() {
        let stored = convert_raw_timestamp("Sat Feb 14 10:30:00 +0000 2015").unwrap();
        assert_eq!(stored, "2015-02-14 10:30:00");
    }

    #[test]
    fn test_convert_raw_timestamp_round_trip_keeps_wall_clock() {
        let raw = "Sun Feb 15 23:59:07 +0000 2015";
        let original = parse_raw_timestamp(raw).unwrap();
        let back = parse_stored_timestamp(&convert_raw_timestamp(raw).unwrap());

        assert_eq!(back, original);
        assert_eq!(
            (back.year(), back.month(), back.day()),
            (2015, 2, 15)
        );
        assert_eq!((back.hour(), back.minute(), back.second()), (23, 59, 7));
    }

    #[test]
    fn test_convert_raw_timestamp_rejects_iso() {
        let err = convert_raw_timestamp("2015-02-14T10:30:00Z").unwrap_err();
        assert!(matches!(err, crate::AnalyticsError::TimestampParse(_)));
    }

    #[test]
    fn test_convert_raw_timestamp_rejects_other_offset() {
        assert!(convert_raw_timestamp("Sat Feb 14 10:30:00 +0100 2015").is_err());
    }

    #[test]
    fn test_convert_raw_timestamp_rejects_surrounding_whitespace() {
        assert!(convert_raw_timestamp(" Sat Feb 14 10:30:00 +0000 2015").is_err());
    }

    #[test]
    fn test_convert_raw_timestamp_rejects_wrong_weekday() {
        // 2015-02-14 was a Saturday.
        assert!(convert_raw_timestamp("Mon Feb 14 10:30:00 +0000 2015").is_err());
    }

    // ── parse_day ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_day_invalid() {
        let err = parse_day("14/02/2015").unwrap_err();
        assert!(matches!(err, crate::AnalyticsError::Config(_)));
    }

    // ── HourWindow ────────────────────────────────────────────────────────────

    #[test]
    fn test_hour_window_applies_shift() {
        let w = HourWindow::new(day("2015-02-14"), 9, 1).unwrap();
        assert_eq!(w.start, "2015-02-14 10:00");
        assert_eq!(w.end, "2015-02-14 11:00");
        assert_eq!(w.hour, 9);
        assert_eq!(w.day_label(), "2015-02-14");
    }

    #[test]
    fn test_hour_window_zero_pads_hours() {
        let w = HourWindow::new(day("2015-02-14"), 7, 1).unwrap();
        assert_eq!(w.start, "2015-02-14 08:00");
        assert_eq!(w.end, "2015-02-14 09:00");
    }

    #[test]
    fn test_hour_window_rolls_over_midnight() {
        let w = HourWindow::new(day("2015-02-14"), 23, 1).unwrap();
        assert_eq!(w.start, "2015-02-15 00:00");
        assert_eq!(w.end, "2015-02-15 01:00");
    }

    #[test]
    fn test_hour_window_rejects_hour_24() {
        assert!(HourWindow::new(day("2015-02-14"), 24, 1).is_err());
    }

    #[test]
    fn test_hour_window_huge_shift_is_config_error() {
        let err = HourWindow::new(day("2015-02-14"), 9, 9_000_000_000_000).unwrap_err();
        assert!(matches!(err, crate::AnalyticsError::Config(_)));
    }

    #[test]
    fn test_hour_windows_shift_past_calendar_end_is_config_error() {
        // Within TimeDelta's range but beyond NaiveDateTime::MAX.
        let result = hour_windows(&[day("2015-02-14")], 9, 15, 2_000_000_000_000);
        assert!(matches!(result, Err(crate::AnalyticsError::Config(_))));
    }

    // ── hour_windows ──────────────────────────────────────────────────────────

    #[test]
    fn test_hour_windows_day_major_order() {
        let days = [day("2015-02-14"), day("2015-02-15")];
        let windows = hour_windows(&days, 9, 15, 1).unwrap();

        assert_eq!(windows.len(), 14);
        assert_eq!(windows[0].day_label(), "2015-02-14");
        assert_eq!(windows[0].hour, 9);
        assert_eq!(windows[6].hour, 15);
        assert_eq!(windows[6].end, "2015-02-14 17:00");
        assert_eq!(windows[7].day_label(), "2015-02-15");
        assert_eq!(windows[7].hour, 9);
    }

    #[test]
    fn test_hour_windows_rejects_inverted_range() {
        assert!(hour_windows(&[day("2015-02-14")], 16, 9, 1).is_err());
    }

    #[test]
    fn test_hour_windows_no_days() {
        assert!(hour_windows(&[], 9, 15, 1).unwrap().is_empty());
    }
}
