//! @ai:module:intent Convert between calendar dates and unix-second cutoffs
//! @ai:module:layer infrastructure
//! @ai:module:public_api end_of_day, end_of_day_in, format_date, format_date_in

use crate::error::{Error, Result};
use chrono::{Local, NaiveDate, TimeZone};

/// @ai:intent Cutoff covering the whole of a `YYYY-MM-DD` day in local time
/// @ai:effects reads local timezone
pub fn end_of_day(date: &str) -> Result<i64> {
    end_of_day_in(date, &Local)
}

/// @ai:intent Unix seconds of 23:59:59 on `date` in `tz`
/// @ai:example ("2024-03-01", Utc) -> 1709337599
/// @ai:effects pure
pub fn end_of_day_in<Tz: TimeZone>(date: &str, tz: &Tz) -> Result<i64> {
    let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(date.to_string()))?;
    let last_second = day
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| Error::InvalidDate(date.to_string()))?;

    // On a DST fold, take the later instant so the whole day is included.
    tz.from_local_datetime(&last_second)
        .latest()
        .map(|dt| dt.timestamp())
        .ok_or_else(|| Error::InvalidDate(date.to_string()))
}

/// @ai:intent Render a timestamp as a local calendar date, `-` when absent
pub fn format_date(timestamp: i64) -> String {
    format_date_in(timestamp, &Local)
}

/// @ai:effects pure
pub fn format_date_in<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if timestamp == 0 {
        return "-".to_string();
    }

    tz.timestamp_opt(timestamp, 0)
        .single()
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_end_of_day_utc() {
        assert_eq!(end_of_day_in("2024-03-01", &Utc).unwrap(), 1_709_337_599);
    }

    #[test]
    fn test_end_of_day_offset() {
        let tz = FixedOffset::east_opt(3600).unwrap();
        assert_eq!(end_of_day_in("2024-03-01", &tz).unwrap(), 1_709_337_599 - 3600);
    }

    #[test]
    fn test_end_of_day_rejects_garbage() {
        assert!(matches!(
            end_of_day_in("03/01/2024", &Utc),
            Err(Error::InvalidDate(_))
        ));
        assert!(end_of_day_in("2024-02-30", &Utc).is_err());
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date_in(1_709_337_599, &Utc), "2024-03-01");
        assert_eq!(format_date_in(0, &Utc), "-");
    }
}
