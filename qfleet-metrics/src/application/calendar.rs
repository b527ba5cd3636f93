//! Calendar boundaries under a fixed UTC offset

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc};

/// Local midnight of `date`, expressed in UTC
pub fn midnight_utc(date: NaiveDate, offset: FixedOffset) -> DateTime<Utc> {
    let local_midnight = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    // A fixed offset has no gaps, so the mapping is always unique.
    (local_midnight - Duration::seconds(i64::from(offset.local_minus_utc()))).and_utc()
}

/// Local midnight of `date`, expressed in the offset itself
pub fn midnight_local(date: NaiveDate, offset: FixedOffset) -> DateTime<FixedOffset> {
    offset.from_utc_datetime(&midnight_utc(date, offset).naive_utc())
}

pub fn local_date(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

/// Monday of the ISO week containing `date`
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// First day of the month `months_back` months before the month of `date`
pub fn month_start(date: NaiveDate, months_back: u32) -> NaiveDate {
    let index = date.year() * 12 + date.month0() as i32 - months_back as i32;
    let (year, month0) = (index.div_euclid(12), index.rem_euclid(12) as u32);
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-06-01 is a Saturday
        assert_eq!(week_start(date(2024, 6, 1)), date(2024, 5, 27));
        assert_eq!(week_start(date(2024, 5, 27)), date(2024, 5, 27));
        assert_eq!(week_start(date(2024, 6, 2)), date(2024, 5, 27));
    }

    #[test]
    fn month_start_crosses_year_boundary() {
        assert_eq!(month_start(date(2024, 2, 15), 0), date(2024, 2, 1));
        assert_eq!(month_start(date(2024, 2, 15), 5), date(2023, 9, 1));
        assert_eq!(month_start(date(2024, 1, 31), 1), date(2023, 12, 1));
    }

    #[test]
    fn midnight_respects_offset() {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(
            midnight_utc(date(2024, 6, 1), plus_two),
            Utc.with_ymd_and_hms(2024, 5, 31, 22, 0, 0).unwrap()
        );
        assert_eq!(
            midnight_local(date(2024, 6, 1), plus_two).to_rfc3339(),
            "2024-06-01T00:00:00+02:00"
        );
    }

    #[test]
    fn local_date_shifts_across_midnight() {
        let minus_five = FixedOffset::west_opt(5 * 3600).unwrap();
        let instant = Utc.with_ymd_and_hms(2024, 6, 1, 3, 0, 0).unwrap();
        assert_eq!(local_date(instant, minus_five), date(2024, 5, 31));
    }
}
