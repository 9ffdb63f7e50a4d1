//! Date and time utilities.

use std::{fmt, str::FromStr};

use time::{
    error::Parse,
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    Month,
};

/// `YYYY-MM-DD` format of a [`Date`].
const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// UTC date and time.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct DateTime(time::OffsetDateTime);

impl DateTime {
    /// Creates a new [`DateTime`] representing the current date and time.
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn now() -> Self {
        let now = time::OffsetDateTime::now_utc();
        Self(
            now.replace_microsecond(now.microsecond())
                .expect("infallible"),
        )
    }

    /// Returns the [`DateTime`] as an [RFC 3339] string.
    ///
    /// [RFC 3339]: https://tools.ietf.org/html/rfc3339
    #[expect(clippy::missing_panics_doc, reason = "infallible")]
    #[must_use]
    pub fn to_rfc3339(&self) -> String {
        self.0.format(&Rfc3339).unwrap_or_else(|e| {
            panic!("cannot format `DateTime` as RFC 3339: {e}")
        })
    }

    /// Returns the UTC calendar [`Date`] of this [`DateTime`].
    #[must_use]
    pub fn date(&self) -> Date {
        Date(self.0.date())
    }
}

/// Calendar date in `YYYY-MM-DD` format, without a time zone.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Date(time::Date);

impl Date {
    /// Returns the current UTC [`Date`].
    #[must_use]
    pub fn today() -> Self {
        DateTime::now().date()
    }

    /// Creates a new [`Date`] from its calendar components.
    ///
    /// [`None`] is returned if the components don't form a valid date.
    #[must_use]
    pub fn from_ymd(year: i32, month: u8, day: u8) -> Option<Self> {
        let month = Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day).ok().map(Self)
    }

    /// Returns the [`Date`] which is the provided number of `days` after
    /// this one.
    ///
    /// [`None`] is returned on calendar overflow.
    #[must_use]
    pub fn plus_days(self, days: u16) -> Option<Self> {
        self.0
            .checked_add(time::Duration::days(i64::from(days)))
            .map(Self)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.format(DATE_FORMAT).map_err(|_| fmt::Error)?)
    }
}

impl FromStr for Date {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        time::Date::parse(s, DATE_FORMAT).map(Self).map_err(|e| {
            if matches!(e, Parse::TryFromParsed(_)) {
                "invalid calendar date"
            } else {
                "expected `YYYY-MM-DD` format"
            }
        })
    }
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::{Date, DateTime};

    #[test]
    fn parses_calendar_dates() {
        let date = Date::from_str("2026-10-17").unwrap();

        assert_eq!(date, Date::from_ymd(2026, 10, 17).unwrap());
        assert_eq!(date.to_string(), "2026-10-17");

        assert_eq!(
            Date::from_str("2026-02-30"),
            Err("invalid calendar date"),
        );
        assert!(Date::from_str("2026-1-5").is_err());
        assert!(Date::from_str("17/10/2026").is_err());
        assert!(Date::from_str("2026-10-17-01").is_err());
    }

    #[test]
    fn adds_days_across_months() {
        let date = Date::from_ymd(2026, 10, 17).unwrap();

        assert_eq!(
            date.plus_days(30).unwrap(),
            Date::from_ymd(2026, 11, 16).unwrap(),
        );
        assert!(date < date.plus_days(3).unwrap());
    }

    #[test]
    fn formats_rfc3339_in_utc() {
        let now = DateTime::now();
        let formatted = now.to_rfc3339();

        assert!(formatted.starts_with(&now.date().to_string()), "{formatted}");
        assert!(formatted.ends_with('Z'), "{formatted}");
    }
}
