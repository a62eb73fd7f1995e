//! Date and time display utilities.

use std::fmt;

use jiff::{civil::Date, tz::TimeZone, Timestamp};

/// A wrapper around `Timestamp` that formats it in the system time zone.
///
/// The display format follows the pattern: `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Shorter `HH:MM` (with date) rendering used for step times.
pub struct LocalTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .to_zoned(TimeZone::system())
                .strftime("%Y-%m-%d %H:%M")
        )
    }
}

/// Inclusive range of trip days.
///
/// ```rust
/// use jiff::civil::date;
/// use waypoint_core::display::DateRange;
///
/// let weekend = DateRange(&date(2024, 6, 1), &date(2024, 6, 2));
/// assert_eq!(weekend.to_string(), "2024-06-01 to 2024-06-02");
///
/// let day_trip = DateRange(&date(2024, 6, 1), &date(2024, 6, 1));
/// assert_eq!(day_trip.to_string(), "2024-06-01");
/// ```
pub struct DateRange<'a>(pub &'a Date, pub &'a Date);

impl fmt::Display for DateRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == self.1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "{} to {}", self.0, self.1)
        }
    }
}
