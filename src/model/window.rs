//! The inclusive day range a report covers.

use jiff::civil::Date;
use jiff::tz::TimeZone;
use jiff::{Timestamp, ToSpan};

#[derive(Debug, thiserror::Error)]
pub enum WindowError {
    #[error("window starts on {from} but ends on {until}; the start must not be after the end")]
    Inverted { from: Date, until: Date },

    #[error("{days} days ago is out of range")]
    OutOfRange { days: u32 },
}

/// Inclusive range of civil days, bucketed in a fixed time zone.
///
/// Invariant: `from <= until`.
#[derive(Debug, Clone)]
pub struct Window {
    from: Date,
    until: Date,
    tz: TimeZone,
}

impl Window {
    pub fn new(from: Date, until: Date, tz: TimeZone) -> Result<Self, WindowError> {
        if from > until {
            return Err(WindowError::Inverted { from, until });
        }
        Ok(Self { from, until, tz })
    }

    /// Build a window from two "days ago" offsets relative to `today`.
    ///
    /// `(1, 1)` is yesterday only; `(7, 1)` is the week up to yesterday.
    pub fn days_ago(
        today: Date,
        from_days: u32,
        until_days: u32,
        tz: TimeZone,
    ) -> Result<Self, WindowError> {
        let shift = |days: u32| {
            today
                .checked_sub(i64::from(days).days())
                .map_err(|_| WindowError::OutOfRange { days })
        };
        Self::new(shift(from_days)?, shift(until_days)?, tz)
    }

    /// Like [`Window::days_ago`], counting from today in the system time zone.
    pub fn days_ago_from_now(from_days: u32, until_days: u32) -> Result<Self, WindowError> {
        let tz = TimeZone::system();
        let today = tz.to_datetime(Timestamp::now()).date();
        Self::days_ago(today, from_days, until_days, tz)
    }

    pub fn from(&self) -> Date {
        self.from
    }

    pub fn until(&self) -> Date {
        self.until
    }

    /// The civil day an instant falls on, in this window's time zone.
    pub fn day_of(&self, at: Timestamp) -> Date {
        self.tz.to_datetime(at).date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use jiff::civil::date;

    #[test]
    fn yesterday_only() {
        let w = Window::days_ago(date(2024, 5, 2), 1, 1, TimeZone::UTC).unwrap();
        assert_eq!(w.from(), date(2024, 5, 1));
        assert_eq!(w.until(), date(2024, 5, 1));
    }

    #[test]
    fn multi_day_window_spans_month_boundary() {
        let w = Window::days_ago(date(2024, 3, 2), 3, 1, TimeZone::UTC).unwrap();
        assert_eq!(w.from(), date(2024, 2, 28));
        assert_eq!(w.until(), date(2024, 3, 1));
    }

    #[test]
    fn rejects_inverted_offsets() {
        let err = Window::days_ago(date(2024, 5, 10), 1, 3, TimeZone::UTC).unwrap_err();
        assert!(matches!(err, WindowError::Inverted { .. }));
    }

    #[test]
    fn day_of_uses_window_time_zone() {
        let tz = TimeZone::fixed(jiff::tz::offset(-5));
        let w = Window::new(date(2024, 5, 1), date(2024, 5, 1), tz).unwrap();
        // 02:00 UTC on the 2nd is still the evening of the 1st at UTC-5.
        let at: Timestamp = "2024-05-02T02:00:00Z".parse().unwrap();
        assert_eq!(w.day_of(at), date(2024, 5, 1));
    }
}
