//! Elapsed-time formatting for the stopwatch display.

use std::time::Duration;

/// Layout of the rendered time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// `MM:SS:hh` (minutes, seconds, hundredths).
    ///
    /// Hours are not shown, so minutes wrap back to `00` every hour.
    #[default]
    MinutesSecondsHundredths,
    /// `HH:MM:SS:hh`, the same layout with the hour prefixed.
    HoursMinutesSecondsHundredths,
}

/// An elapsed time split into display fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeParts {
    /// Whole hours, unbounded.
    pub hours: u64,
    /// Minutes within the hour, `0..60`.
    pub minutes: u64,
    /// Seconds within the minute, `0..60`.
    pub seconds: u64,
    /// Hundredths of a second, `0..100`.
    pub hundredths: u64,
}

impl TimeParts {
    /// Splits a millisecond count into display fields.
    ///
    /// ```rust
    /// use bubbletea_stopwatch::stopwatch::TimeParts;
    ///
    /// let parts = TimeParts::from_millis(61_230);
    /// assert_eq!((parts.minutes, parts.seconds, parts.hundredths), (1, 1, 23));
    /// ```
    pub fn from_millis(ms: u64) -> Self {
        Self {
            hours: ms / 3_600_000,
            minutes: (ms / 60_000) % 60,
            seconds: (ms / 1_000) % 60,
            hundredths: (ms % 1_000) / 10,
        }
    }

    /// Renders the fields, each zero-padded to two digits.
    pub fn render(&self, format: Format) -> String {
        match format {
            Format::MinutesSecondsHundredths => format!(
                "{:02}:{:02}:{:02}",
                self.minutes, self.seconds, self.hundredths
            ),
            Format::HoursMinutesSecondsHundredths => format!(
                "{:02}:{:02}:{:02}:{:02}",
                self.hours, self.minutes, self.seconds, self.hundredths
            ),
        }
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
pub fn duration_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Formats an elapsed duration for display.
///
/// ```rust
/// use bubbletea_stopwatch::stopwatch::{format_elapsed, Format};
/// use std::time::Duration;
///
/// assert_eq!(format_elapsed(Duration::ZERO, Format::default()), "00:00:00");
/// assert_eq!(
///     format_elapsed(Duration::from_millis(61_230), Format::default()),
///     "01:01:23"
/// );
/// ```
pub fn format_elapsed(elapsed: Duration, format: Format) -> String {
    TimeParts::from_millis(duration_millis(elapsed)).render(format)
}
