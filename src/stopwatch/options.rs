//! Construction options for the stopwatch.

use super::format::Format;
use super::keymap::KeyMap;
use super::model::Model;
use crate::clock::Clock;
use lipgloss_extras::prelude::*;
use std::sync::Arc;
use std::time::Duration;

/// Configuration option passed to [`new`](super::new).
///
/// ```rust
/// use bubbletea_stopwatch::stopwatch::{new, with_format, with_interval, Format};
/// use std::time::Duration;
///
/// let sw = new(&[
///     with_interval(Duration::from_millis(50)),
///     with_format(Format::HoursMinutesSecondsHundredths),
/// ]);
/// assert_eq!(sw.interval, Duration::from_millis(50));
/// assert_eq!(sw.display(), "00:00:00:00");
/// ```
pub enum StopwatchOption {
    /// Nominal time between display refreshes.
    WithInterval(Duration),
    /// Display layout.
    WithFormat(Format),
    /// Time source sampled by the stopwatch.
    WithClock(Arc<dyn Clock>),
    /// Style of the time display.
    WithStyle(Box<Style>),
    /// Key bindings for the controls.
    WithKeyMap(Box<KeyMap>),
}

impl StopwatchOption {
    pub(crate) fn apply(&self, m: &mut Model) {
        match self {
            StopwatchOption::WithInterval(interval) => m.interval = *interval,
            StopwatchOption::WithFormat(format) => m.format = *format,
            StopwatchOption::WithClock(clock) => m.set_clock(Arc::clone(clock)),
            StopwatchOption::WithStyle(style) => m.style = style.as_ref().clone(),
            StopwatchOption::WithKeyMap(keymap) => m.keymap = keymap.as_ref().clone(),
        }
    }
}

/// Sets the tick interval. Zero falls back to the default.
pub fn with_interval(interval: Duration) -> StopwatchOption {
    StopwatchOption::WithInterval(interval)
}

/// Sets the display layout.
pub fn with_format(format: Format) -> StopwatchOption {
    StopwatchOption::WithFormat(format)
}

/// Sets the clock the stopwatch samples.
pub fn with_clock(clock: impl Clock + 'static) -> StopwatchOption {
    StopwatchOption::WithClock(Arc::new(clock))
}

/// Sets the lipgloss style of the time display.
pub fn with_style(style: Style) -> StopwatchOption {
    StopwatchOption::WithStyle(Box::new(style))
}

/// Replaces the default key bindings.
pub fn with_keymap(keymap: KeyMap) -> StopwatchOption {
    StopwatchOption::WithKeyMap(Box::new(keymap))
}
