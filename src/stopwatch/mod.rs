//! Stopwatch component for Bubble Tea applications.
//!
//! A stopwatch that counts up from zero with start, stop and reset controls
//! and a `MM:SS:hh` display (minutes, seconds, hundredths).
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_stopwatch::stopwatch::{new, State};
//!
//! let mut sw = new(&[]);
//! let tick = sw.start(); // Some(Cmd): give it to the runtime
//! assert!(tick.is_some());
//! assert_eq!(sw.state(), State::Running);
//!
//! sw.reset();
//! assert_eq!(sw.state(), State::Paused);
//! assert_eq!(sw.display(), "00:00:00");
//! ```
//!
//! # Timing
//!
//! While running, the stopwatch schedules a tick every `interval` (10ms by
//! default). Each accepted tick recomputes the elapsed time from the clock
//! and the anchor fixed at start, so irregular tick delivery never skews the
//! measurement. Stopping takes a final sample and invalidates the pending
//! tick before returning.
//!
//! # Hours
//!
//! The default [`Format`] leaves the hour out, so one hour displays as
//! `00:00:00`. Use [`Format::HoursMinutesSecondsHundredths`] through
//! [`with_format`] to show it.

pub mod format;
pub mod keymap;
pub mod model;
pub mod observer;
pub mod options;

#[cfg(test)]
mod tests;

pub use format::{format_elapsed, Format, TimeParts};
pub use keymap::{default_key_map, KeyMap};
pub use model::{new, new_with_interval, Model, State, TaskHandle, TickMsg, DEFAULT_INTERVAL};
pub use observer::{ObserverId, Snapshot};
pub use options::{
    with_clock, with_format, with_interval, with_keymap, with_style, StopwatchOption,
};
