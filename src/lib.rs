#![warn(missing_docs)]

//! # bubbletea-stopwatch
//!
//! A stopwatch widget for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! terminal applications: start, stop and reset controls over a
//! `MM:SS:hh` display.
//!
//! The widget follows the Elm Architecture used by bubbletea-rs: it is
//! created with [`stopwatch::new`], driven by `update()` and rendered by
//! `view()`. Its periodic tick is an ordinary bubbletea command, so the
//! widget fits in any application loop without threads of its own.
//!
//! ```rust
//! use bubbletea_stopwatch::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     stopwatch: Stopwatch,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         (Self { stopwatch: stopwatch_new(&[]) }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.stopwatch.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.stopwatch.view()
//!     }
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`stopwatch`] | The widget, its options, keymap and time formatting |
//! | [`clock`] | Time sources: [`clock::SystemClock`] and [`clock::ManualClock`] |
//! | [`key`] | Key bindings and the [`key::KeyMap`] help trait |

pub mod clock;
pub mod key;
pub mod stopwatch;

use bubbletea_rs::Cmd;

/// Keyboard focus management shared by widgets.
///
/// A focused widget reacts to key presses; a blurred one ignores them but
/// keeps processing its own messages, such as ticks.
///
/// ```rust
/// use bubbletea_stopwatch::prelude::*;
///
/// let mut sw = stopwatch_new(&[]);
/// assert!(sw.focused());
///
/// sw.blur();
/// assert!(!sw.focused());
///
/// let _cmd = sw.focus();
/// assert!(sw.focused());
/// ```
pub trait Component {
    /// Gives the widget keyboard focus.
    ///
    /// May return a command to run as a consequence, e.g. a redraw.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes keyboard focus away from the widget.
    fn blur(&mut self);

    /// Whether the widget currently has keyboard focus.
    fn focused(&self) -> bool;
}

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{
    matches, new_binding, with_disabled, with_help, with_keys_str, Binding, Help as KeyHelp,
    KeyMap, KeyPress,
};
pub use stopwatch::{
    format_elapsed, new as stopwatch_new, Format as StopwatchFormat, Model as Stopwatch,
    State as StopwatchState, TickMsg as StopwatchTickMsg,
};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_stopwatch::prelude::*;
///
/// let sw: Stopwatch = stopwatch_new(&[with_format(StopwatchFormat::HoursMinutesSecondsHundredths)]);
/// assert_eq!(sw.display(), "00:00:00:00");
/// ```
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::key::{
        matches, new_binding, with_disabled, with_help, with_keys_str, Binding,
        Help as KeyHelp, KeyMap, KeyPress,
    };
    pub use crate::stopwatch::{
        format_elapsed, new as stopwatch_new, with_clock, with_format, with_interval,
        with_keymap, with_style, Format as StopwatchFormat, Model as Stopwatch,
        Snapshot as StopwatchSnapshot, State as StopwatchState, TickMsg as StopwatchTickMsg,
    };
    pub use crate::Component;
}
