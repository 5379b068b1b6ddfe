//! Key bindings for the stopwatch controls.

use crate::key::{self, new_binding, with_help, with_keys_str, Binding};

/// KeyMap holds the bindings for the stopwatch's controls.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Start or resume the clock.
    pub start: Binding,
    /// Pause the clock.
    pub stop: Binding,
    /// Stop the clock and clear it to zero.
    pub reset: Binding,
    /// Start when paused, stop when running.
    pub toggle: Binding,
}

/// The default bindings: `s` start, `x` stop, `r` reset, space toggles.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        start: new_binding(vec![with_keys_str(&["s"]), with_help("s", "start")]),
        stop: new_binding(vec![with_keys_str(&["x"]), with_help("x", "stop")]),
        reset: new_binding(vec![with_keys_str(&["r"]), with_help("r", "reset")]),
        toggle: new_binding(vec![with_keys_str(&["space"]), with_help("space", "start/stop")]),
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}

impl key::KeyMap for KeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.start, &self.stop, &self.reset]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![vec![&self.start, &self.stop, &self.reset], vec![&self.toggle]]
    }
}
