//! Type-safe key bindings for widget controls.
//!
//! A [`Binding`] groups one or more key presses under a single action and
//! carries the help text shown in a widget's control bar. Bindings are built
//! with the options functions:
//!
//! ```rust
//! use bubbletea_stopwatch::key::{new_binding, with_help, with_keys_str};
//!
//! let start = new_binding(vec![
//!     with_keys_str(&["s", "enter"]),
//!     with_help("s", "start"),
//! ]);
//! assert_eq!(start.help().key, "s");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key that was pressed.
    pub code: KeyCode,
    /// Modifiers held while pressing it.
    pub modifiers: KeyModifiers,
}

impl KeyPress {
    /// Parses a key description such as `"s"`, `"space"` or `"ctrl+c"`.
    ///
    /// Returns `None` for names that do not map to a key.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut rest = s;
        loop {
            if let Some(r) = rest.strip_prefix("ctrl+") {
                modifiers |= KeyModifiers::CONTROL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("alt+") {
                modifiers |= KeyModifiers::ALT;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("shift+") {
                modifiers |= KeyModifiers::SHIFT;
                rest = r;
            } else {
                break;
            }
        }

        let code = match rest {
            "space" | " " => KeyCode::Char(' '),
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(Self { code, modifiers })
    }

    fn matches(&self, msg: &KeyMsg) -> bool {
        self.code == msg.key && self.modifiers == msg.modifiers
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short rendering of the keys, e.g. `"s"` or `"␣"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key presses that trigger the same action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

/// An option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Sets the keys of a binding from their string names.
///
/// Names that cannot be parsed are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let keys: Vec<KeyPress> = keys.iter().filter_map(|k| KeyPress::parse(k)).collect();
    Box::new(move |b: &mut Binding| b.keys = keys)
}

/// Sets the help key and description of a binding.
pub fn with_help(key: impl Into<String>, desc: impl Into<String>) -> BindingOpt {
    let help = Help {
        key: key.into(),
        desc: desc.into(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Creates the binding disabled.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

impl Binding {
    /// Returns the key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Returns the help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Replaces the help text.
    pub fn set_help(&mut self, key: impl Into<String>, desc: impl Into<String>) {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// A binding is enabled when it is not disabled and has at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Reports whether the key message triggers this binding.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.iter().any(|k| k.matches(msg))
    }
}

/// Reports whether the key message triggers any of the bindings.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Help listing for a component's key bindings.
pub trait KeyMap {
    /// Bindings shown in the one-line control bar.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped into columns for an expanded help view.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}
