//! Key-combination vocabulary for the docs-keys engine
//!
//! This crate is engine-agnostic: it knows what a key combination *is*
//! (modifier flags plus a logical key value), how to parse one from a
//! human-readable string like `"Ctrl+Shift+K"`, which platform family the
//! host belongs to, and how to render a combination as a label for that
//! platform (`"Ctrl+K"` vs `"⌘K"`).
//!
//! Key values use the DOM convention: single printable characters are
//! stored as-is (`"k"`, `"?"`, `" "`), named keys use their event-key names
//! (`"ArrowUp"`, `"Enter"`, `"Escape"`).

mod format;
mod parser;
mod platform;

pub use format::format_combo;
pub use parser::{ParseError, parse_key_combo};
pub use platform::Platform;

/// A key combination: up to four modifier flags plus the logical key.
///
/// `key` is matched case-insensitively by consumers; an empty `key` is
/// representable but never matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCombo {
    pub key: String,
    pub ctrl: bool,
    pub cmd: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyCombo {
    /// A combination with no modifiers.
    pub fn bare(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    /// Cross-platform primary-modifier combination: sets both `ctrl` and
    /// `cmd` so platform-aware matching resolves to Cmd on Mac and Ctrl
    /// elsewhere.
    pub fn cmd_or_ctrl(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: true,
            cmd: true,
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_cmd(mut self) -> Self {
        self.cmd = true;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// True if any modifier flag is set.
    pub fn has_modifiers(&self) -> bool {
        self.ctrl || self.cmd || self.shift || self.alt
    }
}
