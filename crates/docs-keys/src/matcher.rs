//! Modifier matcher.
//!
//! Decides whether a single registry entry satisfies a keydown event. The
//! Shift and Alt checks are one-directional: a required modifier must be
//! present, but an extra pressed modifier never disqualifies (so Shift+J
//! still triggers a plain-`j` shortcut). The primary modifier is platform
//! split: Cmd and Ctrl are checked independently on Mac; off-Mac only Ctrl
//! is consulted and an unexpected Meta press always disqualifies.

use docs_keys_combo::Platform;

use crate::event::KeyEvent;
use crate::registry::Shortcut;

/// True if `shortcut` matches `event` on `platform`.
///
/// An empty stored key never matches; malformed registrations fail
/// silently rather than erroring.
pub fn shortcut_matches(shortcut: &Shortcut, event: &KeyEvent, platform: Platform) -> bool {
    let combo = &shortcut.combo;

    // Key equality first (quick rejection), case-insensitive.
    if combo.key.is_empty() || !event.key.eq_ignore_ascii_case(&combo.key) {
        return false;
    }

    let shift_ok = !combo.shift || event.shift;
    let alt_ok = !combo.alt || event.alt;
    let primary_ok = if platform.is_mac {
        (!combo.cmd || event.meta) && (!combo.ctrl || event.ctrl)
    } else {
        (!combo.ctrl || event.ctrl) && !event.meta
    };

    shift_ok && alt_ok && primary_ok
}
