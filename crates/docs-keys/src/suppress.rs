//! Input suppression guard.
//!
//! While keyboard focus is inside a text-editing control, no shortcut
//! logic runs at all: not the help key, not the sequence machine, not the
//! registry scan. This check runs unconditionally first on every keydown.

use crate::event::EventTarget;

/// True if the focused target vetoes shortcut dispatch.
///
/// Suppressed targets are `input` and `textarea` elements (tag compared
/// case-insensitively) and anything whose `contentEditable` attribute is
/// exactly `"true"`.
pub fn is_suppressed(target: Option<&EventTarget>) -> bool {
    let Some(target) = target else {
        return false;
    };
    if target.tag.eq_ignore_ascii_case("input") || target.tag.eq_ignore_ascii_case("textarea") {
        return true;
    }
    matches!(target.content_editable.as_deref(), Some("true"))
}
