//! Human-readable combo labels.
//!
//! Pure rendering: the same combo and platform always produce the same
//! string. Mac hosts get the compact symbol style (`⌘K`), everything else
//! gets word prefixes joined with `+` (`Ctrl+K`).

use crate::{KeyCombo, Platform};

/// Render a key combination as a display label for the given platform.
///
/// Prefixes appear in fixed order: primary modifier, Alt, Shift. The
/// primary slot renders the Cmd symbol when `cmd` is set on Mac, the Ctrl
/// symbol for a ctrl-only combo on Mac, and the word `Ctrl` off-Mac
/// whenever either primary flag is set.
pub fn format_combo(combo: &KeyCombo, platform: Platform) -> String {
    let mut parts: Vec<&str> = Vec::new();

    if combo.cmd || combo.ctrl {
        parts.push(if platform.is_mac {
            if combo.cmd { "⌘" } else { "⌃" }
        } else {
            "Ctrl"
        });
    }
    if combo.alt {
        parts.push(if platform.is_mac { "⌥" } else { "Alt" });
    }
    if combo.shift {
        parts.push(if platform.is_mac { "⇧" } else { "Shift" });
    }

    let key = key_label(&combo.key);
    parts.push(&key);

    parts.join(if platform.is_mac { "" } else { "+" })
}

/// Display label for a single key value.
fn key_label(key: &str) -> String {
    match key {
        " " => "SPACE".to_string(),
        "ArrowUp" => "↑".to_string(),
        "ArrowDown" => "↓".to_string(),
        "ArrowLeft" => "←".to_string(),
        "ArrowRight" => "→".to_string(),
        other => other.to_uppercase(),
    }
}
