//! Key combination parser.
//!
//! Parses human-readable key strings like "Ctrl+Shift+B" into [`KeyCombo`]
//! structs. Used by config files so bindings can be written the way they
//! are displayed.

use thiserror::Error;

use crate::KeyCombo;

/// Error type for key parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty key combination")]
    Empty,
    #[error("key combination ends with modifier '{0}', no key specified")]
    TrailingModifier(String),
    #[error("multiple keys specified: already have '{0}', found '{1}'")]
    MultipleKeys(String, String),
    #[error("unknown key name: '{0}'")]
    UnknownKey(String),
}

/// Parse a key combination string into a [`KeyCombo`].
///
/// Supported format: "Modifier+Modifier+Key"
///
/// Modifiers:
/// - `Ctrl`, `Control` - Control key
/// - `Cmd`, `Command`, `Meta`, `Super` - Command key
/// - `Alt`, `Option` - Alt/Option key
/// - `Shift` - Shift key
/// - `CmdOrCtrl` - sets both Ctrl and Cmd; resolved per platform at match
///   time
///
/// Keys:
/// - Single characters: `A`, `/`, `1`, etc. (stored lowercased)
/// - Named keys: `Enter`, `Escape`, `Space`, `Tab`, arrow keys, etc.
pub fn parse_key_combo(s: &str) -> Result<KeyCombo, ParseError> {
    if s.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let parts: Vec<&str> = s.split('+').map(str::trim).collect();

    let mut combo = KeyCombo::default();
    let mut key_part: Option<&str> = None;

    for (i, part) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;

        let is_modifier = match part.to_lowercase().as_str() {
            "ctrl" | "control" => {
                combo.ctrl = true;
                true
            }
            "cmd" | "command" | "meta" | "super" => {
                combo.cmd = true;
                true
            }
            "alt" | "option" => {
                combo.alt = true;
                true
            }
            "shift" => {
                combo.shift = true;
                true
            }
            "cmdorctrl" => {
                combo.ctrl = true;
                combo.cmd = true;
                true
            }
            _ => false,
        };

        if !is_modifier {
            if let Some(existing) = key_part {
                return Err(ParseError::MultipleKeys(
                    existing.to_string(),
                    part.to_string(),
                ));
            }
            key_part = Some(part);
        } else if is_last {
            return Err(ParseError::TrailingModifier(part.to_string()));
        }
    }

    let key_str = key_part.ok_or(ParseError::Empty)?;
    combo.key = parse_key(key_str)?;

    Ok(combo)
}

/// Resolve a key token to its DOM-style key value.
fn parse_key(s: &str) -> Result<String, ParseError> {
    // Named keys first (case-insensitive), mapped to event-key names.
    if let Some(named) = parse_named_key(s) {
        return Ok(named.to_string());
    }

    // Single printable character, stored lowercased.
    let chars: Vec<char> = s.chars().collect();
    if chars.len() == 1 {
        return Ok(chars[0].to_lowercase().to_string());
    }

    Err(ParseError::UnknownKey(s.to_string()))
}

/// Resolve a named-key alias to the event-key value it produces.
///
/// Accepts human-readable aliases such as `"Enter"`, `"Return"`, `"Esc"`,
/// arrow keys by short or full name. Matching is case-insensitive. Returns
/// `None` for unrecognised names.
fn parse_named_key(s: &str) -> Option<&'static str> {
    match s.to_lowercase().as_str() {
        "enter" | "return" => Some("Enter"),
        "escape" | "esc" => Some("Escape"),
        "space" => Some(" "),
        "tab" => Some("Tab"),
        "backspace" => Some("Backspace"),
        "delete" | "del" => Some("Delete"),
        "home" => Some("Home"),
        "end" => Some("End"),
        "pageup" | "pgup" => Some("PageUp"),
        "pagedown" | "pgdn" => Some("PageDown"),
        "up" | "arrowup" => Some("ArrowUp"),
        "down" | "arrowdown" => Some("ArrowDown"),
        "left" | "arrowleft" => Some("ArrowLeft"),
        "right" | "arrowright" => Some("ArrowRight"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_single_character() {
        let combo = parse_key_combo("k").unwrap();
        assert_eq!(combo, KeyCombo::bare("k"));
    }

    #[test]
    fn parses_modifier_chain() {
        let combo = parse_key_combo("Ctrl+Shift+B").unwrap();
        assert_eq!(combo.key, "b");
        assert!(combo.ctrl && combo.shift);
        assert!(!combo.cmd && !combo.alt);
    }

    #[test]
    fn parses_modifier_aliases() {
        assert!(parse_key_combo("Control+K").unwrap().ctrl);
        assert!(parse_key_combo("Meta+K").unwrap().cmd);
        assert!(parse_key_combo("Option+K").unwrap().alt);
        assert!(parse_key_combo("Super+K").unwrap().cmd);
    }

    #[test]
    fn cmd_or_ctrl_expands_to_both_flags() {
        let combo = parse_key_combo("CmdOrCtrl+K").unwrap();
        assert!(combo.ctrl && combo.cmd);
        assert_eq!(combo.key, "k");
    }

    #[test]
    fn parses_named_keys_to_event_values() {
        assert_eq!(parse_key_combo("Space").unwrap().key, " ");
        assert_eq!(parse_key_combo("Up").unwrap().key, "ArrowUp");
        assert_eq!(parse_key_combo("Esc").unwrap().key, "Escape");
        assert_eq!(parse_key_combo("Shift+Enter").unwrap().key, "Enter");
    }

    #[test]
    fn uppercase_character_is_stored_lowercased() {
        assert_eq!(parse_key_combo("Ctrl+K").unwrap().key, "k");
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse_key_combo(""), Err(ParseError::Empty));
        assert_eq!(parse_key_combo("   "), Err(ParseError::Empty));
    }

    #[test]
    fn rejects_trailing_modifier() {
        assert_eq!(
            parse_key_combo("Ctrl+Shift"),
            Err(ParseError::TrailingModifier("Shift".to_string()))
        );
    }

    #[test]
    fn rejects_multiple_keys() {
        assert_eq!(
            parse_key_combo("A+B"),
            Err(ParseError::MultipleKeys("A".to_string(), "B".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_key_names() {
        assert_eq!(
            parse_key_combo("Ctrl+Banana"),
            Err(ParseError::UnknownKey("Banana".to_string()))
        );
    }
}
