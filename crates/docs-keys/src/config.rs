//! Engine configuration loaded from `docs-keys.toml`.
//!
//! Every field has a default, so a missing or partial file is fine. Site
//! operators can tune the two timeouts and declare extra bindings without
//! touching code:
//!
//! ```toml
//! sequence_timeout_ms = 1000
//! toast_timeout_ms = 3000
//!
//! [[bindings]]
//! keys = "Ctrl+Shift+D"
//! action = "route:/docs"
//! description = "Open the docs"
//! category = "Navigation"
//! ```
//!
//! Binding actions are either `route:<path>` or one of the built-in action
//! names (`focus-search`, `toggle-sidebar`, `navigate-up`, `navigate-down`).

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use docs_keys_combo::parse_key_combo;

use crate::registry::{BuiltinAction, Shortcut, ShortcutAction};

/// Config file name looked up in the working directory; the home-directory
/// fallback is the same name with a leading dot.
pub const CONFIG_FILE: &str = "docs-keys.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Engine configuration.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_sequence_timeout_ms")]
    pub sequence_timeout_ms: u64,
    #[serde(default = "default_toast_timeout_ms")]
    pub toast_timeout_ms: u64,
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One configured shortcut binding.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Binding {
    pub keys: String,
    pub action: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
}

fn default_sequence_timeout_ms() -> u64 {
    1000
}

fn default_toast_timeout_ms() -> u64 {
    3000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sequence_timeout_ms: default_sequence_timeout_ms(),
            toast_timeout_ms: default_toast_timeout_ms(),
            bindings: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from CWD first, then the home directory, or use
    /// defaults. Never fails: a broken file just means defaults.
    pub fn load() -> Self {
        if let Ok(config) = Self::from_path(Path::new(CONFIG_FILE)) {
            log::debug!("Loaded config from {CONFIG_FILE}");
            return config;
        }

        if let Some(home) = env::var_os("HOME") {
            let home_config = PathBuf::from(home).join(format!(".{CONFIG_FILE}"));
            if let Ok(config) = Self::from_path(&home_config) {
                log::debug!("Loaded config from {}", home_config.display());
                return config;
            }
        }

        log::debug!("Using default config");
        Self::default()
    }

    /// Load config from an explicit path, surfacing read and parse errors.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }
}

impl Binding {
    /// Turn a binding into a registrable shortcut. The error is a human
    /// readable reason, logged and skipped by the caller.
    pub(crate) fn to_shortcut(&self) -> Result<Shortcut, String> {
        let combo = parse_key_combo(&self.keys).map_err(|err| err.to_string())?;
        let action = action_from_name(&self.action)
            .ok_or_else(|| format!("unknown action '{}'", self.action))?;
        Ok(Shortcut::from_parts(
            combo,
            self.description.clone(),
            self.category.clone(),
            action,
        ))
    }
}

/// Resolve a binding action name.
fn action_from_name(name: &str) -> Option<ShortcutAction> {
    if let Some(route) = name.strip_prefix("route:") {
        return Some(ShortcutAction::Navigate(route.to_string()));
    }
    let builtin = match name {
        "focus-search" => BuiltinAction::FocusSearch,
        "toggle-sidebar" => BuiltinAction::ToggleSidebar,
        "navigate-up" => BuiltinAction::NavigateUp,
        "navigate-down" => BuiltinAction::NavigateDown,
        _ => return None,
    };
    Some(ShortcutAction::Builtin(builtin))
}
