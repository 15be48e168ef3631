//! Shortcut definitions and the ordered registry.
//!
//! The registry is two ordered lists: built-in defaults followed by
//! externally registered custom shortcuts. Order is semantically
//! significant (on ambiguous overlap the first entry encountered during
//! iteration wins) and duplicate keys are legal, not deduplicated.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use docs_keys_combo::KeyCombo;

/// Category consumers fall back to when a shortcut has none.
pub const DEFAULT_CATEGORY: &str = "General";

/// Actions wired by the engine itself. Each default shortcut maps to one
/// of these; invoking it calls the matching single-slot callback and
/// announces itself with a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinAction {
    FocusSearch,
    ToggleSidebar,
    NavigateUp,
    NavigateDown,
}

impl BuiltinAction {
    /// Stable name, also accepted in config binding `action` fields.
    pub fn name(self) -> &'static str {
        match self {
            Self::FocusSearch => "focus-search",
            Self::ToggleSidebar => "toggle-sidebar",
            Self::NavigateUp => "navigate-up",
            Self::NavigateDown => "navigate-down",
        }
    }

    pub fn toast_message(self) -> &'static str {
        match self {
            Self::FocusSearch => "Search focused",
            Self::ToggleSidebar => "Sidebar toggled",
            Self::NavigateUp => "Moved up",
            Self::NavigateDown => "Moved down",
        }
    }
}

/// What a shortcut does when it fires.
#[derive(Clone)]
pub enum ShortcutAction {
    /// One of the engine-wired defaults.
    Builtin(BuiltinAction),
    /// Navigate to a route (config bindings use `action = "route:/docs"`).
    Navigate(String),
    /// Arbitrary zero-argument callback supplied by a feature component.
    Callback(Rc<RefCell<dyn FnMut()>>),
}

impl fmt::Debug for ShortcutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin(builtin) => write!(f, "Builtin({})", builtin.name()),
            Self::Navigate(route) => write!(f, "Navigate({route})"),
            Self::Callback(_) => write!(f, "Callback"),
        }
    }
}

/// A key combination bound to an action, with a description for the help
/// overlay and an optional category.
#[derive(Debug, Clone)]
pub struct Shortcut {
    pub combo: KeyCombo,
    pub description: String,
    pub category: Option<String>,
    action: ShortcutAction,
}

impl Shortcut {
    /// A custom shortcut with a callback action.
    pub fn new(
        combo: KeyCombo,
        description: impl Into<String>,
        action: impl FnMut() + 'static,
    ) -> Self {
        Self {
            combo,
            description: description.into(),
            category: None,
            action: ShortcutAction::Callback(Rc::new(RefCell::new(action))),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub(crate) fn from_parts(
        combo: KeyCombo,
        description: String,
        category: Option<String>,
        action: ShortcutAction,
    ) -> Self {
        Self {
            combo,
            description,
            category,
            action,
        }
    }

    fn builtin(combo: KeyCombo, description: &str, category: &str, action: BuiltinAction) -> Self {
        Self {
            combo,
            description: description.to_string(),
            category: Some(category.to_string()),
            action: ShortcutAction::Builtin(action),
        }
    }

    pub fn action(&self) -> &ShortcutAction {
        &self.action
    }

    /// The category, falling back to [`DEFAULT_CATEGORY`].
    pub fn category_or_default(&self) -> &str {
        self.category.as_deref().unwrap_or(DEFAULT_CATEGORY)
    }
}

/// The built-in default shortcuts, in precedence order.
///
/// The primary-modifier defaults require Ctrl on every platform so one
/// combination matches (and is labeled) consistently everywhere.
fn default_shortcuts() -> Vec<Shortcut> {
    use BuiltinAction::*;
    vec![
        Shortcut::builtin(KeyCombo::bare("k").with_ctrl(), "Focus search", "Search", FocusSearch),
        Shortcut::builtin(KeyCombo::bare("/"), "Focus search", "Search", FocusSearch),
        Shortcut::builtin(KeyCombo::bare("b").with_ctrl(), "Toggle sidebar", "Layout", ToggleSidebar),
        Shortcut::builtin(KeyCombo::bare("j"), "Next item", "Navigation", NavigateDown),
        Shortcut::builtin(KeyCombo::bare("k"), "Previous item", "Navigation", NavigateUp),
        Shortcut::builtin(KeyCombo::bare("ArrowDown"), "Next item", "Navigation", NavigateDown),
        Shortcut::builtin(KeyCombo::bare("ArrowUp"), "Previous item", "Navigation", NavigateUp),
    ]
}

/// Ordered shortcut registry: defaults first, then custom registrations in
/// insertion order.
#[derive(Debug)]
pub struct Registry {
    defaults: Vec<Shortcut>,
    custom: Vec<Shortcut>,
}

impl Registry {
    pub fn with_defaults() -> Self {
        Self {
            defaults: default_shortcuts(),
            custom: Vec::new(),
        }
    }

    /// Append a custom shortcut. No uniqueness check: duplicates are legal
    /// and the earlier entry keeps precedence.
    pub fn register(&mut self, shortcut: Shortcut) {
        self.custom.push(shortcut);
    }

    /// Remove **every** entry, default or custom, whose stored key equals
    /// `key` exactly (case-sensitive), regardless of modifier flags.
    ///
    /// The breadth is deliberate: unregistering `"k"` removes both a
    /// Ctrl+K default and a plain-`k` default. Returns how many entries
    /// were removed.
    pub fn unregister(&mut self, key: &str) -> usize {
        let before = self.len();
        self.defaults.retain(|shortcut| shortcut.combo.key != key);
        self.custom.retain(|shortcut| shortcut.combo.key != key);
        before - self.len()
    }

    /// Iterate in precedence order: defaults, then custom.
    pub fn iter(&self) -> impl Iterator<Item = &Shortcut> {
        self.defaults.iter().chain(self.custom.iter())
    }

    /// Like [`Registry::iter`], tagging each entry with whether it is a
    /// built-in default (defaults announce themselves with toasts).
    pub(crate) fn iter_with_origin(&self) -> impl Iterator<Item = (&Shortcut, bool)> {
        self.defaults
            .iter()
            .map(|shortcut| (shortcut, true))
            .chain(self.custom.iter().map(|shortcut| (shortcut, false)))
    }

    pub fn len(&self) -> usize {
        self.defaults.len() + self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defaults.is_empty() && self.custom.is_empty()
    }

    /// A point-in-time copy of the registry in iteration order.
    pub fn snapshot(&self) -> Vec<Shortcut> {
        self.iter().cloned().collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
