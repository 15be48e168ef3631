//! Global keyboard-shortcut dispatch engine for a documentation site host.
//!
//! The engine intercepts keydown events from an injectable [`EventSource`],
//! resolves them against a registry of single-key, modifier-combo, and
//! two-key sequence shortcuts, and invokes the associated actions
//! (navigation, focus, toggles, help display). Rendering (the help modal,
//! the toast, the page itself) belongs to the host; the engine only owns
//! arbitration and state.
//!
//! Dispatch order for every keydown:
//!
//! 1. suppression guard: nothing runs while focus is in a text-editing
//!    control;
//! 2. the `?` help key, which bypasses everything below;
//! 3. the two-key sequence machine (`g` then `h`/`d`/`e`);
//! 4. the registry scan, where the first satisfying shortcut wins.
//!
//! # Example
//!
//! ```
//! use docs_keys::{KeyEvent, Platform, ShortcutProvider, SyntheticEventSource};
//!
//! let source = SyntheticEventSource::new();
//! let mut provider = ShortcutProvider::new(source.clone(), Platform::other());
//! provider.set_search_focus_callback(|| { /* focus the search box */ });
//! provider.mount();
//!
//! let mut event = KeyEvent::new("k").with_ctrl();
//! source.emit(&mut event);
//! assert!(event.default_prevented());
//! ```

mod clock;
mod config;
mod engine;
mod event;
mod matcher;
mod provider;
mod registry;
mod sequence;
mod suppress;

pub use clock::{Clock, Deadline, SystemClock};
pub use config::{Binding, CONFIG_FILE, Config, ConfigError};
pub use engine::{Dispatch, EngineCore, HELP_KEY};
pub use event::{
    EventSource, EventTarget, KeyEvent, KeydownHandler, ListenerId, SyntheticEventSource,
};
pub use matcher::shortcut_matches;
pub use provider::ShortcutProvider;
pub use registry::{BuiltinAction, DEFAULT_CATEGORY, Registry, Shortcut, ShortcutAction};
pub use sequence::{SEQUENCE_TIMEOUT, SequenceStep, SequenceTracker};
pub use suppress::is_suppressed;

// Re-export the combo vocabulary so embedders only need one crate.
pub use docs_keys_combo::{KeyCombo, ParseError, Platform, format_combo, parse_key_combo};
