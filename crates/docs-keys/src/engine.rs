//! Engine core: the `dispatch(event)` entry point and all mutable state.
//!
//! One `EngineCore` owns the registry, the sequence machine, the toast and
//! help-flag state, and the single-slot callbacks. Everything runs
//! synchronously inside `dispatch`; the only temporal state is a pair of
//! cancellable deadlines swept at the top of `dispatch` and by `tick()`.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::rc::Rc;
use std::time::{Duration, Instant};

use docs_keys_combo::{Platform, format_combo};

use crate::clock::{Clock, Deadline, SystemClock};
use crate::config::Config;
use crate::event::KeyEvent;
use crate::matcher::shortcut_matches;
use crate::registry::{BuiltinAction, Registry, Shortcut, ShortcutAction};
use crate::sequence::{SEQUENCE_TIMEOUT, SequenceStep, SequenceTracker};
use crate::suppress::is_suppressed;

/// The fixed-precedence help key.
pub const HELP_KEY: &str = "?";

const DEFAULT_TOAST_TIMEOUT: Duration = Duration::from_millis(3000);

/// What one keydown resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Focus was in a text-editing control; nothing ran.
    Suppressed,
    /// The help overlay opened.
    HelpShown,
    /// A two-key sequence opened.
    SequenceStarted,
    /// A two-key sequence completed and navigation was requested.
    SequenceCompleted { route: &'static str },
    /// A pending sequence swallowed the key without completing.
    SequenceConsumed,
    /// A registry shortcut fired.
    Matched { description: String },
    /// Nothing claimed the key.
    Unmatched,
}

type Slot = Option<Box<dyn FnMut()>>;

#[derive(Debug)]
struct Toast {
    message: String,
    deadline: Deadline,
}

/// The stateful engine. Usually owned by a [`ShortcutProvider`] behind
/// `Rc<RefCell<_>>`; hosts that pump events themselves can drive it
/// directly.
///
/// [`ShortcutProvider`]: crate::provider::ShortcutProvider
pub struct EngineCore {
    platform: Platform,
    registry: Registry,
    sequence: SequenceTracker,
    clock: Box<dyn Clock>,
    toast_timeout: Duration,
    help_open: bool,
    toast: Option<Toast>,
    on_focus_search: Slot,
    on_toggle_sidebar: Slot,
    on_navigate_up: Slot,
    on_navigate_down: Slot,
    on_navigate: Option<Box<dyn FnMut(&str)>>,
    on_show_help: Slot,
}

impl EngineCore {
    pub fn new(platform: Platform) -> Self {
        Self::with_clock(platform, Box::new(SystemClock))
    }

    pub fn with_clock(platform: Platform, clock: Box<dyn Clock>) -> Self {
        Self {
            platform,
            registry: Registry::with_defaults(),
            sequence: SequenceTracker::new(SEQUENCE_TIMEOUT),
            clock,
            toast_timeout: DEFAULT_TOAST_TIMEOUT,
            help_open: false,
            toast: None,
            on_focus_search: None,
            on_toggle_sidebar: None,
            on_navigate_up: None,
            on_navigate_down: None,
            on_navigate: None,
            on_show_help: None,
        }
    }

    /// Apply timeouts and register config bindings.
    pub fn apply_config(&mut self, config: &Config) {
        self.sequence
            .set_timeout(Duration::from_millis(config.sequence_timeout_ms));
        self.toast_timeout = Duration::from_millis(config.toast_timeout_ms);

        let mut registered = 0usize;
        for binding in &config.bindings {
            match binding.to_shortcut() {
                Ok(shortcut) => {
                    self.registry.register(shortcut);
                    registered += 1;
                }
                Err(reason) => {
                    log::warn!(
                        "skipping binding '{}' for action '{}': {reason}",
                        binding.keys,
                        binding.action
                    );
                }
            }
        }
        if !config.bindings.is_empty() {
            log::info!(
                "registered {registered} of {} config bindings",
                config.bindings.len()
            );
        }
    }

    /// Resolve one keydown.
    ///
    /// Precedence is fixed: suppression guard, help key, sequence machine,
    /// then the registry scan where the first satisfying entry fires. At
    /// most one action runs per event.
    pub fn dispatch(&mut self, event: &mut KeyEvent) -> Dispatch {
        let now = self.clock.now();
        self.sweep_deadlines(now);

        if is_suppressed(event.target.as_ref()) {
            return Dispatch::Suppressed;
        }

        // '?' opens help ahead of the sequence machine and the registry.
        // Shift is allowed: '?' is itself a shifted key on most layouts.
        if event.key == HELP_KEY && !event.ctrl && !event.meta && !event.alt {
            self.help_open = true;
            if let Some(callback) = self.on_show_help.as_mut() {
                run_guarded("show-help", || callback());
            }
            event.prevent_default();
            return Dispatch::HelpShown;
        }

        match self.sequence.step(event, now) {
            SequenceStep::Started => {
                event.prevent_default();
                return Dispatch::SequenceStarted;
            }
            SequenceStep::Completed(route) => {
                if let Some(callback) = self.on_navigate.as_mut() {
                    run_guarded("navigate", || callback(route));
                }
                event.prevent_default();
                return Dispatch::SequenceCompleted { route };
            }
            SequenceStep::Consumed => return Dispatch::SequenceConsumed,
            SequenceStep::Pass => {}
        }

        let hit = self
            .registry
            .iter_with_origin()
            .find(|(shortcut, _)| shortcut_matches(shortcut, event, self.platform))
            .map(|(shortcut, is_default)| {
                (
                    shortcut.action().clone(),
                    shortcut.description.clone(),
                    is_default,
                )
            });

        if let Some((action, description, is_default)) = hit {
            log::debug!("shortcut fired: {description}");
            self.run_action(&action, is_default);
            event.prevent_default();
            return Dispatch::Matched { description };
        }

        Dispatch::Unmatched
    }

    /// Sweep expired deadlines. Hosts with an idle loop call this
    /// periodically so toasts hide and stale sequences reset without
    /// waiting for the next keydown.
    pub fn tick(&mut self) {
        let now = self.clock.now();
        self.sweep_deadlines(now);
    }

    fn sweep_deadlines(&mut self, now: Instant) {
        self.sequence.expire(now);
        if let Some(toast) = &self.toast
            && toast.deadline.expired(now)
        {
            self.toast = None;
        }
    }

    /// Cancel all outstanding deadlines and pending state. Called on
    /// unmount so nothing fires after teardown.
    pub fn cancel_timers(&mut self) {
        self.sequence.reset();
        self.toast = None;
    }

    fn run_action(&mut self, action: &ShortcutAction, announce: bool) {
        match action {
            ShortcutAction::Builtin(builtin) => self.run_builtin(*builtin, announce),
            ShortcutAction::Navigate(route) => {
                if let Some(callback) = self.on_navigate.as_mut() {
                    run_guarded("navigate", || callback(route));
                }
            }
            ShortcutAction::Callback(callback) => {
                let callback = Rc::clone(callback);
                run_guarded("custom", || (callback.borrow_mut())());
            }
        }
    }

    fn run_builtin(&mut self, builtin: BuiltinAction, announce: bool) {
        let slot = match builtin {
            BuiltinAction::FocusSearch => &mut self.on_focus_search,
            BuiltinAction::ToggleSidebar => &mut self.on_toggle_sidebar,
            BuiltinAction::NavigateUp => &mut self.on_navigate_up,
            BuiltinAction::NavigateDown => &mut self.on_navigate_down,
        };
        if let Some(callback) = slot.as_mut() {
            run_guarded(builtin.name(), || callback());
        }
        // Only the built-in defaults announce themselves.
        if announce {
            self.show_toast(builtin.toast_message());
        }
    }

    // --- toast -----------------------------------------------------------

    /// Show a toast message, replacing any current one and rescheduling
    /// the auto-hide deadline.
    pub fn show_toast(&mut self, message: impl Into<String>) {
        let now = self.clock.now();
        self.toast = Some(Toast {
            message: message.into(),
            deadline: Deadline::after(now, self.toast_timeout),
        });
    }

    /// The toast currently on screen, if any.
    pub fn toast(&self) -> Option<&str> {
        self.toast.as_ref().map(|toast| toast.message.as_str())
    }

    // --- registry --------------------------------------------------------

    pub fn register_shortcut(&mut self, shortcut: Shortcut) {
        self.registry.register(shortcut);
    }

    /// See [`Registry::unregister`] for the (deliberately broad) removal
    /// semantics.
    pub fn unregister_shortcut(&mut self, key: &str) -> usize {
        self.registry.unregister(key)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn shortcuts(&self) -> Vec<Shortcut> {
        self.registry.snapshot()
    }

    pub fn format_shortcut(&self, shortcut: &Shortcut) -> String {
        format_combo(&shortcut.combo, self.platform)
    }

    // --- read accessors --------------------------------------------------

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_mac(&self) -> bool {
        self.platform.is_mac
    }

    pub fn is_help_open(&self) -> bool {
        self.help_open
    }

    /// The help flag is ephemeral UI state; the (out-of-scope) modal sets
    /// it back to false when the user closes the overlay.
    pub fn set_help_open(&mut self, open: bool) {
        self.help_open = open;
    }

    pub fn key_sequence(&self) -> Vec<String> {
        self.sequence.buffer().to_vec()
    }

    // --- callback slots (single-slot, last writer wins) ------------------

    pub fn set_search_focus_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_focus_search = Some(Box::new(callback));
    }

    pub fn set_sidebar_toggle_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_toggle_sidebar = Some(Box::new(callback));
    }

    pub fn set_navigation_callbacks(
        &mut self,
        up: impl FnMut() + 'static,
        down: impl FnMut() + 'static,
    ) {
        self.on_navigate_up = Some(Box::new(up));
        self.on_navigate_down = Some(Box::new(down));
    }

    pub fn set_route_navigator(&mut self, callback: impl FnMut(&str) + 'static) {
        self.on_navigate = Some(Box::new(callback));
    }

    pub fn set_show_help_callback(&mut self, callback: impl FnMut() + 'static) {
        self.on_show_help = Some(Box::new(callback));
    }
}

/// Run one action with panic isolation: a faulty shortcut must not take
/// the whole engine down with it.
fn run_guarded(label: &str, action: impl FnOnce()) {
    if catch_unwind(AssertUnwindSafe(action)).is_err() {
        log::error!("shortcut action '{label}' panicked; engine state is unaffected");
    }
}
