//! Provider facade: the surface feature components talk to.
//!
//! Owns the engine core behind `Rc<RefCell<_>>`, wires it to an event
//! source on `mount`, and exposes registration, callback slots, toast
//! notifications, and the read accessors. Exactly one listener exists per
//! mounted provider; `unmount` (or dropping the provider) detaches it and
//! cancels outstanding deadlines, so no stale callback can fire after
//! teardown.

use std::cell::RefCell;
use std::rc::Rc;

use docs_keys_combo::Platform;

use crate::clock::Clock;
use crate::config::Config;
use crate::engine::{Dispatch, EngineCore};
use crate::event::{EventSource, KeyEvent, KeydownHandler, ListenerId};
use crate::registry::Shortcut;

pub struct ShortcutProvider<S: EventSource> {
    core: Rc<RefCell<EngineCore>>,
    source: S,
    listener: Option<ListenerId>,
}

impl<S: EventSource> ShortcutProvider<S> {
    pub fn new(source: S, platform: Platform) -> Self {
        Self {
            core: Rc::new(RefCell::new(EngineCore::new(platform))),
            source,
            listener: None,
        }
    }

    /// Like [`ShortcutProvider::new`] with an explicit clock. Tests use
    /// this to drive deadlines without sleeping.
    pub fn with_clock(source: S, platform: Platform, clock: Box<dyn Clock>) -> Self {
        Self {
            core: Rc::new(RefCell::new(EngineCore::with_clock(platform, clock))),
            source,
            listener: None,
        }
    }

    /// Apply timeouts and register config bindings.
    pub fn apply_config(&self, config: &Config) {
        self.core.borrow_mut().apply_config(config);
    }

    // --- lifecycle -------------------------------------------------------

    /// Attach the engine's keydown handler to the event source.
    ///
    /// Re-mounting swaps the listener: the old one is detached and a new
    /// one attached in the same synchronous call, so no event can slip
    /// between the two.
    pub fn mount(&mut self) {
        if let Some(old) = self.listener.take() {
            self.source.detach(old);
        }
        // A weak handle: even if a source implementation keeps the handler
        // alive past detach, a dropped engine stays dead.
        let core = Rc::downgrade(&self.core);
        let handler: KeydownHandler = Rc::new(RefCell::new(move |event: &mut KeyEvent| {
            if let Some(core) = core.upgrade() {
                core.borrow_mut().dispatch(event);
            }
        }));
        self.listener = Some(self.source.attach(handler));
    }

    /// Detach the listener and cancel outstanding deadlines.
    pub fn unmount(&mut self) {
        if let Some(id) = self.listener.take() {
            self.source.detach(id);
        }
        self.core.borrow_mut().cancel_timers();
    }

    pub fn is_mounted(&self) -> bool {
        self.listener.is_some()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    // --- dispatch --------------------------------------------------------

    /// Resolve one keydown directly, bypassing the event source. Hosts
    /// that pump their own event loop use this instead of `mount`.
    pub fn dispatch(&self, event: &mut KeyEvent) -> Dispatch {
        self.core.borrow_mut().dispatch(event)
    }

    /// Sweep expired deadlines (toast auto-hide, sequence reset).
    pub fn tick(&self) {
        self.core.borrow_mut().tick();
    }

    // --- registration ----------------------------------------------------

    pub fn register_shortcut(&self, shortcut: Shortcut) {
        self.core.borrow_mut().register_shortcut(shortcut);
    }

    /// Remove every shortcut whose stored key equals `key` exactly,
    /// defaults included. Returns the number of entries removed.
    pub fn unregister_shortcut(&self, key: &str) -> usize {
        self.core.borrow_mut().unregister_shortcut(key)
    }

    // --- notifications ---------------------------------------------------

    pub fn show_toast(&self, message: impl Into<String>) {
        self.core.borrow_mut().show_toast(message);
    }

    pub fn toast(&self) -> Option<String> {
        self.core.borrow().toast().map(str::to_string)
    }

    // --- callback slots (single-slot, last writer wins) ------------------

    pub fn set_search_focus_callback(&self, callback: impl FnMut() + 'static) {
        self.core.borrow_mut().set_search_focus_callback(callback);
    }

    pub fn set_sidebar_toggle_callback(&self, callback: impl FnMut() + 'static) {
        self.core.borrow_mut().set_sidebar_toggle_callback(callback);
    }

    pub fn set_navigation_callbacks(
        &self,
        up: impl FnMut() + 'static,
        down: impl FnMut() + 'static,
    ) {
        self.core.borrow_mut().set_navigation_callbacks(up, down);
    }

    pub fn set_route_navigator(&self, callback: impl FnMut(&str) + 'static) {
        self.core.borrow_mut().set_route_navigator(callback);
    }

    pub fn set_show_help_callback(&self, callback: impl FnMut() + 'static) {
        self.core.borrow_mut().set_show_help_callback(callback);
    }

    // --- read accessors --------------------------------------------------

    /// A point-in-time snapshot of the registry in precedence order.
    pub fn shortcuts(&self) -> Vec<Shortcut> {
        self.core.borrow().shortcuts()
    }

    pub fn shortcut_count(&self) -> usize {
        self.core.borrow().registry().len()
    }

    pub fn format_shortcut(&self, shortcut: &Shortcut) -> String {
        self.core.borrow().format_shortcut(shortcut)
    }

    pub fn is_help_open(&self) -> bool {
        self.core.borrow().is_help_open()
    }

    pub fn set_help_open(&self, open: bool) {
        self.core.borrow_mut().set_help_open(open);
    }

    pub fn key_sequence(&self) -> Vec<String> {
        self.core.borrow().key_sequence()
    }

    pub fn is_mac(&self) -> bool {
        self.core.borrow().is_mac()
    }
}

impl<S: EventSource> Drop for ShortcutProvider<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}
