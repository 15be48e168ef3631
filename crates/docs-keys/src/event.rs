//! Keydown events and the injectable event source.
//!
//! The engine never talks to a real DOM. Hosts implement [`EventSource`]
//! over whatever event plumbing they have (a browser bridge, a test
//! harness, a terminal loop) and the engine attaches a single keydown
//! handler to it. [`SyntheticEventSource`] is the in-process implementation
//! used by the demo binary and the test suites.

use std::cell::RefCell;
use std::rc::Rc;

/// The element that had keyboard focus when the event fired.
///
/// Only the pieces the suppression guard looks at: the tag name and the
/// raw `contentEditable` attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTarget {
    pub tag: String,
    pub content_editable: Option<String>,
}

impl EventTarget {
    pub fn element(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            content_editable: None,
        }
    }

    pub fn with_content_editable(mut self, value: impl Into<String>) -> Self {
        self.content_editable = Some(value.into());
        self
    }
}

/// A keydown event as the engine sees it: logical key value, modifier
/// flags, and the focused target.
///
/// `meta` is the Cmd key on Mac hosts and the OS/Windows key elsewhere.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
    pub target: Option<EventTarget>,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ctrl: false,
            meta: false,
            shift: false,
            alt: false,
            target: None,
            default_prevented: false,
        }
    }

    pub fn with_ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn with_meta(mut self) -> Self {
        self.meta = true;
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

    pub fn with_target(mut self, target: EventTarget) -> Self {
        self.target = Some(target);
        self
    }

    /// True if any of the four modifier flags is set.
    pub fn has_any_modifier(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }

    /// Mark the event handled so the host skips its default behavior.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Handler invoked by an event source for each keydown.
pub type KeydownHandler = Rc<RefCell<dyn FnMut(&mut KeyEvent)>>;

/// Opaque token identifying one attached handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Where keydown events come from.
///
/// `detach` must be idempotent: detaching an unknown or already-detached
/// id returns `false` and does nothing.
pub trait EventSource {
    fn attach(&mut self, handler: KeydownHandler) -> ListenerId;
    fn detach(&mut self, id: ListenerId) -> bool;
}

#[derive(Default)]
struct SourceInner {
    listeners: Vec<(ListenerId, KeydownHandler)>,
    next_id: u64,
}

/// In-process event source.
///
/// Clones share the same listener list, so a host can keep one handle for
/// emitting while the provider owns another for attach/detach.
#[derive(Clone, Default)]
pub struct SyntheticEventSource {
    inner: Rc<RefCell<SourceInner>>,
}

impl SyntheticEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one keydown to every attached handler.
    pub fn emit(&self, event: &mut KeyEvent) {
        // Snapshot the handlers first so a handler that attaches or
        // detaches listeners does not alias the borrow.
        let handlers: Vec<KeydownHandler> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in handlers {
            (handler.borrow_mut())(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl EventSource for SyntheticEventSource {
    fn attach(&mut self, handler: KeydownHandler) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = ListenerId(inner.next_id);
        inner.listeners.push((id, handler));
        id
    }

    fn detach(&mut self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }
}
