//! Two-key sequence state machine.
//!
//! A bare `g` opens a sequence; the next key either completes one of the
//! fixed routes or is swallowed. Two states only (idle and pending) with a
//! deadline-based reset, which sidesteps any ambiguity between `g` as a
//! sequence prefix and `g` as a standalone shortcut, at the documented
//! cost of consuming the second keystroke of a failed sequence.

use std::time::{Duration, Instant};

use crate::clock::Deadline;
use crate::event::KeyEvent;

/// How long a pending sequence waits for its second key.
pub const SEQUENCE_TIMEOUT: Duration = Duration::from_millis(1000);

/// The sequence leader key.
const LEADER_KEY: &str = "g";

/// Fixed route table for completed sequences.
const ROUTES: &[(&str, &str)] = &[("g h", "/"), ("g d", "/docs"), ("g e", "/engine")];

/// What the machine did with one keydown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStep {
    /// Not sequence-related; evaluate the event normally.
    Pass,
    /// A sequence opened; the event is handled.
    Started,
    /// A sequence completed; navigate to the route.
    Completed(&'static str),
    /// A pending sequence swallowed the key without completing. The key
    /// must not be evaluated against the registry.
    Consumed,
}

/// Tracks an in-progress sequence and its reset deadline.
#[derive(Debug)]
pub struct SequenceTracker {
    buffer: Vec<String>,
    deadline: Option<Deadline>,
    timeout: Duration,
}

impl SequenceTracker {
    pub fn new(timeout: Duration) -> Self {
        Self {
            buffer: Vec::new(),
            deadline: None,
            timeout,
        }
    }

    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    /// The keys collected so far (empty when idle).
    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }

    pub fn is_pending(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Lazily apply an elapsed deadline: the buffer clears and the next
    /// key is evaluated fresh.
    pub fn expire(&mut self, now: Instant) {
        if let Some(deadline) = self.deadline
            && deadline.expired(now)
        {
            self.reset();
        }
    }

    /// Drop any pending state and cancel the deadline.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.deadline = None;
    }

    /// Feed one keydown through the machine. Callers must run [`expire`]
    /// (or an equivalent sweep) first so stale pending state is gone.
    ///
    /// [`expire`]: SequenceTracker::expire
    pub fn step(&mut self, event: &KeyEvent, now: Instant) -> SequenceStep {
        if self.buffer.is_empty() {
            // A modified `g` is not a sequence opener; let it fall through
            // to normal single-key matching.
            if event.key == LEADER_KEY && !event.has_any_modifier() {
                self.buffer.push(LEADER_KEY.to_string());
                self.deadline = Some(Deadline::after(now, self.timeout));
                return SequenceStep::Started;
            }
            return SequenceStep::Pass;
        }

        let candidate = format!("{} {}", self.buffer.join(" "), event.key.to_lowercase());
        if let Some((_, route)) = ROUTES.iter().find(|(sequence, _)| *sequence == candidate) {
            log::debug!("sequence '{candidate}' completed, route {route}");
            self.reset();
            return SequenceStep::Completed(route);
        }

        // Failed sequence: back to idle, and the key is consumed. The
        // deadline is rescheduled rather than cancelled; its late expiry
        // on an idle machine is a no-op.
        self.buffer.clear();
        self.deadline = Some(Deadline::after(now, self.timeout));
        SequenceStep::Consumed
    }
}

impl Default for SequenceTracker {
    fn default() -> Self {
        Self::new(SEQUENCE_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> SequenceTracker {
        SequenceTracker::default()
    }

    #[test]
    fn bare_leader_opens_a_sequence() {
        let mut seq = tracker();
        let t0 = Instant::now();
        assert_eq!(seq.step(&KeyEvent::new("g"), t0), SequenceStep::Started);
        assert_eq!(seq.buffer(), ["g"]);
        assert!(seq.is_pending());
    }

    #[test]
    fn modified_leader_passes_through() {
        let mut seq = tracker();
        let t0 = Instant::now();
        for event in [
            KeyEvent::new("g").with_ctrl(),
            KeyEvent::new("g").with_meta(),
            KeyEvent::new("g").with_shift(),
            KeyEvent::new("g").with_alt(),
        ] {
            assert_eq!(seq.step(&event, t0), SequenceStep::Pass);
            assert!(!seq.is_pending());
        }
    }

    #[test]
    fn non_leader_keys_pass_through_when_idle() {
        let mut seq = tracker();
        let t0 = Instant::now();
        assert_eq!(seq.step(&KeyEvent::new("h"), t0), SequenceStep::Pass);
        assert_eq!(seq.step(&KeyEvent::new("?"), t0), SequenceStep::Pass);
    }

    #[test]
    fn mapped_second_keys_complete_routes() {
        let cases = [("h", "/"), ("d", "/docs"), ("e", "/engine")];
        for (second, route) in cases {
            let mut seq = tracker();
            let t0 = Instant::now();
            seq.step(&KeyEvent::new("g"), t0);
            assert_eq!(
                seq.step(&KeyEvent::new(second), t0 + Duration::from_millis(500)),
                SequenceStep::Completed(route)
            );
            assert!(!seq.is_pending());
        }
    }

    #[test]
    fn second_key_is_lowercased_before_lookup() {
        let mut seq = tracker();
        let t0 = Instant::now();
        seq.step(&KeyEvent::new("g"), t0);
        assert_eq!(
            seq.step(&KeyEvent::new("H"), t0),
            SequenceStep::Completed("/")
        );
    }

    #[test]
    fn unmapped_second_key_is_consumed_and_state_returns_to_idle() {
        let mut seq = tracker();
        let t0 = Instant::now();
        seq.step(&KeyEvent::new("g"), t0);
        assert_eq!(seq.step(&KeyEvent::new("x"), t0), SequenceStep::Consumed);
        assert!(!seq.is_pending());

        // The consumed key did not leave a half-open sequence behind.
        assert_eq!(seq.step(&KeyEvent::new("h"), t0), SequenceStep::Pass);
    }

    #[test]
    fn deadline_resets_a_pending_sequence() {
        let mut seq = tracker();
        let t0 = Instant::now();
        seq.step(&KeyEvent::new("g"), t0);

        seq.expire(t0 + Duration::from_millis(1001));
        assert!(!seq.is_pending());

        // The next key is evaluated fresh.
        assert_eq!(
            seq.step(&KeyEvent::new("h"), t0 + Duration::from_millis(1001)),
            SequenceStep::Pass
        );
    }

    #[test]
    fn deadline_does_not_fire_early() {
        let mut seq = tracker();
        let t0 = Instant::now();
        seq.step(&KeyEvent::new("g"), t0);

        seq.expire(t0 + Duration::from_millis(999));
        assert!(seq.is_pending());
        assert_eq!(
            seq.step(&KeyEvent::new("h"), t0 + Duration::from_millis(999)),
            SequenceStep::Completed("/")
        );
    }

    #[test]
    fn failed_sequence_reschedules_the_deadline() {
        let mut seq = tracker();
        let t0 = Instant::now();
        seq.step(&KeyEvent::new("g"), t0);
        seq.step(&KeyEvent::new("x"), t0 + Duration::from_millis(900));

        // The rescheduled deadline expires on an idle machine: a no-op.
        seq.expire(t0 + Duration::from_millis(2000));
        assert!(!seq.is_pending());
        assert_eq!(
            seq.step(&KeyEvent::new("g"), t0 + Duration::from_millis(2000)),
            SequenceStep::Started
        );
    }

    #[test]
    fn leader_as_second_key_is_consumed() {
        let mut seq = tracker();
        let t0 = Instant::now();
        seq.step(&KeyEvent::new("g"), t0);
        assert_eq!(seq.step(&KeyEvent::new("g"), t0), SequenceStep::Consumed);
        assert!(!seq.is_pending());
    }
}
