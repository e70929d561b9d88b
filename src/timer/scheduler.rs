//! Deadline queue for the app's countdowns.
//!
//! The event loop owns a single `TimerQueue`. Countdowns schedule a
//! `TimerKey` with `after()` and keep the returned `CancelToken`; the loop
//! drains due entries with `pop_due()` and dispatches them. Time comes from
//! an injected `Clock`, so tests drive every countdown with `ManualClock`.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Monotonic time source, measured from an arbitrary origin
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Real clock backed by `Instant`
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-driven clock; clones share the same time
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now.get()
    }
}

/// What a scheduled entry means when it fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    /// One second of the Pomodoro countdown elapsed
    PomodoroTick,
    /// One second of the five-second rule elapsed
    FiveSecondTick,
    /// The "START!" banner window is over
    StartBannerElapsed,
    /// The in-app toast should disappear
    ToastExpired,
}

/// Handle for cancelling a scheduled entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CancelToken(u64);

/// An entry that came due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    pub key: TimerKey,
    /// When it was due, which may be earlier than now if the loop lagged
    pub due: Duration,
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    token: CancelToken,
    key: TimerKey,
    due: Duration,
}

/// Single-threaded timer queue
pub struct TimerQueue {
    clock: Box<dyn Clock>,
    next_token: u64,
    pending: Vec<Pending>,
}

impl TimerQueue {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            clock,
            next_token: 0,
            pending: Vec::new(),
        }
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    /// Schedule `key` to fire `delay` from now
    pub fn after(&mut self, delay: Duration, key: TimerKey) -> CancelToken {
        let due = self.clock.now() + delay;
        self.at(due, key)
    }

    /// Schedule `key` at an absolute clock reading
    pub fn at(&mut self, due: Duration, key: TimerKey) -> CancelToken {
        let token = CancelToken(self.next_token);
        self.next_token += 1;
        self.pending.push(Pending { token, key, due });
        token
    }

    /// Cancel an entry. Returns false when it already fired or was cancelled.
    pub fn cancel(&mut self, token: CancelToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        self.pending.len() != before
    }

    /// Remove and return the earliest due entry, if any is due
    pub fn pop_due(&mut self) -> Option<Fired> {
        let now = self.clock.now();
        // Earliest due first; ties go to the entry scheduled first
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(_, p)| (p.due, p.token.0))
            .map(|(idx, _)| idx)?;
        let entry = self.pending.remove(idx);
        Some(Fired {
            key: entry.key,
            due: entry.due,
        })
    }

    /// Time until the next entry is due
    pub fn next_due_in(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.pending
            .iter()
            .map(|p| p.due.saturating_sub(now))
            .min()
    }

    /// Number of pending entries for a key
    #[cfg(test)]
    pub fn pending_for(&self, key: TimerKey) -> usize {
        self.pending.iter().filter(|p| p.key == key).count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
