//! Pomodoro countdown.
//!
//! ```text
//! Idle --start--> Running --pause--> Idle
//!   ^                |
//!   +---- tick to 0 -+  (mode flips, remaining refills, stays Idle)
//! ```
//!
//! The state machine only counts whole seconds; the caller feeds `tick()`
//! once per elapsed second while running.

use serde::{Deserialize, Serialize};

/// Default work interval (25 minutes)
pub const WORK_SECS: u32 = 25 * 60;

/// Default break interval (5 minutes)
pub const BREAK_SECS: u32 = 5 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Work,
    Break,
}

impl TimerMode {
    pub fn flipped(self) -> Self {
        match self {
            Self::Work => Self::Break,
            Self::Break => Self::Work,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Focus Time",
            Self::Break => "Break Time",
        }
    }
}

/// Emitted when an interval runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionComplete {
    /// The interval that just ended
    pub ended: TimerMode,
}

impl SessionComplete {
    /// Notification title and body announcing what comes next
    pub fn message(&self, break_secs: u32) -> (String, String) {
        match self.ended {
            TimerMode::Work => (
                "Break time!".to_string(),
                format!("Time for a {}-minute break", break_secs / 60),
            ),
            TimerMode::Break => (
                "Work time!".to_string(),
                "Time to focus on your task".to_string(),
            ),
        }
    }
}

/// Interval lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    pub work_secs: u32,
    pub break_secs: u32,
}

impl Default for Intervals {
    fn default() -> Self {
        Self {
            work_secs: WORK_SECS,
            break_secs: BREAK_SECS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pomodoro {
    intervals: Intervals,
    mode: TimerMode,
    remaining_secs: u32,
    running: bool,
    /// Work/break cycles finished, starting at 1 like the on-screen counter
    session: u32,
}

impl Pomodoro {
    pub fn new(intervals: Intervals) -> Self {
        Self {
            intervals,
            mode: TimerMode::Work,
            remaining_secs: intervals.work_secs,
            running: false,
            session: 1,
        }
    }

    /// Rebuild a paused timer from saved state, clamping out-of-range values
    pub fn restore(intervals: Intervals, mode: TimerMode, remaining_secs: u32, session: u32) -> Self {
        let mut timer = Self::new(intervals);
        timer.mode = mode;
        timer.remaining_secs = remaining_secs.min(timer.duration_of(mode));
        if timer.remaining_secs == 0 {
            timer.remaining_secs = timer.duration_of(mode);
        }
        timer.session = session.max(1);
        timer
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> u32 {
        self.session
    }

    pub fn duration_of(&self, mode: TimerMode) -> u32 {
        match mode {
            TimerMode::Work => self.intervals.work_secs,
            TimerMode::Break => self.intervals.break_secs,
        }
    }

    /// Start counting down. Returns true if the timer was idle and now runs.
    pub fn start(&mut self) -> bool {
        if self.running || self.remaining_secs == 0 {
            return false;
        }
        self.running = true;
        true
    }

    /// Stop counting down, keeping the remaining time
    pub fn pause(&mut self) -> bool {
        let was_running = self.running;
        self.running = false;
        was_running
    }

    /// Stop and refill the current mode's interval
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining_secs = self.duration_of(self.mode);
    }

    /// Count one second. When the interval runs out the mode flips, the new
    /// interval is loaded and the timer stops until started again.
    pub fn tick(&mut self) -> Option<SessionComplete> {
        if !self.running {
            return None;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return None;
        }

        let ended = self.mode;
        if ended == TimerMode::Break {
            self.session += 1;
        }
        self.mode = ended.flipped();
        self.remaining_secs = self.duration_of(self.mode);
        self.running = false;
        Some(SessionComplete { ended })
    }

    /// Fraction of the current interval already elapsed, 0.0 to 1.0
    pub fn progress(&self) -> f64 {
        let total = self.duration_of(self.mode);
        if total == 0 {
            return 0.0;
        }
        (total - self.remaining_secs.min(total)) as f64 / total as f64
    }

    /// Remaining time as "MM:SS"
    pub fn remaining_formatted(&self) -> String {
        format_clock(self.remaining_secs)
    }
}

impl Default for Pomodoro {
    fn default() -> Self {
        Self::new(Intervals::default())
    }
}

/// Format seconds as zero-padded "MM:SS"
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
