//! Five-second rule: count down 5..1, flash "START!" for two seconds, then
//! hand over to the Pomodoro timer.

use std::time::Duration;

/// Seconds counted before the start banner
pub const COUNTDOWN_FROM: u8 = 5;

/// How long the start banner stays up
pub const START_BANNER: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FiveSecondRule {
    #[default]
    Off,
    CountingDown(u8),
    ShowingStart,
}

/// Result of a countdown tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Still counting; schedule another tick
    Continue,
    /// Reached zero; the start banner is up
    Launch,
}

impl FiveSecondRule {
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Begin the countdown. Only starts from `Off`.
    pub fn trigger(&mut self) -> bool {
        if self.is_active() {
            return false;
        }
        *self = Self::CountingDown(COUNTDOWN_FROM);
        true
    }

    /// One second elapsed
    pub fn tick(&mut self) -> Option<CountdownStep> {
        match *self {
            Self::CountingDown(n) => {
                let next = n.saturating_sub(1);
                if next == 0 {
                    *self = Self::ShowingStart;
                    Some(CountdownStep::Launch)
                } else {
                    *self = Self::CountingDown(next);
                    Some(CountdownStep::Continue)
                }
            }
            _ => None,
        }
    }

    /// The banner window elapsed. Returns true when the work interval
    /// should start now.
    pub fn finish(&mut self) -> bool {
        if *self == Self::ShowingStart {
            *self = Self::Off;
            true
        } else {
            false
        }
    }

    pub fn cancel(&mut self) {
        *self = Self::Off;
    }
}
