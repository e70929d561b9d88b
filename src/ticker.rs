use std::time::Duration;

/// Default UI tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

const MIN_TICK_MS: u64 = 20;
const MAX_TICK_MS: u64 = 1000;

/// Input poll interval for the event loop. Clamped so a one-second timer
/// never waits more than one frame to be drawn.
pub fn tick_duration(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS))
}

/// Poll no longer than the next timer deadline, so due timers fire on time
pub fn poll_timeout(tick: Duration, next_due: Option<Duration>) -> Duration {
    match next_due {
        Some(due) => tick.min(due),
        None => tick,
    }
}
