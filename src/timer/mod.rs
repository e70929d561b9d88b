pub mod five_second;
pub mod pomodoro;
pub mod scheduler;

pub use five_second::{CountdownStep, FiveSecondRule, START_BANNER};
pub use pomodoro::{Intervals, Pomodoro, TimerMode};
#[cfg(test)]
pub use scheduler::ManualClock;
pub use scheduler::{CancelToken, SystemClock, TimerKey, TimerQueue};
