use std::fmt::{Display, Formatter};
use std::ops::Deref;
use tracing::{info, trace};

pub const FIRST_LABEL: &str = "40-min Timer";
pub const FIRST_DURATION_SECS: u32 = 40 * 60;
pub const SECOND_LABEL: &str = "13-min Timer";
pub const SECOND_DURATION_SECS: u32 = 13 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerId {
    First,
    Second,
}

impl TimerId {
    pub const ALL: [TimerId; 2] = [TimerId::First, TimerId::Second];

    pub fn other(self) -> TimerId {
        match self {
            TimerId::First => TimerId::Second,
            TimerId::Second => TimerId::First,
        }
    }
}

impl Display for TimerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TimerId::First => write!(f, "timer1"),
            TimerId::Second => write!(f, "timer2"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    label: String,
    duration: ClockTime,
    remaining: ClockTime,
    is_running: bool,
}

impl Timer {
    pub fn new(label: impl Into<String>, duration_secs: u32) -> Timer {
        Timer {
            label: label.into(),
            duration: ClockTime(duration_secs),
            remaining: ClockTime(duration_secs),
            is_running: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration(&self) -> ClockTime {
        self.duration
    }

    pub fn time_remaining(&self) -> ClockTime {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    /// Fraction of the countdown that has elapsed, in `0.0..=1.0`.
    pub fn progress_percentage(&self) -> f64 {
        let duration = *self.duration();
        if duration == 0 {
            return 1.0;
        }
        1.0 - f64::from(*self.remaining) / f64::from(duration)
    }

    pub fn reset(&mut self) {
        self.is_running = false;
        self.remaining = self.duration;
    }

    fn start(&mut self) {
        self.is_running = true;
    }

    fn pause(&mut self) {
        self.is_running = false;
    }

    /// Advances a running timer by one second. Returns `true` on the tick that
    /// brings it to zero.
    fn advance(&mut self) -> bool {
        if !self.is_running {
            return false;
        }

        self.remaining = ClockTime(self.remaining.saturating_sub(1));
        if *self.remaining == 0 {
            self.is_running = false;
            return true;
        }

        false
    }
}

/// Emitted once when a running timer reaches zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub timer: TimerId,
    pub label: String,
}

/// The two lesson timers. At most one of them runs at a time: starting one
/// resets the other.
#[derive(Debug, Clone)]
pub struct TimerPair {
    first: Timer,
    second: Timer,
}

impl TimerPair {
    pub fn new(first: Timer, second: Timer) -> TimerPair {
        TimerPair { first, second }
    }

    pub fn get(&self, id: TimerId) -> &Timer {
        match id {
            TimerId::First => &self.first,
            TimerId::Second => &self.second,
        }
    }

    fn get_mut(&mut self, id: TimerId) -> &mut Timer {
        match id {
            TimerId::First => &mut self.first,
            TimerId::Second => &mut self.second,
        }
    }

    pub fn running(&self) -> Option<TimerId> {
        TimerId::ALL
            .into_iter()
            .find(|id| self.get(*id).is_running())
    }

    pub fn start_or_pause(&mut self, id: TimerId) {
        if self.get(id).is_running() {
            self.get_mut(id).pause();
            info!(timer = %id, remaining = %self.get(id).time_remaining(), "timer paused");
        } else {
            self.get_mut(id).start();
            self.get_mut(id.other()).reset();
            info!(timer = %id, remaining = %self.get(id).time_remaining(), "timer started");
        }
    }

    pub fn reset(&mut self, id: TimerId) {
        self.get_mut(id).reset();
        info!(timer = %id, "timer reset");
    }

    pub fn tick(&mut self) -> Option<Completion> {
        let id = self.running()?;
        let timer = self.get_mut(id);
        let completed = timer.advance();
        trace!(timer = %id, remaining = %timer.time_remaining(), "tick");

        completed.then(|| Completion {
            timer: id,
            label: timer.label().to_string(),
        })
    }
}

impl Default for TimerPair {
    fn default() -> TimerPair {
        TimerPair::new(
            Timer::new(FIRST_LABEL, FIRST_DURATION_SECS),
            Timer::new(SECOND_LABEL, SECOND_DURATION_SECS),
        )
    }
}

/// A whole number of seconds, displayed as `mm:ss`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct ClockTime(pub u32);

impl Deref for ClockTime {
    type Target = u32;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for ClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = self.0 / 60;
        let seconds = self.0 % 60;
        write!(f, "{minutes:02}:{seconds:02}")
    }
}
