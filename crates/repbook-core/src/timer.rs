//! Tick-driven timers.
//!
//! Neither timer owns a thread or a clock: the caller ticks them once per
//! second and reacts to what the tick returns. Dropping a timer cancels it.

/// `MM:SS`, or `H:MM:SS` from one hour up.
pub fn format_elapsed(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}:{:02}:{:02}", h, m, s)
    } else {
        format!("{:02}:{:02}", m, s)
    }
}

/// Outcome of one countdown tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Not running
    Idle,
    /// Seconds left after this tick
    Remaining(u32),
    /// Reached zero; the countdown is idle again
    Fired,
}

/// Rest countdown between sets.
#[derive(Debug, Clone, Default)]
pub struct RestCountdown {
    remaining: Option<u32>,
}

impl RestCountdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.remaining.is_some()
    }

    pub fn remaining(&self) -> Option<u32> {
        self.remaining
    }

    /// Start a countdown of `duration` seconds, or cancel the running one.
    pub fn toggle(&mut self, duration: u32) {
        self.remaining = match self.remaining {
            Some(_) => None,
            None => Some(duration),
        };
    }

    pub fn tick(&mut self) -> CountdownTick {
        match self.remaining {
            None => CountdownTick::Idle,
            Some(left) if left <= 1 => {
                self.remaining = None;
                CountdownTick::Fired
            }
            Some(left) => {
                self.remaining = Some(left - 1);
                CountdownTick::Remaining(left - 1)
            }
        }
    }
}

/// Result of toggling a stopwatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopwatchToggle {
    Started,
    /// Stopped at this many seconds; the value belongs in the time draft
    Stopped(u32),
}

/// Stopwatch for timed sets. Resumes from its current value.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    seconds: u32,
    running: bool,
}

impl Stopwatch {
    /// Resume from a stored time draft; unparseable drafts start at zero.
    pub fn from_draft(draft: &str) -> Self {
        Self {
            seconds: draft.trim().parse().unwrap_or(0),
            running: false,
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn toggle(&mut self) -> StopwatchToggle {
        self.running = !self.running;
        if self.running {
            StopwatchToggle::Started
        } else {
            StopwatchToggle::Stopped(self.seconds)
        }
    }

    /// Advance one second; returns the new value while running.
    pub fn tick(&mut self) -> Option<u32> {
        if !self.running {
            return None;
        }
        self.seconds += 1;
        Some(self.seconds)
    }
}
