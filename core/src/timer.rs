use core::fmt;
use core::time::Duration;
use serde::{Deserialize, Serialize};

/// Game clock measured against the engine's virtual time.
///
/// Valid transitions:
/// - Stopped (never started) -> Running
/// - Running -> Stopped (final time retained)
///
/// A reset is done by replacing the timer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameTimer {
    started_at: Option<Duration>,
    stopped_at: Option<Duration>,
}

impl GameTimer {
    pub const fn new() -> Self {
        Self {
            started_at: None,
            stopped_at: None,
        }
    }

    pub const fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub const fn is_running(&self) -> bool {
        self.started_at.is_some() && self.stopped_at.is_none()
    }

    /// Starts the clock at `now`; returns false when it was already started this game.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.started_at.is_some() {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    /// Elapsed time as of `now`, for the periodic display refresh.
    pub fn tick(&self, now: Duration) -> ElapsedTime {
        self.elapsed(now)
    }

    /// Freezes the elapsed time. Has no effect on a timer that never started or already stopped.
    pub fn stop(&mut self, now: Duration) -> ElapsedTime {
        if self.is_running() {
            self.stopped_at = Some(now);
        }
        self.elapsed(now)
    }

    pub fn elapsed(&self, now: Duration) -> ElapsedTime {
        match self.started_at {
            Some(started_at) => {
                let end = self.stopped_at.unwrap_or(now);
                ElapsedTime(end.saturating_sub(started_at))
            }
            None => ElapsedTime::ZERO,
        }
    }
}

/// Time played, displayed as `HH:MM:SS`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElapsedTime(pub Duration);

impl ElapsedTime {
    pub const ZERO: Self = Self(Duration::ZERO);

    pub const fn as_duration(self) -> Duration {
        self.0
    }

    /// Clock fields as shown to the player; hours wrap at a day.
    pub const fn hms(self) -> (u64, u64, u64) {
        let secs = self.0.as_secs();
        ((secs / 3600) % 24, (secs / 60) % 60, secs % 60)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds) = self.hms();
        write!(f, "{hours:02}:{minutes:02}:{seconds:02}")
    }
}
