#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use observer::*;
pub use schedule::*;
pub use scoring::*;
pub use timer::*;
pub use types::*;
pub use view::*;

mod card;
mod engine;
mod error;
mod generator;
mod observer;
mod schedule;
mod scoring;
mod timer;
mod types;
mod view;

/// Everything tunable about a game, fixed at engine construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub symbols: Vec<Symbol>,
    pub mismatch_delay: Duration,
    pub tick_period: Duration,
    pub star_thresholds: StarThresholds,
}

impl GameConfig {
    pub const CLASSIC_SYMBOLS: [&'static str; 8] = [
        "diamond",
        "paper-plane-o",
        "anchor",
        "bolt",
        "cube",
        "leaf",
        "bicycle",
        "bomb",
    ];
    pub const DEFAULT_MISMATCH_DELAY: Duration = Duration::from_millis(500);
    pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_secs(1);

    pub fn new<S: Into<Symbol>>(symbols: impl IntoIterator<Item = S>) -> Result<Self> {
        let config = Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            mismatch_delay: Self::DEFAULT_MISMATCH_DELAY,
            tick_period: Self::DEFAULT_TICK_PERIOD,
            star_thresholds: StarThresholds::CLASSIC,
        };
        config.validate()?;
        Ok(config)
    }

    /// Eight symbols, 500 ms mismatch delay, one-second ticks, stars dropping at 16 and 20 moves.
    pub fn classic() -> Self {
        Self {
            symbols: Self::CLASSIC_SYMBOLS.into_iter().map(Symbol::from).collect(),
            mismatch_delay: Self::DEFAULT_MISMATCH_DELAY,
            tick_period: Self::DEFAULT_TICK_PERIOD,
            star_thresholds: StarThresholds::CLASSIC,
        }
    }

    pub fn with_mismatch_delay(mut self, mismatch_delay: Duration) -> Self {
        self.mismatch_delay = mismatch_delay;
        self
    }

    pub fn with_tick_period(mut self, tick_period: Duration) -> Result<Self> {
        if tick_period.is_zero() {
            return Err(GameError::ZeroTickPeriod);
        }
        self.tick_period = tick_period;
        Ok(self)
    }

    pub fn with_star_thresholds(mut self, star_thresholds: StarThresholds) -> Self {
        self.star_thresholds = star_thresholds;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_symbols(&self.symbols)?;
        if self.tick_period.is_zero() {
            return Err(GameError::ZeroTickPeriod);
        }
        let StarThresholds {
            two_stars,
            one_star,
        } = self.star_thresholds;
        StarThresholds::new(two_stars, one_star)?;
        Ok(())
    }

    pub fn total_cards(&self) -> usize {
        self.symbols.len() * 2
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// Outcome of selecting a card
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    NoChange,
    Revealed,
    Matched,
    Mismatched,
    Won,
}

impl SelectOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Matched => true,
            Mismatched => true,
            Won => true,
        }
    }

    /// Whether this selection completed a turn
    pub const fn completed_move(self) -> bool {
        matches!(self, Self::Matched | Self::Mismatched | Self::Won)
    }
}
