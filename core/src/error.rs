use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Symbol alphabet is empty")]
    EmptyAlphabet,
    #[error("Symbol alphabet contains duplicates")]
    DuplicateSymbol,
    #[error("Symbol alphabet too large, at most {max} symbols fit")]
    TooManySymbols { max: usize },
    #[error("Two-star threshold {two_stars} exceeds one-star threshold {one_star}")]
    InvalidStarThresholds { two_stars: u32, one_star: u32 },
    #[error("Timer tick period must be non-zero")]
    ZeroTickPeriod,
    #[error("Generated deck card ids are not a permutation of its positions")]
    InvalidDeck,
}

impl GameError {
    /// Whether the configuration was rejected before any game could start.
    pub const fn is_configuration(self) -> bool {
        use GameError::*;
        match self {
            EmptyAlphabet => true,
            DuplicateSymbol => true,
            TooManySymbols { .. } => true,
            InvalidStarThresholds { .. } => true,
            ZeroTickPeriod => true,
            InvalidDeck => false,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
