use serde::{Deserialize, Serialize};

use crate::*;

pub const MAX_STARS: StarCount = 3;

/// Move counts at which the rating drops to two and then one star.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarThresholds {
    pub two_stars: MoveCount,
    pub one_star: MoveCount,
}

impl StarThresholds {
    pub const CLASSIC: Self = Self {
        two_stars: 16,
        one_star: 20,
    };

    pub fn new(two_stars: MoveCount, one_star: MoveCount) -> Result<Self> {
        if two_stars > one_star {
            return Err(GameError::InvalidStarThresholds {
                two_stars,
                one_star,
            });
        }
        Ok(Self {
            two_stars,
            one_star,
        })
    }

    pub const fn stars_for(&self, moves: MoveCount) -> StarCount {
        if moves >= self.one_star {
            1
        } else if moves >= self.two_stars {
            2
        } else {
            MAX_STARS
        }
    }
}

impl Default for StarThresholds {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Star rating for `moves` under the classic thresholds.
pub const fn compute_stars(moves: MoveCount) -> StarCount {
    StarThresholds::CLASSIC.stars_for(moves)
}
