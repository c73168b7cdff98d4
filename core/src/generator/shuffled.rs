use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that deals every game from a freshly shuffled deck. The RNG is seeded once, so successive
/// games of the same generator get different layouts while the whole sequence stays reproducible from the seed.
#[derive(Clone, Debug)]
pub struct ShuffledDeck {
    seed: u64,
    rng: SmallRng,
}

impl ShuffledDeck {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl DeckGenerator for ShuffledDeck {
    fn generate(&mut self, symbols: &[Symbol]) -> Result<Vec<Card>> {
        let mut deck = generate_deck(symbols)?;
        shuffle(&mut deck, &mut self.rng);
        log::debug!(
            "Shuffled deck of {} cards, seed: {}",
            deck.len(),
            self.seed
        );
        Ok(deck)
    }
}
