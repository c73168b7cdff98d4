use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::Rng;

use crate::*;
pub use shuffled::*;

mod shuffled;

/// Largest alphabet whose deck still has an id for every card.
pub const MAX_SYMBOLS: usize = (CardId::MAX as usize + 1) / 2;

/// Produces the deck for each new game.
pub trait DeckGenerator {
    fn generate(&mut self, symbols: &[Symbol]) -> Result<Vec<Card>>;
}

/// Checks that `symbols` can back a deck: non-empty, distinct, and small enough for `CardId`.
pub fn validate_symbols(symbols: &[Symbol]) -> Result<()> {
    if symbols.is_empty() {
        return Err(GameError::EmptyAlphabet);
    }
    if symbols.len() > MAX_SYMBOLS {
        return Err(GameError::TooManySymbols { max: MAX_SYMBOLS });
    }
    let mut seen = BTreeSet::new();
    if !symbols.iter().all(|symbol| seen.insert(symbol)) {
        return Err(GameError::DuplicateSymbol);
    }
    Ok(())
}

/// Two cards per symbol in generation order: card `i` carries `symbols[i % len]`.
pub fn generate_deck(symbols: &[Symbol]) -> Result<Vec<Card>> {
    validate_symbols(symbols)?;

    let total = symbols.len() * 2;
    let deck = (0..total)
        .map(|i| {
            // in range after validation
            let id = i as CardId;
            Card::new(id, symbols[i % symbols.len()].clone())
        })
        .collect();
    Ok(deck)
}

/// Uniform in-place Fisher-Yates shuffle, walking down from the last index.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Deck in generation order, so card ids equal board positions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct OrderedDeck;

impl DeckGenerator for OrderedDeck {
    fn generate(&mut self, symbols: &[Symbol]) -> Result<Vec<Card>> {
        generate_deck(symbols)
    }
}
