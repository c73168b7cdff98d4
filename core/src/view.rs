use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// What the player can see of one board position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardView {
    pub id: CardId,
    pub face: CardFace,
    /// Only present while the card is face up.
    pub symbol: Option<Symbol>,
}

/// Player-visible snapshot of a game, safe to hand to a client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardView {
    pub generation: Generation,
    pub cards: Vec<CardView>,
    pub moves: MoveCount,
    pub stars: StarCount,
    pub time: ElapsedTime,
    pub state: TurnState,
}

impl BoardView {
    pub fn from_engine<O: GameObserver, G: DeckGenerator>(engine: &MatchEngine<O, G>) -> Self {
        let cards = engine
            .cards()
            .iter()
            .map(|card| {
                let face = engine.face_of(card.id).unwrap_or_default();
                CardView {
                    id: card.id,
                    face,
                    symbol: face.is_face_up().then(|| card.symbol.clone()),
                }
            })
            .collect();

        Self {
            generation: engine.generation(),
            cards,
            moves: engine.moves(),
            stars: engine.stars(),
            time: engine.elapsed(),
            state: engine.state(),
        }
    }

    pub fn face_up_count(&self) -> usize {
        self.cards.iter().filter(|card| card.face.is_face_up()).count()
    }
}

impl<O: GameObserver, G: DeckGenerator> MatchEngine<O, G> {
    pub fn view(&self) -> BoardView {
        BoardView::from_engine(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_symbols_stay_hidden() {
        let config = GameConfig::new(["A", "B"]).unwrap();
        let mut engine = MatchEngine::new(config, OrderedDeck, ()).unwrap();
        engine.select_card(0);
        engine.select_card(2);
        engine.select_card(1);

        let view = engine.view();

        assert_eq!(view.face_up_count(), 3);
        assert_eq!(view.cards[0].face, CardFace::Matched);
        assert_eq!(view.cards[1].face, CardFace::Revealed);
        assert_eq!(view.cards[1].symbol, Some(Symbol::from("B")));
        assert_eq!(view.cards[3].face, CardFace::Hidden);
        assert_eq!(view.cards[3].symbol, None);
        assert_eq!(view.moves, 1);
        assert_eq!(view.state, TurnState::OneOpen(1));
    }
}
