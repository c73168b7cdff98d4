use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Render hooks the engine calls as the game changes. Every hook defaults to doing nothing.
pub trait GameObserver {
    /// A new deck was dealt; `layout` lists card ids by board position.
    fn on_new_game(&mut self, _generation: Generation, _layout: &[CardId]) {}
    fn on_card_revealed(&mut self, _card: &Card) {}
    fn on_card_hidden(&mut self, _card: &Card) {}
    fn on_card_matched(&mut self, _card: &Card) {}
    fn on_moves_changed(&mut self, _moves: MoveCount) {}
    fn on_stars_changed(&mut self, _stars: StarCount) {}
    fn on_time_changed(&mut self, _time: ElapsedTime) {}
    fn on_game_won(&mut self, _stats: FinalStats) {}
}

impl GameObserver for () {}

impl<O: GameObserver + ?Sized> GameObserver for &mut O {
    fn on_new_game(&mut self, generation: Generation, layout: &[CardId]) {
        (**self).on_new_game(generation, layout)
    }

    fn on_card_revealed(&mut self, card: &Card) {
        (**self).on_card_revealed(card)
    }

    fn on_card_hidden(&mut self, card: &Card) {
        (**self).on_card_hidden(card)
    }

    fn on_card_matched(&mut self, card: &Card) {
        (**self).on_card_matched(card)
    }

    fn on_moves_changed(&mut self, moves: MoveCount) {
        (**self).on_moves_changed(moves)
    }

    fn on_stars_changed(&mut self, stars: StarCount) {
        (**self).on_stars_changed(stars)
    }

    fn on_time_changed(&mut self, time: ElapsedTime) {
        (**self).on_time_changed(time)
    }

    fn on_game_won(&mut self, stats: FinalStats) {
        (**self).on_game_won(stats)
    }
}

/// Result shown when the last pair is matched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalStats {
    pub moves: MoveCount,
    pub stars: StarCount,
    pub time: ElapsedTime,
}

/// One observer hook call, recorded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame {
        generation: Generation,
        layout: Vec<CardId>,
    },
    CardRevealed(CardId),
    CardHidden(CardId),
    CardMatched(CardId),
    MovesChanged(MoveCount),
    StarsChanged(StarCount),
    TimeChanged(ElapsedTime),
    GameWon(FinalStats),
}

/// Observer that records every hook call in order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventLog {
    events: Vec<GameEvent>,
}

impl EventLog {
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<GameEvent> {
        core::mem::take(&mut self.events)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameObserver for EventLog {
    fn on_new_game(&mut self, generation: Generation, layout: &[CardId]) {
        self.events.push(GameEvent::NewGame {
            generation,
            layout: layout.to_vec(),
        });
    }

    fn on_card_revealed(&mut self, card: &Card) {
        self.events.push(GameEvent::CardRevealed(card.id));
    }

    fn on_card_hidden(&mut self, card: &Card) {
        self.events.push(GameEvent::CardHidden(card.id));
    }

    fn on_card_matched(&mut self, card: &Card) {
        self.events.push(GameEvent::CardMatched(card.id));
    }

    fn on_moves_changed(&mut self, moves: MoveCount) {
        self.events.push(GameEvent::MovesChanged(moves));
    }

    fn on_stars_changed(&mut self, stars: StarCount) {
        self.events.push(GameEvent::StarsChanged(stars));
    }

    fn on_time_changed(&mut self, time: ElapsedTime) {
        self.events.push(GameEvent::TimeChanged(time));
    }

    fn on_game_won(&mut self, stats: FinalStats) {
        self.events.push(GameEvent::GameWon(stats));
    }
}
