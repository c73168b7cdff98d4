use pairmatch_core::*;
use serde::{Deserialize, Serialize};

/// Inbound request from the presentation layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    StartNewGame,
    SelectCard { card_id: CardId },
    Restart,
}

/// Outbound update for the presentation layer to render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    NewGame {
        generation: Generation,
        layout: Vec<CardId>,
    },
    CardRevealed {
        card_id: CardId,
        symbol: Symbol,
    },
    CardHidden {
        card_id: CardId,
    },
    CardMatched {
        card_id: CardId,
    },
    MovesChanged {
        moves: MoveCount,
    },
    StarsChanged {
        stars: StarCount,
    },
    TimeChanged {
        time: String,
    },
    GameWon {
        moves: MoveCount,
        stars: StarCount,
        time: String,
    },
}

/// Observer that turns engine hooks into queued notifications.
#[derive(Clone, Debug, Default)]
pub struct Outbox {
    pending: Vec<Notification>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }
}

impl GameObserver for Outbox {
    fn on_new_game(&mut self, generation: Generation, layout: &[CardId]) {
        self.pending.push(Notification::NewGame {
            generation,
            layout: layout.to_vec(),
        });
    }

    fn on_card_revealed(&mut self, card: &Card) {
        self.pending.push(Notification::CardRevealed {
            card_id: card.id,
            symbol: card.symbol.clone(),
        });
    }

    fn on_card_hidden(&mut self, card: &Card) {
        self.pending.push(Notification::CardHidden { card_id: card.id });
    }

    fn on_card_matched(&mut self, card: &Card) {
        self.pending.push(Notification::CardMatched { card_id: card.id });
    }

    fn on_moves_changed(&mut self, moves: MoveCount) {
        self.pending.push(Notification::MovesChanged { moves });
    }

    fn on_stars_changed(&mut self, stars: StarCount) {
        self.pending.push(Notification::StarsChanged { stars });
    }

    fn on_time_changed(&mut self, time: ElapsedTime) {
        self.pending.push(Notification::TimeChanged {
            time: time.to_string(),
        });
    }

    fn on_game_won(&mut self, stats: FinalStats) {
        self.pending.push(Notification::GameWon {
            moves: stats.moves,
            stars: stats.stars,
            time: stats.time.to_string(),
        });
    }
}
