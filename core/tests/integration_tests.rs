use std::time::Duration;

use pairmatch_core::*;

/// Presentation-layer stand-in tracking what a UI would render.
#[derive(Default)]
struct Board {
    face_up: Vec<CardId>,
    matched: Vec<CardId>,
    moves: MoveCount,
    stars: StarCount,
    time: String,
    hidden_calls: usize,
    wins: Vec<(MoveCount, StarCount, String)>,
}

impl GameObserver for Board {
    fn on_new_game(&mut self, _generation: Generation, _layout: &[CardId]) {
        self.face_up.clear();
        self.matched.clear();
    }

    fn on_card_revealed(&mut self, card: &Card) {
        self.face_up.push(card.id);
    }

    fn on_card_hidden(&mut self, card: &Card) {
        self.face_up.retain(|&id| id != card.id);
        self.hidden_calls += 1;
    }

    fn on_card_matched(&mut self, card: &Card) {
        self.matched.push(card.id);
    }

    fn on_moves_changed(&mut self, moves: MoveCount) {
        self.moves = moves;
    }

    fn on_stars_changed(&mut self, stars: StarCount) {
        self.stars = stars;
    }

    fn on_time_changed(&mut self, time: ElapsedTime) {
        self.time = time.to_string();
    }

    fn on_game_won(&mut self, stats: FinalStats) {
        self.wins.push((stats.moves, stats.stars, stats.time.to_string()));
    }
}

fn two_pair_game() -> MatchEngine<Board, OrderedDeck> {
    let config = GameConfig::new(["A", "B"]).unwrap();
    MatchEngine::new(config, OrderedDeck, Board::default()).unwrap()
}

#[test]
fn test_mismatch_round_trip() {
    let mut engine = two_pair_game();

    engine.select_card(0);
    engine.select_card(1);

    assert_eq!(engine.moves(), 1);
    assert_eq!(engine.observer().moves, 1);
    assert_eq!(engine.pending_tasks(), 2); // hide + first tick

    engine.advance(GameConfig::DEFAULT_MISMATCH_DELAY);

    assert!(engine.observer().face_up.is_empty());
    assert!(engine.opened_cards().is_empty());
    assert!(engine.cards().iter().all(|card| !card.is_matched));
}

#[test]
fn test_full_game_wins_once() {
    let mut engine = two_pair_game();

    engine.select_card(0);
    assert_eq!(engine.select_card(2), SelectOutcome::Matched);
    assert!(engine.opened_cards().is_empty());
    assert!(!engine.is_won());

    engine.advance(Duration::from_secs(65));
    assert_eq!(engine.observer().time, "00:01:05");

    engine.select_card(3);
    assert_eq!(engine.select_card(1), SelectOutcome::Won);
    engine.select_card(1);
    engine.advance(Duration::from_secs(5));

    let board = engine.observer();
    assert_eq!(board.wins, vec![(2, 3, "00:01:05".to_string())]);
    assert_eq!(board.matched, vec![0, 2, 3, 1]);
    assert_eq!(board.stars, 3);
}

#[test]
fn test_restart_discards_previous_game() {
    let mut engine = two_pair_game();
    engine.select_card(0);
    engine.select_card(1);

    engine.restart().unwrap();
    engine.advance(Duration::from_secs(2));

    let board = engine.observer();
    assert_eq!(board.hidden_calls, 0);
    assert_eq!(board.moves, 0);
    assert_eq!(board.time, "00:00:00");
    assert!(board.face_up.is_empty());
    assert_eq!(engine.state(), TurnState::Idle);
}

#[test]
fn test_restart_after_win_starts_over() {
    let mut engine = two_pair_game();
    for (a, b) in [(0, 2), (1, 3)] {
        engine.select_card(a);
        engine.select_card(b);
    }
    assert!(engine.is_won());

    engine.restart().unwrap();

    assert!(!engine.is_won());
    assert_eq!(engine.final_stats(), None);
    assert_eq!(engine.select_card(0), SelectOutcome::Revealed);
}

#[test]
fn test_shuffled_classic_game_can_be_completed() {
    let mut engine =
        MatchEngine::new(GameConfig::classic(), ShuffledDeck::new(42), EventLog::new()).unwrap();

    let cards = engine.cards().to_vec();
    for card in cards.iter().filter(|card| (card.id as usize) < 8) {
        let partner = cards
            .iter()
            .find(|other| other.id != card.id && other.symbol == card.symbol)
            .unwrap();
        engine.select_card(card.id);
        engine.select_card(partner.id);
        engine.advance(Duration::from_millis(250));
    }

    let stats = engine.final_stats().unwrap();
    assert_eq!(stats.moves, 8);
    assert_eq!(stats.stars, 3);
    assert_eq!(stats.time.as_duration(), Duration::from_millis(1750));
}
