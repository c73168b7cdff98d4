use std::time::Duration;

use pairmatch_core::{BoardView, CardId, DeckGenerator, GameConfig, MatchEngine, ShuffledDeck};

use crate::*;

/// One player's game, driven by commands and a clock.
///
/// The host calls [`Session::poll`] whenever it wakes up (at the latest by [`Session::next_wakeup`]) so deferred
/// hides and timer ticks reach the client on time.
#[derive(Debug)]
pub struct Session<C = SystemClock, G = ShuffledDeck> {
    engine: MatchEngine<Outbox, G>,
    clock: C,
}

impl Session {
    /// Session on the wall clock with a time-seeded shuffle.
    pub fn start(config: GameConfig) -> Result<Self> {
        let seed = time_seed();
        log::debug!("Starting session, seed: {}", seed);
        Self::new(config, ShuffledDeck::new(seed), SystemClock::new())
    }
}

impl<C: Clock, G: DeckGenerator> Session<C, G> {
    pub fn new(config: GameConfig, generator: G, clock: C) -> Result<Self> {
        let mut engine = MatchEngine::new(config, generator, Outbox::new())?;
        engine.advance_to(clock.now());
        Ok(Self { engine, clock })
    }

    pub fn engine(&self) -> &MatchEngine<Outbox, G> {
        &self.engine
    }

    pub fn view(&self) -> BoardView {
        self.engine.view()
    }

    /// Notifications produced so far, including the deal of the first game.
    pub fn poll(&mut self) -> Vec<Notification> {
        self.engine.advance_to(self.clock.now());
        self.engine.observer_mut().take()
    }

    /// Time left until the next deferred action is due, if any.
    pub fn next_wakeup(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.engine
            .next_due()
            .map(|due| due.saturating_sub(now))
    }

    pub fn handle(&mut self, command: Command) -> Result<Vec<Notification>> {
        self.engine.advance_to(self.clock.now());
        log::debug!("Handling {:?}", command);

        match command {
            Command::StartNewGame => self.engine.start_new_game()?,
            Command::Restart => self.engine.restart()?,
            Command::SelectCard { card_id } => {
                let outcome = self.engine.select_card(card_id);
                if !outcome.has_update() {
                    log::trace!("Selection of card {} changed nothing", card_id);
                }
            }
        }

        Ok(self.engine.observer_mut().take())
    }

    /// JSON in, JSON array of notifications out.
    pub fn handle_json(&mut self, input: &str) -> Result<String> {
        let command: Command = serde_json::from_str(input)?;
        let notifications = self.handle(command)?;
        Ok(serde_json::to_string(&notifications)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairmatch_core::{GameError, OrderedDeck};

    fn session() -> (Session<ManualClock, OrderedDeck>, ManualClock) {
        let clock = ManualClock::new();
        let config = GameConfig::new(["A", "B"]).unwrap();
        let mut session = Session::new(config, OrderedDeck, clock.clone()).unwrap();
        session.poll();
        (session, clock)
    }

    fn select(session: &mut Session<ManualClock, OrderedDeck>, card_id: CardId) -> Vec<Notification> {
        session.handle(Command::SelectCard { card_id }).unwrap()
    }

    #[test]
    fn first_poll_announces_the_deal() {
        let clock = ManualClock::new();
        let config = GameConfig::new(["A"]).unwrap();
        let mut session = Session::new(config, OrderedDeck, clock).unwrap();

        assert_eq!(
            session.poll(),
            vec![
                Notification::NewGame {
                    generation: 1,
                    layout: vec![0, 1]
                },
                Notification::MovesChanged { moves: 0 },
                Notification::StarsChanged { stars: 3 },
                Notification::TimeChanged {
                    time: "00:00:00".into()
                },
            ]
        );
    }

    #[test]
    fn mismatch_is_hidden_once_clock_passes_delay() {
        let (mut session, clock) = session();
        select(&mut session, 0);

        assert_eq!(
            select(&mut session, 1),
            vec![
                Notification::CardRevealed {
                    card_id: 1,
                    symbol: "B".into()
                },
                Notification::MovesChanged { moves: 1 },
                Notification::StarsChanged { stars: 3 },
            ]
        );
        assert_eq!(session.next_wakeup(), Some(Duration::from_millis(500)));

        clock.advance(Duration::from_millis(499));
        assert!(session.poll().is_empty());

        clock.advance(Duration::from_millis(1));
        assert_eq!(
            session.poll(),
            vec![
                Notification::CardHidden { card_id: 0 },
                Notification::CardHidden { card_id: 1 },
            ]
        );
    }

    #[test]
    fn selection_sees_time_passed_since_last_call() {
        let (mut session, clock) = session();
        select(&mut session, 0);
        select(&mut session, 1);

        clock.advance(Duration::from_secs(1));
        let notifications = select(&mut session, 2);

        assert_eq!(
            notifications,
            vec![
                Notification::CardHidden { card_id: 0 },
                Notification::CardHidden { card_id: 1 },
                Notification::TimeChanged {
                    time: "00:00:01".into()
                },
                Notification::CardRevealed {
                    card_id: 2,
                    symbol: "A".into()
                },
            ]
        );
    }

    #[test]
    fn json_round_trip_through_a_full_game() {
        let (mut session, _clock) = session();

        for card_id in [0, 2, 1] {
            session
                .handle_json(&format!(r#"{{"type":"select_card","card_id":{card_id}}}"#))
                .unwrap();
        }
        let output = session
            .handle_json(r#"{"type":"select_card","card_id":3}"#)
            .unwrap();

        let notifications: Vec<Notification> = serde_json::from_str(&output).unwrap();
        assert_eq!(
            notifications.last(),
            Some(&Notification::GameWon {
                moves: 2,
                stars: 3,
                time: "00:00:00".into()
            })
        );
        assert!(session.engine().is_won());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let (mut session, _clock) = session();

        let err = session.handle_json("{").unwrap_err();
        assert!(matches!(err, ProtocolError::Json(_)));
    }

    #[test]
    fn restart_command_deals_again() {
        let (mut session, _clock) = session();
        select(&mut session, 0);

        let notifications = session.handle(Command::Restart).unwrap();

        assert!(matches!(
            notifications.first(),
            Some(Notification::NewGame { generation: 2, .. })
        ));
        assert!(session.view().cards.iter().all(|card| card.symbol.is_none()));
    }

    #[test]
    fn invalid_config_fails_session() {
        let config = GameConfig {
            symbols: vec![],
            ..GameConfig::classic()
        };

        let err = Session::new(config, OrderedDeck, ManualClock::new()).unwrap_err();
        assert!(matches!(err, ProtocolError::Game(GameError::EmptyAlphabet)));
    }
}
