use alloc::vec::Vec;
use core::time::Duration;
use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::*;

/// Cards face up but not yet resolved, in the order they were picked.
pub type OpenedCards = SmallVec<[CardId; 2]>;

/// Valid transitions:
/// - Idle -> OneOpen
/// - OneOpen -> Resolving
/// - Resolving -> Idle (match resolves at once, mismatch after the hide delay)
/// - Resolving -> Won
///
/// Any state goes back to Idle on a new game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnState {
    /// No card open
    Idle,
    /// One card open, waiting for the second pick
    OneOpen(CardId),
    /// Two cards open, the turn outcome is being applied
    Resolving { first: CardId, second: CardId },
    /// Every pair matched
    Won,
}

impl TurnState {
    /// A two-card turn is in flight and new selections are rejected.
    pub const fn is_handling_move(self) -> bool {
        matches!(self, Self::Resolving { .. })
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }

    pub fn opened_cards(self) -> OpenedCards {
        match self {
            Self::Idle | Self::Won => SmallVec::new(),
            Self::OneOpen(id) => smallvec![id],
            Self::Resolving { first, second } => smallvec![first, second],
        }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::Idle
    }
}

/// The game-state engine: owns one game at a time and turns card selections and the passage of time into observer
/// notifications.
///
/// Time is virtual; it only moves through [`MatchEngine::advance`] and [`MatchEngine::advance_to`], which also fire
/// the deferred mismatch hide and timer ticks.
#[derive(Clone, Debug)]
pub struct MatchEngine<O = EventLog, G = ShuffledDeck> {
    config: GameConfig,
    generator: G,
    observer: O,
    generation: Generation,
    cards: Vec<Card>,
    positions: Vec<usize>,
    state: TurnState,
    moves: MoveCount,
    stars: StarCount,
    timer: GameTimer,
    scheduler: Scheduler,
    now: Duration,
    final_stats: Option<FinalStats>,
}

impl<O: GameObserver, G: DeckGenerator> MatchEngine<O, G> {
    /// Validates `config` and deals the first game.
    pub fn new(config: GameConfig, generator: G, observer: O) -> Result<Self> {
        config.validate()?;

        let mut engine = Self {
            config,
            generator,
            observer,
            generation: 0,
            cards: Vec::new(),
            positions: Vec::new(),
            state: TurnState::Idle,
            moves: 0,
            stars: MAX_STARS,
            timer: GameTimer::new(),
            scheduler: Scheduler::new(),
            now: Duration::ZERO,
            final_stats: None,
        };
        engine.start_new_game()?;
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn is_handling_move(&self) -> bool {
        self.state.is_handling_move()
    }

    pub fn is_won(&self) -> bool {
        self.state.is_won()
    }

    pub fn opened_cards(&self) -> OpenedCards {
        self.state.opened_cards()
    }

    pub fn moves(&self) -> MoveCount {
        self.moves
    }

    pub fn stars(&self) -> StarCount {
        self.stars
    }

    /// Cards in board order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.position_of(id).map(|index| &self.cards[index])
    }

    pub fn position_of(&self, id: CardId) -> Option<usize> {
        self.positions.get(id.to_index()).copied()
    }

    pub fn face_of(&self, id: CardId) -> Option<CardFace> {
        let card = self.card(id)?;
        Some(if card.is_matched {
            CardFace::Matched
        } else if self.state.opened_cards().contains(&id) {
            CardFace::Revealed
        } else {
            CardFace::Hidden
        })
    }

    pub fn all_matched(&self) -> bool {
        self.cards.iter().all(|card| card.is_matched)
    }

    /// Whether selecting `id` right now would do anything.
    pub fn can_select(&self, id: CardId) -> bool {
        match (self.state, self.card(id)) {
            (_, None) => false,
            (_, Some(card)) if card.is_matched => false,
            (TurnState::Idle, _) => true,
            (TurnState::OneOpen(open), _) => open != id,
            (TurnState::Resolving { .. } | TurnState::Won, _) => false,
        }
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn elapsed(&self) -> ElapsedTime {
        self.timer.elapsed(self.now)
    }

    pub fn final_stats(&self) -> Option<FinalStats> {
        self.final_stats
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn next_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Deals a fresh game, dropping everything about the current one including its pending tasks.
    ///
    /// On error the current game is left untouched.
    pub fn start_new_game(&mut self) -> Result<()> {
        let cards = self.generator.generate(&self.config.symbols)?;
        let positions = index_positions(&cards, self.config.total_cards())?;

        self.scheduler.clear();
        self.timer.stop(self.now);
        self.generation = self.generation.wrapping_add(1);

        self.cards = cards;
        self.positions = positions;
        self.state = TurnState::Idle;
        self.moves = 0;
        self.stars = self.config.star_thresholds.stars_for(0);
        self.timer = GameTimer::new();
        self.final_stats = None;

        log::debug!(
            "New game, generation: {}, cards: {}",
            self.generation,
            self.cards.len()
        );
        let layout: Vec<CardId> = self.cards.iter().map(|card| card.id).collect();
        self.observer.on_new_game(self.generation, &layout);
        self.observer.on_moves_changed(self.moves);
        self.observer.on_stars_changed(self.stars);
        self.observer.on_time_changed(ElapsedTime::ZERO);
        Ok(())
    }

    /// Abandons the current game in whatever state it is and deals a new one.
    pub fn restart(&mut self) -> Result<()> {
        log::debug!(
            "Restart requested in {:?}, generation: {}, pending tasks: {}",
            self.state,
            self.generation,
            self.scheduler.len()
        );
        self.start_new_game()
    }

    /// Handles the player picking card `id`. Selections that cannot apply are ignored.
    pub fn select_card(&mut self, id: CardId) -> SelectOutcome {
        use SelectOutcome::*;

        let Some(index) = self.position_of(id) else {
            log::debug!("Ignoring selection of unknown card {}", id);
            return NoChange;
        };
        if self.cards[index].is_matched {
            log::trace!("Ignoring selection of matched card {}", id);
            return NoChange;
        }

        match self.state {
            TurnState::Idle => {
                self.start_timer();
                self.reveal(index);
                self.state = TurnState::OneOpen(id);
                Revealed
            }
            TurnState::OneOpen(open) if open == id => {
                log::trace!("Ignoring selection of already open card {}", id);
                NoChange
            }
            TurnState::OneOpen(open) => {
                // positions are a permutation of the ids, so the open card is always found
                let Some(open_index) = self.position_of(open) else {
                    return NoChange;
                };
                self.reveal(index);
                self.state = TurnState::Resolving {
                    first: open,
                    second: id,
                };
                self.resolve_move(open_index, index)
            }
            TurnState::Resolving { .. } => {
                log::trace!("Ignoring selection of card {} while a move is resolving", id);
                NoChange
            }
            TurnState::Won => NoChange,
        }
    }

    /// Moves the clock forward by `delta`, firing whatever comes due.
    pub fn advance(&mut self, delta: Duration) -> usize {
        self.advance_to(self.now.saturating_add(delta))
    }

    /// Moves the clock to `now` and fires due tasks in order; returns how many fired. The clock never moves back.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        if now < self.now {
            log::warn!("Clock moved backwards, from {:?} to {:?}", self.now, now);
            return 0;
        }

        let mut fired = 0;
        while let Some(task) = self.scheduler.pop_due(now) {
            self.now = self.now.max(task.due);
            self.run_task(task, now);
            fired += 1;
        }
        self.now = now;
        fired
    }

    /// Runs `task` while the clock is being moved to `target`.
    fn run_task(&mut self, task: Task, target: Duration) {
        if task.generation != self.generation {
            log::warn!(
                "Discarding stale {:?} from generation {}, current: {}",
                task.kind,
                task.generation,
                self.generation
            );
            return;
        }

        match task.kind {
            TaskKind::HideMismatch { first, second } => self.hide_mismatch(first, second),
            TaskKind::TimerTick => {
                if !self.timer.is_running() {
                    return;
                }
                // missed periods collapse into a single refresh at the target time
                let elapsed = self.timer.tick(target);
                self.observer.on_time_changed(elapsed);
                match next_period_after(task.due, self.config.tick_period, target) {
                    Some(due) => self.scheduler.schedule(due, self.generation, TaskKind::TimerTick),
                    None => log::warn!("Timer tick past the end of the clock, ticks stop"),
                }
            }
        }
    }

    fn start_timer(&mut self) {
        if self.timer.start(self.now) {
            log::debug!("Timer started at {:?}", self.now);
            self.scheduler.schedule(
                self.now.saturating_add(self.config.tick_period),
                self.generation,
                TaskKind::TimerTick,
            );
        }
    }

    fn reveal(&mut self, index: usize) {
        let card = &self.cards[index];
        log::debug!("Reveal card {} ({})", card.id, card.symbol);
        self.observer.on_card_revealed(card);
    }

    /// Applies the turn formed by the cards at board positions `a` and `b`.
    fn resolve_move(&mut self, a: usize, b: usize) -> SelectOutcome {
        self.moves = self.moves.saturating_add(1);
        self.stars = self.config.star_thresholds.stars_for(self.moves);
        self.observer.on_moves_changed(self.moves);
        self.observer.on_stars_changed(self.stars);

        let (first, second) = (self.cards[a].id, self.cards[b].id);
        if !is_match(&self.cards[a], &self.cards[b]) {
            log::debug!("Cards {} and {} mismatch, move {}", first, second, self.moves);
            self.scheduler.schedule(
                self.now.saturating_add(self.config.mismatch_delay),
                self.generation,
                TaskKind::HideMismatch { first, second },
            );
            return SelectOutcome::Mismatched;
        }

        log::debug!("Cards {} and {} match, move {}", first, second, self.moves);
        for index in [a, b] {
            self.cards[index].is_matched = true;
            self.observer.on_card_matched(&self.cards[index]);
        }
        self.state = TurnState::Idle;

        if self.all_matched() {
            self.mark_won();
            SelectOutcome::Won
        } else {
            SelectOutcome::Matched
        }
    }

    fn hide_mismatch(&mut self, first: CardId, second: CardId) {
        if self.state != (TurnState::Resolving { first, second }) {
            log::warn!(
                "Ignoring hide of cards {} and {}, state is {:?}",
                first,
                second,
                self.state
            );
            return;
        }

        for id in [first, second] {
            if let Some(index) = self.position_of(id) {
                self.observer.on_card_hidden(&self.cards[index]);
            }
        }
        self.state = TurnState::Idle;
        log::debug!("Cards {} and {} hidden again", first, second);
    }

    fn mark_won(&mut self) {
        let time = self.timer.stop(self.now);
        self.scheduler
            .cancel(|kind| matches!(kind, TaskKind::TimerTick));
        self.state = TurnState::Won;

        let stats = FinalStats {
            moves: self.moves,
            stars: self.stars,
            time,
        };
        self.final_stats = Some(stats);
        log::debug!(
            "Game won, moves: {}, stars: {}, time: {}",
            stats.moves,
            stats.stars,
            stats.time
        );
        self.observer.on_game_won(stats);
    }
}

/// Maps card ids to board positions, rejecting decks whose ids are not exactly `0..expected`.
fn index_positions(cards: &[Card], expected: usize) -> Result<Vec<usize>> {
    if cards.len() != expected {
        log::warn!("Generated deck has {} cards, expected {}", cards.len(), expected);
        return Err(GameError::InvalidDeck);
    }

    let mut positions: Vec<Option<usize>> = alloc::vec![None; cards.len()];
    for (index, card) in cards.iter().enumerate() {
        match positions.get_mut(card.id.to_index()) {
            Some(slot @ None) => *slot = Some(index),
            _ => {
                log::warn!("Generated deck has out of range or repeated card id {}", card.id);
                return Err(GameError::InvalidDeck);
            }
        }
    }
    // every slot is filled: `len` distinct ids below `len`
    Ok(positions.into_iter().flatten().collect())
}
