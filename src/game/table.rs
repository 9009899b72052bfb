//! Headless table: deck, seats, and turn execution.
//!
//! ## Turn Flow
//!
//! 1. The active hand discards down (repeated best discards until no valid
//!    group remains). Emptying the hand wins the game.
//! 2. A hand at the size limit can only pass.
//! 3. First action, executed, then discard down.
//! 4. If the first action was not Pass: second action, executed, then
//!    discard down.
//! 5. The next seat becomes active.
//!
//! Computer seats are driven by `play_turn`. Seats without a strategy (a
//! human at the UI) are driven by `start_turn` and `apply_action`. A human
//! may take from any opponent holding a card; computers only from opponents
//! holding at least `min_take_target`. A take that empties the target's hand
//! makes the target the winner.
//!
//! ## Card Conservation
//!
//! Cards only move between the deck and hands, so `total_cards()` equals
//! the full deck size for the lifetime of the table.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Action, Card, DecisionState, Deck, EngineError, GameRng, Hand, OpponentView, PlayerId, Result,
    RulesConfig,
};
use crate::discard::find_best_discard;
use crate::groups::{exists_valid_group, DiscardPlan, MAX_CARD_NUMBER};
use crate::model::{ActionValues, EvaluationPool, ExpectationModel, ProbabilityModel};
use crate::strategy::legality::{check_action, check_human_action};
use crate::strategy::{Strategy, StrategyKind};

use super::turn::{Turn, TurnPhase, TurnRecord};

/// Seats allowed at one table.
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 3;

/// One player at the table.
pub struct Seat {
    player: PlayerId,
    hand: Hand,
    strategy: Option<Box<dyn Strategy>>,
}

impl Seat {
    #[must_use]
    pub fn player(&self) -> PlayerId {
        self.player
    }

    #[must_use]
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Strategy display name, or `None` for a human seat.
    #[must_use]
    pub fn strategy_name(&self) -> Option<&'static str> {
        self.strategy.as_ref().map(|s| s.name())
    }
}

/// Both evaluation tables for one seat, for a hint panel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hints {
    pub probabilities: ActionValues,
    pub expectations: ActionValues,
}

/// How a simulated game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    /// Winner, or `None` if the turn cap was reached first.
    pub winner: Option<PlayerId>,
    /// Turns completed.
    pub turns: usize,
}

/// A game in progress.
pub struct Table {
    rules: RulesConfig,
    deck: Deck,
    seats: Vec<Seat>,
    active: usize,
    current: Option<Turn>,
    winner: Option<PlayerId>,
    turns_played: usize,
    rng: GameRng,
    pool: Arc<EvaluationPool>,
}

impl Table {
    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.seats[self.active].player
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    #[must_use]
    pub fn turns_played(&self) -> usize {
        self.turns_played
    }

    /// Phase of the turn in progress, if any.
    #[must_use]
    pub fn turn_phase(&self) -> Option<TurnPhase> {
        self.current.as_ref().map(Turn::phase)
    }

    /// A player's hand.
    pub fn hand(&self, player: PlayerId) -> Result<&Hand> {
        Ok(&self.seat(player)?.hand)
    }

    /// Cards in the deck and all hands.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len() + self.seats.iter().map(|s| s.hand.len()).sum::<usize>()
    }

    fn seat(&self, player: PlayerId) -> Result<&Seat> {
        self.seats
            .get(player.index())
            .ok_or_else(|| EngineError::InvalidSetup(format!("no seat for {}", player)))
    }

    fn seat_mut(&mut self, player: PlayerId) -> Result<&mut Seat> {
        self.seats
            .get_mut(player.index())
            .ok_or_else(|| EngineError::InvalidSetup(format!("no seat for {}", player)))
    }

    // === Snapshots ===

    /// Decision snapshot for `player`: own hand, opponents in seat order,
    /// and the deck.
    pub fn decision_state(&self, player: PlayerId) -> Result<DecisionState> {
        let seat = self.seat(player)?;
        let opponents = self
            .seats
            .iter()
            .filter(|s| s.player != player)
            .map(|s| OpponentView::new(s.player, s.hand.cards().to_vec()))
            .collect();
        Ok(DecisionState::new(
            player,
            seat.hand.cards().to_vec(),
            opponents,
            self.deck.cards().to_vec(),
        ))
    }

    /// Probability and expectation tables for `player`.
    pub fn hints(&mut self, player: PlayerId) -> Result<Hints> {
        let state = self.decision_state(player)?;
        let mut rng = self.rng.fork();
        let probabilities = ProbabilityModel::new(Arc::clone(&self.pool)).calculate_probabilities(&state)?;
        let expectations =
            ExpectationModel::new(Arc::clone(&self.pool), &self.rules).calculate_expectations(&state, &mut rng)?;
        Ok(Hints {
            probabilities,
            expectations,
        })
    }

    // === Card Movement ===

    /// Execute an action for `player` without legality checks.
    ///
    /// A take that empties the target's hand makes the target the winner.
    pub fn execute(&mut self, player: PlayerId, action: Action) -> Result<()> {
        match action {
            Action::Draw(count) => {
                let max = self.rules.max_hand_size;
                let mut drawn = 0;
                for _ in 0..count.get() {
                    if self.seat(player)?.hand.len() >= max {
                        break;
                    }
                    let Some(card) = self.deck.pop() else { break };
                    self.seat_mut(player)?.hand.add(card);
                    drawn += 1;
                }
                debug!(%player, requested = count.get(), drawn, deck = self.deck.len(), "draw");
            }
            Action::Take(target) => {
                let card = self.take_random_card(target)?;
                self.seat_mut(player)?.hand.add(card);
                debug!(%player, %target, %card, "take");
                if self.seat(target)?.hand.is_empty() {
                    debug!(%target, "hand emptied by take");
                    self.winner = Some(target);
                }
            }
            Action::Pass => {
                debug!(%player, "pass");
            }
        }
        Ok(())
    }

    fn take_random_card(&mut self, target: PlayerId) -> Result<Card> {
        let seat = self
            .seats
            .get_mut(target.index())
            .ok_or(EngineError::UnknownOpponent(target))?;
        if seat.hand.is_empty() {
            return Err(EngineError::EmptyOpponentHand(target));
        }
        seat.hand.shuffle(&mut self.rng);
        let index = self.rng.gen_range_usize(0..seat.hand.len());
        seat.hand.remove_at(index).ok_or(EngineError::EmptyOpponentHand(target))
    }

    /// Discard best plans until `player` holds no valid group.
    ///
    /// Each discarded group goes back into the deck, which is reshuffled.
    /// Emptying the hand makes `player` the winner.
    pub fn discard_down(&mut self, player: PlayerId) -> Result<Vec<DiscardPlan>> {
        let mut plans = Vec::new();

        while exists_valid_group(self.seat(player)?.hand.cards()) {
            let plan = find_best_discard(self.seat(player)?.hand.cards());
            if plan.is_empty() {
                break;
            }

            for group in plan.groups() {
                for card in group.cards() {
                    let removed = self.seat_mut(player)?.hand.remove(card.id)?;
                    self.deck.push(removed);
                }
                self.deck.shuffle(&mut self.rng);
                debug!(%player, %group, "discard");
            }
            plans.push(plan);

            if self.seat(player)?.hand.is_empty() {
                debug!(%player, "hand emptied");
                self.winner = Some(player);
                break;
            }
        }

        Ok(plans)
    }

    // === Turn Driving ===

    /// Begin the active player's turn: discard down first.
    ///
    /// Returns the finished record if that discard already won the game.
    pub fn start_turn(&mut self) -> Result<Option<TurnRecord>> {
        if self.is_finished() {
            return Err(EngineError::TurnOrder("game is over"));
        }
        if self.current.is_some() {
            return Err(EngineError::TurnOrder("a turn is already in progress"));
        }

        let player = self.active_player();
        let mut turn = Turn::new(player);
        turn.add_discards(self.discard_down(player)?);
        self.current = Some(turn);

        if self.is_finished() {
            return Ok(Some(self.end_turn()?));
        }
        Ok(None)
    }

    /// Validate and execute the next action of the turn in progress.
    ///
    /// Returns the record once the turn is over: after a first-action Pass,
    /// after the second action, or when the player wins.
    pub fn apply_action(&mut self, action: Action) -> Result<Option<TurnRecord>> {
        let player = self.active_player();
        let first = match self.current.as_ref().map(Turn::phase) {
            Some(TurnPhase::NotStarted) => None,
            Some(TurnPhase::FirstActionChosen(kind)) => Some(kind),
            Some(_) => return Err(EngineError::TurnOrder("both actions already taken")),
            None => return Err(EngineError::TurnOrder("no turn in progress")),
        };

        let state = self.decision_state(player)?;
        if self.seats[self.active].strategy.is_some() {
            check_action(&state, action, first, &self.rules)?;
        } else {
            check_human_action(&state, action, first, &self.rules)?;
        }

        self.current_mut()?.record(action)?;
        self.execute(player, action)?;
        let plans = if self.is_finished() {
            Vec::new()
        } else {
            self.discard_down(player)?
        };

        let turn = self.current_mut()?;
        turn.add_discards(plans);
        let over = matches!(turn.phase(), TurnPhase::SecondActionChosen | TurnPhase::Done);
        if over || self.is_finished() {
            return Ok(Some(self.end_turn()?));
        }
        Ok(None)
    }

    fn current_mut(&mut self) -> Result<&mut Turn> {
        self.current.as_mut().ok_or(EngineError::TurnOrder("no turn in progress"))
    }

    fn end_turn(&mut self) -> Result<TurnRecord> {
        let turn = self
            .current
            .take()
            .ok_or(EngineError::TurnOrder("no turn in progress"))?;
        let record = turn.finish();
        self.turns_played += 1;
        if !self.is_finished() {
            self.active = (self.active + 1) % self.seats.len();
        }
        Ok(record)
    }

    /// Ask the active seat's strategy for its next action.
    fn choose_for_active(&mut self) -> Result<Action> {
        let player = self.active_player();
        let first = match self.turn_phase() {
            Some(TurnPhase::NotStarted) => None,
            Some(TurnPhase::FirstActionChosen(kind)) => Some(kind),
            _ => return Err(EngineError::TurnOrder("no action to choose")),
        };

        let state = self.decision_state(player)?;
        let max = self.rules.max_hand_size;
        let strategy = self.seats[self.active]
            .strategy
            .as_mut()
            .ok_or(EngineError::MissingStrategy(player))?;

        if state.hand_size() >= max {
            return Ok(Action::Pass);
        }
        match first {
            None => strategy.choose_first_action(&state),
            Some(kind) => strategy.choose_second_action(&state, kind),
        }
    }

    /// Play one full turn for a computer seat.
    pub fn play_turn(&mut self) -> Result<TurnRecord> {
        if let Some(record) = self.start_turn()? {
            return Ok(record);
        }
        loop {
            let action = self.choose_for_active()?;
            if let Some(record) = self.apply_action(action)? {
                debug!(
                    player = %record.player,
                    first = %record.first,
                    second = ?record.second,
                    discarded = record.discarded_cards(),
                    "turn complete"
                );
                return Ok(record);
            }
        }
    }

    /// Play turns until someone wins or `max_turns` turns have been played.
    pub fn play_until_finished(&mut self, max_turns: usize) -> Result<GameOutcome> {
        while !self.is_finished() && self.turns_played < max_turns {
            self.play_turn()?;
        }
        Ok(GameOutcome {
            winner: self.winner,
            turns: self.turns_played,
        })
    }
}

enum SeatSpec {
    Human,
    Computer(StrategyKind),
    Custom(Box<dyn Strategy>),
}

/// Builder for tables.
///
/// ```
/// use rust_rummy::game::TableBuilder;
/// use rust_rummy::strategy::StrategyKind;
///
/// let table = TableBuilder::new()
///     .computer(StrategyKind::RuleBased)
///     .computer(StrategyKind::Random)
///     .seed(7)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.player_count(), 2);
/// assert_eq!(table.total_cards(), 80);
/// ```
pub struct TableBuilder {
    rules: RulesConfig,
    seats: Vec<SeatSpec>,
    seed: u64,
    pool: Option<Arc<EvaluationPool>>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self {
            rules: RulesConfig::default(),
            seats: Vec::new(),
            seed: 0,
            pool: None,
        }
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Share an existing evaluation pool instead of creating one.
    pub fn pool(mut self, pool: Arc<EvaluationPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Add a seat driven from outside through `apply_action`.
    pub fn human(mut self) -> Self {
        self.seats.push(SeatSpec::Human);
        self
    }

    /// Add a seat driven by a registered strategy.
    pub fn computer(mut self, kind: StrategyKind) -> Self {
        self.seats.push(SeatSpec::Computer(kind));
        self
    }

    /// Add a seat driven by a caller-provided strategy.
    pub fn custom(mut self, strategy: Box<dyn Strategy>) -> Self {
        self.seats.push(SeatSpec::Custom(strategy));
        self
    }

    /// Shuffle, deal, and seat everyone.
    pub fn build(self) -> Result<Table> {
        let count = self.seats.len();
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
            return Err(EngineError::InvalidSetup(format!(
                "{} seats, need {} to {}",
                count, MIN_PLAYERS, MAX_PLAYERS
            )));
        }
        let max_number = self.rules.max_number;
        if max_number == 0 || max_number > MAX_CARD_NUMBER {
            return Err(EngineError::InvalidSetup(format!(
                "card numbers must run 1 to at most {}, got {}",
                MAX_CARD_NUMBER, max_number
            )));
        }
        if count * self.rules.initial_hand_size > self.rules.deck_size() {
            return Err(EngineError::InvalidSetup("not enough cards to deal".to_string()));
        }

        let pool = match self.pool {
            Some(pool) => pool,
            None => Arc::new(EvaluationPool::from_rules(&self.rules)?),
        };

        let mut rng = GameRng::new(self.seed);
        let mut deck = Deck::standard(&self.rules);
        deck.shuffle(&mut rng);

        let mut seats = Vec::with_capacity(count);
        for (index, spec) in self.seats.into_iter().enumerate() {
            let player = PlayerId::new(index as u8);
            let strategy = match spec {
                SeatSpec::Human => None,
                SeatSpec::Computer(kind) => Some(kind.build(
                    &self.rules,
                    Arc::clone(&pool),
                    self.seed.wrapping_add(index as u64 + 1),
                )),
                SeatSpec::Custom(strategy) => Some(strategy),
            };

            let mut hand = Hand::new();
            for _ in 0..self.rules.initial_hand_size {
                if let Some(card) = deck.pop() {
                    hand.add(card);
                }
            }
            seats.push(Seat {
                player,
                hand,
                strategy,
            });
        }

        debug!(players = count, seed = self.seed, deck = deck.len(), "table ready");

        Ok(Table {
            rules: self.rules,
            deck,
            seats,
            active: 0,
            current: None,
            winner: None,
            turns_played: 0,
            rng,
            pool,
        })
    }
}
