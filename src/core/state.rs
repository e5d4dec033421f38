//! Game state.
//!
//! ## GameState
//!
//! Everything needed to continue a game:
//! - Configuration
//! - Board (bank, exposed cards, exposed patrons, decks)
//! - Participant holdings
//! - Turn progression (active seat, completed rounds, turn counter)
//! - Action history
//! - RNG
//!
//! Decks, owned cards and history are `im` persistent structures, so cloning
//! a state for a playout is cheap. Mutation goes through `rules`; the public
//! surface here is read-only.

use im::Vector;

use super::action::ActionRecord;
use super::board::Board;
use super::config::GameConfig;
use super::participant::Participant;
use super::player::{PlayerId, PlayerMap};
use super::rng::GameRng;
use super::tokens::TokenPool;

/// Full game state.
#[derive(Clone, Debug)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    participants: PlayerMap<Participant>,

    // === Progression ===
    active: PlayerId,
    completed_rounds: u32,
    turn_number: u32,

    /// Every accepted action, oldest first.
    history: Vector<ActionRecord>,

    /// Deterministic RNG.
    pub rng: GameRng,
}

impl GameState {
    /// Assemble a state at the start of round zero, seat 0 to act.
    #[must_use]
    pub fn new(
        config: GameConfig,
        board: Board,
        participants: PlayerMap<Participant>,
        rng: GameRng,
    ) -> Self {
        Self {
            config,
            board,
            participants,
            active: PlayerId::new(0),
            completed_rounds: 0,
            turn_number: 0,
            history: Vector::new(),
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.participants.player_count()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn participants(&self) -> &PlayerMap<Participant> {
        &self.participants
    }

    #[must_use]
    pub fn participant(&self, player: PlayerId) -> &Participant {
        &self.participants[player]
    }

    // === Progression ===

    /// Seat whose turn it is.
    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.active
    }

    #[must_use]
    pub fn active_participant(&self) -> &Participant {
        &self.participants[self.active]
    }

    /// Full rounds played (every seat has acted once per round).
    #[must_use]
    pub fn completed_rounds(&self) -> u32 {
        self.completed_rounds
    }

    /// Turns finalized so far.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    // === Scores ===

    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        self.participants.map(|_, p| p.score())
    }

    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.participants.values().map(Participant::score).max().unwrap_or(0)
    }

    /// Bank plus every participant's tokens. Constant over a game.
    #[must_use]
    pub fn token_supply(&self) -> TokenPool {
        *self.board.bank() + self.participants.values().map(|p| *p.tokens()).sum()
    }

    // === History ===

    #[must_use]
    pub fn history(&self) -> &Vector<ActionRecord> {
        &self.history
    }

    pub(crate) fn record_action(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    // === Mutation (rules only) ===

    /// Board and the active participant, borrowed together.
    pub(crate) fn split_active_mut(&mut self) -> (&mut Board, &mut Participant) {
        (&mut self.board, &mut self.participants[self.active])
    }

    /// Pass the turn to the next seat. Returns true when a round completed.
    pub(crate) fn advance_turn(&mut self) -> bool {
        self.turn_number += 1;
        self.active = self.active.next(self.player_count());
        let wrapped = self.active.index() == 0;
        if wrapped {
            self.completed_rounds += 1;
        }
        wrapped
    }

    // === Cloning ===

    /// Copy the state for a playout, with a forked RNG.
    ///
    /// Takes `&mut self` because forking the RNG advances the fork counter.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            rng: self.rng.fork(),
            ..self.clone()
        }
    }
}
