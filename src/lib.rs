//! # splendor-engine
//!
//! Rules engine for a gem-trading card game for 2-4 participants.
//!
//! Each turn the active participant withdraws colored tokens from a shared
//! bank, buys a development card priced in those tokens (gold covers any
//! shortfall), or reserves a card for later. Owned cards grant permanent
//! one-color discounts; once those discounts meet a patron's requirement,
//! the patron joins the participant automatically.
//!
//! ## Design Principles
//!
//! 1. **Options, not guesses**: the engine enumerates every legal action
//!    and only accepts actions from that set.
//!
//! 2. **Atomic transitions**: every transaction checks its precondition
//!    before touching state. A rejected action changes nothing.
//!
//! 3. **Conservation**: bank plus holdings equals the initial supply for
//!    every token color, always.
//!
//! ## Architecture
//!
//! - **Explicit ownership**: `GameState` owns the board and participants;
//!   transactions borrow exactly the board and one participant.
//!
//! - **Persistent Data Structures**: decks, owned cards and history use
//!   `im` so forking a game for a playout is cheap.
//!
//! - **Deterministic**: all shuffling and simulation goes through the
//!   seeded `GameRng`.
//!
//! ## Modules
//!
//! - `core`: tokens, participants, board, state, actions, RNG, configuration
//! - `cards`: development cards, patrons, records, decks
//! - `rules`: affordability, move generation, transactions, turn controller,
//!   setup
//! - `sim`: agents and playouts
//! - `error`: `EngineError`

pub mod core;
pub mod cards;
pub mod rules;
pub mod sim;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Color, TokenPool,
    PlayerId, PlayerMap,
    GameRng,
    GameConfig,
    Action, ActionKind, ActionRecord, CardRef, Payload,
    Participant, Board, GameState,
};

pub use crate::cards::{
    DevelopmentCard, Patron, Tier,
    CardRecord, PatronRecord,
    CardSource, TierDeck, PatronDeck,
};

pub use crate::rules::{
    CardOption, LegalOptions,
    GameBuilder, GameResult,
    TurnController, TurnPhase, TurnSummary,
};

pub use crate::sim::{
    Agent, RandomAgent, GreedyAgent, RolloutAgent,
    SearchConfig, SearchStats,
    PlayoutOutcome, run_playout,
};

pub use crate::error::{EngineError, EngineResult};
