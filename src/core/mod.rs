//! Core engine types: tokens, participants, board, state, actions, RNG,
//! configuration.
//!
//! Everything here is data. The rules that move tokens and cards between
//! these structures live in `rules`.

pub mod tokens;
pub mod player;
pub mod rng;
pub mod config;
pub mod action;
pub mod participant;
pub mod board;
pub mod state;

pub use tokens::{Color, TokenPool};
pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{GameConfig, MAX_PLAYERS, MIN_PLAYERS};
pub use action::{Action, ActionKind, ActionRecord, CardRef, Payload};
pub use participant::{Participant, MAX_RESERVED, MAX_TOKENS};
pub use board::Board;
pub use state::GameState;
