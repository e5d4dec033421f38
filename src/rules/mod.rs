//! Game rules.
//!
//! - `afford`: net cost, wildcard substitution, exact payment
//! - `moves`: legal option generation
//! - `transaction`: atomic state transitions
//! - `turn`: the turn controller state machine
//! - `result`: final standings
//! - `setup`: `GameBuilder`
//!
//! `afford` and `moves` are pure functions of a board and a participant;
//! `transaction` mutates exactly those two; `turn` owns the `GameState` and
//! is the only caller of `transaction` during play.

pub mod afford;
pub mod moves;
pub mod transaction;
pub mod turn;
pub mod result;
pub mod setup;

pub use moves::{CardOption, LegalOptions};
pub use result::GameResult;
pub use setup::GameBuilder;
pub use transaction::Purchase;
pub use turn::{TurnController, TurnPhase, TurnSummary};
