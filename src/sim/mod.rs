//! Simulation: agents and playouts on top of the rules engine.
//!
//! ## Overview
//!
//! - `Agent`: picks an action from the legal options
//! - `RandomAgent`, `GreedyAgent`: baseline policies
//! - `RolloutAgent`: flat Monte-Carlo search over forked copies
//! - `run_playout`: drives a game with one agent per seat
//!
//! ## Usage
//!
//! ```rust
//! use splendor_engine::core::{GameConfig, GameRng};
//! use splendor_engine::rules::GameBuilder;
//! use splendor_engine::sim::{run_playout, Agent, GreedyAgent, RandomAgent};
//!
//! let mut game = GameBuilder::new(GameConfig::new(2).with_round_limit(5)).build().unwrap();
//! let mut agents: Vec<Box<dyn Agent>> = vec![Box::new(GreedyAgent), Box::new(RandomAgent)];
//!
//! let outcome = run_playout(&mut game, &mut agents, &mut GameRng::new(1), 0).unwrap();
//! assert!(outcome.finished());
//! ```

pub mod agent;
pub mod playout;
pub mod rollout;

pub use agent::{Agent, GreedyAgent, RandomAgent};
pub use playout::{result_to_rewards, run_playout, score_share, PlayoutOutcome};
pub use rollout::{RolloutAgent, SearchConfig, SearchStats};
