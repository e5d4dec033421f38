//! Flat Monte-Carlo search.
//!
//! `RolloutAgent` scores every candidate action by applying it to an
//! independent copy of the game and playing that copy out with random
//! agents, `rollouts_per_action` times. The candidate with the best mean
//! reward for the acting seat is chosen. Copies share nothing with the live
//! game: each gets its own forked RNG.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::agent::{Agent, RandomAgent};
use super::playout::{result_to_rewards, run_playout, score_share, PlayoutOutcome};
use crate::core::action::Action;
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::error::EngineResult;
use crate::rules::moves::LegalOptions;
use crate::rules::turn::TurnController;

/// Rollout search parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Playouts per candidate action.
    pub rollouts_per_action: u32,

    /// Turn budget per playout (0 = play to the end).
    /// Unfinished playouts are scored by score share.
    pub max_turns: u32,

    /// Candidates evaluated per decision (0 = all).
    /// When capped, a random subset is evaluated.
    pub max_candidates: usize,

    /// Random seed for playouts.
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            rollouts_per_action: 8,
            max_turns: 120,
            max_candidates: 0,
            seed: 42,
        }
    }
}

impl SearchConfig {
    #[must_use]
    pub fn with_rollouts(mut self, rollouts: u32) -> Self {
        self.rollouts_per_action = rollouts;
        self
    }

    #[must_use]
    pub fn with_max_turns(mut self, turns: u32) -> Self {
        self.max_turns = turns;
        self
    }

    #[must_use]
    pub fn with_max_candidates(mut self, candidates: usize) -> Self {
        self.max_candidates = candidates;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Statistics collected across decisions.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SearchStats {
    /// Decisions made.
    pub decisions: u32,

    /// Candidate actions evaluated.
    pub candidates: u32,

    /// Playouts run.
    pub simulations: u32,

    /// Playouts that stopped on an engine error and were not scored.
    pub failed_playouts: u32,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Calculate simulations per second.
    #[must_use]
    pub fn simulations_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            f64::from(self.simulations) / (self.time_us as f64 / 1_000_000.0)
        }
    }
}

/// Agent that picks the action with the best mean playout reward.
#[derive(Clone, Debug)]
pub struct RolloutAgent {
    config: SearchConfig,
    stats: SearchStats,
    rng: GameRng,
}

impl RolloutAgent {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        let rng = GameRng::new(config.seed);
        Self {
            config,
            stats: SearchStats::new(),
            rng,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Mean reward of `action` for the active seat.
    fn evaluate(&mut self, game: &TurnController, action: &Action) -> f64 {
        let me = game.active_player();
        let player_count = game.state().player_count();
        let rollouts = self.config.rollouts_per_action.max(1);

        let mut total = 0.0;
        let mut scored = 0u32;
        for _ in 0..rollouts {
            let mut branch = game.branch(self.rng.fork());
            if let Err(err) = branch.play_turn(action) {
                debug!(%action, %err, "candidate rejected");
                return f64::NEG_INFINITY;
            }

            let mut agents: Vec<Box<dyn Agent>> = (0..player_count)
                .map(|_| Box::new(RandomAgent) as Box<dyn Agent>)
                .collect();
            let mut rng = self.rng.fork();
            let outcome = run_playout(&mut branch, &mut agents, &mut rng, self.config.max_turns);
            self.stats.simulations += 1;
            match playout_reward(outcome, branch.state(), me) {
                Some(reward) => {
                    total += reward;
                    scored += 1;
                }
                None => self.stats.failed_playouts += 1,
            }
        }

        if scored == 0 {
            return f64::NEG_INFINITY;
        }
        total / f64::from(scored)
    }
}

/// Reward for `seat` from one playout, `None` if the playout failed.
fn playout_reward(
    outcome: EngineResult<PlayoutOutcome>,
    state: &GameState,
    seat: PlayerId,
) -> Option<f64> {
    match outcome {
        Ok(outcome) => Some(match &outcome.result {
            Some(result) => result_to_rewards(result, state.player_count())[seat],
            None => score_share(state)[seat],
        }),
        Err(err) => {
            warn!(%err, %seat, "playout failed, discarding it");
            None
        }
    }
}

impl Agent for RolloutAgent {
    fn name(&self) -> &str {
        "rollout"
    }

    fn choose(
        &mut self,
        game: &TurnController,
        options: &LegalOptions,
        _rng: &mut GameRng,
    ) -> Action {
        let start = Instant::now();
        let mut candidates = options.actions();
        if self.config.max_candidates > 0 && candidates.len() > self.config.max_candidates {
            self.rng.shuffle(&mut candidates);
            candidates.truncate(self.config.max_candidates);
        }

        let mut best = (Action::pass(), f64::NEG_INFINITY);
        for action in candidates {
            let value = self.evaluate(game, &action);
            self.stats.candidates += 1;
            if value > best.1 {
                best = (action, value);
            }
        }

        self.stats.decisions += 1;
        self.stats.time_us += start.elapsed().as_micros() as u64;
        debug!(action = %best.0, value = best.1, "rollout decision");
        best.0
    }
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;
    use crate::cards::{DevelopmentCard, Tier};
    use crate::core::{Color, GameConfig, Participant, TokenPool};
    use crate::error::EngineError;
    use crate::rules::{GameBuilder, GameResult};

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.rollouts_per_action, 8);
        assert_eq!(config.max_candidates, 0);
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SearchConfig::default()
            .with_rollouts(3)
            .with_max_turns(10)
            .with_max_candidates(5)
            .with_seed(123);

        assert_eq!(config.rollouts_per_action, 3);
        assert_eq!(config.max_turns, 10);
        assert_eq!(config.max_candidates, 5);
        assert_eq!(config.seed, 123);
    }

    #[test]
    fn test_config_serialization() {
        let config = SearchConfig::default().with_seed(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_stats_reset() {
        let mut stats = SearchStats::new();
        stats.simulations = 50;
        stats.time_us = 1_000_000;
        assert_eq!(stats.simulations_per_second(), 50.0);

        stats.reset();
        assert_eq!(stats.simulations, 0);
        assert_eq!(stats.simulations_per_second(), 0.0);
    }

    #[test]
    fn test_failed_playout_is_not_scored() {
        let game = GameBuilder::new(GameConfig::new(2)).build().unwrap();
        let err = EngineError::InvalidConfig("1 agents for 2 seats".into());
        assert_eq!(playout_reward(Err(err), game.state(), PlayerId::new(0)), None);

        let finished = PlayoutOutcome {
            result: Some(GameResult::Winner(PlayerId::new(1))),
            turns: 0,
            rounds: 0,
            scores: game.state().scores(),
            kind_counts: FxHashMap::default(),
        };
        assert_eq!(
            playout_reward(Ok(finished.clone()), game.state(), PlayerId::new(1)),
            Some(1.0)
        );
        assert_eq!(playout_reward(Ok(finished), game.state(), PlayerId::new(0)), Some(0.0));
    }

    #[test]
    fn test_takes_winning_card() {
        // Buying the eight-point card ends the game at threshold 8. With a
        // one-turn budget every other candidate scores at most 0.5.
        let winner =
            DevelopmentCard::new(Tier::Three, Color::Black, 8, TokenPool::of(Color::Red, 1));
        let config = GameConfig::new(2).with_victory_threshold(8).with_round_limit(6);
        let mut game = GameBuilder::new(config)
            .unshuffled()
            .card(winner)
            .seat(
                PlayerId::new(1),
                Participant::new().with_tokens(TokenPool::of(Color::Red, 1)),
            )
            .build()
            .unwrap();
        game.play_turn(&Action::pass()).unwrap();

        let options = game.legal_options().unwrap();
        let mut agent =
            RolloutAgent::new(SearchConfig::default().with_rollouts(2).with_max_turns(1));
        let action = agent.choose(&game, &options, &mut GameRng::new(0));

        assert_eq!(action, Action::purchase_exposed(Tier::Three, 0));
        assert_eq!(agent.stats().decisions, 1);
        assert_eq!(agent.stats().candidates as usize, options.len());
        assert_eq!(agent.stats().simulations, 2 * options.len() as u32);
        assert_eq!(agent.stats().failed_playouts, 0);
    }

    #[test]
    fn test_candidate_cap() {
        let mut game = GameBuilder::new(GameConfig::new(2)).build().unwrap();
        let options = game.legal_options().unwrap();
        let mut agent = RolloutAgent::new(
            SearchConfig::default().with_rollouts(1).with_max_turns(4).with_max_candidates(3),
        );
        let action = agent.choose(&game, &options, &mut GameRng::new(0));

        assert!(options.actions().contains(&action));
        assert_eq!(agent.stats().candidates, 3);
        game.play_turn(&action).unwrap();
    }
}
