//! Playing games out.
//!
//! `run_playout` drives a controller with one agent per seat until the game
//! ends or a turn budget runs out. The helpers turn the outcome into
//! per-seat rewards for search.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::agent::Agent;
use crate::core::action::ActionKind;
use crate::core::player::PlayerMap;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::error::{EngineError, EngineResult};
use crate::rules::result::GameResult;
use crate::rules::turn::TurnController;

/// What happened in a playout.
#[derive(Clone, Debug)]
pub struct PlayoutOutcome {
    /// `None` when the turn budget ran out first.
    pub result: Option<GameResult>,
    /// Turns played in this playout.
    pub turns: u32,
    /// Completed rounds at the end, counted from the start of the game.
    pub rounds: u32,
    pub scores: PlayerMap<u32>,
    /// Turns played per action kind.
    pub kind_counts: FxHashMap<ActionKind, u32>,
}

impl PlayoutOutcome {
    #[must_use]
    pub fn finished(&self) -> bool {
        self.result.is_some()
    }
}

/// Play until the game ends or `max_turns` turns have been played
/// (0 = no budget). `agents[i]` plays seat `i`.
pub fn run_playout(
    game: &mut TurnController,
    agents: &mut [Box<dyn Agent>],
    rng: &mut GameRng,
    max_turns: u32,
) -> EngineResult<PlayoutOutcome> {
    let player_count = game.state().player_count();
    if agents.len() != player_count {
        return Err(EngineError::InvalidConfig(format!(
            "{} agents for {player_count} seats",
            agents.len()
        )));
    }

    let mut kind_counts = FxHashMap::default();
    let mut turns = 0;
    while !game.is_over() && (max_turns == 0 || turns < max_turns) {
        let seat = game.active_player();
        let options = game.legal_options()?;
        let action = agents[seat.index()].choose(game, &options, rng);
        game.play_turn(&action)?;
        *kind_counts.entry(action.kind).or_insert(0) += 1;
        turns += 1;
    }

    let outcome = PlayoutOutcome {
        result: game.result(),
        turns,
        rounds: game.state().completed_rounds(),
        scores: game.state().scores(),
        kind_counts,
    };
    debug!(turns, finished = outcome.finished(), "playout done");
    Ok(outcome)
}

/// Convert a game result to per-player rewards.
#[must_use]
pub fn result_to_rewards(result: &GameResult, player_count: usize) -> PlayerMap<f64> {
    PlayerMap::new(player_count, |player| {
        if result.is_winner(player) {
            1.0
        } else {
            0.0
        }
    })
}

/// Score share as a reward estimate for unfinished games.
#[must_use]
pub fn score_share(state: &GameState) -> PlayerMap<f64> {
    let scores = state.scores();
    let total: u32 = scores.values().sum();
    if total == 0 {
        return PlayerMap::with_value(state.player_count(), 0.5);
    }
    scores.map(|_, &s| f64::from(s) / f64::from(total))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::player::PlayerId;
    use crate::core::GameConfig;
    use crate::rules::GameBuilder;
    use crate::sim::agent::{GreedyAgent, RandomAgent};

    fn random_agents(n: usize) -> Vec<Box<dyn Agent>> {
        (0..n).map(|_| Box::new(RandomAgent) as Box<dyn Agent>).collect()
    }

    #[test]
    fn test_result_to_rewards_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        let rewards = result_to_rewards(&result, 3);

        assert_eq!(rewards[PlayerId::new(0)], 0.0);
        assert_eq!(rewards[PlayerId::new(1)], 1.0);
        assert_eq!(rewards[PlayerId::new(2)], 0.0);
    }

    #[test]
    fn test_result_to_rewards_shared() {
        let result = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(1)]);
        let rewards = result_to_rewards(&result, 2);
        assert_eq!(rewards.values().copied().collect::<Vec<_>>(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_agent_count_must_match() {
        let mut game = GameBuilder::new(GameConfig::new(3)).build().unwrap();
        let err = run_playout(&mut game, &mut random_agents(2), &mut GameRng::new(1), 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_turn_budget() {
        let mut game = GameBuilder::new(GameConfig::new(2)).build().unwrap();
        let outcome = run_playout(&mut game, &mut random_agents(2), &mut GameRng::new(1), 5).unwrap();
        assert_eq!(outcome.turns, 5);
        assert!(!outcome.finished());
        assert_eq!(outcome.kind_counts.values().sum::<u32>(), 5);
        assert_eq!(score_share(game.state()).values().copied().collect::<Vec<_>>(), vec![0.5, 0.5]);
    }

    #[test]
    fn test_playout_without_cards_hits_round_limit() {
        let config = GameConfig::new(2).with_round_limit(3);
        let mut game = GameBuilder::new(config).build().unwrap();
        let mut agents: Vec<Box<dyn Agent>> = vec![Box::new(GreedyAgent), Box::new(RandomAgent)];
        let outcome = run_playout(&mut game, &mut agents, &mut GameRng::new(2), 0).unwrap();

        assert!(outcome.finished());
        assert_eq!(outcome.rounds, 4);
        assert_eq!(outcome.turns, 8);
        assert_eq!(game.state().token_supply(), game.state().config().initial_bank());
    }
}
