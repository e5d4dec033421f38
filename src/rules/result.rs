//! Game outcome.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Tied on score and on owned-card count.
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Highest score wins; ties go to whoever owns the fewest development
    /// cards; anyone still tied shares the win.
    #[must_use]
    pub fn decide(state: &GameState) -> Self {
        let best = state.max_score();
        let contenders: Vec<_> = state
            .participants()
            .iter()
            .filter(|(_, p)| p.score() == best)
            .map(|(id, p)| (id, p.owned_count()))
            .collect();
        let fewest = contenders.iter().map(|&(_, n)| n).min().unwrap_or(0);
        let mut winners: Vec<_> = contenders
            .into_iter()
            .filter(|&(_, n)| n == fewest)
            .map(|(id, _)| id)
            .collect();

        if winners.len() == 1 {
            GameResult::Winner(winners.remove(0))
        } else {
            GameResult::Winners(winners)
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners().contains(&player)
    }

    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        match self {
            GameResult::Winner(p) => std::slice::from_ref(p),
            GameResult::Winners(ps) => ps,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Winner(p) => write!(f, "{p} wins"),
            GameResult::Winners(ps) => {
                let names: Vec<_> = ps.iter().map(ToString::to_string).collect();
                write!(f, "shared win: {}", names.join(", "))
            }
        }
    }
}
