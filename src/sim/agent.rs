//! Agents: who picks the move.
//!
//! The engine never chooses for a participant. An `Agent` is handed the
//! controller (read-only) and the current legal options and returns one of
//! those options as an `Action`.

use std::cmp::Reverse;

use crate::core::action::{Action, ActionKind, Payload};
use crate::core::rng::GameRng;
use crate::rules::moves::LegalOptions;
use crate::rules::turn::TurnController;

/// Decision policy for one seat.
pub trait Agent: Send {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Pick an action from `options`, which were generated for the active
    /// participant of `game`.
    fn choose(
        &mut self,
        game: &TurnController,
        options: &LegalOptions,
        rng: &mut GameRng,
    ) -> Action;
}

/// Uniform over every legal action.
#[derive(Clone, Debug, Default)]
pub struct RandomAgent;

impl Agent for RandomAgent {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(
        &mut self,
        _game: &TurnController,
        options: &LegalOptions,
        rng: &mut GameRng,
    ) -> Action {
        let actions = options.actions();
        rng.choose(&actions).copied().unwrap_or_else(Action::pass)
    }
}

/// One-ply heuristic: buy the most valuable affordable card, else take as
/// many tokens as possible, else reserve (gold first), else pass.
///
/// Deterministic; ties go to the first option in generation order.
#[derive(Clone, Debug, Default)]
pub struct GreedyAgent;

impl Agent for GreedyAgent {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose(
        &mut self,
        _game: &TurnController,
        options: &LegalOptions,
        _rng: &mut GameRng,
    ) -> Action {
        let purchase = [ActionKind::PurchaseExposed, ActionKind::PurchaseReserved]
            .into_iter()
            .flat_map(|kind| options.cards(kind).iter().map(move |o| (kind, o)))
            .min_by_key(|(_, o)| Reverse(o.card.points));
        if let Some((kind, option)) = purchase {
            return Action::new(kind, Payload::Card(option.at));
        }

        if let Some(&tokens) = options
            .withdraw
            .iter()
            .filter(|t| !t.is_empty())
            .min_by_key(|t| Reverse(t.total()))
        {
            return Action::withdraw(tokens);
        }

        [ActionKind::ReserveWithWildcard, ActionKind::Reserve]
            .into_iter()
            .find_map(|kind| {
                options
                    .cards(kind)
                    .first()
                    .map(|o| Action::new(kind, Payload::Card(o.at)))
            })
            .unwrap_or_else(Action::pass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{DevelopmentCard, Tier};
    use crate::core::{Color, GameConfig, Participant, PlayerId, TokenPool};
    use crate::rules::GameBuilder;

    fn setup(holdings: TokenPool) -> TurnController {
        GameBuilder::new(GameConfig::new(2))
            .unshuffled()
            .card(DevelopmentCard::new(Tier::One, Color::Red, 1, TokenPool::of(Color::Blue, 1)))
            .card(DevelopmentCard::new(Tier::Two, Color::Red, 3, TokenPool::of(Color::Blue, 2)))
            .seat(PlayerId::new(0), Participant::new().with_tokens(holdings))
            .build()
            .unwrap()
    }

    #[test]
    fn test_random_agent_picks_legal_action() {
        let game = setup(TokenPool::new());
        let options = game.legal_options().unwrap();
        let mut rng = GameRng::new(9);
        for _ in 0..20 {
            let action = RandomAgent.choose(&game, &options, &mut rng);
            assert!(options.actions().contains(&action));
        }
    }

    #[test]
    fn test_greedy_buys_most_points() {
        let game = setup(TokenPool::of(Color::Blue, 2));
        let options = game.legal_options().unwrap();
        let action = GreedyAgent.choose(&game, &options, &mut GameRng::new(0));
        assert_eq!(action, Action::purchase_exposed(Tier::Two, 0));
    }

    #[test]
    fn test_greedy_takes_three_tokens() {
        let game = setup(TokenPool::new());
        let options = game.legal_options().unwrap();
        let action = GreedyAgent.choose(&game, &options, &mut GameRng::new(0));
        assert_eq!(
            action,
            Action::withdraw(TokenPool::of(Color::Red, 1).with(Color::Green, 1).with(Color::Blue, 1))
        );
    }

    #[test]
    fn test_greedy_reserves_when_hand_full() {
        let game = setup(TokenPool::of(Color::White, 7).with(Color::Black, 2));
        let options = game.legal_options().unwrap();
        // Nine held: one token or a gold reservation; single tokens come first.
        let action = GreedyAgent.choose(&game, &options, &mut GameRng::new(0));
        assert_eq!(action.kind, ActionKind::Withdraw);

        let game = setup(TokenPool::of(Color::White, 7).with(Color::Black, 3));
        let options = game.legal_options().unwrap();
        let action = GreedyAgent.choose(&game, &options, &mut GameRng::new(0));
        assert_eq!(action, Action::reserve(Tier::One, 0));
    }
}
