//! Turn controller.
//!
//! ## Phases
//!
//! ```text
//! AwaitingAction --apply_action--> TurnApplied --finalize_turn--> AwaitingAction
//!                                                            \--> GameOver
//! ```
//!
//! A rejected action leaves the controller in `AwaitingAction` with the
//! state untouched. Calling an operation from the wrong phase is
//! `EngineError::WrongPhase`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::moves::{self, LegalOptions};
use super::result::GameResult;
use super::transaction;
use crate::cards::{DevelopmentCard, Patron};
use crate::core::action::{Action, ActionKind, ActionRecord, CardRef, Payload};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::error::{EngineError, EngineResult};

/// Where the controller is in the turn cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Waiting for the active participant's action.
    AwaitingAction,
    /// An action was applied; bookkeeping still pending.
    TurnApplied,
    /// Terminal.
    GameOver,
}

/// What `finalize_turn` did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnSummary {
    /// Participant whose turn just ended.
    pub player: PlayerId,
    /// Patron awarded at the end of the turn, if any.
    pub patron: Option<Patron>,
    /// Participant to act next.
    pub next_player: PlayerId,
    pub round_completed: bool,
    pub game_over: bool,
}

/// Drives one game: validates actions, applies them, and keeps turn and
/// round bookkeeping.
#[derive(Clone, Debug)]
pub struct TurnController {
    state: GameState,
    phase: TurnPhase,
}

impl TurnController {
    /// Take over `state` with its active participant to move.
    #[must_use]
    pub fn new(state: GameState) -> Self {
        Self {
            state,
            phase: TurnPhase::AwaitingAction,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    #[must_use]
    pub fn active_player(&self) -> PlayerId {
        self.state.active_player()
    }

    fn expect_phase(&self, expected: TurnPhase) -> EngineResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(EngineError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    // === Turn cycle ===

    /// The five option sets for the active participant.
    pub fn legal_options(&self) -> EngineResult<LegalOptions> {
        self.expect_phase(TurnPhase::AwaitingAction)?;
        Ok(moves::legal_options(
            self.state.board(),
            self.state.active_participant(),
        ))
    }

    /// Submit an action by kind name, as a front end would.
    pub fn submit(&mut self, kind: &str, payload: Payload) -> EngineResult<()> {
        let action = Action::parse(kind, payload)?;
        self.apply_action(&action)
    }

    /// Validate `action` against the legal options and apply it.
    pub fn apply_action(&mut self, action: &Action) -> EngineResult<()> {
        let options = self.legal_options()?;
        if let Err(err) = self.check_legal(&options, action) {
            debug!(player = %self.state.active_player(), %action, %err, "action rejected");
            return Err(err);
        }

        let player = self.state.active_player();
        let turn = self.state.turn_number();
        self.dispatch(action)?;
        self.state.record_action(ActionRecord::new(player, *action, turn));
        self.phase = TurnPhase::TurnApplied;
        debug!(%player, turn, %action, "action applied");
        Ok(())
    }

    fn resolve(&self, at: CardRef) -> EngineResult<&DevelopmentCard> {
        match at {
            CardRef::Exposed { tier, slot } => self.state.board().card_at(tier, slot),
            CardRef::Reserved { index } => self.state.active_participant().reserved_at(index),
        }
    }

    fn check_legal(&self, options: &LegalOptions, action: &Action) -> EngineResult<()> {
        let kind = action.kind;
        let legal = match action.payload {
            Payload::Tokens(tokens) if kind == ActionKind::Withdraw => {
                options.withdraw.contains(&tokens)
            }
            Payload::Card(at) if kind.takes_card() => {
                let from_reserve = matches!(at, CardRef::Reserved { .. });
                if from_reserve != (kind == ActionKind::PurchaseReserved) {
                    return Err(EngineError::illegal(
                        kind,
                        "card reference does not match action kind",
                    ));
                }
                let card = self.resolve(at)?;
                options.cards(kind).iter().any(|o| o.card == *card)
            }
            _ => return Err(EngineError::illegal(kind, "payload does not match action kind")),
        };
        if legal {
            Ok(())
        } else {
            Err(EngineError::illegal(kind, "not among the legal options"))
        }
    }

    fn dispatch(&mut self, action: &Action) -> EngineResult<()> {
        let (board, participant) = self.state.split_active_mut();
        match (action.kind, action.payload) {
            (ActionKind::Withdraw, Payload::Tokens(tokens)) => {
                transaction::withdraw(board, participant, tokens)
            }
            (ActionKind::PurchaseExposed, Payload::Card(CardRef::Exposed { tier, slot })) => {
                transaction::purchase_exposed(board, participant, tier, slot).map(|_| ())
            }
            (ActionKind::PurchaseReserved, Payload::Card(CardRef::Reserved { index })) => {
                transaction::purchase_reserved(board, participant, index).map(|_| ())
            }
            (ActionKind::Reserve, Payload::Card(CardRef::Exposed { tier, slot })) => {
                transaction::reserve(board, participant, tier, slot, false).map(|_| ())
            }
            (ActionKind::ReserveWithWildcard, Payload::Card(CardRef::Exposed { tier, slot })) => {
                transaction::reserve(board, participant, tier, slot, true).map(|_| ())
            }
            (kind, _) => Err(EngineError::illegal(kind, "payload does not match action kind")),
        }
    }

    /// Award a qualifying patron, pass the turn, and check for game end.
    pub fn finalize_turn(&mut self) -> EngineResult<TurnSummary> {
        self.expect_phase(TurnPhase::TurnApplied)?;
        let player = self.state.active_player();

        let qualifying =
            moves::qualifying_patrons(self.state.board(), self.state.active_participant());
        let patron = match qualifying.first() {
            Some(&index) => {
                let (board, participant) = self.state.split_active_mut();
                Some(transaction::award_patron(board, participant, index)?)
            }
            None => None,
        };

        let round_completed = self.state.advance_turn();
        let game_over = self.termination_reached();
        self.phase = if game_over {
            TurnPhase::GameOver
        } else {
            TurnPhase::AwaitingAction
        };

        if game_over {
            info!(
                rounds = self.state.completed_rounds(),
                turns = self.state.turn_number(),
                max_score = self.state.max_score(),
                "game over"
            );
        }

        Ok(TurnSummary {
            player,
            patron,
            next_player: self.state.active_player(),
            round_completed,
            game_over,
        })
    }

    /// `apply_action` then `finalize_turn`.
    pub fn play_turn(&mut self, action: &Action) -> EngineResult<TurnSummary> {
        self.apply_action(action)?;
        self.finalize_turn()
    }

    /// Threshold reached and the round just closed, or the round limit passed.
    fn termination_reached(&self) -> bool {
        let config = self.state.config();
        let round_closed = self.state.active_player().index() == 0;
        let threshold_met = self.state.max_score() >= config.victory_threshold;
        (threshold_met && round_closed) || self.state.completed_rounds() > config.round_limit
    }

    /// Final standings, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.is_over().then(|| GameResult::decide(&self.state))
    }

    // === Cloning ===

    /// Independent copy with a forked RNG, for playouts.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self {
            state: self.state.fork(),
            phase: self.phase,
        }
    }

    /// Independent copy driven by the given RNG.
    #[must_use]
    pub fn branch(&self, rng: GameRng) -> Self {
        let mut copy = self.clone();
        copy.state.rng = rng;
        copy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Patron, Tier};
    use crate::core::config::GameConfig;
    use crate::core::participant::Participant;
    use crate::core::tokens::{Color, TokenPool};
    use crate::rules::setup::GameBuilder;

    fn card(tier: Tier, bonus: Color, points: u8, cost: TokenPool) -> DevelopmentCard {
        DevelopmentCard::new(tier, bonus, points, cost)
    }

    fn small_game(players: usize) -> TurnController {
        let mut builder = GameBuilder::new(GameConfig::new(players)).unshuffled();
        for tier in Tier::ALL {
            for i in 0..6u8 {
                let color = Color::ALL[usize::from(i) % 5];
                builder = builder.card(card(tier, color, tier.number(), TokenPool::of(color, 1)));
            }
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_wrong_phase() {
        let mut game = small_game(2);
        assert_eq!(
            game.finalize_turn(),
            Err(EngineError::WrongPhase {
                expected: TurnPhase::TurnApplied,
                actual: TurnPhase::AwaitingAction,
            })
        );

        game.apply_action(&Action::pass()).unwrap();
        assert_eq!(game.phase(), TurnPhase::TurnApplied);
        assert!(matches!(game.legal_options(), Err(EngineError::WrongPhase { .. })));
        assert!(matches!(game.apply_action(&Action::pass()), Err(EngineError::WrongPhase { .. })));
    }

    #[test]
    fn test_turn_rotation() {
        let mut game = small_game(3);
        for expected in [1, 2, 0, 1] {
            let summary = game.play_turn(&Action::pass()).unwrap();
            assert_eq!(summary.next_player, PlayerId::new(expected));
            assert_eq!(summary.round_completed, expected == 0);
        }
        assert_eq!(game.state().completed_rounds(), 1);
        assert_eq!(game.state().history().len(), 4);
        assert_eq!(game.state().history()[3].player, PlayerId::new(0));
        assert_eq!(game.state().history()[3].turn, 3);
    }

    #[test]
    fn test_rejection_leaves_state() {
        let mut game = small_game(2);
        let bank = *game.state().board().bank();

        let err = game.apply_action(&Action::withdraw(TokenPool::of(Color::Red, 3))).unwrap_err();
        assert!(matches!(err, EngineError::IllegalMove { kind: ActionKind::Withdraw, .. }));
        assert_eq!(game.phase(), TurnPhase::AwaitingAction);
        assert_eq!(*game.state().board().bank(), bank);
        assert!(game.state().history().is_empty());
    }

    #[test]
    fn test_payload_shape_mismatch() {
        let mut game = small_game(2);
        let bad = Action::new(ActionKind::Withdraw, Payload::Card(CardRef::Reserved { index: 0 }));
        assert!(matches!(game.apply_action(&bad), Err(EngineError::IllegalMove { .. })));

        let bad = Action::new(
            ActionKind::PurchaseReserved,
            Payload::Card(CardRef::Exposed { tier: Tier::One, slot: 0 }),
        );
        assert!(matches!(game.apply_action(&bad), Err(EngineError::IllegalMove { .. })));

        let bad = Action::new(ActionKind::Reserve, Payload::Tokens(TokenPool::new()));
        assert!(matches!(game.apply_action(&bad), Err(EngineError::IllegalMove { .. })));
    }

    #[test]
    fn test_submit_by_name() {
        let mut game = small_game(2);
        let err = game.submit("trade", Payload::Tokens(TokenPool::new())).unwrap_err();
        assert_eq!(err, EngineError::InvalidOptionKind("trade".to_string()));

        game.submit("reserve", Payload::Card(CardRef::Exposed { tier: Tier::Two, slot: 1 }))
            .unwrap();
        assert_eq!(game.state().participant(PlayerId::new(0)).reserved().len(), 1);
    }

    #[test]
    fn test_bad_references() {
        let mut game = small_game(2);
        assert!(matches!(
            game.apply_action(&Action::reserve(Tier::One, 7)),
            Err(EngineError::IndexOutOfRange { index: 7, .. })
        ));
        assert!(matches!(
            game.apply_action(&Action::purchase_reserved(0)),
            Err(EngineError::IndexOutOfRange { what: "reservation", .. })
        ));
    }

    #[test]
    fn test_patron_awarded_on_finalize() {
        let patron = Patron::new(TokenPool::of(Color::Red, 1), 3);
        let mut game = GameBuilder::new(GameConfig::new(2))
            .unshuffled()
            .card(card(Tier::One, Color::Red, 0, TokenPool::of(Color::Blue, 1)))
            .patron(patron)
            .seat(PlayerId::new(0), Participant::new().with_tokens(TokenPool::of(Color::Blue, 1)))
            .build()
            .unwrap();

        let summary = game.play_turn(&Action::purchase_exposed(Tier::One, 0)).unwrap();
        assert_eq!(summary.patron, Some(patron));
        assert_eq!(game.state().participant(PlayerId::new(0)).score(), 3);
        assert!(game.state().board().patrons()[0].is_none());
    }

    #[test]
    fn test_round_limit_ends_game() {
        let mut game = GameBuilder::new(GameConfig::new(2).with_round_limit(1))
            .build()
            .unwrap();
        let mut turns = 0;
        while !game.is_over() {
            game.play_turn(&Action::pass()).unwrap();
            turns += 1;
        }
        // Over once more than one round has completed.
        assert_eq!(turns, 4);
        assert_eq!(game.state().completed_rounds(), 2);
        assert_eq!(game.result(), Some(GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(1)])));
        assert!(matches!(game.legal_options(), Err(EngineError::WrongPhase { .. })));
    }

    #[test]
    fn test_fork_is_independent() {
        let mut game = small_game(2);
        let mut fork = game.fork();
        fork.play_turn(&Action::withdraw(TokenPool::of(Color::Red, 1))).unwrap();

        assert_eq!(game.active_player(), PlayerId::new(0));
        assert_eq!(game.state().board().bank()[Color::Red], 7);
        assert_eq!(fork.state().board().bank()[Color::Red], 6);

        let branch = game.branch(GameRng::new(3));
        assert_eq!(branch.state().rng.seed(), 3);
        assert_eq!(branch.phase(), game.phase());
    }
}
