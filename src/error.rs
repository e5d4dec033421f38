//! Engine error type.
//!
//! Every rejected operation reports one of these and leaves the game state
//! exactly as it was. Nothing here is fatal; callers (agents, front ends)
//! decide whether to pick a different move.

use thiserror::Error;

use crate::core::action::ActionKind;
use crate::rules::turn::TurnPhase;

/// Errors reported by the rules engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The action kind is not one the engine knows.
    #[error("unrecognized action kind: {0:?}")]
    InvalidOptionKind(String),

    /// The payload is not in the current legal set for its kind.
    #[error("illegal {kind} move: {reason}")]
    IllegalMove {
        kind: ActionKind,
        reason: &'static str,
    },

    /// A referenced exposure or reservation slot does not exist.
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// A referenced slot exists but holds nothing.
    #[error("{what} slot {index} is empty")]
    EmptySlot { what: &'static str, index: usize },

    /// The turn controller was driven out of order.
    #[error("operation requires phase {expected:?}, controller is in {actual:?}")]
    WrongPhase {
        expected: TurnPhase,
        actual: TurnPhase,
    },

    /// A patron was offered to a participant whose bonuses fall short.
    #[error("patron in slot {index} requirement not met")]
    PatronNotEarned { index: usize },

    /// The game configuration cannot produce a playable board.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl EngineError {
    pub(crate) const fn illegal(kind: ActionKind, reason: &'static str) -> Self {
        Self::IllegalMove { kind, reason }
    }

    /// True for errors caused by the submitted move rather than engine usage.
    #[must_use]
    pub fn is_move_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidOptionKind(_)
                | Self::IllegalMove { .. }
                | Self::IndexOutOfRange { .. }
                | Self::EmptySlot { .. }
        )
    }
}

/// Result alias used throughout the engine.
pub type EngineResult<T> = Result<T, EngineError>;
