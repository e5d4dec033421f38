//! Action representation: kind + payload.
//!
//! An action is a kind (the "verb") plus a payload (the "noun"):
//! - "Withdraw" carries the token combination taken from the bank
//! - the four card actions carry a `CardRef` to an exposure slot or a
//!   reservation index
//!
//! Kinds round-trip through their snake_case names so front ends can submit
//! moves as strings; an unknown name is `EngineError::InvalidOptionKind`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::player::PlayerId;
use super::tokens::TokenPool;
use crate::cards::Tier;
use crate::error::EngineError;

/// The five things a participant can do on their turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Withdraw,
    PurchaseExposed,
    PurchaseReserved,
    Reserve,
    ReserveWithWildcard,
}

impl ActionKind {
    pub const ALL: [ActionKind; 5] = [
        ActionKind::Withdraw,
        ActionKind::PurchaseExposed,
        ActionKind::PurchaseReserved,
        ActionKind::Reserve,
        ActionKind::ReserveWithWildcard,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::Withdraw => "withdraw",
            ActionKind::PurchaseExposed => "purchase_exposed",
            ActionKind::PurchaseReserved => "purchase_reserved",
            ActionKind::Reserve => "reserve",
            ActionKind::ReserveWithWildcard => "reserve_with_wildcard",
        }
    }

    /// Whether this kind moves a card rather than tokens alone.
    #[must_use]
    pub const fn takes_card(self) -> bool {
        !matches!(self, ActionKind::Withdraw)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ActionKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| EngineError::InvalidOptionKind(s.to_string()))
    }
}

/// Where a card sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardRef {
    /// Face-up slot `slot` of `tier`.
    Exposed { tier: Tier, slot: usize },
    /// The acting participant's reservation at `index`.
    Reserved { index: usize },
}

impl std::fmt::Display for CardRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CardRef::Exposed { tier, slot } => write!(f, "{tier} slot {slot}"),
            CardRef::Reserved { index } => write!(f, "reservation {index}"),
        }
    }
}

/// What an action operates on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    Tokens(TokenPool),
    Card(CardRef),
}

/// A complete game action.
///
/// ## Example
///
/// ```
/// use splendor_engine::cards::Tier;
/// use splendor_engine::core::{Action, ActionKind, Color, TokenPool};
///
/// let take = Action::withdraw(TokenPool::of(Color::Red, 1).with(Color::Blue, 1));
/// assert_eq!(take.kind, ActionKind::Withdraw);
///
/// let buy = Action::purchase_exposed(Tier::Two, 3);
/// assert!(buy.kind.takes_card());
///
/// let parsed = Action::parse("reserve", buy.payload).unwrap();
/// assert_eq!(parsed, Action::reserve(Tier::Two, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub payload: Payload,
}

impl Action {
    #[must_use]
    pub const fn new(kind: ActionKind, payload: Payload) -> Self {
        Self { kind, payload }
    }

    /// Build from a kind name, as submitted by a front end.
    pub fn parse(kind: &str, payload: Payload) -> Result<Self, EngineError> {
        Ok(Self::new(kind.parse()?, payload))
    }

    #[must_use]
    pub const fn withdraw(tokens: TokenPool) -> Self {
        Self::new(ActionKind::Withdraw, Payload::Tokens(tokens))
    }

    /// Withdraw nothing. Always legal.
    #[must_use]
    pub const fn pass() -> Self {
        Self::withdraw(TokenPool::new())
    }

    #[must_use]
    pub const fn purchase_exposed(tier: Tier, slot: usize) -> Self {
        Self::new(
            ActionKind::PurchaseExposed,
            Payload::Card(CardRef::Exposed { tier, slot }),
        )
    }

    #[must_use]
    pub const fn purchase_reserved(index: usize) -> Self {
        Self::new(
            ActionKind::PurchaseReserved,
            Payload::Card(CardRef::Reserved { index }),
        )
    }

    #[must_use]
    pub const fn reserve(tier: Tier, slot: usize) -> Self {
        Self::new(
            ActionKind::Reserve,
            Payload::Card(CardRef::Exposed { tier, slot }),
        )
    }

    #[must_use]
    pub const fn reserve_with_wildcard(tier: Tier, slot: usize) -> Self {
        Self::new(
            ActionKind::ReserveWithWildcard,
            Payload::Card(CardRef::Exposed { tier, slot }),
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.payload {
            Payload::Tokens(tokens) => write!(f, "{} {tokens}", self.kind),
            Payload::Card(at) => write!(f, "{} {at}", self.kind),
        }
    }
}

/// A recorded action with metadata for history tracking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The participant who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (0-based, counts every turn).
    pub turn: u32,
}

impl ActionRecord {
    #[must_use]
    pub fn new(player: PlayerId, action: Action, turn: u32) -> Self {
        Self { player, action, turn }
    }
}
