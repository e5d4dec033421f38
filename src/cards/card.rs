//! Development cards and patrons.
//!
//! Both are immutable values. Two cards are the same card when every field
//! matches; the engine identifies cards by value, and by the slot they sit in
//! when a caller refers to them.

use serde::{Deserialize, Serialize};

use crate::core::tokens::{Color, TokenPool};
use crate::error::{EngineError, EngineResult};

/// Card tier. Each tier has its own deck and its own exposure row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    One,
    Two,
    Three,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::One, Tier::Two, Tier::Three];

    /// 0-based row index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// 1-based tier number as printed on the card.
    #[must_use]
    pub const fn number(self) -> u8 {
        self as u8 + 1
    }

    /// Tier for a 0-based row index.
    pub fn from_index(index: usize) -> EngineResult<Self> {
        Self::ALL.get(index).copied().ok_or(EngineError::IndexOutOfRange {
            what: "tier",
            index,
            len: Self::ALL.len(),
        })
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "tier {}", self.number())
    }
}

/// A purchasable card.
///
/// ```
/// use splendor_engine::cards::{DevelopmentCard, Tier};
/// use splendor_engine::core::{Color, TokenPool};
///
/// let card = DevelopmentCard::new(
///     Tier::Two,
///     Color::Blue,
///     2,
///     TokenPool::of(Color::Red, 5).with_gold(3),
/// );
/// // Gold never appears in a card cost.
/// assert_eq!(card.cost.gold(), 0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DevelopmentCard {
    /// Price in colored tokens.
    pub cost: TokenPool,
    /// Victory points.
    pub points: u8,
    pub tier: Tier,
    /// Color discounted by one on every later purchase.
    pub bonus: Color,
}

impl DevelopmentCard {
    /// Create a card. Any gold in `cost` is dropped.
    #[must_use]
    pub fn new(tier: Tier, bonus: Color, points: u8, cost: TokenPool) -> Self {
        Self {
            cost: cost.with_gold(0),
            points,
            tier,
            bonus,
        }
    }
}

impl std::fmt::Display for DevelopmentCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} card ({} pts, cost {})",
            self.tier, self.bonus, self.points, self.cost
        )
    }
}

/// A patron, awarded automatically once a participant's bonuses reach
/// its requirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Patron {
    /// Bonus count required per color.
    pub requirement: TokenPool,
    pub points: u8,
}

impl Patron {
    /// Standard patron value.
    pub const DEFAULT_POINTS: u8 = 3;

    /// Create a patron. Any gold in `requirement` is dropped.
    #[must_use]
    pub fn new(requirement: TokenPool, points: u8) -> Self {
        Self {
            requirement: requirement.with_gold(0),
            points,
        }
    }
}

impl std::fmt::Display for Patron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "patron ({} pts, needs {})", self.points, self.requirement)
    }
}
