//! External card records.
//!
//! Flat rows, one field per color, the way card lists are usually
//! tabulated. The engine does not read files; whatever loads the data
//! (CSV reader, JSON, literals in a test) produces these and hands them to
//! a `CardSource`. Missing color fields default to zero.

use serde::{Deserialize, Serialize};

use super::card::{DevelopmentCard, Patron, Tier};
use crate::core::tokens::{Color, TokenPool};

/// One development card row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardRecord {
    #[serde(default)]
    pub red: u8,
    #[serde(default)]
    pub green: u8,
    #[serde(default)]
    pub blue: u8,
    #[serde(default)]
    pub white: u8,
    #[serde(default)]
    pub black: u8,
    #[serde(default)]
    pub points: u8,
    pub bonus: Option<Color>,
}

impl CardRecord {
    /// Cost columns as a pool.
    #[must_use]
    pub fn cost(&self) -> TokenPool {
        TokenPool::from_counts([self.red, self.green, self.blue, self.white, self.black], 0)
    }

    /// Card for the given tier, `None` when the row has no bonus color.
    #[must_use]
    pub fn to_card(&self, tier: Tier) -> Option<DevelopmentCard> {
        self.bonus
            .map(|bonus| DevelopmentCard::new(tier, bonus, self.points, self.cost()))
    }
}

/// One patron row.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatronRecord {
    #[serde(default)]
    pub red: u8,
    #[serde(default)]
    pub green: u8,
    #[serde(default)]
    pub blue: u8,
    #[serde(default)]
    pub white: u8,
    #[serde(default)]
    pub black: u8,
    /// Defaults to `Patron::DEFAULT_POINTS`.
    #[serde(default)]
    pub points: Option<u8>,
}

impl PatronRecord {
    #[must_use]
    pub fn to_patron(&self) -> Patron {
        let requirement =
            TokenPool::from_counts([self.red, self.green, self.blue, self.white, self.black], 0);
        Patron::new(requirement, self.points.unwrap_or(Patron::DEFAULT_POINTS))
    }
}
