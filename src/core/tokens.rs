//! Token colors and token bundles.
//!
//! ## Color
//!
//! The five gem colors. Every development card grants a bonus in exactly one
//! of them. The wildcard (gold) is not a color: it never appears in a card
//! cost and never as a bonus.
//!
//! ## TokenPool
//!
//! A bundle of token counts: five colors plus gold. Used for the bank, a
//! participant's holdings, card costs, patron requirements, bonuses and
//! payments. Counts are unsigned, so a pool can never hold a negative
//! count; subtraction is only offered as `checked_sub` (rejects underflow)
//! and `saturating_sub` (floors at zero).

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Index, IndexMut};

/// One of the five gem colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Green,
    Blue,
    White,
    Black,
}

impl Color {
    /// All colors in canonical order.
    pub const ALL: [Color; 5] = [Color::Red, Color::Green, Color::Blue, Color::White, Color::Black];

    /// Position in canonical order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Token counts for five colors plus gold.
///
/// ```
/// use splendor_engine::core::{Color, TokenPool};
///
/// let held = TokenPool::new().with(Color::Red, 2).with_gold(1);
/// let spent = TokenPool::of(Color::Red, 1);
///
/// let left = held.checked_sub(&spent).unwrap();
/// assert_eq!(left[Color::Red], 1);
/// assert_eq!(left.total(), 2);
/// assert!(spent.checked_sub(&held).is_none());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenPool {
    colors: [u8; 5],
    gold: u8,
}

impl TokenPool {
    /// Empty pool.
    #[must_use]
    pub const fn new() -> Self {
        Self { colors: [0; 5], gold: 0 }
    }

    /// Pool holding `count` tokens of a single color.
    #[must_use]
    pub fn of(color: Color, count: u8) -> Self {
        Self::new().with(color, count)
    }

    /// Pool with the same count in every color and the given gold.
    #[must_use]
    pub const fn uniform(per_color: u8, gold: u8) -> Self {
        Self { colors: [per_color; 5], gold }
    }

    /// Build from explicit counts in canonical color order.
    #[must_use]
    pub const fn from_counts(colors: [u8; 5], gold: u8) -> Self {
        Self { colors, gold }
    }

    /// Set one color's count.
    #[must_use]
    pub fn with(mut self, color: Color, count: u8) -> Self {
        self.colors[color.index()] = count;
        self
    }

    /// Set the gold count.
    #[must_use]
    pub const fn with_gold(mut self, gold: u8) -> Self {
        self.gold = gold;
        self
    }

    /// Wildcard tokens held.
    #[must_use]
    pub const fn gold(&self) -> u8 {
        self.gold
    }

    /// Color counts in canonical order.
    #[must_use]
    pub const fn colors(&self) -> [u8; 5] {
        self.colors
    }

    /// Sum of all six fields.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.colors.iter().map(|&c| u32::from(c)).sum::<u32>() + u32::from(self.gold)
    }

    /// Sum of the five color fields (gold excluded).
    #[must_use]
    pub fn color_total(&self) -> u32 {
        self.colors.iter().map(|&c| u32::from(c)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Colors with a non-zero count, in canonical order.
    pub fn present_colors(&self) -> impl Iterator<Item = Color> + '_ {
        Color::ALL.into_iter().filter(move |&c| self[c] > 0)
    }

    /// Entry-wise subtraction, `None` if any field would go negative.
    #[must_use]
    pub fn checked_sub(&self, other: &TokenPool) -> Option<TokenPool> {
        let mut out = TokenPool::new();
        for color in Color::ALL {
            out[color] = self[color].checked_sub(other[color])?;
        }
        out.gold = self.gold.checked_sub(other.gold)?;
        Some(out)
    }

    /// Entry-wise subtraction floored at zero.
    #[must_use]
    pub fn saturating_sub(&self, other: &TokenPool) -> TokenPool {
        let mut out = TokenPool::new();
        for color in Color::ALL {
            out[color] = self[color].saturating_sub(other[color]);
        }
        out.gold = self.gold.saturating_sub(other.gold);
        out
    }

    /// True if every field of `self` is at least the matching field of `other`.
    #[must_use]
    pub fn covers(&self, other: &TokenPool) -> bool {
        self.checked_sub(other).is_some()
    }
}

impl Index<Color> for TokenPool {
    type Output = u8;

    fn index(&self, color: Color) -> &u8 {
        &self.colors[color.index()]
    }
}

impl IndexMut<Color> for TokenPool {
    fn index_mut(&mut self, color: Color) -> &mut u8 {
        &mut self.colors[color.index()]
    }
}

impl Add for TokenPool {
    type Output = TokenPool;

    fn add(mut self, rhs: TokenPool) -> TokenPool {
        self += rhs;
        self
    }
}

impl AddAssign for TokenPool {
    fn add_assign(&mut self, rhs: TokenPool) {
        for color in Color::ALL {
            self[color] += rhs[color];
        }
        self.gold += rhs.gold;
    }
}

impl std::iter::Sum for TokenPool {
    fn sum<I: Iterator<Item = TokenPool>>(iter: I) -> Self {
        iter.fold(TokenPool::new(), Add::add)
    }
}

/// Only non-zero entries are printed: `{red: 2, gold: 1}`.
impl std::fmt::Display for TokenPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("{")?;
        let mut first = true;
        let entries = Color::ALL
            .iter()
            .map(|&c| (c.name(), self[c]))
            .chain(std::iter::once(("gold", self.gold)));
        for (name, count) in entries.filter(|&(_, n)| n > 0) {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{name}: {count}")?;
            first = false;
        }
        f.write_str("}")
    }
}
