//! Participant holdings.
//!
//! A participant holds tokens, the development cards they bought (grouped by
//! bonus color so bonuses are a length lookup), up to three reserved cards,
//! and the patrons awarded to them. Holdings change only through the
//! transaction functions in `rules::transaction`; the public surface here
//! is read-only apart from the position-building constructors used to set
//! up a game.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{DevelopmentCard, Patron};
use crate::core::tokens::{Color, TokenPool};
use crate::error::{EngineError, EngineResult};

/// Most tokens a participant may hold after a withdrawal.
pub const MAX_TOKENS: u32 = 10;
/// Most cards a participant may hold in reserve.
pub const MAX_RESERVED: usize = 3;

/// One participant's holdings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    tokens: TokenPool,
    owned: [Vector<DevelopmentCard>; 5],
    reserved: SmallVec<[DevelopmentCard; MAX_RESERVED]>,
    patrons: Vector<Patron>,
}

impl Participant {
    /// Empty holdings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Position building ===

    /// Start with the given tokens.
    #[must_use]
    pub fn with_tokens(mut self, tokens: TokenPool) -> Self {
        self.tokens = tokens;
        self
    }

    /// Start owning a card.
    #[must_use]
    pub fn with_owned(mut self, card: DevelopmentCard) -> Self {
        self.add_owned(card);
        self
    }

    /// Start with a card in reserve.
    #[must_use]
    pub fn with_reserved(mut self, card: DevelopmentCard) -> Self {
        self.reserved.push(card);
        self
    }

    // === Queries ===

    #[must_use]
    pub fn tokens(&self) -> &TokenPool {
        &self.tokens
    }

    /// Bonus count per color (gold always zero).
    #[must_use]
    pub fn bonuses(&self) -> TokenPool {
        let mut bonuses = TokenPool::new();
        for color in Color::ALL {
            bonuses[color] = self.bonus(color);
        }
        bonuses
    }

    /// Bonus count for one color.
    #[must_use]
    pub fn bonus(&self, color: Color) -> u8 {
        u8::try_from(self.owned[color.index()].len()).unwrap_or(u8::MAX)
    }

    /// Owned cards granting one color.
    pub fn cards_of(&self, color: Color) -> impl Iterator<Item = &DevelopmentCard> {
        self.owned[color.index()].iter()
    }

    /// Every owned card, grouped by color.
    pub fn owned_cards(&self) -> impl Iterator<Item = &DevelopmentCard> {
        self.owned.iter().flat_map(|cards| cards.iter())
    }

    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.owned.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn reserved(&self) -> &[DevelopmentCard] {
        &self.reserved
    }

    /// Reserved card at `index`.
    pub fn reserved_at(&self, index: usize) -> EngineResult<&DevelopmentCard> {
        self.reserved.get(index).ok_or(EngineError::IndexOutOfRange {
            what: "reservation",
            index,
            len: self.reserved.len(),
        })
    }

    pub fn patrons(&self) -> impl Iterator<Item = &Patron> {
        self.patrons.iter()
    }

    #[must_use]
    pub fn patron_count(&self) -> usize {
        self.patrons.len()
    }

    /// Card points plus patron points.
    #[must_use]
    pub fn score(&self) -> u32 {
        let cards: u32 = self.owned_cards().map(|c| u32::from(c.points)).sum();
        let patrons: u32 = self.patrons.iter().map(|p| u32::from(p.points)).sum();
        cards + patrons
    }

    /// Tokens this participant may still take before hitting the cap.
    #[must_use]
    pub fn capacity(&self) -> u32 {
        MAX_TOKENS.saturating_sub(self.tokens.total())
    }

    #[must_use]
    pub fn can_reserve(&self) -> bool {
        self.reserved.len() < MAX_RESERVED
    }

    // === Mutation (transactions only) ===

    pub(crate) fn set_tokens(&mut self, tokens: TokenPool) {
        self.tokens = tokens;
    }

    pub(crate) fn add_owned(&mut self, card: DevelopmentCard) {
        self.owned[card.bonus.index()].push_back(card);
    }

    pub(crate) fn push_reserved(&mut self, card: DevelopmentCard) {
        self.reserved.push(card);
    }

    pub(crate) fn take_reserved(&mut self, index: usize) -> EngineResult<DevelopmentCard> {
        self.reserved_at(index)?;
        Ok(self.reserved.remove(index))
    }

    pub(crate) fn add_patron(&mut self, patron: Patron) {
        self.patrons.push_back(patron);
    }
}
