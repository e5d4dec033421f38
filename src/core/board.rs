//! The shared board: bank, exposed cards, exposed patrons.
//!
//! ## Layout
//!
//! Each tier has a deck and a row of exposure slots. A slot is `None` only
//! once its deck has run dry; taking a card refills the slot from the deck
//! in the same step. Patrons are dealt once at setup into their own slots,
//! and a slot is cleared when its patron is awarded.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::cards::{CardSource, DevelopmentCard, Patron, PatronDeck, Tier, TierDeck};
use crate::core::action::CardRef;
use crate::core::tokens::TokenPool;
use crate::error::{EngineError, EngineResult};

/// Exposure row plus the deck that refills it.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct TierRow {
    deck: TierDeck,
    slots: Vec<Option<DevelopmentCard>>,
}

impl TierRow {
    fn deal(mut deck: TierDeck, width: usize) -> Self {
        let slots: Vec<_> = (0..width).map(|_| deck.deal_next()).collect();
        if slots.iter().any(Option::is_none) {
            warn!(tier = deck.tier().number(), width, "deck too small to fill exposure row");
        }
        Self { deck, slots }
    }
}

const fn row_label(tier: Tier) -> &'static str {
    match tier {
        Tier::One => "tier 1 exposure",
        Tier::Two => "tier 2 exposure",
        Tier::Three => "tier 3 exposure",
    }
}

/// Everything on the table that no participant holds.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    bank: TokenPool,
    rows: [TierRow; 3],
    patrons: Vec<Option<Patron>>,
}

impl Board {
    /// Deal the opening layout: `exposed_per_tier` cards from each deck and
    /// `patron_slots` patrons.
    #[must_use]
    pub fn deal(
        bank: TokenPool,
        decks: [TierDeck; 3],
        mut patron_deck: PatronDeck,
        exposed_per_tier: usize,
        patron_slots: usize,
    ) -> Self {
        let rows = decks.map(|deck| TierRow::deal(deck, exposed_per_tier));
        let patrons: Vec<_> = std::iter::from_fn(|| patron_deck.deal_next())
            .take(patron_slots)
            .map(Some)
            .collect();
        if patrons.len() < patron_slots {
            warn!(dealt = patrons.len(), patron_slots, "fewer patrons than slots");
        }
        Self {
            bank,
            rows,
            patrons,
        }
    }

    // === Bank ===

    #[must_use]
    pub fn bank(&self) -> &TokenPool {
        &self.bank
    }

    pub(crate) fn set_bank(&mut self, bank: TokenPool) {
        self.bank = bank;
    }

    // === Cards ===

    /// Exposure slots of one tier.
    #[must_use]
    pub fn exposed(&self, tier: Tier) -> &[Option<DevelopmentCard>] {
        &self.rows[tier.index()].slots
    }

    /// Every face-up card with its location, tier by tier, slot by slot.
    pub fn exposed_cards(&self) -> impl Iterator<Item = (CardRef, &DevelopmentCard)> {
        Tier::ALL.into_iter().flat_map(move |tier| {
            self.exposed(tier)
                .iter()
                .enumerate()
                .filter_map(move |(slot, card)| {
                    card.as_ref().map(|c| (CardRef::Exposed { tier, slot }, c))
                })
        })
    }

    /// Card in `slot` of `tier`.
    pub fn card_at(&self, tier: Tier, slot: usize) -> EngineResult<&DevelopmentCard> {
        let slots = self.exposed(tier);
        slots
            .get(slot)
            .ok_or(EngineError::IndexOutOfRange {
                what: row_label(tier),
                index: slot,
                len: slots.len(),
            })?
            .as_ref()
            .ok_or(EngineError::EmptySlot {
                what: row_label(tier),
                index: slot,
            })
    }

    /// Cards left in a tier's deck.
    #[must_use]
    pub fn deck_remaining(&self, tier: Tier) -> usize {
        self.rows[tier.index()].deck.remaining()
    }

    /// Remove the card in `slot`, refilling it from the deck.
    pub(crate) fn take_card(&mut self, tier: Tier, slot: usize) -> EngineResult<DevelopmentCard> {
        let card = *self.card_at(tier, slot)?;
        let row = &mut self.rows[tier.index()];
        row.slots[slot] = row.deck.deal_next();
        Ok(card)
    }

    // === Patrons ===

    /// Patron slots in exposure order.
    #[must_use]
    pub fn patrons(&self) -> &[Option<Patron>] {
        &self.patrons
    }

    /// Patrons still on the board with their slot index.
    pub fn exposed_patrons(&self) -> impl Iterator<Item = (usize, &Patron)> {
        self.patrons
            .iter()
            .enumerate()
            .filter_map(|(i, p)| p.as_ref().map(|p| (i, p)))
    }

    pub fn patron_at(&self, index: usize) -> EngineResult<&Patron> {
        self.patrons
            .get(index)
            .ok_or(EngineError::IndexOutOfRange {
                what: "patron",
                index,
                len: self.patrons.len(),
            })?
            .as_ref()
            .ok_or(EngineError::EmptySlot { what: "patron", index })
    }

    pub(crate) fn take_patron(&mut self, index: usize) -> EngineResult<Patron> {
        let patron = *self.patron_at(index)?;
        self.patrons[index] = None;
        Ok(patron)
    }
}
