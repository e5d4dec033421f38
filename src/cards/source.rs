//! Card supplies.
//!
//! `CardSource` is the capability the board needs from a draw supply:
//! populate from records, randomize once, then deal front to back until
//! exhausted. `TierDeck` and `PatronDeck` are the in-memory supplies used by
//! `GameBuilder`; both are backed by `im::Vector` so copying a game state for
//! a playout does not copy the decks.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::card::{DevelopmentCard, Patron, Tier};
use super::record::{CardRecord, PatronRecord};
use crate::core::rng::GameRng;

/// A draw supply.
pub trait CardSource {
    /// What the supply deals.
    type Item;
    /// What the supply is populated from.
    type Record;

    /// Append records to the supply in order. Returns how many were added.
    fn load<I: IntoIterator<Item = Self::Record>>(&mut self, records: I) -> usize;

    /// Randomize the remaining order.
    fn shuffle(&mut self, rng: &mut GameRng);

    /// Next item, `None` once exhausted.
    fn deal_next(&mut self) -> Option<Self::Item>;

    /// Items left to deal.
    fn remaining(&self) -> usize;

    fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}

fn shuffle_vector<T: Clone>(cards: &mut Vector<T>, rng: &mut GameRng) {
    let mut order: Vec<T> = cards.iter().cloned().collect();
    rng.shuffle(&mut order);
    *cards = order.into_iter().collect();
}

/// Development cards of one tier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TierDeck {
    tier: Tier,
    cards: Vector<DevelopmentCard>,
}

impl TierDeck {
    #[must_use]
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            cards: Vector::new(),
        }
    }

    #[must_use]
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Add an already-built card. Cards of another tier are re-tiered.
    pub fn push(&mut self, card: DevelopmentCard) {
        self.cards.push_back(DevelopmentCard { tier: self.tier, ..card });
    }

    /// Cards in deal order.
    pub fn iter(&self) -> impl Iterator<Item = &DevelopmentCard> {
        self.cards.iter()
    }

    /// Take the first copy of `card` out of the deck. Returns false if the
    /// deck has none.
    pub fn remove(&mut self, card: &DevelopmentCard) -> bool {
        match self.cards.index_of(card) {
            Some(index) => {
                self.cards.remove(index);
                true
            }
            None => false,
        }
    }
}

impl CardSource for TierDeck {
    type Item = DevelopmentCard;
    type Record = CardRecord;

    fn load<I: IntoIterator<Item = CardRecord>>(&mut self, records: I) -> usize {
        let before = self.cards.len();
        for (row, record) in records.into_iter().enumerate() {
            match record.to_card(self.tier) {
                Some(card) => self.cards.push_back(card),
                None => warn!(tier = self.tier.number(), row, "skipping card record without bonus color"),
            }
        }
        self.cards.len() - before
    }

    fn shuffle(&mut self, rng: &mut GameRng) {
        shuffle_vector(&mut self.cards, rng);
    }

    fn deal_next(&mut self) -> Option<DevelopmentCard> {
        self.cards.pop_front()
    }

    fn remaining(&self) -> usize {
        self.cards.len()
    }
}

/// Patron supply.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PatronDeck {
    patrons: Vector<Patron>,
}

impl PatronDeck {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, patron: Patron) {
        self.patrons.push_back(patron);
    }
}

impl CardSource for PatronDeck {
    type Item = Patron;
    type Record = PatronRecord;

    fn load<I: IntoIterator<Item = PatronRecord>>(&mut self, records: I) -> usize {
        let before = self.patrons.len();
        self.patrons.extend(records.into_iter().map(|r| r.to_patron()));
        self.patrons.len() - before
    }

    fn shuffle(&mut self, rng: &mut GameRng) {
        shuffle_vector(&mut self.patrons, rng);
    }

    fn deal_next(&mut self) -> Option<Patron> {
        self.patrons.pop_front()
    }

    fn remaining(&self) -> usize {
        self.patrons.len()
    }
}
