//! Move generation.
//!
//! Each function enumerates one option set for a participant against the
//! current board. They are pure: same board and holdings, same options in
//! the same order. `LegalOptions` bundles all five sets keyed by action
//! kind; an action is legal iff its payload is a member of the set for its
//! kind (value equality).
//!
//! ## Withdrawal order
//!
//! The empty withdrawal first, then distinct-color subsets by size, each
//! size in lexicographic color order, then same-color pairs in color order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::afford::{can_afford, can_afford_patron};
use crate::cards::DevelopmentCard;
use crate::core::action::{Action, ActionKind, CardRef, Payload};
use crate::core::board::Board;
use crate::core::participant::{Participant, MAX_TOKENS};
use crate::core::tokens::{Color, TokenPool};

/// Most distinct colors in one withdrawal.
pub const MAX_DISTINCT_COLORS: usize = 3;
/// Bank count a color needs before a same-color pair may be taken.
pub const PAIR_THRESHOLD: u8 = 4;

/// A card together with where it sits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardOption {
    pub at: CardRef,
    pub card: DevelopmentCard,
}

impl CardOption {
    #[must_use]
    pub fn new(at: CardRef, card: DevelopmentCard) -> Self {
        Self { at, card }
    }
}

/// Every legal move for one participant, keyed by action kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalOptions {
    pub withdraw: Vec<TokenPool>,
    pub purchase_exposed: Vec<CardOption>,
    pub purchase_reserved: Vec<CardOption>,
    pub reserve: Vec<CardOption>,
    pub reserve_with_wildcard: Vec<CardOption>,
}

impl LegalOptions {
    /// Card options for a card-taking kind. Empty for `Withdraw`.
    #[must_use]
    pub fn cards(&self, kind: ActionKind) -> &[CardOption] {
        match kind {
            ActionKind::Withdraw => &[],
            ActionKind::PurchaseExposed => &self.purchase_exposed,
            ActionKind::PurchaseReserved => &self.purchase_reserved,
            ActionKind::Reserve => &self.reserve,
            ActionKind::ReserveWithWildcard => &self.reserve_with_wildcard,
        }
    }

    /// Number of options of one kind.
    #[must_use]
    pub fn count(&self, kind: ActionKind) -> usize {
        match kind {
            ActionKind::Withdraw => self.withdraw.len(),
            _ => self.cards(kind).len(),
        }
    }

    /// Total number of options across all kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        ActionKind::ALL.iter().map(|&k| self.count(k)).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flatten into submittable actions, kind by kind.
    #[must_use]
    pub fn actions(&self) -> Vec<Action> {
        let mut actions = Vec::with_capacity(self.len());
        actions.extend(self.withdraw.iter().map(|&t| Action::withdraw(t)));
        for kind in &ActionKind::ALL[1..] {
            actions.extend(
                self.cards(*kind)
                    .iter()
                    .map(|o| Action::new(*kind, Payload::Card(o.at))),
            );
        }
        actions
    }
}

/// Token combinations `participant` may take from `bank`.
///
/// ```
/// use splendor_engine::core::{Participant, TokenPool};
/// use splendor_engine::rules::moves::withdrawal_options;
///
/// let options = withdrawal_options(&TokenPool::uniform(7, 5), &Participant::new());
/// assert_eq!(options.len(), 31);
/// assert!(options[0].is_empty());
/// ```
#[must_use]
pub fn withdrawal_options(bank: &TokenPool, participant: &Participant) -> Vec<TokenPool> {
    let mut options = vec![TokenPool::new()];
    let capacity = participant.capacity();
    if capacity == 0 {
        return options;
    }

    let available: SmallVec<[Color; 5]> = bank.present_colors().collect();
    let max_k = available
        .len()
        .min(MAX_DISTINCT_COLORS)
        .min(usize::try_from(capacity).unwrap_or(usize::MAX));
    for k in 1..=max_k {
        push_combinations(&available, k, 0, TokenPool::new(), &mut options);
    }

    if capacity >= 2 {
        options.extend(
            Color::ALL
                .into_iter()
                .filter(|&c| bank[c] >= PAIR_THRESHOLD)
                .map(|c| TokenPool::of(c, 2)),
        );
    }
    options
}

fn push_combinations(
    colors: &[Color],
    k: usize,
    start: usize,
    partial: TokenPool,
    out: &mut Vec<TokenPool>,
) {
    if k == 0 {
        out.push(partial);
        return;
    }
    for i in start..colors.len() {
        if colors.len() - i < k {
            break;
        }
        push_combinations(colors, k - 1, i + 1, partial.with(colors[i], 1), out);
    }
}

/// Exposed cards `participant` can afford.
#[must_use]
pub fn purchasable_exposed(board: &Board, participant: &Participant) -> Vec<CardOption> {
    board
        .exposed_cards()
        .filter(|(_, card)| can_afford(card, participant))
        .map(|(at, card)| CardOption::new(at, *card))
        .collect()
}

/// Reserved cards `participant` can afford.
#[must_use]
pub fn purchasable_reserved(participant: &Participant) -> Vec<CardOption> {
    participant
        .reserved()
        .iter()
        .enumerate()
        .filter(|(_, card)| can_afford(card, participant))
        .map(|(index, card)| CardOption::new(CardRef::Reserved { index }, *card))
        .collect()
}

/// Every exposed card while the reservation list has room.
#[must_use]
pub fn reservable(board: &Board, participant: &Participant) -> Vec<CardOption> {
    if !participant.can_reserve() {
        return Vec::new();
    }
    board
        .exposed_cards()
        .map(|(at, card)| CardOption::new(at, *card))
        .collect()
}

/// `reservable`, further requiring bank gold and room for one more token.
#[must_use]
pub fn reservable_with_wildcard(board: &Board, participant: &Participant) -> Vec<CardOption> {
    if board.bank().gold() == 0 || participant.tokens().total() >= MAX_TOKENS {
        return Vec::new();
    }
    reservable(board, participant)
}

/// Slot indices of exposed patrons `participant` qualifies for, in
/// exposure order.
#[must_use]
pub fn qualifying_patrons(board: &Board, participant: &Participant) -> Vec<usize> {
    board
        .exposed_patrons()
        .filter(|(_, patron)| can_afford_patron(patron, participant))
        .map(|(index, _)| index)
        .collect()
}

/// All five option sets.
#[must_use]
pub fn legal_options(board: &Board, participant: &Participant) -> LegalOptions {
    LegalOptions {
        withdraw: withdrawal_options(board.bank(), participant),
        purchase_exposed: purchasable_exposed(board, participant),
        purchase_reserved: purchasable_reserved(participant),
        reserve: reservable(board, participant),
        reserve_with_wildcard: reservable_with_wildcard(board, participant),
    }
}
