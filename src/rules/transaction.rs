//! State transitions.
//!
//! Each function touches exactly the board and one participant, checks its
//! precondition first, and either applies completely or returns an error
//! with nothing changed.

use tracing::{debug, info};

use super::afford::{can_afford, can_afford_patron, payment};
use super::moves::withdrawal_options;
use crate::cards::{DevelopmentCard, Patron, Tier};
use crate::core::action::ActionKind;
use crate::core::board::Board;
use crate::core::participant::{Participant, MAX_TOKENS};
use crate::core::tokens::TokenPool;
use crate::error::{EngineError, EngineResult};

/// A completed purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub card: DevelopmentCard,
    /// Tokens moved from the participant to the bank.
    pub paid: TokenPool,
}

/// Move `chosen` from the bank to the participant.
pub fn withdraw(
    board: &mut Board,
    participant: &mut Participant,
    chosen: TokenPool,
) -> EngineResult<()> {
    if !withdrawal_options(board.bank(), participant).contains(&chosen) {
        return Err(EngineError::illegal(
            ActionKind::Withdraw,
            "not an available token combination",
        ));
    }
    let bank = board
        .bank()
        .checked_sub(&chosen)
        .ok_or(EngineError::illegal(ActionKind::Withdraw, "bank cannot cover withdrawal"))?;
    board.set_bank(bank);
    participant.set_tokens(*participant.tokens() + chosen);
    debug!(tokens = %chosen, "withdrew");
    Ok(())
}

/// Move `payment` from the participant to the bank.
fn settle(
    board: &mut Board,
    participant: &mut Participant,
    card: &DevelopmentCard,
    kind: ActionKind,
) -> EngineResult<TokenPool> {
    if !can_afford(card, participant) {
        return Err(EngineError::illegal(kind, "card is not affordable"));
    }
    let paid = payment(card, participant);
    let left = participant
        .tokens()
        .checked_sub(&paid)
        .ok_or(EngineError::illegal(kind, "payment exceeds holdings"))?;
    participant.set_tokens(left);
    board.set_bank(*board.bank() + paid);
    Ok(paid)
}

/// Buy the card in an exposure slot. The slot is refilled from its deck.
pub fn purchase_exposed(
    board: &mut Board,
    participant: &mut Participant,
    tier: Tier,
    slot: usize,
) -> EngineResult<Purchase> {
    let card = *board.card_at(tier, slot)?;
    let paid = settle(board, participant, &card, ActionKind::PurchaseExposed)?;
    let card = board.take_card(tier, slot)?;
    participant.add_owned(card);
    debug!(%card, %paid, "purchased exposed card");
    Ok(Purchase { card, paid })
}

/// Buy a card from the participant's reservations.
pub fn purchase_reserved(
    board: &mut Board,
    participant: &mut Participant,
    index: usize,
) -> EngineResult<Purchase> {
    let card = *participant.reserved_at(index)?;
    let paid = settle(board, participant, &card, ActionKind::PurchaseReserved)?;
    let card = participant.take_reserved(index)?;
    participant.add_owned(card);
    debug!(%card, %paid, "purchased reserved card");
    Ok(Purchase { card, paid })
}

/// Move an exposed card into the participant's reservations, optionally
/// taking one gold from the bank with it.
pub fn reserve(
    board: &mut Board,
    participant: &mut Participant,
    tier: Tier,
    slot: usize,
    with_wildcard: bool,
) -> EngineResult<DevelopmentCard> {
    let kind = if with_wildcard {
        ActionKind::ReserveWithWildcard
    } else {
        ActionKind::Reserve
    };
    board.card_at(tier, slot)?;
    if !participant.can_reserve() {
        return Err(EngineError::illegal(kind, "reservation list is full"));
    }
    if with_wildcard {
        if board.bank().gold() == 0 {
            return Err(EngineError::illegal(kind, "bank has no gold"));
        }
        if participant.tokens().total() >= MAX_TOKENS {
            return Err(EngineError::illegal(kind, "participant holds the token maximum"));
        }
    }

    let card = board.take_card(tier, slot)?;
    if with_wildcard {
        let gold = TokenPool::new().with_gold(1);
        let bank = board
            .bank()
            .checked_sub(&gold)
            .ok_or(EngineError::illegal(kind, "bank has no gold"))?;
        board.set_bank(bank);
        participant.set_tokens(*participant.tokens() + gold);
    }
    participant.push_reserved(card);
    debug!(%card, with_wildcard, "reserved card");
    Ok(card)
}

/// Move the patron in slot `index` to the participant. The slot stays empty.
pub fn award_patron(
    board: &mut Board,
    participant: &mut Participant,
    index: usize,
) -> EngineResult<Patron> {
    let patron = *board.patron_at(index)?;
    if !can_afford_patron(&patron, participant) {
        return Err(EngineError::PatronNotEarned { index });
    }
    let patron = board.take_patron(index)?;
    participant.add_patron(patron);
    info!(%patron, slot = index, "patron awarded");
    Ok(patron)
}
