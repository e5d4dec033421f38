//! Affordability and payment.
//!
//! A card's net cost is its printed cost minus the buyer's bonuses, floored
//! at zero per color. Colored tokens pay for what they can; every remaining
//! unit must be covered by a gold token. Payment is exact: nothing beyond
//! the net cost changes hands.

use crate::cards::{DevelopmentCard, Patron};
use crate::core::participant::Participant;
use crate::core::tokens::{Color, TokenPool};

/// Cost after bonuses. Gold is always zero.
///
/// ```
/// use splendor_engine::core::{Color, TokenPool};
/// use splendor_engine::rules::afford::net_cost;
///
/// let cost = TokenPool::of(Color::Red, 3).with(Color::Blue, 1);
/// let bonuses = TokenPool::of(Color::Red, 1).with(Color::Blue, 2);
/// assert_eq!(net_cost(&cost, &bonuses), TokenPool::of(Color::Red, 2));
/// ```
#[must_use]
pub fn net_cost(cost: &TokenPool, bonuses: &TokenPool) -> TokenPool {
    let mut net = TokenPool::new();
    for color in Color::ALL {
        net[color] = cost[color].saturating_sub(bonuses[color]);
    }
    net
}

/// Gold needed to cover what colored tokens cannot.
#[must_use]
pub fn wildcards_required(net: &TokenPool, tokens: &TokenPool) -> u32 {
    Color::ALL
        .iter()
        .map(|&c| u32::from(net[c].saturating_sub(tokens[c])))
        .sum()
}

/// Whether `participant` can pay for `card` right now.
#[must_use]
pub fn can_afford(card: &DevelopmentCard, participant: &Participant) -> bool {
    let net = net_cost(&card.cost, &participant.bonuses());
    wildcards_required(&net, participant.tokens()) <= u32::from(participant.tokens().gold())
}

/// Whether `participant`'s bonuses meet every color of the requirement.
/// Tokens never count toward patrons.
#[must_use]
pub fn can_afford_patron(patron: &Patron, participant: &Participant) -> bool {
    participant.bonuses().covers(&patron.requirement)
}

/// Tokens `participant` hands over for `card`: per color the smaller of net
/// cost and holdings, plus gold for the shortfall.
///
/// Only meaningful when `can_afford` holds.
#[must_use]
pub fn payment(card: &DevelopmentCard, participant: &Participant) -> TokenPool {
    let net = net_cost(&card.cost, &participant.bonuses());
    let tokens = participant.tokens();
    let mut paid = TokenPool::new();
    for color in Color::ALL {
        paid[color] = net[color].min(tokens[color]);
    }
    let wild = wildcards_required(&net, tokens);
    paid.with_gold(u8::try_from(wild).unwrap_or(u8::MAX))
}
