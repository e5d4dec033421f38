//! Game setup.
//!
//! `GameBuilder` collects the card and patron supplies, optional preset
//! holdings, and a `GameConfig`, then deals the opening board:
//!
//! 1. Validate the configuration
//! 2. Seat preset participants: their tokens leave the bank and their cards
//!    leave the decks
//! 3. Shuffle each tier deck and the patron deck on its own RNG stream
//! 4. Expose `exposed_per_tier` cards per tier and `player_count + 1` patrons
//!
//! ## Example
//!
//! ```
//! use splendor_engine::cards::{CardRecord, PatronRecord, Tier};
//! use splendor_engine::core::{Color, GameConfig};
//! use splendor_engine::rules::GameBuilder;
//!
//! let cards = (0..8).map(|i| CardRecord {
//!     red: 1 + i % 3,
//!     bonus: Some(Color::ALL[usize::from(i) % 5]),
//!     ..CardRecord::default()
//! });
//!
//! let game = GameBuilder::new(GameConfig::new(2).with_seed(7))
//!     .tier_records(Tier::One, cards)
//!     .patron_records(vec![PatronRecord { red: 3, green: 3, ..PatronRecord::default() }])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(game.state().board().exposed(Tier::One).iter().flatten().count(), 4);
//! assert_eq!(game.state().board().deck_remaining(Tier::One), 4);
//! ```

use tracing::debug;

use super::turn::TurnController;
use crate::cards::{
    CardRecord, CardSource, DevelopmentCard, Patron, PatronDeck, PatronRecord, Tier, TierDeck,
};
use crate::core::board::Board;
use crate::core::config::GameConfig;
use crate::core::participant::{Participant, MAX_RESERVED, MAX_TOKENS};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::error::{EngineError, EngineResult};

/// Builder for a ready-to-play game.
#[derive(Clone, Debug)]
pub struct GameBuilder {
    config: GameConfig,
    decks: [TierDeck; 3],
    patrons: PatronDeck,
    seats: Vec<(PlayerId, Participant)>,
    shuffle: bool,
}

impl GameBuilder {
    #[must_use]
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            decks: Tier::ALL.map(TierDeck::new),
            patrons: PatronDeck::new(),
            seats: Vec::new(),
            shuffle: true,
        }
    }

    /// Append card records to a tier's deck.
    #[must_use]
    pub fn tier_records<I>(mut self, tier: Tier, records: I) -> Self
    where
        I: IntoIterator<Item = CardRecord>,
    {
        self.decks[tier.index()].load(records);
        self
    }

    /// Append a built card to the deck of its tier.
    #[must_use]
    pub fn card(mut self, card: DevelopmentCard) -> Self {
        self.decks[card.tier.index()].push(card);
        self
    }

    #[must_use]
    pub fn cards<I>(self, cards: I) -> Self
    where
        I: IntoIterator<Item = DevelopmentCard>,
    {
        cards.into_iter().fold(self, Self::card)
    }

    #[must_use]
    pub fn patron_records<I>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = PatronRecord>,
    {
        self.patrons.load(records);
        self
    }

    #[must_use]
    pub fn patron(mut self, patron: Patron) -> Self {
        self.patrons.push(patron);
        self
    }

    /// Start a seat with preset holdings. Its tokens come out of the bank,
    /// and each owned or reserved card is taken out of its tier's deck when
    /// the deck holds a copy. A seat may be preset once.
    #[must_use]
    pub fn seat(mut self, player: PlayerId, participant: Participant) -> Self {
        self.seats.push((player, participant));
        self
    }

    /// Deal in insertion order instead of shuffling.
    #[must_use]
    pub fn unshuffled(mut self) -> Self {
        self.shuffle = false;
        self
    }

    /// Deal the board and hand back a controller with seat 0 to act.
    pub fn build(self) -> EngineResult<TurnController> {
        let Self {
            config,
            mut decks,
            mut patrons,
            seats,
            shuffle,
        } = self;
        config.validate()?;

        let player_count = config.player_count;
        let mut bank = config.initial_bank();
        let mut participants = PlayerMap::<Participant>::with_default(player_count);
        let mut seated = PlayerMap::with_value(player_count, false);
        for (player, participant) in seats {
            if player.index() >= player_count {
                return Err(EngineError::InvalidConfig(format!(
                    "{player} has no seat at a {player_count}-participant table"
                )));
            }
            if seated[player] {
                return Err(EngineError::InvalidConfig(format!("{player} is seated twice")));
            }
            if participant.reserved().len() > MAX_RESERVED {
                return Err(EngineError::InvalidConfig(format!(
                    "{player} starts with more than {MAX_RESERVED} reservations"
                )));
            }
            if participant.tokens().total() > MAX_TOKENS {
                return Err(EngineError::InvalidConfig(format!(
                    "{player} starts with more than {MAX_TOKENS} tokens"
                )));
            }
            bank = bank.checked_sub(participant.tokens()).ok_or_else(|| {
                EngineError::InvalidConfig(format!(
                    "{player} starts with more tokens than the bank supplies"
                ))
            })?;
            for card in participant.owned_cards().chain(participant.reserved()) {
                decks[card.tier.index()].remove(card);
            }
            seated[player] = true;
            participants[player] = participant;
        }

        let rng = GameRng::new(config.seed);
        if shuffle {
            for deck in &mut decks {
                let mut stream = rng.for_context(&format!("tier-{}", deck.tier().number()));
                deck.shuffle(&mut stream);
            }
            patrons.shuffle(&mut rng.for_context("patrons"));
        }

        let board = Board::deal(
            bank,
            decks,
            patrons,
            config.exposed_per_tier,
            config.patron_slots(),
        );
        debug!(player_count, seed = config.seed, shuffle, "game set up");

        Ok(TurnController::new(GameState::new(config, board, participants, rng)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokens::{Color, TokenPool};

    fn numbered(tier: Tier, n: u8) -> Vec<DevelopmentCard> {
        (0..n)
            .map(|i| DevelopmentCard::new(tier, Color::Red, i, TokenPool::of(Color::Blue, 1)))
            .collect()
    }

    #[test]
    fn test_build_defaults() {
        let game = GameBuilder::new(GameConfig::new(3))
            .cards(numbered(Tier::One, 10))
            .cards(numbered(Tier::Two, 10))
            .cards(numbered(Tier::Three, 10))
            .build()
            .unwrap();

        let state = game.state();
        assert_eq!(state.player_count(), 3);
        assert_eq!(*state.board().bank(), TokenPool::uniform(7, 5));
        assert_eq!(state.token_supply(), state.config().initial_bank());
        for tier in Tier::ALL {
            assert_eq!(state.board().exposed(tier).iter().flatten().count(), 4);
            assert_eq!(state.board().deck_remaining(tier), 6);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = GameBuilder::new(GameConfig::new(5)).build().unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_shuffle_is_seeded() {
        let deal = |seed: u64| {
            let game = GameBuilder::new(GameConfig::new(2).with_seed(seed))
                .cards(numbered(Tier::One, 20))
                .build()
                .unwrap();
            game.state()
                .board()
                .exposed(Tier::One)
                .iter()
                .flatten()
                .map(|c| c.points)
                .collect::<Vec<_>>()
        };
        assert_eq!(deal(11), deal(11));
        assert_ne!(deal(11), deal(12));
    }

    #[test]
    fn test_unshuffled_deals_in_order() {
        let game = GameBuilder::new(GameConfig::new(2))
            .unshuffled()
            .cards(numbered(Tier::Two, 6))
            .build()
            .unwrap();
        let points: Vec<_> = game
            .state()
            .board()
            .exposed(Tier::Two)
            .iter()
            .flatten()
            .map(|c| c.points)
            .collect();
        assert_eq!(points, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_patron_slots() {
        let patrons = (0..6).map(|i| Patron::new(TokenPool::of(Color::Green, i), 3));
        let game = patrons
            .fold(GameBuilder::new(GameConfig::new(4)), GameBuilder::patron)
            .build()
            .unwrap();
        assert_eq!(game.state().board().patrons().len(), 5);
    }

    #[test]
    fn test_preset_tokens_come_from_bank() {
        let game = GameBuilder::new(GameConfig::new(2))
            .seat(
                PlayerId::new(1),
                Participant::new().with_tokens(TokenPool::of(Color::White, 3).with_gold(1)),
            )
            .build()
            .unwrap();
        let state = game.state();
        assert_eq!(state.board().bank()[Color::White], 4);
        assert_eq!(state.board().bank().gold(), 4);
        assert_eq!(state.token_supply(), TokenPool::uniform(7, 5));
    }

    #[test]
    fn test_preset_validation() {
        let greedy = Participant::new().with_tokens(TokenPool::of(Color::White, 8));
        assert!(GameBuilder::new(GameConfig::new(2))
            .seat(PlayerId::new(0), greedy)
            .build()
            .is_err());

        assert!(GameBuilder::new(GameConfig::new(2))
            .seat(PlayerId::new(2), Participant::new())
            .build()
            .is_err());

        let over_cap = Participant::new().with_tokens(TokenPool::uniform(2, 1));
        assert!(matches!(
            GameBuilder::new(GameConfig::new(2)).seat(PlayerId::new(0), over_cap).build(),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_seat_twice_rejected() {
        let err = GameBuilder::new(GameConfig::new(2))
            .seat(PlayerId::new(0), Participant::new().with_tokens(TokenPool::of(Color::White, 3)))
            .seat(PlayerId::new(0), Participant::new().with_tokens(TokenPool::of(Color::Red, 2)))
            .build()
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));

        let game = GameBuilder::new(GameConfig::new(2))
            .seat(PlayerId::new(0), Participant::new().with_tokens(TokenPool::of(Color::White, 3)))
            .seat(PlayerId::new(1), Participant::new().with_tokens(TokenPool::of(Color::Red, 2)))
            .build()
            .unwrap();
        assert_eq!(game.state().token_supply(), game.state().config().initial_bank());
    }

    #[test]
    fn test_preset_cards_leave_the_deck() {
        let cards = numbered(Tier::One, 8);
        let owned = cards[2];
        let reserved = cards[6];
        let game = GameBuilder::new(GameConfig::new(2))
            .unshuffled()
            .cards(cards)
            .seat(
                PlayerId::new(1),
                Participant::new().with_owned(owned).with_reserved(reserved),
            )
            .build()
            .unwrap();

        let board = game.state().board();
        assert_eq!(board.deck_remaining(Tier::One), 2);
        let exposed: Vec<_> = board.exposed(Tier::One).iter().flatten().map(|c| c.points).collect();
        assert_eq!(exposed, vec![0, 1, 3, 4]);
        assert!(!board.exposed_cards().any(|(_, c)| *c == owned || *c == reserved));
    }
}
