//! Cards, patrons, their external records, and draw supplies.
//!
//! - `card`: `DevelopmentCard`, `Patron`, `Tier`
//! - `record`: flat rows that external loaders produce
//! - `source`: the `CardSource` capability and the in-memory decks

pub mod card;
pub mod record;
pub mod source;

pub use card::{DevelopmentCard, Patron, Tier};
pub use record::{CardRecord, PatronRecord};
pub use source::{CardSource, PatronDeck, TierDeck};
