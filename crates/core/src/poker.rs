//! Card model shared across the engine.
//!
//! Re-exports the `rs_poker` core types and pins the fixed suit/value
//! orders used for deck enumeration and the 0..51 card index.

pub use rs_poker::core::{Card, Hand, Rank, Rankable, Suit, Value};

/// The four suits in a fixed order for deck enumeration.
pub const ALL_SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

/// The thirteen values from deuce to ace.
pub const ALL_VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

/// Number of distinct cards in the deck.
pub const DECK_SIZE: usize = 52;

/// Number of unordered two-card combinations.
pub const NUM_COMBOS: usize = 1326;

/// Number of distinct card values (candidate bounty ranks).
pub const NUM_VALUES: usize = 13;

/// Rank index of a value (Two = 0, ..., Ace = 12).
#[must_use]
pub fn value_index(value: Value) -> usize {
    value as usize
}

/// Position of a suit in [`ALL_SUITS`].
#[must_use]
pub fn suit_index(suit: Suit) -> usize {
    match suit {
        Suit::Spade => 0,
        Suit::Heart => 1,
        Suit::Diamond => 2,
        Suit::Club => 3,
    }
}

/// Map a card to its 0..51 deck index (`value * 4 + suit`).
#[must_use]
pub fn card_index(card: Card) -> usize {
    value_index(card.value) * 4 + suit_index(card.suit)
}

/// Inverse of [`card_index`].
#[must_use]
pub fn card_from_index(index: usize) -> Card {
    Card::new(ALL_VALUES[index / 4], ALL_SUITS[index % 4])
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_macros::timed_test;

    #[timed_test]
    fn card_index_covers_all_52() {
        let mut seen = 0u64;
        for &value in &ALL_VALUES {
            for &suit in &ALL_SUITS {
                let idx = card_index(Card::new(value, suit));
                assert!(idx < DECK_SIZE);
                assert_eq!(seen & (1 << idx), 0, "duplicate index for {value:?}{suit:?}");
                seen |= 1 << idx;
            }
        }
        assert_eq!(seen.count_ones(), 52);
    }

    #[timed_test]
    fn card_from_index_round_trips() {
        for idx in 0..DECK_SIZE {
            assert_eq!(card_index(card_from_index(idx)), idx);
        }
    }

    #[timed_test]
    fn value_index_is_ascending() {
        for (i, &v) in ALL_VALUES.iter().enumerate() {
            assert_eq!(value_index(v), i);
        }
    }
}
