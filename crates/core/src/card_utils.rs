//! Shared card-level helpers.
//!
//! Centralizes hand ranking and the u64 deck-bitset bookkeeping used by the
//! range model and the Monte Carlo estimator.

use arrayvec::ArrayVec;

use crate::poker::{ALL_SUITS, ALL_VALUES, Card, Hand, Rank, Rankable, Value, card_index};

/// Bit flag for a card in a 52-bit deck mask.
#[must_use]
pub fn card_bit(card: Card) -> u64 {
    1u64 << card_index(card)
}

/// Build a used-card mask from any set of known cards.
#[must_use]
pub fn used_mask(cards: &[Card]) -> u64 {
    cards.iter().fold(0u64, |mask, &c| mask | card_bit(c))
}

/// All deck cards not flagged in `used`, in index order.
///
/// Returns a stack-allocated buffer to keep the sampling loop free of heap
/// allocation.
#[must_use]
pub fn remaining_cards(used: u64) -> ArrayVec<Card, 52> {
    let mut remaining = ArrayVec::new();
    for &value in &ALL_VALUES {
        for &suit in &ALL_SUITS {
            let card = Card::new(value, suit);
            if used & card_bit(card) == 0 {
                remaining.push(card);
            }
        }
    }
    remaining
}

/// Whether any card in the slice has the given value.
#[must_use]
pub fn any_of_value(cards: &[Card], value: Value) -> bool {
    cards.iter().any(|c| c.value == value)
}

/// Best 5-card rank from two hole cards plus board cards.
#[must_use]
pub fn hand_rank(hole: [Card; 2], board: &[Card]) -> Rank {
    let mut hand = Hand::default();
    for c in hole {
        hand.insert(c);
    }
    for &c in board {
        hand.insert(c);
    }
    hand.rank()
}
