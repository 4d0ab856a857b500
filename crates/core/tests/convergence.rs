//! Monte Carlo estimator accuracy against exact enumeration.

use bounty_core::config::BountyConstants;
use bounty_core::credence::BountyCredence;
use bounty_core::poker::{Card, Suit, Value};
use bounty_core::range::OpponentRange;
use bounty_core::strength::{StrengthParams, estimate_strength, exact_river_strength};
use test_macros::timed_test;

use Suit::{Club, Diamond, Heart, Spade};
use Value::{Ace, Five, Jack, King, Nine, Queen, Six, Ten, Two};

fn card(value: Value, suit: Suit) -> Card {
    Card::new(value, suit)
}

fn estimate(hole: [Card; 2], board: &[Card], iterations: u32, seed: u64) -> f64 {
    let range = OpponentRange::uniform();
    let credence = BountyCredence::uniform();
    let bounty = BountyConstants::default();
    estimate_strength(&StrengthParams {
        hole,
        board,
        range: &range,
        credence: &credence,
        my_bounty: Two,
        bounty: &bounty,
        bounty_weight: 0.0,
        iterations,
        seed,
    })
}

#[timed_test(60)]
fn river_estimate_matches_enumeration() {
    let spots: [([Card; 2], [Card; 5]); 3] = [
        (
            [card(King, Heart), card(Queen, Heart)],
            [
                card(Two, Spade),
                card(Nine, Diamond),
                card(Queen, Club),
                card(Five, Heart),
                card(Jack, Spade),
            ],
        ),
        (
            [card(Ace, Spade), card(Ace, Heart)],
            [
                card(Six, Club),
                card(Nine, Heart),
                card(Ten, Diamond),
                card(Two, Club),
                card(King, Spade),
            ],
        ),
        (
            [card(Six, Heart), card(Five, Heart)],
            [
                card(Ace, Diamond),
                card(King, Club),
                card(Nine, Spade),
                card(Queen, Diamond),
                card(Jack, Heart),
            ],
        ),
    ];

    for (i, (hole, board)) in spots.iter().enumerate() {
        let exact = exact_river_strength(*hole, board);
        let sampled = estimate(*hole, board, 8000, 0x5EED + i as u64);
        assert!(
            (exact - sampled).abs() < 0.025,
            "spot {i}: exact {exact} vs sampled {sampled}"
        );
    }
}

#[timed_test(60)]
fn top_set_with_no_bounty_weight_dominates() {
    let hole = [card(Ace, Heart), card(Ace, Spade)];
    let board = [
        card(Ace, Diamond),
        card(Two, Heart),
        card(Five, Club),
        card(Six, Spade),
    ];
    let strength = estimate(hole, &board, 5000, 42);
    assert!(strength > 0.85, "top set strength: {strength}");
}

#[timed_test(60)]
fn more_iterations_reduce_spread() {
    // Two independent seeds should agree more closely at a higher budget.
    let hole = [card(King, Heart), card(Queen, Heart)];
    let board = [card(Two, Spade), card(Nine, Diamond), card(Queen, Club)];

    let coarse = (estimate(hole, &board, 200, 1) - estimate(hole, &board, 200, 2)).abs();
    let mut fine_max: f64 = 0.0;
    for seed in 0..4 {
        let d = (estimate(hole, &board, 20_000, 100 + seed)
            - estimate(hole, &board, 20_000, 200 + seed))
        .abs();
        fine_max = fine_max.max(d);
    }
    // Not a strict proof, but 100x the budget should not be noisier.
    assert!(
        fine_max < coarse.max(0.03),
        "fine spread {fine_max} vs coarse {coarse}"
    );
}
