//! Monte Carlo hand-strength estimation.
//!
//! Samples opponent holdings from the maintained range (not uniformly),
//! completes the board uniformly, evaluates both 7-card hands, and folds
//! bounty payouts into the score. The result is an equity-like scalar for
//! threshold comparison, not a probability: bounty credit pushes it above 1
//! and bounty penalties below 0.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::card_utils::{any_of_value, hand_rank, used_mask};
use crate::config::BountyConstants;
use crate::credence::BountyCredence;
use crate::poker::{Card, Value, value_index};
use crate::range::{ComboSampler, OpponentRange};

/// Iterations handled per rayon task.
const CHUNK: u32 = 256;

/// Inputs for one strength query. Board length selects the street
/// (0 preflop, 3 flop, 4 turn, 5 river).
pub struct StrengthParams<'a> {
    pub hole: [Card; 2],
    pub board: &'a [Card],
    pub range: &'a OpponentRange,
    pub credence: &'a BountyCredence,
    pub my_bounty: Value,
    pub bounty: &'a BountyConstants,
    /// Multiplier on bounty credit inside the score; 0 disables bounty
    /// adjustments entirely.
    pub bounty_weight: f64,
    pub iterations: u32,
    pub seed: u64,
}

/// Estimate the bounty-adjusted strength of `hole` on `board`.
///
/// Wins score 1, ties 0.5, losses 0, shifted by bounty credit: a win with
/// the own bounty visible gains `win_rate * bounty_weight`, a loss to a
/// visible opponent bounty loses the same, and one-sided ties shift by
/// `tie_rate * bounty_weight`.
///
/// A range with no eligible combination left (should not happen with a
/// well-formed deck) degrades to uniform sampling with a logged warning
/// rather than failing the decision.
#[must_use]
pub fn estimate_strength(params: &StrengthParams<'_>) -> f64 {
    let mut visible = params.hole.to_vec();
    visible.extend_from_slice(params.board);

    let sampler = match params.range.sampler(&visible) {
        Ok(sampler) => sampler,
        Err(err) => {
            tracing::warn!(%err, "falling back to uniform opponent sampling");
            ComboSampler::uniform(&visible)
        }
    };

    let iterations = params.iterations.max(1);
    let chunks = iterations.div_ceil(CHUNK);

    let total: f64 = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let mut rng = StdRng::seed_from_u64(mix_seed(params.seed, u64::from(chunk)));
            let count = CHUNK.min(iterations - chunk * CHUNK);
            let mut acc = 0.0;
            for _ in 0..count {
                acc += simulate_once(params, &sampler, &mut rng);
            }
            acc
        })
        .sum();

    total / f64::from(iterations)
}

/// One showdown sample against the range.
fn simulate_once(params: &StrengthParams<'_>, sampler: &ComboSampler, rng: &mut StdRng) -> f64 {
    let (opp_a, opp_b) = sampler.draw(rng);

    let known = [params.hole[0], params.hole[1], opp_a, opp_b];
    let used = used_mask(&known) | used_mask(params.board);
    let mut deck = crate::card_utils::remaining_cards(used);

    // Partial Fisher-Yates for the missing board cards.
    let draws = 5 - params.board.len();
    let mut board: ArrayVec<Card, 5> = params.board.iter().copied().collect();
    for i in 0..draws {
        let j = i + rng.gen_range(0..deck.len() - i);
        deck.swap(i, j);
        board.push(deck[i]);
    }

    let my_rank = hand_rank(params.hole, &board);
    let opp_rank = hand_rank([opp_a, opp_b], &board);

    let opp_bounty = params.credence.sample(rng);
    let my_bounty_visible =
        any_of_value(&params.hole, params.my_bounty) || any_of_value(&board, params.my_bounty);
    let opp_bounty_visible = [opp_a, opp_b]
        .iter()
        .chain(board.iter())
        .any(|c| value_index(c.value) == opp_bounty);

    let credit = params.bounty_weight;
    match my_rank.cmp(&opp_rank) {
        std::cmp::Ordering::Greater => {
            if my_bounty_visible {
                1.0 + params.bounty.win_rate * credit
            } else {
                1.0
            }
        }
        std::cmp::Ordering::Equal => {
            if my_bounty_visible && !opp_bounty_visible {
                0.5 + params.bounty.tie_rate * credit
            } else if !my_bounty_visible && opp_bounty_visible {
                0.5 - params.bounty.tie_rate * credit
            } else {
                0.5
            }
        }
        std::cmp::Ordering::Less => {
            if opp_bounty_visible {
                -params.bounty.win_rate * credit
            } else {
                0.0
            }
        }
    }
}

/// Exact strength on a complete board: enumerate every remaining opponent
/// combination and count wins plus half-ties. Bounties are ignored.
///
/// Exponential in unknown cards, so it is restricted to river-complete
/// boards; it exists for terminal showdowns and estimator validation, not
/// the per-decision hot path.
#[must_use]
pub fn exact_river_strength(hole: [Card; 2], board: &[Card; 5]) -> f64 {
    let our_rank = hand_rank(hole, board);
    let used = used_mask(&hole) | used_mask(board);
    let remaining = crate::card_utils::remaining_cards(used);

    let (wins, ties, total) = remaining
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| remaining[i + 1..].iter().map(move |&b| [a, b]))
        .fold((0u32, 0u32, 0u32), |(w, t, n), opp| {
            match our_rank.cmp(&hand_rank(opp, board)) {
                std::cmp::Ordering::Greater => (w + 1, t, n + 1),
                std::cmp::Ordering::Equal => (w, t + 1, n + 1),
                std::cmp::Ordering::Less => (w, t, n + 1),
            }
        });

    if total == 0 {
        return 0.5;
    }
    (f64::from(wins) + f64::from(ties) * 0.5) / f64::from(total)
}

/// Splitmix64 step; decorrelates per-chunk RNG streams from one seed.
fn mix_seed(mut x: u64, salt: u64) -> u64 {
    x = x.wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
