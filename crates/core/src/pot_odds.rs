//! Bounty-adjusted calling threshold.
//!
//! Classic pot odds say call when equity exceeds cost / (cost + pot). The
//! bounty payout (an extra half pot plus a flat bonus when the winner's
//! bounty rank was visible) skews both sides of that break-even point, so
//! the threshold is recomputed from the expected values of calling and
//! folding with the visibility probabilities folded in.

use crate::card_utils::any_of_value;
use crate::config::BountyConstants;
use crate::credence::BountyCredence;
use crate::poker::{Card, Value};

/// Break-even strength for continuing against the opponent's current bet.
///
/// `q_now`/`q_future` are the probabilities that the opponent's bounty is
/// visible now and by showdown, `r` is 1 when the hero's own bounty is
/// already visible. Derived from equating the EVs of calling and folding
/// under the bounty payout (half the pot plus the flat bonus).
fn threshold(
    my_contribution: f64,
    opp_contribution: f64,
    q_now: f64,
    q_future: f64,
    r: f64,
    bounty: &BountyConstants,
) -> f64 {
    let b = 2.0 * bounty.flat_bonus;
    let numerator =
        (opp_contribution + b) * (q_future + 2.0) - (my_contribution + b) * (q_now + 2.0);
    let denominator = (opp_contribution + b) * (q_future + 4.0 + r) - 4.0 * b;
    if denominator <= f64::EPSILON {
        // Only reachable with nothing committed by the opponent; there is
        // no bet to get odds on.
        return 1.0;
    }
    numerator / denominator
}

/// Compute the strength threshold above which continuing beats folding.
///
/// Uses the credence model for the opponent-bounty visibility probability
/// and checks the hero's own bounty rank against its visible cards.
#[must_use]
pub fn compute_pot_odds(
    my_contribution: u32,
    opp_contribution: u32,
    hole: [Card; 2],
    board: &[Card],
    my_bounty: Value,
    credence: &BountyCredence,
    bounty: &BountyConstants,
) -> f64 {
    let vis = credence.visibility(hole, board);
    let q_now = vis.total();
    // TODO: model the extra visibility future board cards will add;
    // q_future currently equals q_now, which underestimates late bounty
    // reveals on early streets.
    let q_future = q_now;
    let r = if any_of_value(&hole, my_bounty) || any_of_value(board, my_bounty) {
        1.0
    } else {
        0.0
    };
    threshold(
        f64::from(my_contribution),
        f64::from(opp_contribution),
        q_now,
        q_future,
        r,
        bounty,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::Suit;
    use test_macros::timed_test;

    use Suit::{Club, Diamond, Heart, Spade};
    use Value::{Ace, Five, King, Nine, Queen, Seven, Two};

    fn card(value: Value, suit: Suit) -> Card {
        Card::new(value, suit)
    }

    #[timed_test]
    fn no_bounty_reduces_to_plain_pot_odds() {
        // q = r = 0 collapses the formula to (opp - my) / (2 * opp),
        // the break-even equity for calling opp - my into a my + opp pot
        // when the winner takes a 2x share.
        let bounty = BountyConstants::default();
        let t = threshold(10.0, 20.0, 0.0, 0.0, 0.0, &bounty);
        assert!((t - 0.25).abs() < 1e-12, "threshold {t}");

        let even = threshold(20.0, 20.0, 0.0, 0.0, 0.0, &bounty);
        assert!(even.abs() < 1e-12, "facing no bet should be free: {even}");
    }

    #[timed_test]
    fn bigger_bets_demand_more_strength() {
        let bounty = BountyConstants::default();
        let mut last = -1.0;
        for opp in [4u32, 8, 16, 32, 64, 128] {
            let t = threshold(2.0, f64::from(opp), 0.1, 0.1, 0.0, &bounty);
            assert!(t > last, "threshold not increasing at opp={opp}");
            last = t;
        }
    }

    #[timed_test]
    fn own_visible_bounty_lowers_the_threshold() {
        // A visible own bounty sweetens our wins, so we can continue wider.
        let bounty = BountyConstants::default();
        let without = threshold(10.0, 30.0, 0.2, 0.2, 0.0, &bounty);
        let with = threshold(10.0, 30.0, 0.2, 0.2, 1.0, &bounty);
        assert!(with < without, "r=1 should loosen: {with} vs {without}");
    }

    #[timed_test]
    fn opponent_bounty_visibility_raises_the_threshold() {
        // The more likely their bounty pays out, the tighter we continue.
        let bounty = BountyConstants::default();
        let low = threshold(10.0, 30.0, 0.05, 0.05, 0.0, &bounty);
        let high = threshold(10.0, 30.0, 0.6, 0.6, 0.0, &bounty);
        assert!(high > low, "q should tighten: {high} vs {low}");
    }

    #[timed_test]
    fn nothing_committed_never_offers_odds() {
        let bounty = BountyConstants::default();
        let t = threshold(0.0, 0.0, 0.0, 0.0, 0.0, &bounty);
        assert!((t - 1.0).abs() < 1e-12);
    }

    #[timed_test]
    fn compute_uses_visible_own_bounty() {
        let credence = BountyCredence::uniform();
        let bounty = BountyConstants::default();
        let board = [card(Nine, Club), card(Five, Diamond), card(Two, Spade)];

        // Same spot, own bounty on the board vs not.
        let hole = [card(Ace, Heart), card(King, Spade)];
        let hit = compute_pot_odds(6, 18, hole, &board, Nine, &credence, &bounty);
        let miss = compute_pot_odds(6, 18, hole, &board, Queen, &credence, &bounty);
        assert!(hit < miss, "visible own bounty should loosen: {hit} vs {miss}");
    }

    #[timed_test]
    fn compute_stays_in_a_sane_band() {
        let credence = BountyCredence::uniform();
        let bounty = BountyConstants::default();
        let hole = [card(Seven, Heart), card(Two, Club)];
        let board = [
            card(Ace, Spade),
            card(King, Diamond),
            card(Queen, Heart),
            card(Nine, Club),
        ];

        for (my, opp) in [(2u32, 4u32), (10, 30), (50, 150), (200, 400)] {
            let t = compute_pot_odds(my, opp, hole, &board, Five, &credence, &bounty);
            assert!(t > -0.5 && t < 1.0, "threshold {t} out of band at ({my},{opp})");
        }
    }
}
