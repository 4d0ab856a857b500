//! End-game lock arithmetic.
//!
//! Once the chip lead is large enough, folding every hand for the rest of
//! the match wins regardless of play. Folding costs the blinds (3 chips per
//! two rounds) and concedes the opponent's bounty payouts, so the question
//! is how many bounty hits the lead can absorb.

use statrs::distribution::{Binomial, DiscreteCDF};

/// Chance a blind-folded round still pays the opponent's bounty: their
/// bounty rank must appear in their own two hole cards.
pub const BOUNTY_HIT_RATE: f64 = 1.0 - (48.0 * 47.0) / (52.0 * 51.0);

/// Bankroll above which check-folding out is a guaranteed win.
///
/// Blinds average 1.5 chips per round; on an odd number of remaining
/// rounds the half chip lands on whichever blind the hero posts next.
#[must_use]
pub fn target_bankroll(rounds_left: u32, big_blind: bool) -> f64 {
    let parity = f64::from(rounds_left % 2);
    let blind_term = parity * if big_blind { 0.5 } else { -0.5 };
    12.5 * f64::from(rounds_left) + blind_term
}

/// Probability that check-folding every remaining round wins the match.
///
/// The lead shrinks by the blinds plus 11 chips per opponent bounty hit
/// (half the 4-chip blind pot plus the flat bonus, rounded up). Bounty
/// hits are binomial across the remaining rounds.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn checkfold_win_probability(bankroll: i64, rounds_left: u32, big_blind: bool) -> f64 {
    if rounds_left == 0 {
        return if bankroll > 0 { 1.0 } else { 0.0 };
    }

    let rl = f64::from(rounds_left);
    let parity = f64::from(rounds_left % 2);
    let blind_term = parity * if big_blind { 0.5 } else { -0.5 };

    #[allow(clippy::cast_precision_loss)]
    let margin = bankroll as f64 - 1.5 * rl - blind_term;
    let absorbable = (margin / 11.0).ceil() - 1.0;
    let bounties_to_win = absorbable.clamp(0.0, rl) as u64;

    Binomial::new(BOUNTY_HIT_RATE, u64::from(rounds_left))
        .map_or(0.0, |dist| dist.cdf(bounties_to_win))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_macros::timed_test;

    #[timed_test]
    fn hit_rate_matches_two_card_draw() {
        // 1 - C(48,2)/C(52,2) expressed through the draw order.
        assert!((BOUNTY_HIT_RATE - 0.149_321_266_968_325_8).abs() < 1e-12);
    }

    #[timed_test]
    fn target_scales_with_rounds() {
        assert!((target_bankroll(1000, true) - 12_500.0).abs() < 1e-9);
        assert!((target_bankroll(3, true) - 38.0).abs() < 1e-9);
        assert!((target_bankroll(3, false) - 37.0).abs() < 1e-9);
        assert!((target_bankroll(2, false) - 25.0).abs() < 1e-9);
    }

    #[timed_test]
    fn huge_lead_near_the_end_is_a_lock() {
        let p = checkfold_win_probability(500, 2, false);
        assert!(p > 0.9999, "p = {p}");
    }

    #[timed_test]
    fn even_bankroll_at_the_start_is_hopeless() {
        let p = checkfold_win_probability(0, 999, true);
        assert!(p < 1e-6, "p = {p}");
    }

    #[timed_test]
    fn probability_grows_with_bankroll() {
        let mut last = -1.0;
        for bankroll in [0i64, 100, 200, 400, 800, 1600] {
            let p = checkfold_win_probability(bankroll, 51, false);
            assert!(p >= last, "not monotone at bankroll {bankroll}");
            last = p;
        }
        assert!(last > 0.999);
    }

    #[timed_test]
    fn match_over_uses_the_sign_of_the_lead() {
        assert!((checkfold_win_probability(10, 0, true) - 1.0).abs() < 1e-12);
        assert!(checkfold_win_probability(-10, 0, true).abs() < 1e-12);
    }

    #[timed_test]
    fn deficit_can_never_fold_out_a_win() {
        let p = checkfold_win_probability(-50, 30, false);
        assert!(p < 0.05, "p = {p}");
    }
}
