//! Opponent bounty-rank belief model.
//!
//! A 13-entry probability vector over which value is the opponent's secret
//! bounty. Updated by Bayesian inference after each round from whether the
//! opponent's bounty was observed awarded, plus whatever cards showdown
//! revealed.

use rand::Rng;

use crate::error::EngineError;
use crate::poker::{Card, NUM_VALUES, value_index};

/// Normaliser below this is treated as a contradictory update.
const NORM_EPS: f64 = 1e-9;

/// `C(n, 2)` as a float; zero when fewer than two cards remain.
#[allow(clippy::cast_precision_loss)]
fn choose_two(n: usize) -> f64 {
    if n < 2 { 0.0 } else { (n * (n - 1) / 2) as f64 }
}

/// Probability vector over the opponent's bounty rank.
#[derive(Debug, Clone, PartialEq)]
pub struct BountyCredence {
    probs: [f64; NUM_VALUES],
}

/// Per-rank visibility probabilities given the hero's information.
///
/// `p_visible[r]` is the probability that a bounty of rank `r` shows up in
/// the opponent's hole cards or on the board; `board_mass` is the credence
/// mass on ranks already on the board (visibility 1), `hole_mass` the
/// expected visibility mass contributed by the remaining ranks.
#[derive(Debug, Clone, Copy)]
pub struct Visibility {
    pub p_visible: [f64; NUM_VALUES],
    pub board_mass: f64,
    pub hole_mass: f64,
}

impl Visibility {
    /// Total probability that the opponent's bounty is visible right now.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.board_mass + self.hole_mass
    }
}

impl BountyCredence {
    /// Uniform prior: 1/13 per rank. The state at every bounty-epoch start.
    #[must_use]
    pub fn uniform() -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self {
            probs: [1.0 / NUM_VALUES as f64; NUM_VALUES],
        }
    }

    /// Build from explicit probabilities.
    ///
    /// # Errors
    ///
    /// `InvalidDistribution` when an entry is negative or the vector does
    /// not sum to ~1.
    pub fn from_probs(probs: [f64; NUM_VALUES]) -> Result<Self, EngineError> {
        let sum: f64 = probs.iter().sum();
        if probs.iter().any(|&p| p < 0.0) || (sum - 1.0).abs() > 1e-6 {
            return Err(EngineError::InvalidDistribution(sum));
        }
        Ok(Self { probs })
    }

    /// Probability assigned to a rank index (Two = 0, ..., Ace = 12).
    #[must_use]
    pub fn prob(&self, rank: usize) -> f64 {
        self.probs[rank]
    }

    /// The full vector.
    #[must_use]
    pub fn probs(&self) -> &[f64; NUM_VALUES] {
        &self.probs
    }

    /// True when entries are nonnegative and sum to 1 within tolerance.
    #[must_use]
    pub fn is_normalised(&self) -> bool {
        let sum: f64 = self.probs.iter().sum();
        self.probs.iter().all(|&p| p >= 0.0) && (sum - 1.0).abs() < 1e-6
    }

    /// Draw a rank index proportionally to the credence.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut target = rng.gen_range(0.0..1.0);
        for (rank, &p) in self.probs.iter().enumerate() {
            if target < p {
                return rank;
            }
            target -= p;
        }
        NUM_VALUES - 1
    }

    /// Per-rank probability that the opponent's bounty is visible, given
    /// the hero's hole cards and the current board.
    ///
    /// Ranks on the board are certainly visible. For any other rank the
    /// chance its bounty landed in the opponent's two hole cards is
    /// `1 - C(u - k, 2) / C(u, 2)`, where `u` is the number of cards the
    /// hero cannot see (`50 - street`) and `k` the copies of that rank
    /// among them.
    #[must_use]
    pub fn visibility(&self, my_hole: [Card; 2], board: &[Card]) -> Visibility {
        let unseen = 50 - board.len();
        let mut p_visible = [0.0; NUM_VALUES];
        let mut board_mass = 0.0;
        let mut hole_mass = 0.0;

        for rank in 0..NUM_VALUES {
            if board.iter().any(|c| value_index(c.value) == rank) {
                p_visible[rank] = 1.0;
                board_mass += self.probs[rank];
            } else {
                let held = my_hole
                    .iter()
                    .filter(|c| value_index(c.value) == rank)
                    .count();
                let copies_unseen = 4 - held;
                p_visible[rank] = 1.0 - choose_two(unseen - copies_unseen) / choose_two(unseen);
                hole_mass += self.probs[rank] * p_visible[rank];
            }
        }

        Visibility {
            p_visible,
            board_mass,
            hole_mass,
        }
    }

    /// Round-end Bayesian update from the bounty-award observation.
    ///
    /// Four cases by (awarded, opponent hole revealed):
    /// - awarded / hidden: reweight every rank by its visibility probability;
    /// - awarded / revealed: only ranks present in board + opponent hole survive;
    /// - not awarded / hidden: board ranks are impossible, the rest reweighted
    ///   by the probability of having stayed hidden;
    /// - not awarded / revealed: ranks present in board + opponent hole are
    ///   impossible.
    ///
    /// # Errors
    ///
    /// `InvalidDistribution` when the posterior normaliser is ~zero. That
    /// means the prior had already lost the mass this evidence requires,
    /// which is a caller-side logic defect; the error must be surfaced, not
    /// papered over by renormalising.
    pub fn update(
        &self,
        bounty_awarded: bool,
        my_hole: [Card; 2],
        board: &[Card],
        opp_hole: Option<[Card; 2]>,
    ) -> Result<Self, EngineError> {
        let vis = self.visibility(my_hole, board);
        let mut next = [0.0f64; NUM_VALUES];

        match (bounty_awarded, opp_hole) {
            (true, None) => {
                let norm = vis.board_mass + vis.hole_mass;
                if norm <= NORM_EPS {
                    return Err(EngineError::InvalidDistribution(norm));
                }
                for rank in 0..NUM_VALUES {
                    next[rank] = vis.p_visible[rank] * self.probs[rank] / norm;
                }
            }
            (true, Some(opp)) => {
                let survives = |rank: usize| {
                    board.iter().any(|c| value_index(c.value) == rank)
                        || opp.iter().any(|c| value_index(c.value) == rank)
                };
                let norm: f64 = (0..NUM_VALUES)
                    .filter(|&r| survives(r))
                    .map(|r| self.probs[r])
                    .sum();
                if norm <= NORM_EPS {
                    return Err(EngineError::InvalidDistribution(norm));
                }
                for rank in (0..NUM_VALUES).filter(|&r| survives(r)) {
                    next[rank] = self.probs[rank] / norm;
                }
            }
            (false, None) => {
                // A board rank would certainly have been awarded, so those
                // ranks are gone; everything else is reweighted by the
                // probability of having stayed out of the opponent's hand.
                let norm = 1.0 - vis.board_mass - vis.hole_mass;
                if norm <= NORM_EPS {
                    return Err(EngineError::InvalidDistribution(norm));
                }
                for rank in 0..NUM_VALUES {
                    if board.iter().any(|c| value_index(c.value) == rank) {
                        continue;
                    }
                    next[rank] = (1.0 - vis.p_visible[rank]) * self.probs[rank] / norm;
                }
            }
            (false, Some(opp)) => {
                let gone = |rank: usize| {
                    board.iter().any(|c| value_index(c.value) == rank)
                        || opp.iter().any(|c| value_index(c.value) == rank)
                };
                let norm: f64 = (0..NUM_VALUES)
                    .filter(|&r| !gone(r))
                    .map(|r| self.probs[r])
                    .sum();
                if norm <= NORM_EPS {
                    return Err(EngineError::InvalidDistribution(norm));
                }
                for rank in (0..NUM_VALUES).filter(|&r| !gone(r)) {
                    next[rank] = self.probs[rank] / norm;
                }
            }
        }

        Ok(Self { probs: next })
    }

}
