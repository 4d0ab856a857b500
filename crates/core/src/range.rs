//! Opponent hole-card range model.
//!
//! A nonnegative weight matrix over the 52x52 card-index space; only the
//! upper triangle (i < j) carries mass, one cell per unordered two-card
//! combination. Cells touching any card visible to the hero are forced to
//! zero and the rest renormalised to sum to 1. The model is a sequential
//! Bayesian filter: every observed opponent action multiplies in a
//! per-combo likelihood and renormalises.

use rand::Rng;

use crate::card_utils::used_mask;
use crate::error::EngineError;
use crate::poker::{Card, DECK_SIZE, NUM_COMBOS, card_from_index, card_index, suit_index, value_index};
use crate::tables::Grid13;

/// Normaliser below this is treated as a contradictory update.
const NORM_EPS: f64 = 1e-12;

/// Per-combo likelihood of an observed opponent action.
#[derive(Debug, Clone)]
pub enum Likelihood {
    /// No information: every combination equally consistent.
    Uniform,
    /// Expanded canonical grid weights, one per 52x52 cell.
    Grid(Vec<f64>),
}

/// Expand a 13x13 canonical grid to per-combo weights.
///
/// Each canonical cell's weight is split evenly over its member combos:
/// pairs across their 6 suit pairs, suited hands across 4, offsuit hands
/// across 12. The total weight of a canonical hand therefore equals its
/// grid entry. Pairs and offsuit hands read `grid[high][low]`, suited
/// hands the mirrored `grid[low][high]`.
#[must_use]
pub fn expand_grid(grid: &Grid13) -> Vec<f64> {
    let mut weights = vec![0.0; DECK_SIZE * DECK_SIZE];
    for i in 0..DECK_SIZE {
        for j in (i + 1)..DECK_SIZE {
            let (a, b) = (card_from_index(i), card_from_index(j));
            let (ra, rb) = (value_index(a.value), value_index(b.value));
            let (hi, lo) = (ra.max(rb), ra.min(rb));
            let weight = if ra == rb {
                grid[hi][hi] / 6.0
            } else if suit_index(a.suit) == suit_index(b.suit) {
                grid[lo][hi] / 4.0
            } else {
                grid[hi][lo] / 12.0
            };
            weights[i * DECK_SIZE + j] = weight;
        }
    }
    weights
}

/// Relative likelihood of every opponent hole-card combination.
#[derive(Debug, Clone, PartialEq)]
pub struct OpponentRange {
    /// Flat 52x52 buffer; only cells with row < column are populated.
    weights: Vec<f64>,
}

impl OpponentRange {
    /// Uniform distribution over all 1326 combinations.
    #[must_use]
    pub fn uniform() -> Self {
        #[allow(clippy::cast_precision_loss)]
        let w = 1.0 / NUM_COMBOS as f64;
        let mut weights = vec![0.0; DECK_SIZE * DECK_SIZE];
        for i in 0..DECK_SIZE {
            for j in (i + 1)..DECK_SIZE {
                weights[i * DECK_SIZE + j] = w;
            }
        }
        Self { weights }
    }

    /// Weight on the combination holding both given cards.
    #[must_use]
    pub fn combo_weight(&self, a: Card, b: Card) -> f64 {
        let (i, j) = (card_index(a), card_index(b));
        let (lo, hi) = (i.min(j), i.max(j));
        self.weights[lo * DECK_SIZE + hi]
    }

    /// Sum of all combination weights.
    #[must_use]
    pub fn total_mass(&self) -> f64 {
        let mut sum = 0.0;
        for i in 0..DECK_SIZE {
            for j in (i + 1)..DECK_SIZE {
                sum += self.weights[i * DECK_SIZE + j];
            }
        }
        sum
    }

    /// Sum of weights on combinations containing any of the given cards.
    #[must_use]
    pub fn mass_touching(&self, cards: &[Card]) -> f64 {
        let used = used_mask(cards);
        let mut sum = 0.0;
        for i in 0..DECK_SIZE {
            for j in (i + 1)..DECK_SIZE {
                if used & (1 << i) != 0 || used & (1 << j) != 0 {
                    sum += self.weights[i * DECK_SIZE + j];
                }
            }
        }
        sum
    }

    /// Zero every cell that references a visible card.
    pub fn mask_visible(&mut self, visible: &[Card]) {
        for &card in visible {
            let idx = card_index(card);
            for k in 0..DECK_SIZE {
                self.weights[idx * DECK_SIZE + k] = 0.0;
                self.weights[k * DECK_SIZE + idx] = 0.0;
            }
        }
    }

    /// Rescale so the upper triangle sums to 1.
    ///
    /// # Errors
    ///
    /// `InvalidDistribution` when the remaining mass is ~zero, which means
    /// the applied evidence contradicted the entire prior.
    pub fn renormalise(&mut self) -> Result<(), EngineError> {
        let total = self.total_mass();
        if total <= NORM_EPS {
            return Err(EngineError::InvalidDistribution(total));
        }
        for w in &mut self.weights {
            *w /= total;
        }
        Ok(())
    }

    /// Bayesian filter step: multiply in the action likelihood, re-mask
    /// against the currently visible cards, renormalise.
    ///
    /// # Errors
    ///
    /// `InvalidDistribution` when no mass survives; callers keep the prior
    /// model in that case.
    pub fn update_for_action(
        &self,
        likelihood: &Likelihood,
        visible: &[Card],
    ) -> Result<Self, EngineError> {
        let mut next = self.clone();
        if let Likelihood::Grid(lik) = likelihood {
            for (w, l) in next.weights.iter_mut().zip(lik) {
                *w *= l;
            }
        }
        next.mask_visible(visible);
        next.renormalise()?;
        Ok(next)
    }

    /// Build a cumulative sampler over combos not touching `visible`.
    ///
    /// # Errors
    ///
    /// `EmptyRange` when no combination has positive weight after masking.
    pub fn sampler(&self, visible: &[Card]) -> Result<ComboSampler, EngineError> {
        let used = used_mask(visible);
        let mut cells = Vec::new();
        let mut cum = Vec::new();
        let mut total = 0.0;
        for i in 0..DECK_SIZE {
            if used & (1 << i) != 0 {
                continue;
            }
            for j in (i + 1)..DECK_SIZE {
                if used & (1 << j) != 0 {
                    continue;
                }
                let w = self.weights[i * DECK_SIZE + j];
                if w > 0.0 {
                    total += w;
                    cells.push((i as u8, j as u8));
                    cum.push(total);
                }
            }
        }
        if total <= NORM_EPS {
            return Err(EngineError::EmptyRange);
        }
        Ok(ComboSampler { cells, cum, total })
    }
}

/// Prefix-sum sampler over eligible opponent combinations.
#[derive(Debug, Clone)]
pub struct ComboSampler {
    cells: Vec<(u8, u8)>,
    cum: Vec<f64>,
    total: f64,
}

impl ComboSampler {
    /// Uniform sampler over every combination avoiding `visible`.
    ///
    /// Fallback for an empty range; with a well-formed deck there is always
    /// at least one combination left.
    #[must_use]
    pub fn uniform(visible: &[Card]) -> Self {
        let used = used_mask(visible);
        let mut cells = Vec::new();
        let mut cum = Vec::new();
        let mut total = 0.0;
        for i in 0..DECK_SIZE {
            if used & (1 << i) != 0 {
                continue;
            }
            for j in (i + 1)..DECK_SIZE {
                if used & (1 << j) != 0 {
                    continue;
                }
                total += 1.0;
                cells.push((i as u8, j as u8));
                cum.push(total);
            }
        }
        Self { cells, cum, total }
    }

    /// Number of combinations with positive weight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// True when no combination is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Draw one combination proportionally to its weight.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> (Card, Card) {
        let target = rng.gen_range(0.0..1.0) * self.total;
        let pos = self.cum.partition_point(|&c| c <= target);
        let (i, j) = self.cells[pos.min(self.cells.len() - 1)];
        (card_from_index(i as usize), card_from_index(j as usize))
    }
}
