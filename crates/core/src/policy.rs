//! Street-keyed action selection.
//!
//! Preflop is table-driven: the betting scenario picks a raise grid and an
//! optional call grid, the hand's frequencies are mixed into a randomized
//! fold/call/raise choice, and raise sizes get a small normal perturbation.
//! Postflop compares Monte Carlo strength against the bounty-adjusted
//! calling threshold, then against a pot-scaled raising threshold.

use rand::Rng;
use serde::Deserialize;
use statrs::distribution::Normal;

use crate::card_utils::any_of_value;
use crate::config::EngineConfig;
use crate::credence::BountyCredence;
use crate::game::{BIG_BLIND, FOUR_BET_PIP, RoundContext, SMALL_BLIND, StrategyDecision};
use crate::pot_odds::compute_pot_odds;
use crate::range::OpponentRange;
use crate::strength::{StrengthParams, estimate_strength};
use crate::tables::{Scenario, StaticTables};

/// Pot size at which the postflop raising threshold reaches 1.
const RAISE_POT_CAP: f64 = 350.0;
/// Interpolation span for the pot scaling.
const RAISE_POT_SPAN: f64 = 325.0;

/// Which ladder of postflop aggression to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    Conservative,
    Balanced,
    Aggressive,
}

/// Postflop knobs for one policy: raise probabilities and strength
/// thresholds indexed by raise tier (0 = unopened pot, 1 = facing action),
/// plus the offset added to the calling threshold.
struct PolicyProfile {
    raise_probs: [f64; 2],
    raise_thresholds: [f64; 2],
    odds_offset: f64,
}

impl Policy {
    fn profile(self) -> PolicyProfile {
        match self {
            Self::Conservative => PolicyProfile {
                raise_probs: [0.8, 0.5],
                raise_thresholds: [0.85, 0.95],
                odds_offset: 0.15,
            },
            Self::Balanced => PolicyProfile {
                raise_probs: [0.9, 0.7],
                raise_thresholds: [0.75, 0.9],
                odds_offset: 0.05,
            },
            Self::Aggressive => PolicyProfile {
                raise_probs: [0.95, 0.85],
                raise_thresholds: [0.65, 0.75],
                odds_offset: -0.02,
            },
        }
    }
}

/// Everything a single decision reads.
pub struct DecisionInputs<'a> {
    pub ctx: &'a RoundContext,
    pub range: &'a OpponentRange,
    pub credence: &'a BountyCredence,
    pub tables: &'a StaticTables,
    pub config: &'a EngineConfig,
    /// True when the match is mathematically safe to check-fold out.
    pub locked: bool,
}

impl Policy {
    /// Choose an action for the current spot.
    pub fn decide<R: Rng>(self, inputs: &DecisionInputs<'_>, rng: &mut R) -> StrategyDecision {
        if inputs.locked {
            return check_fold(inputs.ctx);
        }
        if inputs.ctx.street == 0 {
            self.decide_preflop(inputs, rng)
        } else {
            self.decide_postflop(inputs, rng)
        }
    }

    fn decide_preflop<R: Rng>(self, inputs: &DecisionInputs<'_>, rng: &mut R) -> StrategyDecision {
        let ctx = inputs.ctx;
        let pot = ctx.pot();

        let (raise_scenario, call_scenario, target) = if ctx.big_blind {
            if ctx.opp_pip == BIG_BLIND {
                (Scenario::RaiseVsLimp, None, BIG_BLIND * 5 / 2)
            } else if ctx.my_pip == BIG_BLIND && ctx.opp_pip < FOUR_BET_PIP {
                (
                    Scenario::ThreeBetVsOpen,
                    Some(Scenario::CallVsOpen),
                    3 * pot + BIG_BLIND,
                )
            } else {
                (
                    Scenario::FiveBetVsFourBet,
                    Some(Scenario::CallVsFourBet),
                    5 * pot / 2 + BIG_BLIND,
                )
            }
        } else if ctx.my_pip == SMALL_BLIND {
            (Scenario::Opening, None, BIG_BLIND * 5 / 2)
        } else {
            (
                Scenario::FourBetVsThreeBet,
                Some(Scenario::CallVsThreeBet),
                3 * pot + BIG_BLIND,
            )
        };

        let holds_bounty = any_of_value(&ctx.hole, ctx.my_bounty);
        let raise_p = inputs
            .tables
            .grid(raise_scenario)
            .lookup(ctx.hole, holds_bounty);
        let call_p = call_scenario
            .map_or(0.0, |s| inputs.tables.grid(s).lookup(ctx.hole, holds_bounty));
        let fold_p = (1.0 - call_p - raise_p).max(0.0);

        let roll = rng.gen_range(0.0..1.0);
        if roll < fold_p {
            check_fold(ctx)
        } else if roll < fold_p + call_p {
            check_call(ctx)
        } else {
            raise_check_call(ctx, perturbed_raise(ctx, target, rng))
        }
    }

    fn decide_postflop<R: Rng>(self, inputs: &DecisionInputs<'_>, rng: &mut R) -> StrategyDecision {
        let ctx = inputs.ctx;
        let profile = self.profile();
        let pot = ctx.pot();

        let strength = estimate_strength(&StrengthParams {
            hole: ctx.hole,
            board: &ctx.board,
            range: inputs.range,
            credence: inputs.credence,
            my_bounty: ctx.my_bounty,
            bounty: &inputs.config.bounty,
            bounty_weight: inputs.config.bounty_weight,
            iterations: inputs.config.iterations,
            seed: rng.next_u64(),
        });
        let threshold = compute_pot_odds(
            ctx.my_contribution,
            ctx.opp_contribution,
            ctx.hole,
            &ctx.board,
            ctx.my_bounty,
            inputs.credence,
            &inputs.config.bounty,
        ) + profile.odds_offset;

        if strength <= threshold {
            return check_fold(ctx);
        }

        let tier = if ctx.my_pip == 0 {
            0
        } else if ctx.my_pip < 4 * pot {
            1
        } else {
            return check_call(ctx);
        };

        // The raising bar rises with pot size, reaching 1 at the cap: big
        // pots only grow further on very strong hands.
        let raise_bar = 1.0
            - (RAISE_POT_CAP - f64::from(pot)) * (1.0 - profile.raise_thresholds[tier])
                / RAISE_POT_SPAN;
        if strength > raise_bar && rng.gen_range(0.0..1.0) < profile.raise_probs[tier] {
            raise_check_call(ctx, 3 * pot)
        } else {
            check_call(ctx)
        }
    }
}

/// Check when possible, otherwise fold.
fn check_fold(ctx: &RoundContext) -> StrategyDecision {
    if ctx.can_check {
        StrategyDecision::Check
    } else {
        StrategyDecision::Fold
    }
}

/// Check when possible, otherwise call.
fn check_call(ctx: &RoundContext) -> StrategyDecision {
    if ctx.can_check {
        StrategyDecision::Check
    } else {
        StrategyDecision::Call
    }
}

/// Raise to `amount` clamped to the legal bounds, degrading to check/call
/// when raising is not available.
fn raise_check_call(ctx: &RoundContext, amount: u32) -> StrategyDecision {
    if ctx.can_raise {
        let (min, max) = ctx.raise_bounds;
        StrategyDecision::Raise(amount.clamp(min, max))
    } else {
        check_call(ctx)
    }
}

/// Jitter a preflop raise target with a normal perturbation so sizings do
/// not leak the exact table entry. Sigma scales with the headroom above the
/// minimum raise.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn perturbed_raise<R: Rng>(ctx: &RoundContext, target: u32, rng: &mut R) -> u32 {
    if !ctx.can_raise {
        return target;
    }
    let (min, max) = ctx.raise_bounds;
    let clamped = f64::from(target.clamp(min, max));
    let sigma = (clamped - f64::from(min)) / 10.0;
    if sigma <= 0.0 {
        return target.clamp(min, max);
    }
    let jittered = match Normal::new(clamped, sigma) {
        Ok(normal) => rng.sample(normal),
        Err(_) => clamped,
    };
    (jittered.round().clamp(f64::from(min), f64::from(max))) as u32
}
