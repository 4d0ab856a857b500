//! Round lifecycle and belief-state plumbing.
//!
//! [`AgentState`] owns everything that persists across decisions: the
//! opponent range and bounty credence, the strategy tables, the RNG, and
//! the end-game lock flag. The harness drives it with `begin_round`,
//! `decide`, `finish_round`.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::bankroll::{checkfold_win_probability, target_bankroll};
use crate::config::EngineConfig;
use crate::credence::BountyCredence;
use crate::game::{ActionBucket, BOUNTY_EPOCH, RoundContext, StrategyDecision, TerminalContext};
use crate::policy::DecisionInputs;
use crate::range::{Likelihood, OpponentRange, expand_grid};
use crate::tables::{Scenario, StaticTables};

/// Win probability above which the rest of the match is folded out even
/// when the bankroll has not crossed the hard target.
const LOCK_CONFIDENCE: f64 = 0.999;

/// All per-match mutable state.
pub struct AgentState {
    config: EngineConfig,
    tables: StaticTables,
    range: OpponentRange,
    credence: BountyCredence,
    rng: StdRng,
    previous_street: u8,
    locked: bool,
}

impl AgentState {
    /// Fresh agent for a new match.
    #[must_use]
    pub fn new(config: EngineConfig, tables: StaticTables) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            tables,
            range: OpponentRange::uniform(),
            credence: BountyCredence::uniform(),
            rng,
            previous_street: 0,
            locked: false,
        }
    }

    /// Reset per-round state and re-evaluate the end-game lock.
    ///
    /// The opponent range carries no information across rounds; the bounty
    /// credence does, until both bounties are redrawn at an epoch boundary.
    pub fn begin_round(&mut self, round_num: u32, bankroll: i64, big_blind: bool) {
        if round_num % BOUNTY_EPOCH == 1 {
            self.credence = BountyCredence::uniform();
        }
        self.range = OpponentRange::uniform();
        self.previous_street = 0;

        let rounds_left = crate::game::NUM_ROUNDS.saturating_sub(round_num) + 1;
        #[allow(clippy::cast_precision_loss)]
        let over_target = bankroll as f64 > target_bankroll(rounds_left, big_blind);
        self.locked = over_target
            || checkfold_win_probability(bankroll, rounds_left, big_blind) > LOCK_CONFIDENCE;
    }

    /// Fold the opponent's latest observable action into the range model,
    /// then pick an action for the spot.
    pub fn decide(&mut self, ctx: &RoundContext) -> StrategyDecision {
        let entered = ctx.street != self.previous_street;
        self.previous_street = ctx.street;

        let bucket = ActionBucket::classify(ctx, entered);
        let likelihood = self.likelihood_for(bucket);
        match self.range.update_for_action(&likelihood, &ctx.visible_cards()) {
            Ok(next) => self.range = next,
            Err(err) => {
                tracing::warn!(%err, ?bucket, "range update contradicted prior, keeping it");
            }
        }

        let inputs = DecisionInputs {
            ctx,
            range: &self.range,
            credence: &self.credence,
            tables: &self.tables,
            config: &self.config,
            locked: self.locked,
        };
        let decision = self.config.policy.decide(&inputs, &mut self.rng);
        tracing::debug!(street = ctx.street, ?bucket, ?decision, "decision");
        decision
    }

    /// Round-end bookkeeping: Bayesian bounty update from the award flag.
    ///
    /// Rounds the hero won chips in reveal nothing about the opponent's
    /// bounty award, so only non-winning rounds update the credence.
    pub fn finish_round(&mut self, terminal: &TerminalContext) {
        if terminal.my_delta > 0 {
            return;
        }
        match self.credence.update(
            terminal.opp_bounty_hit,
            terminal.my_hole,
            &terminal.board,
            terminal.opp_hole,
        ) {
            Ok(next) => self.credence = next,
            Err(err) => {
                tracing::warn!(%err, "bounty update contradicted prior, keeping it");
            }
        }
    }

    /// True when the agent is folding out the rest of the match.
    #[must_use]
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Current opponent range model.
    #[must_use]
    pub fn range(&self) -> &OpponentRange {
        &self.range
    }

    /// Current opponent bounty credence.
    #[must_use]
    pub fn credence(&self) -> &BountyCredence {
        &self.credence
    }

    fn likelihood_for(&self, bucket: ActionBucket) -> Likelihood {
        let scenario = match bucket {
            ActionBucket::Unobserved => return Likelihood::Uniform,
            // A limp is read against the opening grid: hands that open
            // rarely limp, so the grid still orders the possibilities.
            ActionBucket::Limped | ActionBucket::Opened => Scenario::Opening,
            ActionBucket::ThreeBet => Scenario::ThreeBetVsOpen,
            ActionBucket::FourBet => Scenario::FourBetVsThreeBet,
            ActionBucket::CalledOpen => Scenario::CallVsOpen,
            ActionBucket::CalledThreeBet => Scenario::CallVsThreeBet,
            ActionBucket::CalledFourBet => Scenario::CallVsFourBet,
        };
        Likelihood::Grid(expand_grid(self.tables.grid(scenario).plain()))
    }
}
