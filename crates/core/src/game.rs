//! Match constants, decision values, and the per-decision state snapshots
//! exchanged with the match harness.

use serde::{Deserialize, Serialize};

use crate::poker::{Card, Value};

/// Rounds in a full match.
pub const NUM_ROUNDS: u32 = 1000;
/// Chips each player starts every round with.
pub const STARTING_STACK: u32 = 400;
/// Big blind size in chips.
pub const BIG_BLIND: u32 = 2;
/// Small blind size in chips.
pub const SMALL_BLIND: u32 = 1;
/// Both bounty ranks are redrawn every this many rounds.
pub const BOUNTY_EPOCH: u32 = 25;

/// Preflop pip at or above which the opponent is assumed to have 4-bet
/// rather than opened.
pub(crate) const FOUR_BET_PIP: u32 = 40;
/// Preflop contribution below which a flop arrival came from a single
/// raised pot rather than a 4-bet pot.
pub(crate) const SINGLE_RAISED_POT_CAP: u32 = 10;

/// The concrete action handed back to the harness.
///
/// `Raise` always carries an amount inside the harness-provided bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrategyDecision {
    Fold,
    Check,
    Call,
    Raise(u32),
}

/// Read-only snapshot of the state the harness hands us for one decision.
///
/// Owned by the harness; the core never mutates it. `street` is the board
/// card count (0 preflop, 3 flop, 4 turn, 5 river).
#[derive(Debug, Clone)]
pub struct RoundContext {
    pub street: u8,
    pub hole: [Card; 2],
    pub board: Vec<Card>,
    pub my_pip: u32,
    pub opp_pip: u32,
    pub my_contribution: u32,
    pub opp_contribution: u32,
    pub my_bounty: Value,
    /// True when this agent posts the big blind this round.
    pub big_blind: bool,
    pub can_check: bool,
    pub can_raise: bool,
    /// Legal (min, max) raise-to amounts; only meaningful when `can_raise`.
    pub raise_bounds: (u32, u32),
}

impl RoundContext {
    /// Total chips committed by both players.
    #[must_use]
    pub fn pot(&self) -> u32 {
        self.my_contribution + self.opp_contribution
    }

    /// Chips needed to match the opponent's pip.
    #[must_use]
    pub fn continue_cost(&self) -> u32 {
        self.opp_pip.saturating_sub(self.my_pip)
    }

    /// Every card this agent can see: its hole plus the board.
    #[must_use]
    pub fn visible_cards(&self) -> Vec<Card> {
        let mut cards = self.hole.to_vec();
        cards.extend_from_slice(&self.board);
        cards
    }
}

/// Round-end snapshot: the final state plus what showdown revealed.
#[derive(Debug, Clone)]
pub struct TerminalContext {
    pub street: u8,
    pub board: Vec<Card>,
    pub my_hole: [Card; 2],
    /// `None` when the round ended without a showdown.
    pub opp_hole: Option<[Card; 2]>,
    /// Net chip change for this agent.
    pub my_delta: i32,
    pub my_bounty_hit: bool,
    pub opp_bounty_hit: bool,
}

/// Coarse classification of the opponent's last observable action, derived
/// from pips and street transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionBucket {
    /// Nothing informative observed since the last update.
    Unobserved,
    Limped,
    Opened,
    ThreeBet,
    FourBet,
    CalledOpen,
    CalledThreeBet,
    CalledFourBet,
}

impl ActionBucket {
    /// Classify the opponent's last action from the current snapshot.
    ///
    /// `entered_street` is true when this is the first decision after a
    /// street transition, i.e. the opponent closed the previous street by
    /// calling or checking.
    #[must_use]
    pub fn classify(ctx: &RoundContext, entered_street: bool) -> Self {
        if ctx.street == 0 {
            return Self::classify_preflop(ctx);
        }
        if ctx.street == 3 && entered_street {
            return Self::classify_flop_arrival(ctx);
        }
        Self::Unobserved
    }

    fn classify_preflop(ctx: &RoundContext) -> Self {
        if ctx.big_blind {
            if ctx.opp_pip == SMALL_BLIND {
                Self::Unobserved
            } else if ctx.opp_pip == BIG_BLIND {
                Self::Limped
            } else if ctx.opp_pip < FOUR_BET_PIP {
                Self::Opened
            } else {
                Self::FourBet
            }
        } else if ctx.my_pip == SMALL_BLIND {
            // Our open is still pending; the opponent has done nothing yet.
            Self::Unobserved
        } else {
            Self::ThreeBet
        }
    }

    fn classify_flop_arrival(ctx: &RoundContext) -> Self {
        if ctx.big_blind {
            Self::CalledThreeBet
        } else if ctx.my_contribution < SINGLE_RAISED_POT_CAP {
            Self::CalledOpen
        } else {
            Self::CalledFourBet
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poker::{Suit, Value};
    use test_macros::timed_test;

    fn preflop_ctx(big_blind: bool, my_pip: u32, opp_pip: u32) -> RoundContext {
        RoundContext {
            street: 0,
            hole: [
                Card::new(Value::Ace, Suit::Spade),
                Card::new(Value::King, Suit::Spade),
            ],
            board: vec![],
            my_pip,
            opp_pip,
            my_contribution: my_pip,
            opp_contribution: opp_pip,
            my_bounty: Value::Two,
            big_blind,
            can_check: false,
            can_raise: true,
            raise_bounds: (4, STARTING_STACK),
        }
    }

    #[timed_test]
    fn pot_and_continue_cost() {
        let ctx = preflop_ctx(true, 2, 6);
        assert_eq!(ctx.pot(), 8);
        assert_eq!(ctx.continue_cost(), 4);
    }

    #[timed_test]
    fn continue_cost_saturates() {
        let ctx = preflop_ctx(true, 6, 2);
        assert_eq!(ctx.continue_cost(), 0);
    }

    #[timed_test]
    fn bb_sees_nothing_before_sb_acts() {
        let ctx = preflop_ctx(true, 2, 1);
        assert_eq!(ActionBucket::classify(&ctx, false), ActionBucket::Unobserved);
    }

    #[timed_test]
    fn bb_classifies_limp() {
        let ctx = preflop_ctx(true, 2, 2);
        assert_eq!(ActionBucket::classify(&ctx, false), ActionBucket::Limped);
    }

    #[timed_test]
    fn bb_classifies_open() {
        let ctx = preflop_ctx(true, 2, 5);
        assert_eq!(ActionBucket::classify(&ctx, false), ActionBucket::Opened);
    }

    #[timed_test]
    fn bb_classifies_four_bet() {
        let ctx = preflop_ctx(true, 14, 44);
        assert_eq!(ActionBucket::classify(&ctx, false), ActionBucket::FourBet);
    }

    #[timed_test]
    fn sb_classifies_three_bet() {
        // We opened (pip > small blind) and face a re-raise.
        let ctx = preflop_ctx(false, 5, 14);
        assert_eq!(ActionBucket::classify(&ctx, false), ActionBucket::ThreeBet);
    }

    #[timed_test]
    fn sb_before_acting_sees_nothing() {
        let ctx = preflop_ctx(false, 1, 2);
        assert_eq!(ActionBucket::classify(&ctx, false), ActionBucket::Unobserved);
    }

    #[timed_test]
    fn flop_arrival_in_single_raised_pot() {
        let mut ctx = preflop_ctx(false, 0, 0);
        ctx.street = 3;
        ctx.my_contribution = 5;
        ctx.opp_contribution = 5;
        assert_eq!(ActionBucket::classify(&ctx, true), ActionBucket::CalledOpen);
    }

    #[timed_test]
    fn flop_arrival_in_four_bet_pot() {
        let mut ctx = preflop_ctx(false, 0, 0);
        ctx.street = 3;
        ctx.my_contribution = 44;
        ctx.opp_contribution = 44;
        assert_eq!(
            ActionBucket::classify(&ctx, true),
            ActionBucket::CalledFourBet
        );
    }

    #[timed_test]
    fn mid_street_actions_are_unobserved_here() {
        let mut ctx = preflop_ctx(false, 0, 10);
        ctx.street = 4;
        assert_eq!(ActionBucket::classify(&ctx, true), ActionBucket::Unobserved);
        assert_eq!(ActionBucket::classify(&ctx, false), ActionBucket::Unobserved);
    }
}
