#![deny(clippy::all)]
#![warn(clippy::pedantic)]

//! Bounty Hold'em Decision Core
//!
//! The decision engine for heads-up no-limit hold'em with secret bounty
//! ranks: each player is privately assigned a card rank, and winning a pot
//! while that rank was among the winner's hole or board cards pays a
//! premium. The engine keeps Bayesian beliefs about the opponent's hole
//! cards and bounty rank, prices decisions with a bounty-adjusted calling
//! threshold, and mixes actions from static preflop tables and Monte Carlo
//! strength postflop.
//!
//! # Modules
//!
//! - `agent` - Per-match state machine driven by the harness
//! - `range` / `credence` - Opponent hole-card and bounty-rank beliefs
//! - `strength` - Monte Carlo and exact hand-strength estimation
//! - `pot_odds` - Bounty-adjusted calling thresholds
//! - `policy` / `tables` - Action selection and static preflop grids
//! - `bankroll` - End-game check-fold lock arithmetic

pub mod agent;
pub mod bankroll;
pub mod card_utils;
pub mod config;
pub mod credence;
pub mod error;
pub mod game;
pub mod poker;
pub mod policy;
pub mod pot_odds;
pub mod range;
pub mod strength;
pub mod tables;

pub use agent::AgentState;
pub use config::EngineConfig;
pub use error::EngineError;
pub use game::{RoundContext, StrategyDecision, TerminalContext};
pub use policy::Policy;
pub use tables::StaticTables;
