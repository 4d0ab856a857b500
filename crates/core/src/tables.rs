//! Static preflop strategy tables.
//!
//! Preflop play is table-driven: for each betting scenario a 13x13 grid of
//! canonical hands carries the frequency with which that hand continues
//! aggressively. Grids are authored as range strings in TOML and expanded
//! at load time. Each scenario carries a second grid used when one of the
//! hero's hole cards matches its own bounty rank.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rs_poker::holdem::RangeParser;
use serde::Deserialize;
use thiserror::Error;

use crate::poker::{Card, NUM_VALUES, value_index};

/// Canonical 13x13 hand grid, indexed by rank (Two = 0, ..., Ace = 12).
/// Pairs and offsuit hands live at `[high][low]`, suited hands at the
/// mirrored `[low][high]`.
pub type Grid13 = [[f64; NUM_VALUES]; NUM_VALUES];

/// The preflop betting scenarios with a dedicated grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Opening,
    CallVsOpen,
    ThreeBetVsOpen,
    CallVsThreeBet,
    FourBetVsThreeBet,
    CallVsFourBet,
    FiveBetVsFourBet,
    RaiseVsLimp,
}

impl Scenario {
    pub const ALL: [Self; 8] = [
        Self::Opening,
        Self::CallVsOpen,
        Self::ThreeBetVsOpen,
        Self::CallVsThreeBet,
        Self::FourBetVsThreeBet,
        Self::CallVsFourBet,
        Self::FiveBetVsFourBet,
        Self::RaiseVsLimp,
    ];

    /// TOML key for this scenario.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::CallVsOpen => "call_vs_open",
            Self::ThreeBetVsOpen => "three_bet_vs_open",
            Self::CallVsThreeBet => "call_vs_three_bet",
            Self::FourBetVsThreeBet => "four_bet_vs_three_bet",
            Self::CallVsFourBet => "call_vs_four_bet",
            Self::FiveBetVsFourBet => "five_bet_vs_four_bet",
            Self::RaiseVsLimp => "raise_vs_limp",
        }
    }
}

/// Grid cell for a concrete two-card holding.
#[must_use]
pub fn grid_cell(hole: [Card; 2]) -> (usize, usize) {
    let (ra, rb) = (value_index(hole[0].value), value_index(hole[1].value));
    let (hi, lo) = (ra.max(rb), ra.min(rb));
    if ra != rb && hole[0].suit == hole[1].suit {
        (lo, hi)
    } else {
        (hi, lo)
    }
}

/// A scenario's frequencies, split by whether the hero holds its bounty.
#[derive(Debug, Clone)]
pub struct RangeGrid {
    plain: Grid13,
    bounty: Grid13,
}

impl RangeGrid {
    /// Frequency for a concrete holding.
    #[must_use]
    pub fn lookup(&self, hole: [Card; 2], holds_bounty: bool) -> f64 {
        let (row, col) = grid_cell(hole);
        if holds_bounty {
            self.bounty[row][col]
        } else {
            self.plain[row][col]
        }
    }

    /// The grid for hands without the bounty rank, as a likelihood source.
    #[must_use]
    pub fn plain(&self) -> &Grid13 {
        &self.plain
    }
}

/// All eight scenario grids, loaded once at startup.
#[derive(Debug, Clone)]
pub struct StaticTables {
    grids: [RangeGrid; 8],
}

#[derive(Debug, Deserialize)]
struct RawTables {
    scenarios: HashMap<String, RawScenario>,
}

#[derive(Debug, Deserialize)]
struct RawScenario {
    range: String,
    frequency: f64,
    bounty_range: Option<String>,
    bounty_frequency: Option<f64>,
}

impl StaticTables {
    /// The tables shipped with the engine.
    ///
    /// # Errors
    ///
    /// Only on a malformed bundled asset, which is a packaging defect.
    pub fn baseline() -> Result<Self, TableError> {
        Self::from_toml(include_str!("../../../tables/baseline.toml"))
    }

    /// Load tables from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed, a scenario
    /// is missing, a range string is invalid, or a frequency is out of
    /// `[0, 1]`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, TableError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| TableError::Io(path.to_path_buf(), e))?;
        Self::from_toml(&content)
    }

    /// Parse tables from a TOML string.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`StaticTables::load`], minus IO.
    pub fn from_toml(content: &str) -> Result<Self, TableError> {
        let raw: RawTables = toml::from_str(content)?;

        let mut grids = Vec::with_capacity(Scenario::ALL.len());
        for scenario in Scenario::ALL {
            let entry = raw
                .scenarios
                .get(scenario.key())
                .ok_or(TableError::MissingScenario(scenario.key()))?;

            let plain = build_grid(&entry.range, entry.frequency)?;
            let bounty = match &entry.bounty_range {
                Some(range) => {
                    build_grid(range, entry.bounty_frequency.unwrap_or(entry.frequency))?
                }
                None => plain,
            };
            grids.push(RangeGrid { plain, bounty });
        }

        // Length is Scenario::ALL.len() by construction.
        let grids: [RangeGrid; 8] = grids
            .try_into()
            .map_err(|_| TableError::MissingScenario("scenario count"))?;
        Ok(Self { grids })
    }

    /// The grid for a scenario.
    #[must_use]
    pub fn grid(&self, scenario: Scenario) -> &RangeGrid {
        &self.grids[scenario as usize]
    }
}

fn build_grid(range_str: &str, frequency: f64) -> Result<Grid13, TableError> {
    if !(0.0..=1.0).contains(&frequency) {
        return Err(TableError::InvalidFrequency(frequency));
    }

    let hands = RangeParser::parse_many(range_str)
        .map_err(|e| TableError::InvalidRange(format!("{range_str}: {e}")))?;

    let mut grid = [[0.0; NUM_VALUES]; NUM_VALUES];
    for hand in &hands {
        let cards: Vec<_> = hand.iter().collect();
        if cards.len() >= 2 {
            let (row, col) = grid_cell([*cards[0], *cards[1]]);
            grid[row][col] = frequency;
        }
    }
    Ok(grid)
}

/// Errors from loading or validating the strategy tables.
#[derive(Debug, Error)]
pub enum TableError {
    /// IO error reading the tables file.
    #[error("failed to read tables file {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse tables TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required scenario key was absent.
    #[error("missing scenario table: {0}")]
    MissingScenario(&'static str),

    /// A range string did not parse.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A frequency was outside [0, 1].
    #[error("invalid frequency: {0} (must be in [0, 1])")]
    InvalidFrequency(f64),
}
