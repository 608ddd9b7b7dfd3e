//! Search configuration
//!
//! Level 4 - Utilities and configuration

use crate::board::Coord;
use serde::{Deserialize, Serialize};

/// How gravity and speed enter the visited-state signature
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DedupMode {
    /// Round both multipliers to `decimals` places. Bounds the state space,
    /// but can merge branches that differ only below that precision.
    Rounded { decimals: u32 },
    /// Compare multipliers bit for bit. Never merges distinct states; the
    /// visited set can grow without bound.
    Exact,
}

impl Default for DedupMode {
    fn default() -> Self {
        DedupMode::Rounded { decimals: 2 }
    }
}

impl DedupMode {
    /// Signature key for a multiplier
    pub fn key(self, value: f64) -> i64 {
        match self {
            DedupMode::Rounded { decimals } => {
                (value * 10f64.powi(decimals as i32)).round() as i64
            }
            DedupMode::Exact => value.to_bits() as i64,
        }
    }
}

/// Distance estimate used for the `h` term
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeuristicKind {
    /// `|Δrow| + |Δcol|` on offset coordinates
    #[default]
    Manhattan,
    /// Hex step distance
    HexDistance,
    /// Always zero: uniform-cost search
    Zero,
}

impl HeuristicKind {
    /// Estimate from `from` to `goal`.
    ///
    /// Only `Zero` is admissible. Offset Manhattan counts a diagonal step as
    /// two (SE out of an even column is one move, `h = 2`). A teleport covers
    /// three cells for one move, and a reward pushes the per-step cost below
    /// 1.0, so neither distance holds on such boards either. Results are
    /// near-optimal rather than guaranteed.
    pub fn estimate(self, from: Coord, goal: Coord) -> f64 {
        match self {
            HeuristicKind::Manhattan => from.manhattan_to(goal) as f64,
            HeuristicKind::HexDistance => from.hex_distance_to(goal) as f64,
            HeuristicKind::Zero => 0.0,
        }
    }
}

/// Configuration shared by every leg of a hunt
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Visited-state signature precision
    pub dedup: DedupMode,
    /// Heuristic for the `h` term
    pub heuristic: HeuristicKind,
    /// Stop a leg after this many expansions (None = unbounded)
    pub max_expansions: Option<usize>,
    /// Evaluate the candidate legs of a round on the rayon pool
    pub parallel: bool,
}

impl SearchConfig {
    /// Bit-exact signatures
    pub fn exact() -> Self {
        Self {
            dedup: DedupMode::Exact,
            ..Default::default()
        }
    }

    pub fn with_heuristic(mut self, heuristic: HeuristicKind) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupMode) -> Self {
        self.dedup = dedup;
        self
    }

    pub fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
