//! HEXHUNT Core - Treasure hunt path search on a hex grid
//!
//! This crate provides the search engine:
//! - Board model (offset hex coordinates, cell kinds)
//! - Hex topology with parity-dependent moves and the teleport table
//! - Extended-state best-first search for a single leg
//! - Greedy multi-goal sequencing over every treasure
//! - Per-step traces for replaying a hunt

pub mod board;
pub mod topology;
pub mod config;
pub mod trace;
pub mod search;
pub mod sequencer;
pub mod layout;

// Re-exports for convenient access
pub use board::{Board, BoardError, CellKind, Coord, CELL_KINDS};
pub use topology::{neighbors, teleport_destination, Direction, DIRECTIONS};
pub use config::{DedupMode, HeuristicKind, SearchConfig};
pub use trace::{Arrival, Multipliers, Step, Trace, TraceViolation};
pub use search::{find_path, BranchState, Leg, LegSearch, SearchOutcome, SearchStats};
pub use sequencer::{HuntError, HuntReport, LegSummary, Sequencer};
pub use layout::{BoardLayout, RandomMix};
