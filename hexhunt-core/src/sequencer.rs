//! Multi-goal sequencing
//!
//! Greedy ordering: every round searches a leg to each outstanding treasure
//! from the current position and commits to the cheapest one. This does not
//! explore visiting orders, so the total is not guaranteed to be optimal.
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: Sequencer::run_with_callback (orchestration)
//! - Level 2: evaluate_round, commit_leg (phases)
//! - Level 3: LegSearch::run (delegated to search)
//! - Level 4: report types

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Coord};
use crate::config::SearchConfig;
use crate::search::{BranchState, Leg, LegSearch, SearchOutcome, SearchStats};
use crate::trace::{Multipliers, Step, Trace};

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HuntError {
    #[error("start {0} is not a traversable cell")]
    InvalidStart(Coord),
}

/// One committed leg
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegSummary {
    /// Round number, from 1
    pub round: usize,
    pub from: Coord,
    pub target: Coord,
    pub cost: f64,
    /// Elementary moves in the leg
    pub moves: usize,
    /// Treasures collected during the leg, in walking order
    pub collected: Vec<Coord>,
    /// Candidates searched this round
    pub candidates: usize,
    /// Candidates with no path this round
    pub failed: usize,
    /// Totals over every candidate search of the round
    pub stats: SearchStats,
}

/// Outcome of a complete hunt
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HuntReport {
    pub start: Coord,
    pub trace: Trace,
    /// Sum of committed leg costs
    pub total_cost: f64,
    /// Treasures in the order they were picked up
    pub collected: Vec<Coord>,
    /// Treasures no leg could reach
    pub unreachable: BTreeSet<Coord>,
    pub legs: Vec<LegSummary>,
    /// Multipliers after the last committed leg
    pub final_multipliers: Multipliers,
}

impl HuntReport {
    /// Every requested treasure was collected
    pub fn is_complete(&self) -> bool {
        self.unreachable.is_empty()
    }

    pub fn path(&self) -> Vec<Coord> {
        self.trace.coords()
    }
}

// ============================================================================
// SEQUENCER
// ============================================================================

/// Drives repeated leg searches until every treasure is collected or none
/// is reachable
pub struct Sequencer<'a> {
    board: &'a Board,
    config: SearchConfig,
}

impl<'a> Sequencer<'a> {
    pub fn new(board: &'a Board, config: SearchConfig) -> Self {
        Self { board, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Collect every treasure on the board starting from `start`
    pub fn run_board(&self, start: Coord) -> Result<HuntReport, HuntError> {
        self.run(start, &self.board.treasure_coordinates())
    }

    pub fn run(&self, start: Coord, treasures: &BTreeSet<Coord>) -> Result<HuntReport, HuntError> {
        self.run_with_callback(start, treasures, |_| {})
    }

    // ========================================================================
    // LEVEL 1 - ORCHESTRATION
    // ========================================================================

    /// Run the greedy loop, reporting each committed leg to `on_leg`
    ///
    /// This function reads like a table of contents:
    /// 1. Validate the start and collect a treasure sitting on it
    /// 2. Search every outstanding treasure from the current position
    /// 3. Commit the cheapest leg, or stop when none succeeded
    pub fn run_with_callback<F>(
        &self,
        start: Coord,
        treasures: &BTreeSet<Coord>,
        mut on_leg: F,
    ) -> Result<HuntReport, HuntError>
    where
        F: FnMut(&LegSummary),
    {
        let start_kind = match self.board.cell_kind(start) {
            Ok(kind) if self.board.is_traversable(start) => kind,
            _ => return Err(HuntError::InvalidStart(start)),
        };

        let mut state = BranchState::new(self.board, treasures.clone());
        let mut report = HuntReport {
            start,
            trace: Trace::new(vec![Step::start(start, start_kind, state.multipliers)]),
            total_cost: 0.0,
            collected: Vec::new(),
            unreachable: BTreeSet::new(),
            legs: Vec::new(),
            final_multipliers: state.multipliers,
        };

        if state.remaining.remove(&start) {
            report.collected.push(start);
        }

        let mut position = start;
        let mut round = 0;

        while !state.remaining.is_empty() {
            round += 1;
            let outcomes = self.evaluate_round(position, &state);
            let candidates = outcomes.len();
            let failed = outcomes.iter().filter(|(_, o)| !o.is_found()).count();
            let mut stats = SearchStats::default();
            for (_, outcome) in &outcomes {
                stats.merge(&outcome.stats);
            }

            let Some(leg) = pick_cheapest(outcomes) else {
                tracing::warn!(
                    "No remaining treasure reachable from {} ({} left)",
                    position,
                    state.remaining.len()
                );
                report.unreachable = state.remaining.clone();
                break;
            };

            let summary = commit_leg(&mut report, &mut state, leg, round, candidates, failed, stats);
            tracing::info!(
                "Leg {}: {} -> {} cost {:.3} ({} moves, {} candidates)",
                summary.round,
                summary.from,
                summary.target,
                summary.cost,
                summary.moves,
                summary.candidates
            );
            on_leg(&summary);
            position = summary.target;
            report.legs.push(summary);
        }

        report.final_multipliers = state.multipliers;
        Ok(report)
    }

    // ========================================================================
    // LEVEL 2 - PHASES
    // ========================================================================

    /// One leg search per outstanding treasure, all from the same state
    fn evaluate_round(&self, position: Coord, state: &BranchState) -> Vec<(Coord, SearchOutcome)> {
        let search = LegSearch::new(self.board, &self.config);
        let goals: Vec<Coord> = state.remaining.iter().copied().collect();

        let run_one = |&goal: &Coord| {
            let outcome = search.run(position, goal, state);
            tracing::debug!(
                "Candidate {} -> {}: {:?} ({} expanded)",
                position,
                goal,
                outcome.cost(),
                outcome.stats.expanded
            );
            (goal, outcome)
        };

        if self.config.parallel {
            goals.par_iter().map(run_one).collect()
        } else {
            goals.iter().map(run_one).collect()
        }
    }
}

/// Lowest cost wins; ties go to the smallest goal coordinate, since
/// `outcomes` is in ascending goal order and `min_by` keeps the first minimum
fn pick_cheapest(outcomes: Vec<(Coord, SearchOutcome)>) -> Option<Leg> {
    outcomes
        .into_iter()
        .filter_map(|(_, outcome)| outcome.leg)
        .min_by(|a, b| a.cost.total_cmp(&b.cost))
}

/// Append `leg` to the report and carry its end state forward
fn commit_leg(
    report: &mut HuntReport,
    state: &mut BranchState,
    leg: Leg,
    round: usize,
    candidates: usize,
    failed: usize,
    stats: SearchStats,
) -> LegSummary {
    let mut collected = Vec::new();
    for step in &leg.steps {
        if state.remaining.contains(&step.coord) && !collected.contains(&step.coord) {
            collected.push(step.coord);
        }
    }

    report.trace.extend_leg(&leg.steps);
    report.total_cost += leg.cost;
    report.collected.extend(collected.iter().copied());

    *state = leg.end_state;
    state.remaining.remove(&leg.goal);

    LegSummary {
        round,
        from: leg.start,
        target: leg.goal,
        cost: leg.cost,
        moves: Trace::new(leg.steps).move_count(),
        collected,
        candidates,
        failed,
        stats,
    }
}

// ============================================================================
// TESTS
// ============================================================================
