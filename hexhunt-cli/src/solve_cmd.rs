//! Solve command - collect every treasure on a board
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_layout(), build_config(), solve(), report_results()
//! - Level 3: (delegated to hexhunt-core Sequencer)
//! - Level 4: argument parsing, formatting utilities

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use hexhunt_core::{
    Board, BoardLayout, Coord, DedupMode, HeuristicKind, HuntReport, SearchConfig, Sequencer,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SolveArgs {
    /// Board layout JSON file (defaults to the classic board)
    #[arg(long, value_name = "FILE")]
    pub board: Option<PathBuf>,

    /// Start cell as ROW,COL (defaults to the layout's start)
    #[arg(long, value_parser = parse_coord)]
    pub start: Option<Coord>,

    /// Distance estimate for the search
    #[arg(long, value_enum, default_value = "manhattan")]
    pub heuristic: HeuristicArg,

    /// Compare gravity/speed bit for bit instead of rounding to 2 decimals
    #[arg(long)]
    pub exact: bool,

    /// Give up on a leg after this many expansions
    #[arg(long)]
    pub max_expansions: Option<usize>,

    /// Search the candidate legs of each round in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum HeuristicArg {
    Manhattan,
    Hex,
    Zero,
}

impl From<HeuristicArg> for HeuristicKind {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => HeuristicKind::Manhattan,
            HeuristicArg::Hex => HeuristicKind::HexDistance,
            HeuristicArg::Zero => HeuristicKind::Zero,
        }
    }
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run solve command
///
/// This function reads like a table of contents:
/// 1. Load the board layout
/// 2. Build the search configuration
/// 3. Run the hunt
/// 4. Report the route
pub fn run(args: SolveArgs) -> Result<()> {
    let layout = load_layout(args.board.as_deref())?;
    let board = layout
        .to_board()
        .with_context(|| format!("Invalid board layout: {}", layout.name))?;
    let start = args.start.unwrap_or(layout.start);
    let config = build_config(&args);

    tracing::info!(
        "Solving {} ({}x{}, {} treasures) from {}",
        layout.name,
        board.rows(),
        board.cols(),
        board.treasure_coordinates().len(),
        start
    );

    let report = solve(&board, start, config, !args.json)?;

    report_results(&layout, &board, &report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Load a layout file, or the classic board when none is given
pub(crate) fn load_layout(path: Option<&Path>) -> Result<BoardLayout> {
    match path {
        Some(path) => BoardLayout::load(path)
            .with_context(|| format!("Failed to load board layout: {}", path.display())),
        None => Ok(BoardLayout::classic()),
    }
}

/// Translate command arguments into a search configuration
fn build_config(args: &SolveArgs) -> SearchConfig {
    let mut config = SearchConfig::default()
        .with_heuristic(args.heuristic.into())
        .with_parallel(args.parallel);
    if args.exact {
        config = config.with_dedup(DedupMode::Exact);
    }
    if let Some(limit) = args.max_expansions {
        config = config.with_max_expansions(limit);
    }
    config
}

/// Run the hunt with a progress bar over treasures
fn solve(board: &Board, start: Coord, config: SearchConfig, show_progress: bool) -> Result<HuntReport> {
    let treasures = board.treasure_coordinates();
    let progress = if show_progress {
        ProgressBar::new(progress_length(&treasures, start))
    } else {
        ProgressBar::hidden()
    };
    progress.set_style(
        ProgressStyle::with_template("{bar:30} {pos}/{len} treasures {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let sequencer = Sequencer::new(board, config);
    let report = sequencer
        .run_with_callback(start, &treasures, |leg| {
            progress.inc(leg.collected.len() as u64);
            progress.set_message(format!("cost {:.2}", leg.cost));
        })
        .context("Hunt could not start")?;

    progress.finish_and_clear();
    Ok(report)
}

/// Report results as text or JSON
fn report_results(layout: &BoardLayout, board: &Board, report: &HuntReport, json: bool) -> Result<()> {
    if json {
        print_json_results(layout, report)
    } else {
        print_text_results(board, report);
        Ok(())
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Treasures the leg callback will report; one on the start cell is
/// collected before the first leg
fn progress_length(treasures: &BTreeSet<Coord>, start: Coord) -> u64 {
    treasures.iter().filter(|&&t| t != start).count() as u64
}

/// Parse "ROW,COL"
fn parse_coord(s: &str) -> Result<Coord, String> {
    let (row, col) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got {s:?}"))?;
    let row = row
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad row {row:?}: {e}"))?;
    let col = col
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("bad col {col:?}: {e}"))?;
    Ok(Coord::new(row, col))
}

/// Print results as JSON
fn print_json_results(layout: &BoardLayout, report: &HuntReport) -> Result<()> {
    #[derive(serde::Serialize)]
    struct JsonOutput<'a> {
        generated_at: String,
        board: &'a str,
        complete: bool,
        total_cost: f64,
        energy: f64,
        step_units: f64,
        report: &'a HuntReport,
    }

    let output = JsonOutput {
        generated_at: Utc::now().to_rfc3339(),
        board: &layout.name,
        complete: report.is_complete(),
        total_cost: report.total_cost,
        energy: report.trace.energy(),
        step_units: report.trace.step_units(),
        report,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Print results as text: step log, summary, board with route
fn print_text_results(board: &Board, report: &HuntReport) {
    println!("\n=== Route ===");
    println!("{:>4}  {:<9} {:<4} {:>9} {:>9}", "#", "cell", "kind", "energy", "steps");
    for (i, (step, (energy, units))) in report
        .trace
        .steps()
        .iter()
        .zip(report.trace.cumulative())
        .enumerate()
    {
        println!(
            "{:>4}  {:<9} {:<4} {:>9.3} {:>9.3}",
            i,
            step.coord.to_string(),
            step.kind.glyph(),
            energy,
            units
        );
    }

    println!("\n=== Summary ===");
    if report.is_complete() {
        println!("All {} treasures collected", report.collected.len());
    } else {
        println!(
            "Partial: {} collected, {} unreachable",
            report.collected.len(),
            report.unreachable.len()
        );
        for coord in &report.unreachable {
            println!("  unreachable: {}", coord);
        }
    }
    println!("Total cost:  {:.3}", report.total_cost);
    println!("Step units:  {:.3}", report.trace.step_units());
    println!("Moves:       {}", report.trace.move_count());

    println!();
    print!("{}", crate::show_cmd::render_board(board, &report.path()));
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> SolveArgs {
        SolveArgs {
            board: None,
            start: None,
            heuristic: HeuristicArg::Manhattan,
            exact: false,
            max_expansions: None,
            parallel: false,
            json: false,
        }
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("2,3"), Ok(Coord::new(2, 3)));
        assert_eq!(parse_coord(" 0 , 9 "), Ok(Coord::new(0, 9)));
        assert!(parse_coord("2;3").is_err());
        assert!(parse_coord("a,3").is_err());
    }

    #[test]
    fn test_progress_length_skips_start_treasure() {
        let board = Board::from_glyph_rows(&[vec!["$", " ", "$", "$"]]).unwrap();
        let treasures = board.treasure_coordinates();
        assert_eq!(progress_length(&treasures, Coord::new(0, 0)), 2);
        assert_eq!(progress_length(&treasures, Coord::new(0, 1)), 3);

        let report = solve(&board, Coord::new(0, 0), SearchConfig::default(), false).unwrap();
        let reported: usize = report.legs.iter().map(|leg| leg.collected.len()).sum();
        assert_eq!(reported as u64, progress_length(&treasures, Coord::new(0, 0)));
    }

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(&default_args());
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn test_build_config_flags() {
        let args = SolveArgs {
            heuristic: HeuristicArg::Zero,
            exact: true,
            max_expansions: Some(100),
            parallel: true,
            ..default_args()
        };
        let config = build_config(&args);
        assert_eq!(config.heuristic, HeuristicKind::Zero);
        assert_eq!(config.dedup, DedupMode::Exact);
        assert_eq!(config.max_expansions, Some(100));
        assert!(config.parallel);
    }

    #[test]
    fn test_load_layout_default_is_classic() {
        let layout = load_layout(None).unwrap();
        assert_eq!(layout.name, "classic");
    }

    #[test]
    fn test_load_layout_missing_file() {
        assert!(load_layout(Some(Path::new("/nonexistent/board.json"))).is_err());
    }

    #[test]
    fn test_solve_classic() {
        let layout = BoardLayout::classic();
        let board = layout.to_board().unwrap();
        let report = solve(&board, layout.start, SearchConfig::default(), false).unwrap();
        assert!(!report.collected.is_empty());
        assert!(report.trace.validate(&board).is_ok());
    }
}
