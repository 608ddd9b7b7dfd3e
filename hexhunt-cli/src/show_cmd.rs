//! Show command - print a board layout
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load (shared with solve), print_summary()
//! - Level 4: render_board()

use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use hexhunt_core::{Board, CellKind, Coord};

use crate::solve_cmd::load_layout;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct ShowArgs {
    /// Board layout JSON file (defaults to the classic board)
    #[arg(long, value_name = "FILE")]
    pub board: Option<PathBuf>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run show command
pub fn run(args: ShowArgs) -> Result<()> {
    let layout = load_layout(args.board.as_deref())?;
    let board = layout
        .to_board()
        .with_context(|| format!("Invalid board layout: {}", layout.name))?;

    println!("{} ({}x{}), start {}", layout.name, board.rows(), board.cols(), layout.start);
    print!("{}", render_board(&board, &[layout.start]));
    print_summary(&board);
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn print_summary(board: &Board) {
    let mut counts: Vec<(CellKind, usize)> = Vec::new();
    for (_, kind) in board.cells() {
        match counts.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, n)) => *n += 1,
            None => counts.push((kind, 1)),
        }
    }
    for (kind, n) in counts {
        if kind != CellKind::Empty {
            println!("  {:<4} {:<15} x{}", kind.glyph(), kind.describe(), n);
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Text grid of glyphs; empty cells on `marked` show as `*`.
/// Even columns are drawn half a line lower, as on the hex board.
pub(crate) fn render_board(board: &Board, marked: &[Coord]) -> String {
    let marked: HashSet<Coord> = marked.iter().copied().collect();
    let mut out = String::new();

    let _ = write!(out, "    ");
    for col in 0..board.cols() {
        let _ = write!(out, "{:^5}", col);
    }
    out.push('\n');

    // two text lines per board row: odd columns on the first, even on the second
    for row in 0..board.rows() {
        for half in [1, 0] {
            if half == 1 {
                let _ = write!(out, "{:>3} ", row);
            } else {
                out.push_str("    ");
            }
            for col in 0..board.cols() {
                if col % 2 != half {
                    out.push_str("     ");
                    continue;
                }
                let coord = Coord::new(row as i32, col as i32);
                let kind = board.cell_kind(coord).unwrap_or(CellKind::Obstacle);
                let glyph = if kind == CellKind::Empty && marked.contains(&coord) {
                    "*"
                } else {
                    kind.glyph()
                };
                let _ = write!(out, "{:^5}", glyph);
            }
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_marks_path() {
        let board = Board::from_glyph_rows(&[vec![" ", "$"]]).unwrap();
        let text = render_board(&board, &[Coord::new(0, 0)]);
        assert!(text.contains('*'));
        assert!(text.contains('$'));
        // header plus two lines per row
        assert_eq!(text.lines().count(), 3);
    }
}
