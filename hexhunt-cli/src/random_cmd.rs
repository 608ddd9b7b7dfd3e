//! Random command - generate a random board layout
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: generate_layout(), save_layout()
//! - Level 4: RNG setup

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use hexhunt_core::{BoardLayout, RandomMix};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct RandomArgs {
    /// Board rows
    #[arg(long, default_value = "6")]
    pub rows: usize,

    /// Board columns
    #[arg(long, default_value = "10")]
    pub cols: usize,

    /// Number of treasures
    #[arg(long, default_value = "4")]
    pub treasures: usize,

    /// Obstacle probability per cell (0.0-1.0)
    #[arg(long, default_value = "0.15")]
    pub obstacles: f64,

    /// Trap probability per cell (0.0-1.0)
    #[arg(long, default_value = "0.08")]
    pub traps: f64,

    /// Reward probability per cell (0.0-1.0)
    #[arg(long, default_value = "0.05")]
    pub rewards: f64,

    /// Output file
    #[arg(long, default_value = "board.json")]
    pub output: PathBuf,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run random command
pub fn run(args: RandomArgs, seed: Option<u64>) -> Result<()> {
    if args.rows == 0 || args.cols == 0 {
        anyhow::bail!("Board must have at least one row and one column");
    }

    let layout = generate_layout(&args, seed);
    layout
        .save(&args.output)
        .with_context(|| format!("Failed to write layout: {}", args.output.display()))?;

    tracing::info!(
        "Wrote {} ({}x{}) to {}",
        layout.name,
        args.rows,
        args.cols,
        args.output.display()
    );
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn generate_layout(args: &RandomArgs, seed: Option<u64>) -> BoardLayout {
    let mix = RandomMix {
        obstacle: args.obstacles,
        trap: args.traps,
        reward: args.rewards,
        treasures: args.treasures,
    };
    let mut rng = create_rng(seed);
    let name = match seed {
        Some(s) => format!("random-{s}"),
        None => "random".to_string(),
    };
    BoardLayout::random(&mut rng, &name, args.rows, args.cols, mix)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RandomArgs {
        RandomArgs {
            rows: 4,
            cols: 5,
            treasures: 3,
            obstacles: 0.1,
            traps: 0.1,
            rewards: 0.1,
            output: PathBuf::from("unused.json"),
        }
    }

    #[test]
    fn test_seeded_layout_matches_core() {
        let layout = generate_layout(&args(), Some(11));
        let mix = RandomMix {
            obstacle: 0.1,
            trap: 0.1,
            reward: 0.1,
            treasures: 3,
        };
        assert_eq!(layout, BoardLayout::seeded(11, 4, 5, mix));
        assert_eq!(layout.to_board().unwrap().treasure_coordinates().len(), 3);
    }

    #[test]
    fn test_create_rng_deterministic() {
        let mut rng1 = create_rng(Some(42));
        let mut rng2 = create_rng(Some(42));

        use rand::Rng;
        assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
    }
}
