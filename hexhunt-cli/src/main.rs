//! HEXHUNT CLI - Command-line interface
//!
//! Commands:
//! - solve: Collect every treasure on a board and print the route
//! - show: Print a board layout
//! - random: Generate a random board layout

mod random_cmd;
mod show_cmd;
mod solve_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hexhunt")]
#[command(about = "HEXHUNT treasure hunt path search")]
struct Cli {
    /// Random seed for reproducible runs
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log every candidate leg
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect every treasure on a board
    Solve(solve_cmd::SolveArgs),
    /// Print a board layout
    Show(show_cmd::ShowArgs),
    /// Generate a random board layout
    Random(random_cmd::RandomArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Solve(args) => solve_cmd::run(args),
        Commands::Show(args) => show_cmd::run(args),
        Commands::Random(args) => random_cmd::run(args, cli.seed),
    }
}

/// Logs go to stderr so `--json` output stays clean
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
