//! Command-line interface for counting and indexing the perfect mazes on a rectangular grid.

use std::process::ExitCode;

use clap::Parser;
use mazing_engine::{BigInt, MazeError, count, maze_by_index};

mod render;

/// Exit code for malformed invocations and out-of-range indices (EX_USAGE).
const USAGE_EXIT: u8 = 64;

// CLI
// ================================================================================================

/// Count the perfect mazes on a grid, or print the maze at a given rank
#[derive(Debug, Parser)]
#[command(name = "mazing", version, about)]
struct Cli {
    /// Grid width in cells
    width: usize,

    /// Grid height in cells
    height: usize,

    /// Rank of the maze to print; omit to print the number of mazes instead
    index: Option<BigInt>,
}

impl Cli {
    fn execute(&self) -> Result<(), MazeError> {
        match &self.index {
            None => print_count(self.width, self.height),
            Some(index) => print_maze(self.width, self.height, index),
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // clap renders its own usage, help, and version output
            let printed_to_stderr = err.use_stderr();
            let _ = err.print();
            return if printed_to_stderr {
                ExitCode::from(USAGE_EXIT)
            } else {
                ExitCode::SUCCESS
            };
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(USAGE_EXIT)
        },
    }
}

// COMMANDS
// ================================================================================================

/// Prints the number of mazes on the grid, along with how compactly a rank encodes one compared
/// to a bit per grid edge.
fn print_count(width: usize, height: usize) -> Result<(), MazeError> {
    let total = count(width, height)?;

    let naive_bits = (width - 1) * height + width * (height - 1);
    if naive_bits == 0 {
        println!("There are {total} different mazes on a {width}x{height} grid.");
        return Ok(());
    }

    let optimal_bits = total.bits();
    let saving = 100.0 * (1.0 - optimal_bits as f64 / naive_bits as f64);
    println!(
        "There are {total} different mazes on a {width}x{height} grid. \
         That's a {optimal_bits}-bit number, compared with {naive_bits} bits for a naive \
         packing, a saving of {saving:.2}%."
    );
    Ok(())
}

/// Prints the maze at the given rank as ASCII art.
fn print_maze(width: usize, height: usize, index: &BigInt) -> Result<(), MazeError> {
    let maze = maze_by_index(width, height, index)?;
    print!("{}", render::render(&maze));
    Ok(())
}
