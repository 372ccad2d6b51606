//! Gridwar CLI - create, play and view saved games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

mod cli;

use clap::{Parser, Subcommand};
use gridwar::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use gridwar::GameConfig;
use std::path::PathBuf;
use std::process::ExitCode;

/// Gridwar - a turn-based grid strategy game
#[derive(Parser, Debug)]
#[command(name = "gridwar")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create a new game and write it to a save file
    New {
        /// Save file to create (must not exist)
        #[arg(required = true)]
        file: PathBuf,

        /// Number of players (2 or 4; other values are rounded)
        #[arg(short, long, default_value = "2")]
        players: usize,

        /// Board width
        #[arg(long, default_value_t = DEFAULT_WIDTH)]
        width: u16,

        /// Board height
        #[arg(long, default_value_t = DEFAULT_HEIGHT)]
        height: u16,

        /// Random seed for colors and spawn placement (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Open an interactive shell on a saved game
    Play {
        /// Save file to load
        #[arg(required = true)]
        file: PathBuf,

        /// Random seed for spawn placement (default: random)
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// Print the board, or the rectangle between two corners
    #[command(allow_negative_numbers = true)]
    Show {
        /// Save file to load
        #[arg(required = true)]
        file: PathBuf,

        /// Corners as X1 Y1 X2 Y2
        #[arg(num_args = 4, value_names = ["X1", "Y1", "X2", "Y2"])]
        region: Option<Vec<i32>>,
    },

    /// Describe the units standing on a cell
    #[command(allow_negative_numbers = true)]
    Inspect {
        /// Save file to load
        #[arg(required = true)]
        file: PathBuf,

        /// Column
        x: i32,

        /// Row
        y: i32,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let result = match args.command {
        Commands::New {
            file,
            players,
            width,
            height,
            seed,
        } => {
            let config = GameConfig {
                players,
                width,
                height,
                seed,
            };
            cli::new::execute(&file, &config)
        }

        Commands::Play { file, seed } => cli::play::execute(file, seed),

        Commands::Show { file, region } => cli::show::execute(&file, region.as_deref()),

        Commands::Inspect { file, x, y } => cli::inspect::execute(&file, x, y),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
