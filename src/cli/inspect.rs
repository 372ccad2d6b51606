//! `inspect` command: describe the units on one cell.

use super::output::format_cell;
use super::CliError;
use gridwar::{GameState, Vector};
use std::path::Path;

/// Execute the inspect command.
///
/// # Errors
///
/// Returns an error if the save file cannot be loaded.
pub(crate) fn execute(path: &Path, x: i32, y: i32) -> Result<(), CliError> {
    let game = GameState::load(path)?;
    print!("{}", format_cell(&game.inspect(Vector::new(x, y))));
    Ok(())
}
