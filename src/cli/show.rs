//! `show` command: print part of the board.

use super::CliError;
use gridwar::GameState;
use gridwar::game::{render_board, render_region};
use gridwar::Vector;
use std::path::Path;

/// Execute the show command.
///
/// `region` holds `x1 y1 x2 y2`; without it the whole board is drawn.
///
/// # Errors
///
/// Returns an error if the save file cannot be loaded.
pub(crate) fn execute(path: &Path, region: Option<&[i32]>) -> Result<(), CliError> {
    let game = GameState::load(path)?;

    let text = match region {
        Some(&[x1, y1, x2, y2]) => render_region(&game, Vector::new(x1, y1), Vector::new(x2, y2)),
        Some(_) => return Err(CliError::new("show takes exactly four coordinates")),
        None => render_board(&game),
    };

    print!("{text}");
    Ok(())
}
