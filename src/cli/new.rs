//! `new` command: create a save file for a fresh game.

use super::CliError;
use gridwar::{GameConfig, GameState};
use std::path::Path;

/// Execute the new command.
///
/// # Errors
///
/// Returns an error if the file already exists or cannot be written.
pub(crate) fn execute(path: &Path, config: &GameConfig) -> Result<(), CliError> {
    if path.exists() {
        return Err(CliError::new(format!(
            "{} already exists; refusing to overwrite",
            path.display()
        )));
    }

    let game = GameState::new(config);
    game.save(path)?;

    println!(
        "Created {}x{} game for {} players: {}",
        game.width(),
        game.height(),
        game.players().len(),
        path.display()
    );
    Ok(())
}
