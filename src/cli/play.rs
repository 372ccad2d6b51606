//! `play` command: interactive shell over a save file.

use super::shell::Shell;
use super::CliError;
use gridwar::GameState;
use std::io;
use std::path::PathBuf;

/// Execute the play command.
///
/// # Errors
///
/// Returns an error if the save file cannot be loaded or the terminal fails.
pub(crate) fn execute(path: PathBuf, seed: Option<u64>) -> Result<(), CliError> {
    let mut game = GameState::load(&path)?;
    game.reseed(seed);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    Shell::new(game, path).run(stdin.lock(), &mut stdout)
}
