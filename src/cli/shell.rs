//! Interactive game shell.
//!
//! Reads one command per line, parses it with clap and drives the engine.
//! The shell owns the unit selection and the save path; everything else
//! lives in [`GameState`].

use super::output::{format_cell, format_report, format_status};
use super::CliError;
use clap::{Parser, Subcommand};
use gridwar::game::render_region;
use gridwar::{Action, GameState, UnitId, Vector};
use std::io::{BufRead, Write};
use std::path::PathBuf;

/// One line of shell input.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

/// Shell commands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
enum ShellCommand {
    /// Select the unit at a cell (index picks from a stack)
    #[command(allow_negative_numbers = true)]
    Select {
        /// Column
        x: i32,
        /// Row
        y: i32,
        /// Position in the cell's stack
        #[arg(default_value_t = 0)]
        index: usize,
    },

    /// Clear the selection
    Deselect,

    /// Queue a spawn from the selected headquarters
    Spawn {
        /// Unit type name (infantry, vehicle)
        unit_type: String,
    },

    /// Queue a move of the selected unit
    #[command(allow_negative_numbers = true)]
    Move {
        /// Column offset (-1..=1)
        dx: i32,
        /// Row offset (-1..=1)
        dy: i32,
    },

    /// Queue an attack by the selected unit
    Attack {
        /// Id of the unit to attack
        target: UnitId,
    },

    /// Show the current player and pending actions
    Status,

    /// Drop the last queued action
    Undo,

    /// Apply all queued actions and pass the turn
    Commit,

    /// Draw a rectangle of the board
    #[command(allow_negative_numbers = true)]
    Show {
        /// First corner column
        x1: i32,
        /// First corner row
        y1: i32,
        /// Second corner column
        x2: i32,
        /// Second corner row
        y2: i32,
    },

    /// Describe the units on a cell
    #[command(allow_negative_numbers = true)]
    Inspect {
        /// Column
        x: i32,
        /// Row
        y: i32,
    },

    /// Save the game (to the loaded file unless another is given)
    Save {
        /// Target file
        file: Option<PathBuf>,
    },

    /// Leave the shell without saving
    Exit,
}

/// Whether the read loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Interactive session over one game.
#[derive(Debug)]
pub(crate) struct Shell {
    game: GameState,
    path: PathBuf,
    selected: Option<UnitId>,
}

impl Shell {
    /// Create a shell for a loaded game.
    pub(crate) fn new(game: GameState, path: PathBuf) -> Self {
        Self {
            game,
            path,
            selected: None,
        }
    }

    /// Run until `exit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails.
    pub(crate) fn run<R: BufRead, W: Write>(
        &mut self,
        input: R,
        output: &mut W,
    ) -> Result<(), CliError> {
        let mut lines = input.lines();

        loop {
            write!(output, "Game[{}]> ", self.game.current_player())?;
            output.flush()?;

            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let line = line?;

            let words: Vec<&str> = line.split_whitespace().collect();
            if words.is_empty() {
                continue;
            }

            let command = match ShellLine::try_parse_from(words) {
                Ok(parsed) => parsed.command,
                Err(e) => {
                    write!(output, "{e}")?;
                    continue;
                }
            };

            if self.execute(command, output)? == Flow::Exit {
                break;
            }
        }

        Ok(())
    }

    fn execute<W: Write>(
        &mut self,
        command: ShellCommand,
        output: &mut W,
    ) -> Result<Flow, CliError> {
        match command {
            ShellCommand::Select { x, y, index } => {
                let pos = Vector::new(x, y);
                let found = self
                    .game
                    .unit_at(pos, index)
                    .and_then(|id| self.game.unit(id).map(|unit| (id, unit.to_string())));
                match found {
                    Some((id, text)) => {
                        self.selected = Some(id);
                        writeln!(output, "Selected unit {id}: {text}")?;
                    }
                    None => writeln!(output, "No unit at {pos} index {index}")?,
                }
            }
            ShellCommand::Deselect => {
                self.selected = None;
                writeln!(output, "Selection cleared")?;
            }
            ShellCommand::Spawn { unit_type } => {
                self.queue(output, |id| Action::spawn(id, unit_type))?;
            }
            ShellCommand::Move { dx, dy } => {
                self.queue(output, |id| Action::move_by(id, Vector::new(dx, dy)))?;
            }
            ShellCommand::Attack { target } => {
                self.queue(output, |id| Action::attack(id, target))?;
            }
            ShellCommand::Status => write!(output, "{}", format_status(&self.game))?,
            ShellCommand::Undo => {
                if self.game.undo_last() {
                    writeln!(output, "Removed last action")?;
                } else {
                    writeln!(output, "Nothing to undo")?;
                }
            }
            ShellCommand::Commit => {
                let report = self.game.commit();
                self.selected = None;
                write!(output, "{}", format_report(&report))?;
                writeln!(output, "Player {} to move", self.game.current_player())?;
            }
            ShellCommand::Show { x1, y1, x2, y2 } => {
                let text = render_region(&self.game, Vector::new(x1, y1), Vector::new(x2, y2));
                write!(output, "{text}")?;
            }
            ShellCommand::Inspect { x, y } => {
                write!(output, "{}", format_cell(&self.game.inspect(Vector::new(x, y))))?;
            }
            ShellCommand::Save { file } => {
                if let Some(file) = file {
                    self.path = file;
                }
                match self.game.save(&self.path) {
                    Ok(()) => writeln!(output, "Saved to {}", self.path.display())?,
                    Err(e) => writeln!(output, "Save failed: {e}")?,
                }
            }
            ShellCommand::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Build an action for the selected unit and queue it.
    fn queue<W: Write>(
        &mut self,
        output: &mut W,
        build: impl FnOnce(UnitId) -> Action,
    ) -> Result<(), CliError> {
        let Some(id) = self.selected else {
            writeln!(output, "No unit selected")?;
            return Ok(());
        };

        let action = build(id);
        let text = action.to_string();
        match self.game.enqueue(action) {
            Ok(()) => writeln!(output, "Queued: {text}")?,
            Err(e) => writeln!(output, "Rejected: {e}")?,
        }
        Ok(())
    }
}
