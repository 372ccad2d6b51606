//! Error types for the gridwar engine.
//!
//! Three families, matching how far a failure can reach:
//! - [`ValidationError`]: an action was rejected at enqueue time. Always recoverable.
//! - [`ConsistencyFault`]: the grid and the unit map disagree. An engine bug.
//! - [`PersistenceError`]: a save or load could not be completed.

use std::fmt;
use std::io;

use crate::game::{Capability, UnitId, Vector};

/// Reason an action was refused by [`GameState::enqueue`](crate::GameState::enqueue).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The referenced unit does not exist.
    UnknownUnit(UnitId),
    /// The acting unit belongs to someone other than the current player.
    NotOwned {
        /// The acting unit.
        unit: UnitId,
        /// Index of the player whose turn it is.
        player: usize,
    },
    /// The acting unit lacks the capability the action needs.
    MissingCapability {
        /// The acting unit.
        unit: UnitId,
        /// The capability that was required.
        capability: Capability,
    },
    /// The factory cannot build the requested unit type.
    CannotCreate {
        /// The factory unit.
        unit: UnitId,
        /// Requested unit type name.
        unit_type: String,
    },
    /// A move delta component lies outside `[-1, 1]`.
    DeltaOutOfRange(Vector),
    /// The resulting position would leave the board.
    OutOfBounds(Vector),
    /// The attack target cannot take damage.
    TargetNotBattle(UnitId),
    /// The attack target is farther than one cell away.
    NotAdjacent {
        /// The attacking unit.
        unit: UnitId,
        /// The target unit.
        target: UnitId,
        /// Chebyshev distance between them.
        distance: i32,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnknownUnit(id) => write!(f, "unit {id} does not exist"),
            ValidationError::NotOwned { unit, player } => {
                write!(f, "unit {unit} does not belong to player {player}")
            }
            ValidationError::MissingCapability { unit, capability } => {
                write!(f, "unit {unit} is not {capability}")
            }
            ValidationError::CannotCreate { unit, unit_type } => {
                write!(f, "unit {unit} cannot create units of class \"{unit_type}\"")
            }
            ValidationError::DeltaOutOfRange(delta) => {
                write!(f, "move delta {delta} must lie in [-1, 1] on both axes")
            }
            ValidationError::OutOfBounds(pos) => write!(f, "position {pos} is off the board"),
            ValidationError::TargetNotBattle(id) => write!(f, "unit {id} cannot be attacked"),
            ValidationError::NotAdjacent {
                unit,
                target,
                distance,
            } => write!(
                f,
                "unit {target} is {distance} cells away from unit {unit} (must be adjacent)"
            ),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Grid occupancy and unit positions have gone out of sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsistencyFault {
    /// The unit that was expected in the cell.
    pub unit: UnitId,
    /// The cell that was searched.
    pub position: Vector,
}

impl fmt::Display for ConsistencyFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "consistency fault: unit {} is not listed in cell {}",
            self.unit, self.position
        )
    }
}

impl std::error::Error for ConsistencyFault {}

/// Failure to save or load a game.
#[derive(Debug)]
pub enum PersistenceError {
    /// Underlying file operation failed.
    Io(io::Error),
    /// The document is not valid JSON for the save format.
    Json(serde_json::Error),
    /// A headquarters lists a unit type missing from the catalog.
    UnknownUnitType(String),
    /// The document parsed but describes an impossible state.
    Malformed(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io(e) => write!(f, "I/O error: {e}"),
            PersistenceError::Json(e) => write!(f, "invalid save file: {e}"),
            PersistenceError::UnknownUnitType(name) => {
                write!(f, "unknown unit type \"{name}\" in save file")
            }
            PersistenceError::Malformed(reason) => write!(f, "malformed save file: {reason}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io(e) => Some(e),
            PersistenceError::Json(e) => Some(e),
            PersistenceError::UnknownUnitType(_) | PersistenceError::Malformed(_) => None,
        }
    }
}

impl From<io::Error> for PersistenceError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

/// Result type for enqueue operations.
pub type ValidationResult<T> = Result<T, ValidationError>;
