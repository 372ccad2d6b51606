//! Game layer for Gridwar.
//!
//! Implements the rules of the simulation:
//! - Grid of cells, each holding a stack of unit ids
//! - Units described by kind, with capabilities derived from it
//! - Headquarters that manufacture owner-colored units
//! - Action queue with validation on entry and FIFO commit
//! - Combat resolution and turn rotation

mod action;
mod combat;
mod grid;
pub mod invariants;
mod player;
mod render;
mod state;
mod unit;
mod vector;

pub use action::{Action, ActionKind};
pub use combat::{process_attack, CombatResult};
pub use grid::Grid;
pub use invariants::{assert_invariants, check_invariants, InvariantViolation};
pub use player::{Player, PlayerRegistry, STARTING_MONEY};
pub use render::{render_board, render_region};
pub use state::{ActionOutcome, CommitReport, GameState, UnitSummary};
pub use unit::{
    BattleStats, Capabilities, Capability, Color, Factory, Unit, UnitClass, UnitId, UnitKind,
    COLOR_MASK, HEADQUARTERS_NAME,
};
pub use vector::{Vector, NEIGHBOR_OFFSETS};
