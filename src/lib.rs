// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Gridwar: a turn-based grid strategy simulation engine.
//!
//! Players own headquarters that build infantry and vehicles. Units move and
//! attack on a rectangular board. Each turn the current player queues
//! actions, which are validated immediately and applied all at once when the
//! turn is committed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI / interactive shell (bin)     │
//! ├─────────────────────────────────────┤
//! │   Persistence (JSON save files)     │
//! ├─────────────────────────────────────┤
//! │   Game: queue, commit, combat       │
//! ├─────────────────────────────────────┤
//! │   Grid, units, players              │
//! └─────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod game;
pub mod persistence;

pub use config::GameConfig;
pub use error::{ConsistencyFault, PersistenceError, ValidationError, ValidationResult};

// Re-export key game types at crate root for convenience
pub use game::{
    Action, ActionKind, ActionOutcome, CommitReport, GameState, Grid, Player, Unit, UnitClass,
    UnitId, Vector,
};
