//! Queued player intents.

use std::fmt;

use crate::game::{UnitId, Vector};

/// What an action does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionKind {
    /// Build a unit of the named type next to the acting factory.
    Spawn {
        /// Unit type name, as known to the factory.
        unit_type: String,
    },
    /// Step by a delta with both components in `[-1, 1]`.
    Move {
        /// Displacement to apply.
        delta: Vector,
    },
    /// Deal the actor's damage to another unit.
    Attack {
        /// Unit to hit.
        target: UnitId,
    },
}

/// An intent issued by the current player, applied at commit time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The unit carrying out the action.
    pub actor: UnitId,
    /// What the actor does.
    pub kind: ActionKind,
}

impl Action {
    /// A spawn order for a factory.
    #[must_use]
    pub fn spawn(actor: UnitId, unit_type: impl Into<String>) -> Self {
        Self {
            actor,
            kind: ActionKind::Spawn {
                unit_type: unit_type.into(),
            },
        }
    }

    /// A single-step move.
    #[must_use]
    pub const fn move_by(actor: UnitId, delta: Vector) -> Self {
        Self {
            actor,
            kind: ActionKind::Move { delta },
        }
    }

    /// An attack on another unit.
    #[must_use]
    pub const fn attack(actor: UnitId, target: UnitId) -> Self {
        Self {
            actor,
            kind: ActionKind::Attack { target },
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ActionKind::Spawn { unit_type } => {
                write!(f, "Unit {}: Create unit of class \"{unit_type}\"", self.actor)
            }
            ActionKind::Move { delta } => {
                write!(f, "Unit {}: Move by ({},{})", self.actor, delta.x, delta.y)
            }
            ActionKind::Attack { target } => {
                write!(f, "Unit {}: Attack unit {target}", self.actor)
            }
        }
    }
}
