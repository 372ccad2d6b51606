//! Game invariants - sanity checks that detect engine bugs.
//!
//! None of these should ever trigger. The central one is occupancy: every id
//! listed in a grid cell names a live unit standing on that cell, and every
//! live unit is listed exactly once, in the cell matching its position.

use std::collections::BTreeMap;

use crate::game::{GameState, UnitId};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut listed: BTreeMap<UnitId, usize> = BTreeMap::new();

    // Grid -> units
    for (pos, cell) in state.grid.iter() {
        for id in cell {
            *listed.entry(*id).or_default() += 1;
            match state.units.get(id) {
                None => violations.push(InvariantViolation {
                    message: format!("Cell {pos} lists unit {id}, which does not exist"),
                }),
                Some(unit) if unit.position() != pos => violations.push(InvariantViolation {
                    message: format!(
                        "Cell {pos} lists unit {id}, which stands at {}",
                        unit.position()
                    ),
                }),
                Some(_) => {}
            }
        }
    }

    // Units -> grid
    for (id, unit) in &state.units {
        match listed.get(id).copied().unwrap_or(0) {
            0 => violations.push(InvariantViolation {
                message: format!("Unit {id} at {} is missing from the grid", unit.position()),
            }),
            1 => {}
            n => violations.push(InvariantViolation {
                message: format!("Unit {id} is listed {n} times in the grid"),
            }),
        }

        if let Some(stats) = unit.stats() {
            if stats.health <= 0 || stats.health > stats.max_health {
                violations.push(InvariantViolation {
                    message: format!(
                        "Unit {id} has health {} outside (0, {}]",
                        stats.health, stats.max_health
                    ),
                });
            }
        }

        if *id >= state.next_unit_id {
            violations.push(InvariantViolation {
                message: format!(
                    "Unit {id} is not below the next unit id {}",
                    state.next_unit_id
                ),
            });
        }
    }

    if state.players.current_index() >= state.players.len() {
        violations.push(InvariantViolation {
            message: format!(
                "Current player {} out of range for {} players",
                state.players.current_index(),
                state.players.len()
            ),
        });
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}
