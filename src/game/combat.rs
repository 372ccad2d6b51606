//! Attack resolution.
//!
//! Damage is applied immediately and a unit whose health drops to zero or
//! below is removed from the board and the unit map on the spot, so later
//! actions in the same commit already see it gone.

use std::collections::BTreeMap;

use crate::error::ConsistencyFault;
use crate::game::{Grid, Unit, UnitId};

/// Outcome of a single attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatResult {
    /// The target no longer exists; nothing happened.
    TargetGone,
    /// The attacker no longer exists or carries no weapon; nothing happened.
    AttackerUnarmed,
    /// The target cannot take damage; nothing happened.
    TargetImmune,
    /// The target survived with the given health.
    Wounded {
        /// Health left after the hit.
        remaining: i32,
    },
    /// The target died and was removed.
    Killed,
}

/// Process an attack from one unit on another.
///
/// Only the target's existence is rechecked here; ownership and adjacency
/// were settled when the action was queued.
///
/// # Errors
///
/// Returns a [`ConsistencyFault`] if a killed target was not listed in the
/// grid cell matching its position. The target is still removed from the
/// unit map in that case.
pub fn process_attack(
    units: &mut BTreeMap<UnitId, Unit>,
    grid: &mut Grid,
    attacker: UnitId,
    target: UnitId,
) -> Result<CombatResult, ConsistencyFault> {
    if !units.contains_key(&target) {
        return Ok(CombatResult::TargetGone);
    }

    let Some(damage) = units
        .get(&attacker)
        .and_then(Unit::stats)
        .map(|stats| stats.damage)
    else {
        return Ok(CombatResult::AttackerUnarmed);
    };

    let (dead, remaining, position) = {
        let Some(victim) = units.get_mut(&target) else {
            return Ok(CombatResult::TargetGone);
        };
        let position = victim.position();
        let Some(stats) = victim.stats_mut() else {
            return Ok(CombatResult::TargetImmune);
        };
        stats.take_damage(damage);
        (stats.is_dead(), stats.health, position)
    };

    if !dead {
        return Ok(CombatResult::Wounded { remaining });
    }

    units.remove(&target);
    grid.remove(target, position)?;
    Ok(CombatResult::Killed)
}
