//! Game state management.
//!
//! [`GameState`] owns the board, the players, every unit and the pending
//! action queue. Actions are validated against the current state when they
//! are queued and applied in FIFO order by [`GameState::commit`], after which
//! the turn passes to the next player.

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::config::GameConfig;
use crate::error::{ConsistencyFault, ValidationError, ValidationResult};
use crate::game::invariants::assert_invariants;
use crate::game::{
    process_attack, Action, ActionKind, BattleStats, Capability, Color, CombatResult, Grid,
    Player, PlayerRegistry, Unit, UnitClass, UnitId, Vector,
};

/// What happened to one queued action during a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// A new unit was built with the given id at the given cell.
    Spawned {
        /// Id of the new unit.
        id: UnitId,
        /// Where it was placed.
        position: Vector,
    },
    /// The actor moved to a new cell.
    Moved {
        /// Cell the actor now occupies.
        to: Vector,
    },
    /// An attack was resolved.
    Attacked(CombatResult),
    /// The action could no longer be carried out and was dropped.
    Skipped,
    /// Grid and unit map disagreed; the action was abandoned.
    Faulted(ConsistencyFault),
}

/// Summary of one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReport {
    /// Index of the player whose actions were applied.
    pub player: usize,
    /// Each applied action with its outcome, in queue order.
    pub outcomes: Vec<(Action, ActionOutcome)>,
}

impl CommitReport {
    /// Ids of units created during the commit.
    pub fn spawned(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            ActionOutcome::Spawned { id, .. } => Some(*id),
            _ => None,
        })
    }

    /// Ids of units killed during the commit.
    pub fn killed(&self) -> impl Iterator<Item = UnitId> + '_ {
        self.outcomes.iter().filter_map(|(action, outcome)| match (&action.kind, outcome) {
            (ActionKind::Attack { target }, ActionOutcome::Attacked(CombatResult::Killed)) => {
                Some(*target)
            }
            _ => None,
        })
    }
}

/// Read-only description of a unit, as returned by [`GameState::inspect`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSummary {
    /// Position of the unit within its cell's stack.
    pub index: usize,
    /// Unit id.
    pub id: UnitId,
    /// Type label ("Headquarters", "Infantry", ...).
    pub label: &'static str,
    /// Display name.
    pub name: String,
    /// Owner color.
    pub color: Color,
    /// Index of the owning player, if any player has that color.
    pub owner: Option<usize>,
    /// Combat stats for battle-capable units.
    pub stats: Option<BattleStats>,
}

impl fmt::Display for UnitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] Unit {}: {}", self.index, self.id, self.label)?;
        if let Some(owner) = self.owner {
            write!(f, " (player {owner})")?;
        }
        write!(f, "\n\tColor: #{:06X}", self.color)?;
        if let Some(stats) = self.stats {
            write!(
                f,
                "\n\tHealth: {}/{}\n\tDamage: {}",
                stats.health, stats.max_health, stats.damage
            )?;
        }
        Ok(())
    }
}

/// Complete game state.
#[derive(Debug, Clone)]
pub struct GameState {
    /// The board.
    pub(crate) grid: Grid,
    /// Players in turn order.
    pub(crate) players: PlayerRegistry,
    /// Every live unit, keyed by id.
    pub(crate) units: BTreeMap<UnitId, Unit>,
    /// Id handed to the next unit created.
    pub(crate) next_unit_id: UnitId,
    /// Actions queued by the current player.
    queue: Vec<Action>,
    /// Source of spawn placement randomness.
    rng: StdRng,
}

impl GameState {
    /// Create a fresh game.
    ///
    /// Each player gets a random color and a headquarters in a corner:
    /// (0,0) and (w-1,h-1) for two players, plus (w-1,0) and (0,h-1) for four.
    /// Headquarters take ids `0..n` and can build every catalog class.
    #[must_use]
    pub fn new(config: &GameConfig) -> Self {
        let mut rng = seeded_rng(config.seed);
        let count = config.player_count();
        let (width, height) = config.dimensions();

        let players: Vec<Player> = (0..count).map(|i| Player::random(&mut rng, i > 0)).collect();

        let Some(mut grid) = Grid::new(width, height) else {
            unreachable!("board dimensions are clamped to a positive size")
        };

        let (w, h) = (i32::from(width) - 1, i32::from(height) - 1);
        let corners = [
            Vector::new(0, 0),
            Vector::new(w, h),
            Vector::new(w, 0),
            Vector::new(0, h),
        ];

        let mut units = BTreeMap::new();
        let mut next_unit_id: UnitId = 0;
        for (player, corner) in players.iter().zip(corners) {
            let hq = Unit::headquarters(player.color, corner, &UnitClass::ALL);
            grid.place(next_unit_id, corner);
            units.insert(next_unit_id, hq);
            next_unit_id += 1;
        }

        let Some(players) = PlayerRegistry::new(players) else {
            unreachable!("player count is clamped to at least two")
        };

        info!("new game: {count} players on a {width}x{height} board");

        Self {
            grid,
            players,
            units,
            next_unit_id,
            queue: Vec::new(),
            rng,
        }
    }

    /// Create a fresh game with an entropy seed.
    ///
    /// Player counts other than 2 or 4 are clamped (below 3 → 2, above → 4).
    #[must_use]
    pub fn new_game(player_count: usize, width: u16, height: u16) -> Self {
        Self::new(&GameConfig {
            players: player_count,
            width,
            height,
            seed: None,
        })
    }

    /// Assemble a state from stored parts, with an empty queue.
    pub(crate) fn from_parts(
        grid: Grid,
        players: PlayerRegistry,
        units: BTreeMap<UnitId, Unit>,
        next_unit_id: UnitId,
    ) -> Self {
        Self {
            grid,
            players,
            units,
            next_unit_id,
            queue: Vec::new(),
            rng: seeded_rng(None),
        }
    }

    /// Replace the spawn RNG, e.g. to make a loaded game reproducible.
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = seeded_rng(seed);
    }

    /// Get the board.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Board width.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.grid.width()
    }

    /// Board height.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.grid.height()
    }

    /// Get the player registry.
    #[must_use]
    pub const fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub const fn current_player(&self) -> usize {
        self.players.current_index()
    }

    /// All live units.
    #[must_use]
    pub const fn units(&self) -> &BTreeMap<UnitId, Unit> {
        &self.units
    }

    /// Look up a unit.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Id the next created unit will receive.
    #[must_use]
    pub const fn next_unit_id(&self) -> UnitId {
        self.next_unit_id
    }

    /// The unit at `index` in the stack on `pos`.
    #[must_use]
    pub fn unit_at(&self, pos: Vector, index: usize) -> Option<UnitId> {
        self.grid.occupants(pos).get(index).copied()
    }

    /// Pending actions, oldest first.
    #[must_use]
    pub fn queue(&self) -> &[Action] {
        &self.queue
    }

    /// Human-readable descriptions of the pending actions.
    #[must_use]
    pub fn list_queue(&self) -> Vec<String> {
        self.queue.iter().map(ToString::to_string).collect()
    }

    /// Describe the units standing on a cell, in stack order.
    #[must_use]
    pub fn inspect(&self, pos: Vector) -> Vec<UnitSummary> {
        self.grid
            .occupants(pos)
            .iter()
            .enumerate()
            .filter_map(|(index, id)| {
                let unit = self.units.get(id)?;
                Some(UnitSummary {
                    index,
                    id: *id,
                    label: unit.label(),
                    name: unit.name().to_string(),
                    color: unit.color(),
                    owner: self.players.owner_of(unit.color()),
                    stats: unit.stats().copied(),
                })
            })
            .collect()
    }

    /// Check an action against the current state without queueing it.
    ///
    /// # Errors
    ///
    /// Returns the first rule the action breaks.
    pub fn validate(&self, action: &Action) -> ValidationResult<()> {
        let actor = self
            .units
            .get(&action.actor)
            .ok_or(ValidationError::UnknownUnit(action.actor))?;

        let required = match action.kind {
            ActionKind::Spawn { .. } => Capability::Factory,
            ActionKind::Move { .. } => Capability::Movable,
            ActionKind::Attack { .. } => Capability::Battle,
        };
        if !actor.has(required) {
            return Err(ValidationError::MissingCapability {
                unit: action.actor,
                capability: required,
            });
        }

        if actor.color() != self.players.current().color {
            return Err(ValidationError::NotOwned {
                unit: action.actor,
                player: self.players.current_index(),
            });
        }

        match &action.kind {
            ActionKind::Spawn { unit_type } => {
                let creatable = actor.factory().is_some_and(|f| f.can_create(unit_type));
                if !creatable {
                    return Err(ValidationError::CannotCreate {
                        unit: action.actor,
                        unit_type: unit_type.clone(),
                    });
                }
            }
            ActionKind::Move { delta } => {
                if !delta.is_step() {
                    return Err(ValidationError::DeltaOutOfRange(*delta));
                }
                let destination = actor.position() + *delta;
                if !self.grid.in_bounds(destination) {
                    return Err(ValidationError::OutOfBounds(destination));
                }
            }
            ActionKind::Attack { target } => {
                let victim = self
                    .units
                    .get(target)
                    .ok_or(ValidationError::UnknownUnit(*target))?;
                if !victim.has(Capability::Battle) {
                    return Err(ValidationError::TargetNotBattle(*target));
                }
                let distance = actor.position().chebyshev(victim.position());
                if distance > 1 {
                    return Err(ValidationError::NotAdjacent {
                        unit: action.actor,
                        target: *target,
                        distance,
                    });
                }
            }
        }

        Ok(())
    }

    /// Validate and queue an action.
    ///
    /// # Errors
    ///
    /// Returns the reason the action was rejected; the queue is unchanged.
    pub fn enqueue(&mut self, action: Action) -> ValidationResult<()> {
        self.validate(&action)?;
        debug!("queued {action}");
        self.queue.push(action);
        Ok(())
    }

    /// Drop the most recently queued action. Returns `false` if the queue was empty.
    pub fn undo_last(&mut self) -> bool {
        self.queue.pop().is_some()
    }

    /// Apply every queued action in order, then pass the turn.
    ///
    /// Each action sees the effects of the ones before it. Committing an
    /// empty queue only advances the current player.
    pub fn commit(&mut self) -> CommitReport {
        let player = self.players.current_index();
        let queue = std::mem::take(&mut self.queue);
        let mut outcomes = Vec::with_capacity(queue.len());

        for action in queue {
            let outcome = self.apply(&action);
            debug!("{action} -> {outcome:?}");
            outcomes.push((action, outcome));
        }

        self.players.advance();
        info!(
            "player {player} committed {} actions; player {} to move",
            outcomes.len(),
            self.players.current_index()
        );

        assert_invariants(self);

        CommitReport { player, outcomes }
    }

    fn apply(&mut self, action: &Action) -> ActionOutcome {
        match &action.kind {
            ActionKind::Spawn { unit_type } => self.apply_spawn(action.actor, unit_type),
            ActionKind::Move { delta } => self.apply_move(action.actor, *delta),
            ActionKind::Attack { target } => {
                match process_attack(&mut self.units, &mut self.grid, action.actor, *target) {
                    Ok(result) => ActionOutcome::Attacked(result),
                    Err(fault) => fault_outcome(fault),
                }
            }
        }
    }

    fn apply_spawn(&mut self, actor: UnitId, unit_type: &str) -> ActionOutcome {
        let Some(hq) = self.units.get(&actor) else {
            warn!("unit {actor} no longer exists; skipping spawn");
            return ActionOutcome::Skipped;
        };
        let Some(factory) = hq.factory() else {
            warn!("unit {actor} is not a factory; skipping spawn");
            return ActionOutcome::Skipped;
        };

        let id = self.next_unit_id;
        let Some(next_unit_id) = id.checked_add(1) else {
            warn!("unit ids are exhausted; skipping spawn from unit {actor}");
            return ActionOutcome::Skipped;
        };

        let candidates = self.grid.neighbors(hq.position());
        let Some(&position) = candidates.choose(&mut self.rng) else {
            warn!("unit {actor} has no free neighbor cell to spawn into; skipping");
            return ActionOutcome::Skipped;
        };

        let unit = factory.create_unit(unit_type, position);
        self.next_unit_id = next_unit_id;
        self.grid.place(id, position);
        self.units.insert(id, unit);

        ActionOutcome::Spawned { id, position }
    }

    fn apply_move(&mut self, actor: UnitId, delta: Vector) -> ActionOutcome {
        let Some(unit) = self.units.get_mut(&actor) else {
            warn!("unit {actor} no longer exists; skipping move");
            return ActionOutcome::Skipped;
        };

        let from = unit.position();
        let to = from + delta;
        if !self.grid.in_bounds(to) {
            warn!("unit {actor} would leave the board at {to}; skipping move");
            return ActionOutcome::Skipped;
        }

        if let Err(fault) = self.grid.remove(actor, from) {
            return fault_outcome(fault);
        }
        unit.set_position(to);
        self.grid.place(actor, to);

        ActionOutcome::Moved { to }
    }
}

/// Log a consistency fault. Debug builds stop here; release builds drop the action.
fn fault_outcome(fault: ConsistencyFault) -> ActionOutcome {
    error!("{fault}");
    if cfg!(debug_assertions) {
        panic!("{fault}");
    }
    ActionOutcome::Faulted(fault)
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Factory;

    fn create_test_game() -> GameState {
        GameState::new(&GameConfig {
            players: 2,
            width: 4,
            height: 4,
            seed: Some(42),
        })
    }

    /// Put a unit of `class` owned by `owner` on the board, bypassing the queue.
    fn add_trooper(game: &mut GameState, owner: usize, class: UnitClass, pos: Vector) -> UnitId {
        let color = game.players.get(owner).unwrap().color;
        let unit = Factory::from_classes(color, &UnitClass::ALL).create_unit(class.name(), pos);
        let id = game.next_unit_id;
        game.next_unit_id += 1;
        game.grid.place(id, pos);
        game.units.insert(id, unit);
        id
    }

    fn set_health(game: &mut GameState, id: UnitId, health: i32) {
        game.units.get_mut(&id).unwrap().stats_mut().unwrap().health = health;
    }

    #[test]
    fn test_game_state_creation() {
        let game = create_test_game();
        assert_eq!(game.width(), 4);
        assert_eq!(game.height(), 4);
        assert_eq!(game.players().len(), 2);
        assert_eq!(game.current_player(), 0);
        assert_eq!(game.next_unit_id(), 2);
        assert_eq!(game.unit_at(Vector::new(0, 0), 0), Some(0));
        assert_eq!(game.unit_at(Vector::new(3, 3), 0), Some(1));
        assert!(game.queue().is_empty());
    }

    #[test]
    fn test_four_player_corners() {
        let game = GameState::new(&GameConfig {
            players: 3,
            width: 5,
            height: 6,
            seed: Some(1),
        });
        assert_eq!(game.players().len(), 4);
        let corners = [(0, 0), (4, 5), (4, 0), (0, 5)];
        for (index, (x, y)) in corners.into_iter().enumerate() {
            let id = UnitId::try_from(index).unwrap();
            let unit = game.unit(id).unwrap();
            assert_eq!(unit.position(), Vector::new(x, y));
            assert_eq!(unit.color(), game.players().get(index).unwrap().color);
        }
        assert_eq!(game.next_unit_id(), 4);
    }

    #[test]
    fn test_players_after_first_are_ai() {
        let game = create_test_game();
        let flags: Vec<bool> = game.players().iter().map(|p| p.ai).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn test_spawn_places_next_to_headquarters() {
        let mut game = create_test_game();
        game.enqueue(Action::spawn(0, "infantry")).unwrap();
        let report = game.commit();

        let ids: Vec<_> = report.spawned().collect();
        assert_eq!(ids, vec![2]);
        let unit = game.unit(2).unwrap();
        assert!(
            [Vector::new(1, 0), Vector::new(0, 1), Vector::new(1, 1)].contains(&unit.position())
        );
        assert_eq!(unit.color(), game.players().get(0).unwrap().color);
        assert_eq!(game.grid().occupants(unit.position()).last(), Some(&2));
        assert_eq!(game.current_player(), 1);
        assert_eq!(game.next_unit_id(), 3);
    }

    #[test]
    fn test_spawn_may_stack() {
        let mut game = GameState::new(&GameConfig {
            players: 2,
            width: 2,
            height: 2,
            seed: Some(9),
        });
        for _ in 0..6 {
            game.enqueue(Action::spawn(0, "vehicle")).unwrap();
        }
        game.commit();

        // Three neighbor cells, six units, the rest stack.
        assert_eq!(game.units().len(), 8);
        let stacked: usize = game.grid().iter().map(|(_, cell)| cell.len()).sum();
        assert_eq!(stacked, 8);
    }

    #[test]
    fn test_spawn_position_is_uniform() {
        let mut game = create_test_game();
        for _ in 0..300 {
            game.enqueue(Action::spawn(0, "infantry")).unwrap();
        }
        let report = game.commit();

        let mut counts: BTreeMap<Vector, usize> = BTreeMap::new();
        for (_, outcome) in &report.outcomes {
            if let ActionOutcome::Spawned { position, .. } = outcome {
                *counts.entry(*position).or_default() += 1;
            }
        }

        let cells = [Vector::new(1, 0), Vector::new(0, 1), Vector::new(1, 1)];
        assert_eq!(counts.len(), 3, "{counts:?}");
        for cell in cells {
            let hits = counts.get(&cell).copied().unwrap_or(0);
            assert!((60..=140).contains(&hits), "{cell} hit {hits} times: {counts:?}");
        }
    }

    #[test]
    fn test_spawn_skipped_when_ids_run_out() {
        let mut game = create_test_game();
        game.next_unit_id = UnitId::MAX;
        game.enqueue(Action::spawn(0, "infantry")).unwrap();
        let report = game.commit();

        assert_eq!(report.outcomes[0].1, ActionOutcome::Skipped);
        assert_eq!(game.units().len(), 2);
        assert_eq!(game.next_unit_id(), UnitId::MAX);
    }

    #[test]
    fn test_spawn_rejects_unknown_type() {
        let mut game = create_test_game();
        let err = game.enqueue(Action::spawn(0, "dragon")).unwrap_err();
        assert!(matches!(err, ValidationError::CannotCreate { unit: 0, .. }));
        assert!(game.queue().is_empty());
    }

    #[test]
    fn test_spawn_rejects_enemy_factory() {
        let mut game = create_test_game();
        let err = game.enqueue(Action::spawn(1, "infantry")).unwrap_err();
        assert_eq!(err, ValidationError::NotOwned { unit: 1, player: 0 });
    }

    #[test]
    fn test_headquarters_cannot_move_or_attack() {
        let mut game = create_test_game();
        let err = game.enqueue(Action::move_by(0, Vector::new(1, 0))).unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingCapability {
                unit: 0,
                capability: Capability::Movable
            }
        );
        let err = game.enqueue(Action::attack(0, 1)).unwrap_err();
        assert!(matches!(err, ValidationError::MissingCapability { .. }));
    }

    #[test]
    fn test_unknown_actor_rejected() {
        let mut game = create_test_game();
        let err = game.enqueue(Action::move_by(99, Vector::new(0, 1))).unwrap_err();
        assert_eq!(err, ValidationError::UnknownUnit(99));
    }

    #[test]
    fn test_move_validation() {
        let mut game = create_test_game();
        let id = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(0, 2));

        let err = game.enqueue(Action::move_by(id, Vector::new(2, 0))).unwrap_err();
        assert_eq!(err, ValidationError::DeltaOutOfRange(Vector::new(2, 0)));

        let err = game.enqueue(Action::move_by(id, Vector::new(-1, 1))).unwrap_err();
        assert_eq!(err, ValidationError::OutOfBounds(Vector::new(-1, 3)));

        let enemy = add_trooper(&mut game, 1, UnitClass::Infantry, Vector::new(2, 2));
        let err = game.enqueue(Action::move_by(enemy, Vector::new(0, 1))).unwrap_err();
        assert_eq!(err, ValidationError::NotOwned { unit: enemy, player: 0 });

        assert!(game.queue().is_empty());
    }

    #[test]
    fn test_move_updates_grid() {
        let mut game = create_test_game();
        let id = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(1, 1));

        game.enqueue(Action::move_by(id, Vector::new(1, 1))).unwrap();
        let report = game.commit();

        let to = Vector::new(2, 2);
        assert_eq!(report.outcomes[0].1, ActionOutcome::Moved { to });
        assert_eq!(game.unit(id).unwrap().position(), to);
        assert!(game.grid().occupants(Vector::new(1, 1)).is_empty());
        assert_eq!(game.grid().occupants(to), &[id]);
    }

    #[test]
    fn test_move_onto_occupied_cell_stacks() {
        let mut game = create_test_game();
        let a = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(1, 0));
        let b = add_trooper(&mut game, 0, UnitClass::Vehicle, Vector::new(1, 1));

        game.enqueue(Action::move_by(b, Vector::new(0, -1))).unwrap();
        game.commit();

        assert_eq!(game.grid().occupants(Vector::new(1, 0)), &[a, b]);
        assert_eq!(game.unit_at(Vector::new(1, 0), 1), Some(b));
    }

    #[test]
    fn test_stationary_move_is_allowed() {
        let mut game = create_test_game();
        let id = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(2, 1));

        game.enqueue(Action::move_by(id, Vector::new(0, 0))).unwrap();
        game.commit();
        assert_eq!(game.unit(id).unwrap().position(), Vector::new(2, 1));
        assert_eq!(game.grid().occupants(Vector::new(2, 1)), &[id]);
    }

    #[test]
    fn test_stale_move_off_board_is_skipped() {
        let mut game = create_test_game();
        let id = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(2, 1));

        // Both steps are legal from the starting cell; the second overshoots.
        game.enqueue(Action::move_by(id, Vector::new(1, 0))).unwrap();
        game.enqueue(Action::move_by(id, Vector::new(1, 0))).unwrap();
        let report = game.commit();

        assert_eq!(
            report.outcomes[0].1,
            ActionOutcome::Moved {
                to: Vector::new(3, 1)
            }
        );
        assert_eq!(report.outcomes[1].1, ActionOutcome::Skipped);
        assert_eq!(game.unit(id).unwrap().position(), Vector::new(3, 1));
    }

    #[test]
    fn test_attack_validation() {
        let mut game = create_test_game();
        let id = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(2, 2));

        // Headquarters are not battle units.
        let err = game.enqueue(Action::attack(id, 1)).unwrap_err();
        assert_eq!(err, ValidationError::TargetNotBattle(1));

        let err = game.enqueue(Action::attack(id, 77)).unwrap_err();
        assert_eq!(err, ValidationError::UnknownUnit(77));

        let far = add_trooper(&mut game, 1, UnitClass::Infantry, Vector::new(0, 0));
        let err = game.enqueue(Action::attack(id, far)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotAdjacent {
                unit: id,
                target: far,
                distance: 2
            }
        );
        assert!(game.queue().is_empty());
    }

    #[test]
    fn test_attack_diagonal_is_adjacent() {
        let mut game = create_test_game();
        let a = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(1, 1));
        let b = add_trooper(&mut game, 1, UnitClass::Infantry, Vector::new(2, 2));
        assert!(game.enqueue(Action::attack(a, b)).is_ok());
    }

    #[test]
    fn test_attack_wounds_then_kills() {
        let mut game = create_test_game();
        let a = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(1, 1));
        let b = add_trooper(&mut game, 1, UnitClass::Infantry, Vector::new(1, 2));
        set_health(&mut game, b, 15);

        game.enqueue(Action::attack(a, b)).unwrap();
        game.commit();
        assert_eq!(game.unit(b).unwrap().stats().unwrap().health, 5);

        game.commit(); // player 1 passes
        game.enqueue(Action::attack(a, b)).unwrap();
        let report = game.commit();

        assert_eq!(report.killed().collect::<Vec<_>>(), vec![b]);
        assert!(game.unit(b).is_none());
        assert!(game.grid().occupants(Vector::new(1, 2)).is_empty());
    }

    #[test]
    fn test_attack_on_dead_target_is_skipped() {
        let mut game = create_test_game();
        let a = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(1, 1));
        let b = add_trooper(&mut game, 1, UnitClass::Infantry, Vector::new(2, 1));
        set_health(&mut game, b, 10);

        game.enqueue(Action::attack(a, b)).unwrap();
        game.enqueue(Action::attack(a, b)).unwrap();
        let report = game.commit();

        assert_eq!(report.outcomes[0].1, ActionOutcome::Attacked(CombatResult::Killed));
        assert_eq!(
            report.outcomes[1].1,
            ActionOutcome::Attacked(CombatResult::TargetGone)
        );
    }

    #[test]
    fn test_dead_unit_cannot_move_later_in_commit() {
        let mut game = create_test_game();
        let a = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(1, 1));
        let b = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(1, 2));
        set_health(&mut game, b, 10);

        // Friendly fire is not forbidden.
        game.enqueue(Action::attack(a, b)).unwrap();
        game.enqueue(Action::move_by(b, Vector::new(1, 0))).unwrap();
        let report = game.commit();

        assert_eq!(report.outcomes[1].1, ActionOutcome::Skipped);
        assert!(game.unit(b).is_none());
    }

    #[test]
    fn test_empty_commit_only_rotates() {
        let mut game = create_test_game();
        let units_before = game.units().clone();
        let grid_before = game.grid().clone();

        let report = game.commit();
        assert!(report.outcomes.is_empty());
        assert_eq!(report.player, 0);
        assert_eq!(game.current_player(), 1);
        assert_eq!(game.units(), &units_before);
        assert_eq!(game.grid(), &grid_before);

        game.commit();
        assert_eq!(game.current_player(), 0);
    }

    #[test]
    fn test_turn_gates_ownership() {
        let mut game = create_test_game();
        game.commit();
        assert!(game.enqueue(Action::spawn(0, "infantry")).is_err());
        assert!(game.enqueue(Action::spawn(1, "infantry")).is_ok());
    }

    #[test]
    fn test_undo_last() {
        let mut game = create_test_game();
        assert!(!game.undo_last());

        game.enqueue(Action::spawn(0, "infantry")).unwrap();
        game.enqueue(Action::spawn(0, "vehicle")).unwrap();
        assert!(game.undo_last());
        assert_eq!(
            game.list_queue(),
            vec!["Unit 0: Create unit of class \"infantry\"".to_string()]
        );
    }

    #[test]
    fn test_queue_is_fifo() {
        let mut game = create_test_game();
        game.enqueue(Action::spawn(0, "infantry")).unwrap();
        game.enqueue(Action::spawn(0, "vehicle")).unwrap();
        let report = game.commit();

        let ids: Vec<_> = report.spawned().collect();
        assert_eq!(ids, vec![2, 3]);
        assert_eq!(game.unit(2).unwrap().label(), "Infantry");
        assert_eq!(game.unit(3).unwrap().label(), "Vehicle");
    }

    #[test]
    fn test_inspect_lists_stack() {
        let mut game = create_test_game();
        let summaries = game.inspect(Vector::new(0, 0));
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].label, "Headquarters");
        assert_eq!(summaries[0].owner, Some(0));
        assert!(summaries[0].stats.is_none());

        assert!(game.inspect(Vector::new(2, 1)).is_empty());
        assert!(game.inspect(Vector::new(-1, 9)).is_empty());

        let a = add_trooper(&mut game, 1, UnitClass::Vehicle, Vector::new(2, 1));
        let b = add_trooper(&mut game, 0, UnitClass::Infantry, Vector::new(2, 1));
        let summaries = game.inspect(Vector::new(2, 1));
        assert_eq!(summaries.iter().map(|s| s.id).collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(summaries[1].index, 1);
        assert_eq!(summaries[1].stats, Some(BattleStats::new(100, 10)));
        assert!(summaries[0].to_string().contains("Health: 200/200"));
        assert!(summaries[0].to_string().starts_with("[0] Unit"));
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = create_test_game();
        let mut b = create_test_game();
        assert_eq!(a.players(), b.players());

        for game in [&mut a, &mut b] {
            game.enqueue(Action::spawn(0, "infantry")).unwrap();
            game.enqueue(Action::spawn(0, "infantry")).unwrap();
            game.commit();
        }
        assert_eq!(a.units(), b.units());
        assert_eq!(a.grid(), b.grid());
    }
}
