//! JSON save files.
//!
//! A save file holds the board, the players and every unit. Units are stored
//! as a tagged union keyed on `kind`:
//!
//! ```json
//! {
//!   "next_unit_id": 3,
//!   "grid": [[[0], [], [2]], [[], [], [1]]],
//!   "players": [{ "color": 16711680, "ai": false, "money": 1000 }],
//!   "units": {
//!     "0": { "kind": "headquarters", "color": 16711680, "name": "Headquarters",
//!            "position": { "x": 0, "y": 0 }, "allowed": ["infantry", "vehicle"] },
//!     "2": { "kind": "infantry", "color": 16711680, "name": "infantry",
//!            "position": { "x": 2, "y": 0 }, "health": 90, "damage": 10, "max_health": 100 }
//!   },
//!   "current_player": 0
//! }
//! ```
//!
//! The pending action queue and the spawn RNG are not saved.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::PersistenceError;
use crate::game::{
    check_invariants, BattleStats, Color, Factory, GameState, Grid, Player, PlayerRegistry, Unit,
    UnitClass, UnitId, UnitKind, Vector,
};

/// On-disk form of a [`GameState`].
#[derive(Debug, Serialize, Deserialize)]
struct SaveFile {
    next_unit_id: UnitId,
    grid: Vec<Vec<Vec<UnitId>>>,
    players: Vec<PlayerRecord>,
    units: BTreeMap<UnitId, UnitRecord>,
    #[serde(default)]
    current_player: usize,
}

#[derive(Debug, Serialize, Deserialize)]
struct PlayerRecord {
    color: Color,
    ai: bool,
    money: i64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum UnitRecord {
    Headquarters {
        color: Color,
        name: String,
        position: Vector,
        allowed: Vec<String>,
    },
    Infantry(TrooperRecord),
    Vehicle(TrooperRecord),
    Inert {
        color: Color,
        name: String,
        position: Vector,
    },
}

#[derive(Debug, Serialize, Deserialize)]
struct TrooperRecord {
    color: Color,
    name: String,
    position: Vector,
    health: i32,
    damage: i32,
    max_health: i32,
}

impl UnitRecord {
    fn from_unit(unit: &Unit) -> Self {
        let color = unit.color();
        let name = unit.name().to_string();
        let position = unit.position();

        match unit.kind() {
            UnitKind::Headquarters(factory) => UnitRecord::Headquarters {
                color,
                name,
                position,
                allowed: factory.allowed_types().map(str::to_string).collect(),
            },
            UnitKind::Trooper { class, stats } => {
                let record = TrooperRecord {
                    color,
                    name,
                    position,
                    health: stats.health,
                    damage: stats.damage,
                    max_health: stats.max_health,
                };
                match class {
                    UnitClass::Infantry => UnitRecord::Infantry(record),
                    UnitClass::Vehicle => UnitRecord::Vehicle(record),
                }
            }
            UnitKind::Inert => UnitRecord::Inert {
                color,
                name,
                position,
            },
        }
    }

    fn into_unit(self) -> Result<Unit, PersistenceError> {
        let unit = match self {
            UnitRecord::Headquarters {
                color,
                name,
                position,
                allowed,
            } => {
                let allowed = allowed
                    .into_iter()
                    .map(|type_name| match UnitClass::from_name(&type_name) {
                        Some(class) => Ok((type_name, class)),
                        None => Err(PersistenceError::UnknownUnitType(type_name)),
                    })
                    .collect::<Result<BTreeMap<_, _>, _>>()?;
                let factory = Factory::new(color, allowed);
                Unit::restore(name, position, color, UnitKind::Headquarters(factory))
            }
            UnitRecord::Infantry(record) => record.into_unit(UnitClass::Infantry)?,
            UnitRecord::Vehicle(record) => record.into_unit(UnitClass::Vehicle)?,
            UnitRecord::Inert {
                color,
                name,
                position,
            } => Unit::restore(name, position, color, UnitKind::Inert),
        };
        Ok(unit)
    }
}

impl TrooperRecord {
    fn into_unit(self, class: UnitClass) -> Result<Unit, PersistenceError> {
        if self.max_health <= 0 || self.damage < 0 {
            return Err(PersistenceError::Malformed(format!(
                "{} \"{}\" has max health {} and damage {}; need max health > 0 and damage >= 0",
                class.label(),
                self.name,
                self.max_health,
                self.damage
            )));
        }

        let stats = BattleStats {
            health: self.health,
            max_health: self.max_health,
            damage: self.damage,
        };
        Ok(Unit::restore(
            self.name,
            self.position,
            self.color,
            UnitKind::Trooper { class, stats },
        ))
    }
}

impl SaveFile {
    fn from_state(state: &GameState) -> Self {
        Self {
            next_unit_id: state.next_unit_id,
            grid: state.grid.rows(),
            players: state
                .players
                .iter()
                .map(|p| PlayerRecord {
                    color: p.color,
                    ai: p.ai,
                    money: p.money,
                })
                .collect(),
            units: state
                .units
                .iter()
                .map(|(id, unit)| (*id, UnitRecord::from_unit(unit)))
                .collect(),
            current_player: state.players.current_index(),
        }
    }

    fn into_state(self) -> Result<GameState, PersistenceError> {
        if self.next_unit_id == UnitId::MAX {
            return Err(PersistenceError::Malformed(format!(
                "next unit id {} leaves no room for new units",
                self.next_unit_id
            )));
        }

        let grid = Grid::from_rows(self.grid).ok_or_else(|| {
            PersistenceError::Malformed("grid must be a non-empty rectangle".to_string())
        })?;

        let players: Vec<Player> = self
            .players
            .into_iter()
            .map(|p| Player {
                color: p.color,
                ai: p.ai,
                money: p.money,
            })
            .collect();
        let count = players.len();
        let players = PlayerRegistry::with_current(players, self.current_player).ok_or_else(|| {
            PersistenceError::Malformed(format!(
                "current player {} is not one of {count} players",
                self.current_player
            ))
        })?;

        let units = self
            .units
            .into_iter()
            .map(|(id, record)| Ok((id, record.into_unit()?)))
            .collect::<Result<BTreeMap<_, _>, PersistenceError>>()?;

        let state = GameState::from_parts(grid, players, units, self.next_unit_id);

        let violations = check_invariants(&state);
        if !violations.is_empty() {
            let messages: Vec<String> = violations.into_iter().map(|v| v.message).collect();
            return Err(PersistenceError::Malformed(messages.join("; ")));
        }

        Ok(state)
    }
}

impl GameState {
    /// Serialize the game to a pretty-printed JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(&SaveFile::from_state(self))?)
    }

    /// Rebuild a game from a JSON document.
    ///
    /// The result has an empty queue and an entropy-seeded RNG.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not parse, names an unknown unit
    /// type, or describes an inconsistent board.
    pub fn from_json(text: &str) -> Result<Self, PersistenceError> {
        let file: SaveFile = serde_json::from_str(text)?;
        file.into_state()
    }

    /// Save the game to a file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        info!("saved game to {}", path.display());
        Ok(())
    }

    /// Load a game from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not hold a valid game.
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let text = fs::read_to_string(path)?;
        let state = Self::from_json(&text)?;
        info!(
            "loaded game from {}: {} units, player {} to move",
            path.display(),
            state.units.len(),
            state.current_player()
        );
        Ok(state)
    }
}
