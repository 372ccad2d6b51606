//! Units, capabilities and the headquarters factory.
//!
//! A unit's behaviour is described by value: every [`Unit`] carries a
//! [`UnitKind`] and its [`Capabilities`] are derived from it. Owner color is
//! fixed when the unit is built and has no setter.

use std::collections::BTreeMap;
use std::fmt;

use crate::game::Vector;

/// Opaque unit identifier, unique within one game.
pub type UnitId = u32;

/// 24-bit RGB owner color.
pub type Color = u32;

/// Mask selecting the 24 significant bits of a [`Color`].
pub const COLOR_MASK: Color = 0x00FF_FFFF;

/// Display name given to every headquarters.
pub const HEADQUARTERS_NAME: &str = "Headquarters";

/// A behavioural role a unit can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Can change position.
    Movable,
    /// Has health and damage, can attack and be attacked.
    Battle,
    /// Can manufacture other units.
    Factory,
}

impl Capability {
    const fn bit(self) -> u8 {
        match self {
            Capability::Movable => 1,
            Capability::Battle => 1 << 1,
            Capability::Factory => 1 << 2,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Movable => write!(f, "movable"),
            Capability::Battle => write!(f, "battle-capable"),
            Capability::Factory => write!(f, "a factory"),
        }
    }
}

/// Set of [`Capability`] values, stored as a bitset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Capabilities(u8);

impl Capabilities {
    /// No capabilities at all.
    pub const NONE: Self = Self(0);
    /// Headquarters: a stationary factory.
    pub const FACTORY: Self = Self(Capability::Factory.bit());
    /// Infantry and vehicles.
    pub const MOVABLE_BATTLE: Self = Self(Capability::Movable.bit() | Capability::Battle.bit());

    const ALL: [Capability; 3] = [Capability::Movable, Capability::Battle, Capability::Factory];

    /// Add a capability to the set.
    #[must_use]
    pub const fn with(self, capability: Capability) -> Self {
        Self(self.0 | capability.bit())
    }

    /// Check membership.
    #[must_use]
    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterate over contained capabilities in a fixed order.
    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Self::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl fmt::Display for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|c| format!("{c:?}")).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// The catalog of unit types a headquarters can manufacture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UnitClass {
    /// Cheap, hard-hitting foot soldiers.
    Infantry,
    /// Armoured, durable, weaker weapon.
    Vehicle,
}

impl UnitClass {
    /// Every known unit class.
    pub const ALL: [UnitClass; 2] = [UnitClass::Infantry, UnitClass::Vehicle];

    /// Catalog name, as typed by players and stored in save files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            UnitClass::Infantry => "infantry",
            UnitClass::Vehicle => "vehicle",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            UnitClass::Infantry => "Infantry",
            UnitClass::Vehicle => "Vehicle",
        }
    }

    /// Look a class up by its catalog name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }

    /// Starting stats for a freshly built unit of this class.
    #[must_use]
    pub const fn base_stats(self) -> BattleStats {
        match self {
            UnitClass::Infantry => BattleStats::new(100, 10),
            UnitClass::Vehicle => BattleStats::new(200, 5),
        }
    }

    /// Single-character map glyph.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            UnitClass::Infantry => 'I',
            UnitClass::Vehicle => 'V',
        }
    }
}

/// Health and weapon of a battle-capable unit.
///
/// `health` never exceeds `max_health` through healing, but may drop to zero
/// or below when attacked; a non-positive value means the unit is dead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BattleStats {
    /// Current health.
    pub health: i32,
    /// Upper bound for healing.
    pub max_health: i32,
    /// Damage dealt per attack.
    pub damage: i32,
}

impl BattleStats {
    /// Stats at full health.
    #[must_use]
    pub const fn new(max_health: i32, damage: i32) -> Self {
        Self {
            health: max_health,
            max_health,
            damage,
        }
    }

    /// Restore health, clamped to `max_health`.
    ///
    /// Part of the unit model only: no queued action heals yet.
    pub fn heal(&mut self, amount: i32) {
        self.health = self.max_health.min(self.health.saturating_add(amount));
    }

    /// Subtract damage. Health may become non-positive.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    /// Whether the unit has been killed.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Builds owner-colored units from a fixed set of allowed types.
///
/// Each allowed type name maps to the [`UnitClass`] used to construct it.
/// Requests for any other name still succeed but yield an inert unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Factory {
    color: Color,
    allowed: BTreeMap<String, UnitClass>,
}

impl Factory {
    /// Create a factory from an explicit name → class mapping.
    #[must_use]
    pub fn new(color: Color, allowed: BTreeMap<String, UnitClass>) -> Self {
        Self { color, allowed }
    }

    /// Create a factory allowing the given classes under their catalog names.
    #[must_use]
    pub fn from_classes(color: Color, classes: &[UnitClass]) -> Self {
        let allowed = classes
            .iter()
            .map(|class| (class.name().to_string(), *class))
            .collect();
        Self::new(color, allowed)
    }

    /// Color baked into every unit this factory builds.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Check if the factory can build the named type.
    #[must_use]
    pub fn can_create(&self, unit_type: &str) -> bool {
        self.allowed.contains_key(unit_type)
    }

    /// Allowed type names, in sorted order.
    pub fn allowed_types(&self) -> impl Iterator<Item = &str> {
        self.allowed.keys().map(String::as_str)
    }

    /// Build a unit of the named type at `position`.
    ///
    /// Unknown names fall back to an inert unit of the same color.
    #[must_use]
    pub fn create_unit(&self, unit_type: &str, position: Vector) -> Unit {
        let kind = match self.allowed.get(unit_type) {
            Some(class) => UnitKind::Trooper {
                class: *class,
                stats: class.base_stats(),
            },
            None => UnitKind::Inert,
        };
        Unit::restore(unit_type.to_string(), position, self.color, kind)
    }
}

/// What a unit is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitKind {
    /// Stationary factory owned by a player.
    Headquarters(Factory),
    /// Movable, battle-capable unit of a catalog class.
    Trooper {
        /// Catalog class the unit was built from.
        class: UnitClass,
        /// Current combat stats.
        stats: BattleStats,
    },
    /// A colored unit with no capabilities.
    Inert,
}

impl UnitKind {
    /// Capabilities implied by this kind.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        match self {
            UnitKind::Headquarters(_) => Capabilities::FACTORY,
            UnitKind::Trooper { .. } => Capabilities::MOVABLE_BATTLE,
            UnitKind::Inert => Capabilities::NONE,
        }
    }
}

/// A single unit on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    name: String,
    position: Vector,
    color: Color,
    kind: UnitKind,
}

impl Unit {
    /// Create a headquarters that can build `classes`.
    #[must_use]
    pub fn headquarters(color: Color, position: Vector, classes: &[UnitClass]) -> Self {
        let factory = Factory::from_classes(color, classes);
        Self::restore(
            HEADQUARTERS_NAME.to_string(),
            position,
            color,
            UnitKind::Headquarters(factory),
        )
    }

    /// Reassemble a unit from stored parts.
    pub(crate) fn restore(name: String, position: Vector, color: Color, kind: UnitKind) -> Self {
        Self {
            name,
            position,
            color,
            kind,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current position.
    #[must_use]
    pub const fn position(&self) -> Vector {
        self.position
    }

    /// Owner color, fixed at construction.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// What kind of unit this is.
    #[must_use]
    pub const fn kind(&self) -> &UnitKind {
        &self.kind
    }

    /// Capability set.
    #[must_use]
    pub const fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    /// Shorthand for `capabilities().contains(..)`.
    #[must_use]
    pub const fn has(&self, capability: Capability) -> bool {
        self.capabilities().contains(capability)
    }

    /// The factory, if this unit is a headquarters.
    #[must_use]
    pub const fn factory(&self) -> Option<&Factory> {
        match &self.kind {
            UnitKind::Headquarters(factory) => Some(factory),
            _ => None,
        }
    }

    /// Combat stats, if the unit is battle-capable.
    #[must_use]
    pub const fn stats(&self) -> Option<&BattleStats> {
        match &self.kind {
            UnitKind::Trooper { stats, .. } => Some(stats),
            _ => None,
        }
    }

    pub(crate) fn stats_mut(&mut self) -> Option<&mut BattleStats> {
        match &mut self.kind {
            UnitKind::Trooper { stats, .. } => Some(stats),
            _ => None,
        }
    }

    pub(crate) fn set_position(&mut self, position: Vector) {
        self.position = position;
    }

    /// Label used in listings ("Headquarters", "Infantry", ...).
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match &self.kind {
            UnitKind::Headquarters(_) => HEADQUARTERS_NAME,
            UnitKind::Trooper { class, .. } => class.label(),
            UnitKind::Inert => "Unit",
        }
    }

    /// Single-character map glyph.
    #[must_use]
    pub const fn glyph(&self) -> char {
        match &self.kind {
            UnitKind::Headquarters(_) => 'H',
            UnitKind::Trooper { class, .. } => class.glyph(),
            UnitKind::Inert => '?',
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\tColor: #{:06X}", self.label(), self.color)?;
        if let Some(stats) = self.stats() {
            write!(
                f,
                "\n\tHealth: {}/{}\n\tDamage: {}",
                stats.health, stats.max_health, stats.damage
            )?;
        }
        Ok(())
    }
}
