//! Game setup parameters.

/// Default board width.
pub const DEFAULT_WIDTH: u16 = 20;

/// Default board height.
pub const DEFAULT_HEIGHT: u16 = 20;

/// Smallest board edge. Every corner headquarters needs a free neighbor.
pub const MIN_DIMENSION: u16 = 2;

/// Largest board edge accepted for a new game.
pub const MAX_DIMENSION: u16 = 1024;

/// Configuration for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Number of players. Clamped to 2 or 4.
    pub players: usize,
    /// Board width in cells.
    pub width: u16,
    /// Board height in cells.
    pub height: u16,
    /// Seed for player colors and spawn placement (`None` = OS entropy).
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 2,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Player count snapped to the supported values: below 3 is 2, above is 4.
    #[must_use]
    pub const fn player_count(&self) -> usize {
        if self.players <= 2 { 2 } else { 4 }
    }

    /// Board dimensions clamped to `[MIN_DIMENSION, MAX_DIMENSION]`.
    #[must_use]
    pub fn dimensions(&self) -> (u16, u16) {
        (
            self.width.clamp(MIN_DIMENSION, MAX_DIMENSION),
            self.height.clamp(MIN_DIMENSION, MAX_DIMENSION),
        )
    }
}
