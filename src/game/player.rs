//! Player records and turn rotation.

use rand::Rng;

use crate::game::{Color, COLOR_MASK};

/// Money every player starts with.
pub const STARTING_MONEY: i64 = 1000;

/// State for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    /// Owner color shared by every unit this player controls.
    pub color: Color,
    /// Marks the player as computer-controlled. Nothing acts on it yet.
    pub ai: bool,
    /// Money balance. Stored only.
    pub money: i64,
}

impl Player {
    /// Create a new player with the starting balance.
    #[must_use]
    pub const fn new(color: Color, ai: bool) -> Self {
        Self {
            color,
            ai,
            money: STARTING_MONEY,
        }
    }

    /// Create a player with a uniformly random 24-bit color.
    ///
    /// Colors are not checked for collisions.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, ai: bool) -> Self {
        Self::new(rng.random_range(0..=COLOR_MASK), ai)
    }
}

/// Ordered list of players with a rotating "current player" pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    current: usize,
}

impl PlayerRegistry {
    /// Create a registry; player 0 moves first.
    ///
    /// Returns `None` if `players` is empty.
    #[must_use]
    pub fn new(players: Vec<Player>) -> Option<Self> {
        Self::with_current(players, 0)
    }

    /// Create a registry with an explicit current player.
    ///
    /// Returns `None` if `players` is empty or `current` is out of range.
    #[must_use]
    pub fn with_current(players: Vec<Player>, current: usize) -> Option<Self> {
        if current >= players.len() {
            return None;
        }
        Some(Self { players, current })
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current(&self) -> &Player {
        &self.players[self.current]
    }

    /// Index of the player whose turn it is.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Pass the turn to the next player, wrapping around.
    pub fn advance(&mut self) {
        self.current = (self.current + 1) % self.players.len();
    }

    /// Get a player by index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Player> {
        self.players.get(index)
    }

    /// Number of players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Always false: a registry holds at least one player.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Iterate over players in turn order.
    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    /// Index of the first player with the given color.
    #[must_use]
    pub fn owner_of(&self, color: Color) -> Option<usize> {
        self.players.iter().position(|p| p.color == color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn registry(n: u32) -> PlayerRegistry {
        PlayerRegistry::new((0..n).map(|i| Player::new(i, i > 0)).collect()).unwrap()
    }

    #[test]
    fn test_player_creation() {
        let player = Player::new(0xABCDEF, false);
        assert_eq!(player.color, 0xABCDEF);
        assert!(!player.ai);
        assert_eq!(player.money, STARTING_MONEY);
    }

    #[test]
    fn test_random_color_is_24_bit() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(Player::random(&mut rng, true).color <= COLOR_MASK);
        }
    }

    #[test]
    fn test_registry_rejects_empty() {
        assert!(PlayerRegistry::new(Vec::new()).is_none());
        assert!(PlayerRegistry::with_current(vec![Player::new(1, false)], 1).is_none());
    }

    #[test]
    fn test_advance_wraps() {
        let mut players = registry(4);
        assert_eq!(players.current_index(), 0);
        for expected in [1, 2, 3, 0, 1] {
            players.advance();
            assert_eq!(players.current_index(), expected);
        }
        assert_eq!(players.current().color, 1);
    }

    #[test]
    fn test_owner_of() {
        let players = registry(2);
        assert_eq!(players.owner_of(1), Some(1));
        assert_eq!(players.owner_of(42), None);
    }
}
