//! Integer 2D vectors for positions and movement deltas.

use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A position on the board or a displacement between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Vector {
    /// X coordinate (column).
    pub x: i32,
    /// Y coordinate (row).
    pub y: i32,
}

/// Offsets to the eight surrounding cells, in row-major order.
pub const NEIGHBOR_OFFSETS: [Vector; 8] = [
    Vector::new(-1, -1),
    Vector::new(0, -1),
    Vector::new(1, -1),
    Vector::new(-1, 0),
    Vector::new(1, 0),
    Vector::new(-1, 1),
    Vector::new(0, 1),
    Vector::new(1, 1),
];

impl Vector {
    /// Create a new vector.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev (king-move) distance to another position.
    #[must_use]
    pub fn chebyshev(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Whether this delta is a single 8-directional step or no step at all.
    #[must_use]
    pub const fn is_step(self) -> bool {
        self.x >= -1 && self.x <= 1 && self.y >= -1 && self.y <= 1
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Self) -> Self::Output {
        Vector::new(self.x + other.x, self.y + other.y)
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
