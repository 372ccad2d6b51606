//! Spatial index of unit occupancy.

use crate::error::ConsistencyFault;
use crate::game::{UnitId, Vector, NEIGHBOR_OFFSETS};

/// The game board: a `width × height` matrix of cells.
///
/// Each cell lists the ids of the units standing on it in arrival order.
/// The order is stable and doubles as the index used to pick one unit out
/// of a stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width of the board in cells.
    width: u16,
    /// Height of the board in cells.
    height: u16,
    /// Cells stored in row-major order.
    cells: Vec<Vec<UnitId>>,
}

impl Grid {
    /// Create an empty grid.
    ///
    /// Returns `None` if width or height is zero.
    #[must_use]
    pub fn new(width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        let size = usize::from(width) * usize::from(height);
        Some(Self {
            width,
            height,
            cells: vec![Vec::new(); size],
        })
    }

    /// Rebuild a grid from rows of cells (as stored on disk).
    ///
    /// Returns `None` if there are no rows, rows differ in length, or a
    /// dimension does not fit in `u16`.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Vec<UnitId>>>) -> Option<Self> {
        let height = u16::try_from(rows.len()).ok()?;
        let width = u16::try_from(rows.first()?.len()).ok()?;
        if width == 0 || rows.iter().any(|row| row.len() != usize::from(width)) {
            return None;
        }

        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Copy the cells out as rows, top to bottom.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<Vec<UnitId>>> {
        self.cells
            .chunks(usize::from(self.width))
            .map(<[Vec<UnitId>]>::to_vec)
            .collect()
    }

    /// Get the width of the board.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Get the height of the board.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Check if a position lies on the board.
    #[must_use]
    pub fn in_bounds(&self, pos: Vector) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < i32::from(self.width) && pos.y < i32::from(self.height)
    }

    fn index(&self, pos: Vector) -> Option<usize> {
        if !self.in_bounds(pos) {
            return None;
        }
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        Some(y * usize::from(self.width) + x)
    }

    /// Append a unit to a cell.
    ///
    /// The caller is responsible for bounds and for not placing a unit twice.
    pub fn place(&mut self, id: UnitId, pos: Vector) {
        debug_assert!(self.in_bounds(pos), "place({id}) out of bounds at {pos}");
        if let Some(idx) = self.index(pos) {
            self.cells[idx].push(id);
        }
    }

    /// Remove the first occurrence of a unit from a cell.
    ///
    /// # Errors
    ///
    /// Returns a [`ConsistencyFault`] if the unit is not listed in that cell.
    pub fn remove(&mut self, id: UnitId, pos: Vector) -> Result<(), ConsistencyFault> {
        debug_assert!(self.in_bounds(pos), "remove({id}) out of bounds at {pos}");
        let fault = ConsistencyFault {
            unit: id,
            position: pos,
        };
        let idx = self.index(pos).ok_or(fault)?;
        let cell = &mut self.cells[idx];
        let slot = cell.iter().position(|&other| other == id).ok_or(fault)?;
        cell.remove(slot);
        Ok(())
    }

    /// Units in a cell, in arrival order. Empty for off-board positions.
    #[must_use]
    pub fn occupants(&self, pos: Vector) -> &[UnitId] {
        match self.index(pos) {
            Some(idx) => &self.cells[idx],
            None => &[],
        }
    }

    /// In-bounds cells among the eight neighbors of `pos`.
    #[must_use]
    pub fn neighbors(&self, pos: Vector) -> Vec<Vector> {
        NEIGHBOR_OFFSETS
            .iter()
            .map(|offset| pos + *offset)
            .filter(|candidate| self.in_bounds(*candidate))
            .collect()
    }

    /// Iterate over all positions and their occupants.
    pub fn iter(&self) -> impl Iterator<Item = (Vector, &[UnitId])> {
        let width = usize::from(self.width);
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            // Dimensions are u16, so both fit in i32.
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let pos = Vector::new((idx % width) as i32, (idx / width) as i32);
            (pos, cell.as_slice())
        })
    }
}
