//! Plain-text board renderer.

use crate::game::{GameState, Vector};

/// Glyph for an empty cell.
const EMPTY: char = '_';

/// Render the rectangle spanned by two corners, one line per row.
///
/// Corners may be given in any order and are clamped to the board. Each
/// cell shows the glyph of its first occupant (`H`, `I`, `V`, `?`) or `_`.
///
/// ```text
/// H _ _ _
/// _ I _ _
/// _ _ _ V
/// _ _ _ H
/// ```
#[must_use]
pub fn render_region(state: &GameState, a: Vector, b: Vector) -> String {
    let max_x = i32::from(state.width()) - 1;
    let max_y = i32::from(state.height()) - 1;

    let (x1, x2) = (a.x.min(b.x).clamp(0, max_x), a.x.max(b.x).clamp(0, max_x));
    let (y1, y2) = (a.y.min(b.y).clamp(0, max_y), a.y.max(b.y).clamp(0, max_y));

    let mut output = String::new();
    for y in y1..=y2 {
        let row: Vec<String> = (x1..=x2)
            .map(|x| cell_glyph(state, Vector::new(x, y)).to_string())
            .collect();
        output.push_str(&row.join(" "));
        output.push('\n');
    }
    output
}

/// Render the whole board.
#[must_use]
pub fn render_board(state: &GameState) -> String {
    let far = Vector::new(i32::from(state.width()) - 1, i32::from(state.height()) - 1);
    render_region(state, Vector::new(0, 0), far)
}

fn cell_glyph(state: &GameState, pos: Vector) -> char {
    state
        .grid()
        .occupants(pos)
        .first()
        .and_then(|id| state.unit(*id))
        .map_or(EMPTY, |unit| unit.glyph())
}
