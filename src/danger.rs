// Danger classification for a single candidate cell
//
// Lethal: off the board or onto a body. Trapped: every exit from the cell is
// lethal under the same occupancy (one ply beyond the immediate step).

use crate::board::BoardModel;
use crate::types::{Coord, Direction};

/// What moving onto a cell would hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Danger {
    Safe,
    Body,
    Wall,
}

impl Danger {
    pub fn is_lethal(&self) -> bool {
        !matches!(self, Danger::Safe)
    }
}

/// Classifies a cell as safe, a body collision, or a wall collision
pub fn classify(pos: Coord, board: &BoardModel) -> Danger {
    if !board.in_bounds(pos) {
        Danger::Wall
    } else if board.is_occupied(pos) {
        Danger::Body
    } else {
        Danger::Safe
    }
}

pub fn is_lethal(pos: Coord, board: &BoardModel) -> bool {
    classify(pos, board).is_lethal()
}

/// True if all four neighbors of `pos` are lethal
pub fn is_trapped(pos: Coord, board: &BoardModel) -> bool {
    Direction::PRIORITY
        .iter()
        .all(|&dir| is_lethal(board.neighbor(pos, dir), board))
}

/// Number of non-lethal neighbors of `pos`
pub fn exit_count(pos: Coord, board: &BoardModel) -> usize {
    Direction::PRIORITY
        .iter()
        .filter(|&&dir| !is_lethal(board.neighbor(pos, dir), board))
        .count()
}
