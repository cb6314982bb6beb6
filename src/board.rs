// Board model: one immutable, bounded view of a snapshot
//
// Rebuilt from scratch every turn. Nothing here survives between requests.

use std::collections::HashSet;

use crate::types::{Battlesnake, Board, Coord, Direction};

/// Our own snake, reduced to what the engine needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfState {
    pub head: Coord,
    /// Head first
    pub body: Vec<Coord>,
    pub tail: Coord,
    pub health: i32,
}

impl SelfState {
    pub fn from_snake(snake: &Battlesnake) -> Self {
        let tail = snake.body.last().copied().unwrap_or(snake.head);
        SelfState {
            head: snake.head,
            body: snake.body.clone(),
            tail,
            health: snake.health,
        }
    }

    /// True when the last two segments share a cell, i.e. we ate last turn
    /// and the tail stays put for one more move
    pub fn has_stacked_tail(&self) -> bool {
        let n = self.body.len();
        n >= 2 && self.body[n - 1] == self.body[n - 2]
    }
}

/// Bounded grid with occupancy and food sets
#[derive(Debug, Clone)]
pub struct BoardModel {
    width: i32,
    height: i32,
    occupied: HashSet<Coord>,
    food: HashSet<Coord>,
}

impl BoardModel {
    /// Empty board of the given size
    pub fn new(width: i32, height: i32) -> Self {
        BoardModel {
            width,
            height,
            occupied: HashSet::new(),
            food: HashSet::new(),
        }
    }

    /// Adds cells to the occupancy set while building a board
    pub fn with_occupied<I: IntoIterator<Item = Coord>>(mut self, cells: I) -> Self {
        self.occupied.extend(cells);
        self
    }

    /// Adds cells to the food set while building a board
    pub fn with_food<I: IntoIterator<Item = Coord>>(mut self, cells: I) -> Self {
        self.food.extend(cells);
        self
    }

    /// Builds the model for one turn
    ///
    /// Every snake body on the board is an obstacle. Our own tail is removed
    /// from the occupancy set when `own_tail_vacates` is set and the tail is
    /// not stacked, since it moves out of the way as we move in. Food outside
    /// the board is dropped.
    pub fn from_snapshot(board: &Board, you: &SelfState, own_tail_vacates: bool) -> Self {
        let mut occupied: HashSet<Coord> = board
            .snakes
            .iter()
            .flat_map(|snake| snake.body.iter().copied())
            .collect();
        occupied.extend(you.body.iter().copied());

        if own_tail_vacates && !you.has_stacked_tail() {
            occupied.remove(&you.tail);
        }

        let bounds = BoardModel::new(board.width, board.height);
        let food: Vec<Coord> = board
            .food
            .iter()
            .copied()
            .filter(|&cell| bounds.in_bounds(cell))
            .collect();

        bounds.with_occupied(occupied).with_food(food)
    }

    /// Number of cells on the board
    pub fn area(&self) -> usize {
        (self.width.max(0) as usize) * (self.height.max(0) as usize)
    }

    /// Pure coordinate arithmetic; the result may be off the board
    pub fn neighbor(&self, pos: Coord, direction: Direction) -> Coord {
        direction.apply(&pos)
    }

    pub fn in_bounds(&self, pos: Coord) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn is_occupied(&self, pos: Coord) -> bool {
        self.occupied.contains(&pos)
    }

    pub fn is_food(&self, pos: Coord) -> bool {
        self.food.contains(&pos)
    }

    /// In-bounds and not part of any body
    pub fn is_free(&self, pos: Coord) -> bool {
        self.in_bounds(pos) && !self.is_occupied(pos)
    }

    /// Food cells in `(x, y)` order
    pub fn food_sorted(&self) -> Vec<Coord> {
        let mut food: Vec<Coord> = self.food.iter().copied().collect();
        food.sort();
        food
    }

    pub fn occupied_count(&self) -> usize {
        self.occupied.len()
    }
}
