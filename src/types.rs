// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::SnapshotError;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub ruleset: HashMap<String, Value>,
    pub timeout: u32,
    #[serde(default)]
    pub source: String,
}

/// Board state including dimensions, food, snakes, and hazards
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

/// Snake representation with all state information
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Battlesnake {
    pub id: String,
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

/// 2D coordinate on the board
///
/// Ordering is lexicographic on `(x, y)`, which the pathfinder relies on
/// for deterministic tie-breaks.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Calculates Manhattan distance between two coordinates
    pub fn manhattan(&self, other: &Coord) -> usize {
        (self.x.abs_diff(other.x) as usize).saturating_add(self.y.abs_diff(other.y) as usize)
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which candidates are built and ties are broken
    pub const PRIORITY: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Returns all possible directions
    pub fn all() -> [Direction; 4] {
        Self::PRIORITY
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}

/// Outbound move response: `{"move": "up", "shout": "..."}`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Move {
    #[serde(rename = "move")]
    pub direction: Direction,
    #[serde(rename = "shout", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}

impl GameState {
    /// Rejects snapshots the engine must never see
    pub fn validate(&self, max_board_dim: i32) -> Result<(), SnapshotError> {
        validate_snapshot(&self.board, &self.you, max_board_dim)
    }
}

/// Checks the structural assumptions the decision engine makes about a snapshot
///
/// Every search is bounded by the board area, so `max_board_dim` caps both
/// sides to keep a single turn's work small.
pub fn validate_snapshot(
    board: &Board,
    you: &Battlesnake,
    max_board_dim: i32,
) -> Result<(), SnapshotError> {
    if board.width <= 0 || board.height <= 0 {
        return Err(SnapshotError::NonPositiveDimensions {
            width: board.width,
            height: board.height,
        });
    }

    if board.width > max_board_dim || board.height > max_board_dim {
        return Err(SnapshotError::BoardTooLarge {
            width: board.width,
            height: board.height,
            max: max_board_dim,
        });
    }

    let first = match you.body.first() {
        Some(first) => *first,
        None => return Err(SnapshotError::EmptyBody(you.id.clone())),
    };

    if first != you.head {
        return Err(SnapshotError::HeadMismatch {
            head: you.head,
            first,
        });
    }

    let in_bounds = |c: &Coord| c.x >= 0 && c.y >= 0 && c.x < board.width && c.y < board.height;

    if !in_bounds(&you.head) {
        return Err(SnapshotError::HeadOutOfBounds(you.head));
    }

    if let Some(segment) = you.body.iter().find(|c| !in_bounds(c)) {
        return Err(SnapshotError::BodyOutOfBounds(*segment));
    }

    if !(0..=100).contains(&you.health) {
        return Err(SnapshotError::HealthOutOfRange(you.health));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snake(body: Vec<Coord>, health: i32) -> Battlesnake {
        Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health,
            head: body.first().copied().unwrap_or(Coord::new(0, 0)),
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    const MAX: i32 = 25;

    fn board(width: i32, height: i32) -> Board {
        Board {
            width,
            height,
            food: vec![],
            snakes: vec![],
            hazards: vec![],
        }
    }

    #[test]
    fn test_direction_round_trips_through_str() {
        for dir in Direction::all() {
            assert_eq!(dir.as_str().parse::<Direction>().unwrap(), dir);
        }
        assert_eq!("UP".parse::<Direction>().unwrap(), Direction::Up);
        assert!("north".parse::<Direction>().is_err());
    }

    #[test]
    fn test_up_increases_y() {
        let c = Coord::new(3, 3);
        assert_eq!(Direction::Up.apply(&c), Coord::new(3, 4));
        assert_eq!(Direction::Down.apply(&c), Coord::new(3, 2));
        assert_eq!(Direction::Left.apply(&c), Coord::new(2, 3));
        assert_eq!(Direction::Right.apply(&c), Coord::new(4, 3));
    }

    #[test]
    fn test_move_serializes_like_the_api() {
        let mv = Move {
            direction: Direction::Left,
            message: Some("hi".to_string()),
        };
        let value = serde_json::to_value(&mv).unwrap();
        assert_eq!(value["move"], "left");
        assert_eq!(value["shout"], "hi");

        let silent = Move {
            direction: Direction::Up,
            message: None,
        };
        let value = serde_json::to_value(&silent).unwrap();
        assert!(value.get("shout").is_none());
    }

    #[test]
    fn test_validate_accepts_well_formed_snapshot() {
        let you = snake(vec![Coord::new(1, 1), Coord::new(1, 0)], 90);
        assert_eq!(validate_snapshot(&board(11, 11), &you, MAX), Ok(()));
    }

    #[test]
    fn test_validate_rejects_bad_snapshots() {
        let you = snake(vec![Coord::new(1, 1)], 90);
        assert!(matches!(
            validate_snapshot(&board(0, 11), &you, MAX),
            Err(SnapshotError::NonPositiveDimensions { .. })
        ));

        let empty = snake(vec![], 90);
        assert!(matches!(
            validate_snapshot(&board(11, 11), &empty, MAX),
            Err(SnapshotError::EmptyBody(_))
        ));

        let outside = snake(vec![Coord::new(11, 3)], 90);
        assert_eq!(
            validate_snapshot(&board(11, 11), &outside, MAX),
            Err(SnapshotError::HeadOutOfBounds(Coord::new(11, 3)))
        );

        let starving = snake(vec![Coord::new(1, 1)], 101);
        assert_eq!(
            validate_snapshot(&board(11, 11), &starving, MAX),
            Err(SnapshotError::HealthOutOfRange(101))
        );

        let mut twisted = snake(vec![Coord::new(1, 1)], 50);
        twisted.head = Coord::new(2, 2);
        assert!(matches!(
            validate_snapshot(&board(11, 11), &twisted, MAX),
            Err(SnapshotError::HeadMismatch { .. })
        ));

        let dangling = snake(vec![Coord::new(0, 0), Coord::new(0, -1)], 50);
        assert_eq!(
            validate_snapshot(&board(11, 11), &dangling, MAX),
            Err(SnapshotError::BodyOutOfBounds(Coord::new(0, -1)))
        );
    }

    #[test]
    fn test_validate_rejects_oversized_board() {
        let you = snake(vec![Coord::new(1, 1)], 90);
        assert_eq!(
            validate_snapshot(&board(100_000, 100_000), &you, MAX),
            Err(SnapshotError::BoardTooLarge {
                width: 100_000,
                height: 100_000,
                max: MAX,
            })
        );
        assert!(matches!(
            validate_snapshot(&board(11, 26), &you, MAX),
            Err(SnapshotError::BoardTooLarge { .. })
        ));
        assert_eq!(validate_snapshot(&board(25, 25), &you, MAX), Ok(()));
    }

    #[test]
    fn test_manhattan_does_not_overflow_at_extremes() {
        let near = Coord::new(5, 7);
        assert_eq!(near.manhattan(&Coord::new(2, 3)), 7);
        assert_eq!(
            near.manhattan(&Coord::new(6, i32::MIN)),
            1 + (7i64 - i32::MIN as i64) as usize
        );
        assert_eq!(
            Coord::new(i32::MIN, i32::MIN).manhattan(&Coord::new(i32::MAX, i32::MAX)),
            2 * u32::MAX as usize
        );
    }
}
