// Snapshot validation errors
//
// The decision engine assumes a well-formed snapshot. The transport layer
// checks these before handing a request to the engine.

use thiserror::Error;

use crate::types::Coord;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("board dimensions must be positive, got {width}x{height}")]
    NonPositiveDimensions { width: i32, height: i32 },

    #[error("board {width}x{height} exceeds the {max}x{max} limit")]
    BoardTooLarge { width: i32, height: i32, max: i32 },

    #[error("snake {0} has an empty body")]
    EmptyBody(String),

    #[error("head ({}, {}) does not match first body segment ({}, {})", .head.x, .head.y, .first.x, .first.y)]
    HeadMismatch { head: Coord, first: Coord },

    #[error("head ({}, {}) is outside the board", .0.x, .0.y)]
    HeadOutOfBounds(Coord),

    #[error("body segment ({}, {}) is outside the board", .0.x, .0.y)]
    BodyOutOfBounds(Coord),

    #[error("health {0} is outside 0..=100")]
    HealthOutOfRange(i32),
}
