// Snapshot builders shared by the integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use cautious_snake::types::{Battlesnake, Board, Coord, Game, GameState};

pub fn c(x: i32, y: i32) -> Coord {
    Coord { x, y }
}

pub fn snake(id: &str, health: i32, body: Vec<Coord>) -> Battlesnake {
    Battlesnake {
        id: id.to_string(),
        name: id.to_string(),
        health,
        head: body[0],
        length: body.len() as i32,
        body,
        latency: "0".to_string(),
        shout: None,
    }
}

/// Board whose first snake is `you`
pub fn board(width: i32, height: i32, you: &Battlesnake, others: Vec<Battlesnake>, food: Vec<Coord>) -> Board {
    let mut snakes = vec![you.clone()];
    snakes.extend(others);
    Board {
        height,
        width,
        food,
        snakes,
        hazards: vec![],
    }
}

pub fn game() -> Game {
    Game {
        id: "test-game".to_string(),
        ruleset: HashMap::new(),
        timeout: 500,
        source: "test".to_string(),
    }
}

pub fn game_state(turn: i32, board: Board, you: Battlesnake) -> GameState {
    GameState {
        game: game(),
        turn,
        board,
        you,
    }
}
