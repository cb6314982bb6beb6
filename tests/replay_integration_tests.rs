// Integration tests for the replay tool
//
// A short game is played through the Bot with debug logging on, then the
// resulting JSONL log is replayed both through the library and through the
// compiled `replay` binary. The engine is deterministic, so every logged
// move must be reproduced.

mod common;

use std::path::PathBuf;
use std::process::Command;

use cautious_snake::bot::Bot;
use cautious_snake::config::Config;
use cautious_snake::debug_logger::DebugLogger;
use cautious_snake::replay::ReplayEngine;
use cautious_snake::selector::MoveSelector;
use cautious_snake::types::{Battlesnake, Coord, Direction};
use common::{board, c, game, snake};

fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("{}_{}.jsonl", name, std::process::id()))
}

/// Advances our snake one step without growing
fn step(you: &Battlesnake, dir: Direction) -> Battlesnake {
    let head = dir.apply(&you.head);
    let mut body: Vec<Coord> = vec![head];
    body.extend(you.body[..you.body.len() - 1].iter().copied());
    snake(&you.id, you.health - 1, body)
}

/// Plays `turns` turns on an empty 11x11 board and logs every decision
async fn record_game(path: &PathBuf, turns: i32) -> Vec<Direction> {
    let config = Config::default_hardcoded();
    let logger = DebugLogger::new(true, &path.to_string_lossy()).await;
    let selector_config = config.clone();
    let bot = Bot::with_debug_logger(config, logger.clone());

    let mut you = snake("me", 40, vec![c(5, 5), c(5, 4), c(5, 3), c(5, 2)]);
    let mut moves = Vec::new();

    for turn in 0..turns {
        let b = board(11, 11, &you, vec![], vec![c(9, 9)]);
        let response = bot.get_move(&game(), &turn, &b, &you).await;
        let dir: Direction = response["move"].as_str().unwrap().parse().unwrap();

        // The same decision the bot logged, written again so the test can
        // wait for the write to land
        let decision = MoveSelector::new(&selector_config).decide(&b, &you, turn);
        assert_eq!(decision.direction, dir);

        moves.push(dir);
        you = step(&you, dir);
    }

    // Flush ordering: wait on one last write behind the bot's writes
    let last = board(11, 11, &you, vec![], vec![]);
    let marker = MoveSelector::new(&selector_config).decide(&last, &you, turns);
    if let Some(handle) = logger.log_move(turns, last, you.clone(), &marker) {
        handle.await.unwrap();
    }

    moves
}

#[tokio::test]
async fn test_logged_game_replays_exactly() {
    let path = temp_log("cautious_snake_replay_lib");
    let moves = record_game(&path, 12).await;
    assert_eq!(moves.len(), 12);

    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    let entries = engine.load_log_file(&path).expect("log should load");
    assert_eq!(entries.len(), 13);

    let results = engine.replay_all(&entries);
    let stats = engine.generate_stats(&results);
    assert_eq!(stats.total_turns, 13);
    assert_eq!(stats.mismatches, 0);
    assert!((stats.match_rate - 100.0).abs() < f64::EPSILON);

    // Health starts at 40 and never drops to the threshold in 12 turns
    assert_eq!(stats.seek_food_turns, 0);
    assert_eq!(stats.fallback_turns, 0);

    let _ = std::fs::remove_file(&path);
}

#[tokio::test]
async fn test_replay_binary_reports_all_matches() {
    let path = temp_log("cautious_snake_replay_bin");
    let moves = record_game(&path, 6).await;

    let output = Command::new(env!("CARGO_BIN_EXE_replay"))
        .arg(&path)
        .arg("--all")
        .arg("--strict")
        .output()
        .expect("Failed to execute replay binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "replay failed: {}\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("REPLAY REPORT"));
    assert!(stdout.contains("Mismatches:     0"));

    let expected = format!("0:{}", moves[0].as_str());
    let validate = Command::new(env!("CARGO_BIN_EXE_replay"))
        .arg(&path)
        .arg("--validate")
        .arg(&expected)
        .output()
        .expect("Failed to execute replay binary");
    assert!(validate.status.success());

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_missing_log_file_is_an_error() {
    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    assert!(engine.load_log_file("does/not/exist.jsonl").is_err());
}
