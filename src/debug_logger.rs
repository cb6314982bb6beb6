// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's snapshot and decision is
// written as one line of a JSONL file that the replay tool can read back.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::selector::Decision;
use crate::types::{Battlesnake, Board};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    chosen_move: String,
    mode: String,
    reason: String,
    board: Board,
    you: Battlesnake,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a decision asynchronously (fire-and-forget)
    ///
    /// Spawns a tokio task that writes to the file without blocking. The
    /// handle is returned for callers that need to wait for the write.
    pub fn log_move(
        &self,
        turn: i32,
        board: Board,
        you: Battlesnake,
        decision: &Decision,
    ) -> Option<JoinHandle<()>> {
        if !self.enabled {
            return None;
        }

        let file_handle = self.file.clone();
        let entry = DebugLogEntry {
            turn,
            chosen_move: decision.direction.as_str().to_string(),
            mode: decision.mode.as_str().to_string(),
            reason: decision.reason.as_str().to_string(),
            board,
            you,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        Some(tokio::spawn(async move {
            Self::write_entry(file_handle, entry).await;
        }))
    }

    /// Internal async function that performs the actual file write
    async fn write_entry(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::{Mode, Reason};
    use crate::types::{Coord, Direction};

    fn decision() -> Decision {
        Decision {
            direction: Direction::Left,
            mode: Mode::Stall,
            reason: Reason::TailPath,
            message: None,
        }
    }

    fn you() -> Battlesnake {
        Battlesnake {
            id: "me".to_string(),
            name: "me".to_string(),
            health: 90,
            body: vec![Coord::new(1, 1), Coord::new(1, 0)],
            head: Coord::new(1, 1),
            length: 2,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn board() -> Board {
        Board {
            height: 5,
            width: 5,
            food: vec![],
            snakes: vec![you()],
            hazards: vec![],
        }
    }

    #[tokio::test]
    async fn test_disabled_logger_spawns_nothing() {
        let logger = DebugLogger::disabled();
        assert!(!logger.is_enabled());
        assert!(logger.log_move(1, board(), you(), &decision()).is_none());
    }

    #[tokio::test]
    async fn test_entries_are_written_as_json_lines() {
        let path = std::env::temp_dir().join(format!(
            "cautious_snake_debug_{}.jsonl",
            std::process::id()
        ));
        let path_str = path.to_string_lossy().to_string();

        let logger = DebugLogger::new(true, &path_str).await;
        assert!(logger.is_enabled());

        for turn in 0..3 {
            let handle = logger
                .log_move(turn, board(), you(), &decision())
                .expect("enabled logger spawns a task");
            handle.await.expect("write task should finish");
        }

        let contents = tokio::fs::read_to_string(&path).await.expect("log file exists");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["turn"], 0);
        assert_eq!(first["chosen_move"], "left");
        assert_eq!(first["mode"], "stall");
        assert_eq!(first["reason"], "tail_path");
        assert_eq!(first["you"]["id"], "me");

        let _ = tokio::fs::remove_file(&path).await;
    }
}
