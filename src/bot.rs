// Welcome to
// __________         __    __  .__                               __
// \______   \_____ _/  |__/  |_|  |   ____   ______ ____ _____  |  | __ ____
//  |    |  _/\__  \\   __\   __\  | _/ __ \ /  ___//    \\__  \ |  |/ // __ \
//  |    |   \ / __ \|  |  |  | |  |_\  ___/ \___ \|   |  \/ __ \|    <\  ___/
//  |________/(______/__|  |__| |____/\_____>______>___|__(______/__|__\\_____>
//
// The Bot binds the stateless decision engine to the API lifecycle:
// appearance, start/end notifications, and one budgeted decision per turn.
// For more info see docs.battlesnake.com

use log::{error, info, warn};
use serde_json::{json, Value};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::selector::{Decision, MoveSelector};
use crate::types::{Battlesnake, Board, Game};

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    /// Creates a Bot that records every decision to a JSONL debug log
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Runs the decision pipeline synchronously
    pub fn decide(&self, board: &Board, you: &Battlesnake, turn: i32) -> Decision {
        MoveSelector::new(&self.config).decide(board, you, turn)
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The pipeline runs on tokio's blocking pool under the response budget.
    /// If it does not finish in time, the danger-only emergency decision is
    /// sent instead so the server always answers.
    ///
    /// # Arguments
    /// * `game` - Current game metadata (its timeout tightens our budget)
    /// * `turn` - Current turn number
    /// * `board` - Current board state
    /// * `you` - Your snake's current state
    ///
    /// # Returns
    /// * `Value` - JSON response containing the chosen move and shout
    pub async fn get_move(&self, game: &Game, turn: &i32, board: &Board, you: &Battlesnake) -> Value {
        let start_time = Instant::now();
        let turn = *turn;

        info!("Turn {}: Computing move", turn);

        let budget_ms = self.config.timing.budget_for(game.timeout);
        let budget = Duration::from_millis(budget_ms);

        // Clone data needed for the blocking task
        let task_board = board.clone();
        let task_you = you.clone();
        let config = self.config.clone();

        let task = tokio::task::spawn_blocking(move || {
            MoveSelector::new(&config).decide(&task_board, &task_you, turn)
        });

        let decision = match tokio::time::timeout(budget, task).await {
            Ok(Ok(decision)) => decision,
            Ok(Err(e)) => {
                error!("Turn {}: decision task failed: {}", turn, e);
                MoveSelector::new(&self.config).emergency(board, you)
            }
            Err(_) => {
                warn!(
                    "Turn {}: decision exceeded {}ms budget, using emergency move",
                    turn, budget_ms
                );
                MoveSelector::new(&self.config).emergency(board, you)
            }
        };

        info!(
            "Turn {}: Chose {} (mode: {}, reason: {}, time: {}ms)",
            turn,
            decision.direction.as_str(),
            decision.mode,
            decision.reason,
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(turn, board.clone(), you.clone(), &decision);

        match serde_json::to_value(decision.to_move()) {
            Ok(value) => value,
            Err(e) => {
                error!("Turn {}: failed to serialize move: {}", turn, e);
                json!({ "move": decision.direction.as_str() })
            }
        }
    }
}
