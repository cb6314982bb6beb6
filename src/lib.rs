// Library exports for the Battlesnake bot
// The server binary, the replay tool and the integration tests all use the
// decision engine through this crate.

pub mod board;
pub mod bot;
pub mod config;
pub mod danger;
pub mod debug_logger;
pub mod error;
pub mod handler;
pub mod pathfinder;
pub mod replay;
pub mod selector;
pub mod space;
pub mod types;
