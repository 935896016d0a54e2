//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.

pub mod config;
pub mod controller;
pub mod direction;
pub mod engine;
pub mod state;
pub mod timer;

// Re-export commonly used types
pub use config::GameConfig;
pub use controller::{GameController, Phase};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use state::{GameOverReason, GameSession, Position, Snake};
pub use timer::TickTimer;
