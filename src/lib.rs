//! Snake Arcade - single-screen Snake on a terminal grid
//!
//! This library provides:
//! - Core game logic and tick scheduling (game module)
//! - Keyboard and control-pad input (input module)
//! - TUI rendering (render module)
//! - Per-run statistics (metrics module)
//! - The interactive terminal loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
