//! Grid Snake - a terminal snake game with selectable rule variants
//!
//! This library provides:
//! - Core game logic: movement, growth, placement and collision rules (game module)
//! - Run lifecycle and timing around the core (session module)
//! - TUI rendering (render module) and key mapping (input module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
