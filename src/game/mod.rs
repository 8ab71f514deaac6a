//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Timing lives in the session module; this code only advances state when asked.

pub mod action;
pub mod config;
pub mod engine;
pub mod placement;
pub mod rules;
pub mod state;
pub mod steering;

// Re-export commonly used types
pub use action::{Axis, Direction, Sign};
pub use config::{BoardSize, CELL_SIZE, GameConfig, INITIAL_SNAKE_LENGTH, TickSpeed};
pub use engine::{GameEngine, StepInfo, StepResult};
pub use placement::{CellFilter, ObstacleFilter, TargetFilter};
pub use rules::RuleVariant;
pub use state::{Cell, CollisionType, GameState, Snake};
pub use steering::{Steer, Steering};
