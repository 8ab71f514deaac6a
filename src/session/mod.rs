//! Run lifecycle: timing, start, loss and restart around the game core

pub mod controller;
pub mod scheduler;

pub use controller::{DirectionResponse, Phase, RunReport, Session};
pub use scheduler::{FLICKER_PERIOD, Tick, TickScheduler};
