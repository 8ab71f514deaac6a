//! Repeating timers driving the idle flicker and the move tick

use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval, interval_at};

/// Full hide/show cycle of the idle flicker
pub const FLICKER_PERIOD: Duration = Duration::from_millis(1000);

/// A scheduled action that is due
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Start of a flicker cycle: hide the snake
    FlickerHide,
    /// Half a cycle later: draw it again
    FlickerShow,
    /// Advance the game one step
    Move,
}

enum Armed {
    Stopped,
    Idle { timer: Interval, hidden: bool },
    Moving(Interval),
}

/// Owns at most one repeating action at a time.
///
/// Arming drops whatever was armed before, and a dropped timer never fires,
/// so a tick from a finished run cannot reach a fresh one.
pub struct TickScheduler {
    armed: Armed,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self {
            armed: Armed::Stopped,
        }
    }

    /// Arm the pre-start flicker; the first hide is due immediately
    pub fn arm_idle(&mut self) {
        let mut timer = interval(FLICKER_PERIOD / 2);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.armed = Armed::Idle {
            timer,
            hidden: false,
        };
    }

    /// Arm the move tick; the first step is due one `period` from now
    pub fn arm_move(&mut self, period: Duration) {
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.armed = Armed::Moving(timer);
    }

    pub fn stop(&mut self) {
        self.armed = Armed::Stopped;
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.armed, Armed::Idle { .. })
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.armed, Armed::Moving(_))
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.armed, Armed::Stopped)
    }

    /// Wait for the next due action. Pends forever while stopped.
    ///
    /// Cancel safe: dropping the future before it resolves loses no tick.
    pub async fn next(&mut self) -> Tick {
        match &mut self.armed {
            Armed::Stopped => std::future::pending().await,
            Armed::Idle { timer, hidden } => {
                timer.tick().await;
                *hidden = !*hidden;
                if *hidden {
                    Tick::FlickerHide
                } else {
                    Tick::FlickerShow
                }
            }
            Armed::Moving(timer) => {
                timer.tick().await;
                Tick::Move
            }
        }
    }
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new()
    }
}
