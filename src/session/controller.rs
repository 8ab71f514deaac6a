use anyhow::Result;
use tokio::time::Instant;

use super::scheduler::{Tick, TickScheduler};
use crate::game::{CollisionType, Direction, GameConfig, GameEngine, GameState, Steer, Steering};
use crate::metrics::GameMetrics;

/// Where the current run is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the first direction key; the snake flickers
    Idle,
    /// The move tick is armed and the snake is moving
    Running,
}

/// Outcome of a finished run, surfaced to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub score: u32,
    pub best: u32,
    pub cause: CollisionType,
}

/// Response to a direction key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionResponse {
    /// The key started the run
    Started,
    /// The key was offered to the steering gate
    Steered(Steer),
}

/// Owns one player's game: the state, the engine advancing it, the steering
/// gate and the scheduler timing it.
pub struct Session {
    engine: GameEngine,
    state: GameState,
    steering: Steering,
    scheduler: TickScheduler,
    metrics: GameMetrics,
    phase: Phase,
    body_visible: bool,
    last_run: Option<RunReport>,
}

impl Session {
    /// Create a session in the idle phase. Must be called inside a tokio
    /// runtime since it arms the flicker timer.
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut engine = GameEngine::new(config);
        let state = engine.reset()?;
        let mut scheduler = TickScheduler::new();
        scheduler.arm_idle();

        Ok(Self {
            engine,
            state,
            steering: Steering::new(),
            scheduler,
            metrics: GameMetrics::new(),
            phase: Phase::Idle,
            body_visible: true,
            last_run: None,
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// False during the hidden half of the idle flicker
    pub fn body_visible(&self) -> bool {
        self.body_visible
    }

    pub fn last_run(&self) -> Option<&RunReport> {
        self.last_run.as_ref()
    }

    /// Refresh the run clock; it stays at zero while idle
    pub fn update_clock(&mut self) {
        self.metrics.tick_clock(Instant::now());
    }

    /// Wait for the scheduler's next due action
    pub async fn next_tick(&mut self) -> Tick {
        self.scheduler.next().await
    }

    /// Handle a direction key: start the run when idle, steer otherwise
    pub fn direction_input(&mut self, direction: Direction) -> DirectionResponse {
        match self.phase {
            Phase::Idle => {
                self.start_run();
                DirectionResponse::Started
            }
            Phase::Running => {
                DirectionResponse::Steered(self.steering.request(&mut self.state.snake, direction))
            }
        }
    }

    fn start_run(&mut self) {
        let config = self.engine.config();
        self.scheduler.arm_move(config.speed.tick_interval());
        self.phase = Phase::Running;
        self.body_visible = true;
        self.metrics.start_clock(Instant::now());

        tracing::info!(
            board = config.extent(),
            speed = config.speed.as_str(),
            variant = config.variant.as_str(),
            "run started"
        );
    }

    /// Apply a due action. Returns the report when the tick ended the run.
    pub fn on_tick(&mut self, tick: Tick) -> Result<Option<RunReport>> {
        match (tick, self.phase) {
            (Tick::FlickerHide, Phase::Idle) => self.body_visible = false,
            (Tick::FlickerShow, Phase::Idle) => self.body_visible = true,
            (Tick::Move, Phase::Running) => {
                let result = self.engine.step(&mut self.state);
                self.steering.tick_completed();

                if let Some(obstacle) = result.info.obstacle {
                    tracing::debug!(x = obstacle.x, y = obstacle.y, "obstacle placed");
                }

                match result.info.collision_type {
                    Some(cause) => return self.end_run(cause).map(Some),
                    // A run that was already over; nothing to report.
                    None if result.terminated => {
                        tracing::warn!(steps = self.state.steps, "move tick on a finished run");
                        self.scheduler.stop();
                        self.reinit()?;
                    }
                    None => {}
                }
            }
            (tick, phase) => tracing::trace!(?tick, ?phase, "tick outside its phase ignored"),
        }

        Ok(None)
    }

    /// Abandon the current run, if any, and start over from idle
    pub fn restart(&mut self) -> Result<()> {
        self.scheduler.stop();
        if self.phase == Phase::Running {
            let best = self.metrics.commit_run(self.state.score);
            tracing::info!(score = self.state.score, best, "run abandoned");
        }
        self.reinit()
    }

    fn end_run(&mut self, cause: CollisionType) -> Result<RunReport> {
        self.scheduler.stop();

        let score = self.state.score;
        let best = self.metrics.commit_run(score);
        let report = RunReport { score, best, cause };
        tracing::info!(score, best, cause = cause.describe(), "run ended");

        self.last_run = Some(report);
        self.reinit()?;
        Ok(report)
    }

    /// Tear down to a fresh idle run. The scheduler must already be stopped.
    fn reinit(&mut self) -> Result<()> {
        self.state = self.engine.reset()?;
        self.steering = Steering::new();
        self.phase = Phase::Idle;
        self.body_visible = true;
        self.metrics.reset_clock();
        self.scheduler.arm_idle();
        Ok(())
    }

    /// Replace the configuration. Only allowed while idle and only with a
    /// config that passes `GameConfig::validate`; returns whether the change
    /// was applied. A new board size regenerates the idle run.
    pub fn apply_config(&mut self, config: GameConfig) -> Result<bool> {
        if self.phase != Phase::Idle {
            return Ok(false);
        }
        if let Err(err) = config.validate() {
            tracing::info!(board = config.extent(), "settings rejected: {err:#}");
            return Ok(false);
        }

        let board_changed = config.board != self.engine.config().board;
        self.engine.set_config(config);

        if board_changed {
            self.scheduler.stop();
            self.reinit()?;
        }

        let config = self.engine.config();
        tracing::info!(
            board = config.extent(),
            speed = config.speed.as_str(),
            variant = config.variant.as_str(),
            "settings changed"
        );
        Ok(true)
    }

    /// Move to the next board size the initial snake fits on, skipping
    /// sizes too small for it. Returns false when no other size fits.
    pub fn cycle_board(&mut self) -> Result<bool> {
        let mut config = self.config().clone();
        let current = config.board;
        loop {
            config.board = config.board.next();
            if config.board == current {
                return Ok(false);
            }
            if config.validate().is_ok() {
                return self.apply_config(config);
            }
        }
    }

    pub fn cycle_speed(&mut self) -> Result<bool> {
        let mut config = self.config().clone();
        config.speed = config.speed.next();
        self.apply_config(config)
    }

    pub fn cycle_variant(&mut self) -> Result<bool> {
        let mut config = self.config().clone();
        config.variant = config.variant.next();
        self.apply_config(config)
    }
}
