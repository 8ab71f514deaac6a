use std::time::Duration;
use tokio::time::Instant;

/// Best score, games played and the clock of the run in progress. Lives as
/// long as the process; runs come and go underneath it.
#[derive(Debug, Default)]
pub struct GameMetrics {
    best_score: u32,
    games_played: u32,
    run_started: Option<Instant>,
    elapsed: Duration,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn is_clock_running(&self) -> bool {
        self.run_started.is_some()
    }

    /// Start timing a run from `now`
    pub fn start_clock(&mut self, now: Instant) {
        self.run_started = Some(now);
        self.elapsed = Duration::ZERO;
    }

    /// Refresh the elapsed time; a stopped clock keeps its last reading
    pub fn tick_clock(&mut self, now: Instant) {
        if let Some(started) = self.run_started {
            self.elapsed = now.saturating_duration_since(started);
        }
    }

    /// Stop the clock and zero it for the next idle phase
    pub fn reset_clock(&mut self) {
        self.run_started = None;
        self.elapsed = Duration::ZERO;
    }

    /// Count a finished run and fold its score into the best. Returns the
    /// best score including this run.
    pub fn commit_run(&mut self, score: u32) -> u32 {
        self.games_played += 1;
        if score > self.best_score {
            tracing::debug!(previous = self.best_score, score, "new best score");
            self.best_score = score;
        }
        self.reset_clock();
        self.best_score
    }

    pub fn format_time(&self) -> String {
        let secs = self.elapsed.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}
