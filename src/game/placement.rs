//! Random placement of targets and obstacles on free grid cells
//!
//! Both placements share one sampler and differ only in the [`CellFilter`]
//! deciding whether a candidate cell is free.

use rand::Rng;
use rand::seq::SliceRandom;

use super::config::CELL_SIZE;
use super::state::{Cell, GameState};

/// Random draws tried before falling back to enumerating free cells
pub const MAX_SAMPLING_ATTEMPTS: usize = 1024;

/// Decides whether a cell may receive a new placement
pub trait CellFilter {
    fn is_free(&self, cell: Cell) -> bool;
}

/// Target cells must avoid the snake and every obstacle
pub struct TargetFilter<'a> {
    state: &'a GameState,
}

impl<'a> TargetFilter<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }
}

impl CellFilter for TargetFilter<'_> {
    fn is_free(&self, cell: Cell) -> bool {
        !self.state.is_occupied_by_snake(cell) && !self.state.is_obstacle(cell)
    }
}

/// Obstacle cells must also avoid the target and the head's next cell
pub struct ObstacleFilter<'a> {
    state: &'a GameState,
    next_head: Cell,
}

impl<'a> ObstacleFilter<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self {
            state,
            next_head: state.snake.next_head(),
        }
    }
}

impl CellFilter for ObstacleFilter<'_> {
    fn is_free(&self, cell: Cell) -> bool {
        // The snake body covers the head's current cell.
        !self.state.is_occupied_by_snake(cell)
            && cell != self.state.target
            && cell != self.next_head
            && !self.state.is_obstacle(cell)
    }
}

/// Pick a uniformly random free cell on a board of `extent` units.
///
/// Returns `None` only when the filter rejects every cell on the board.
pub fn sample_free_cell<R: Rng + ?Sized>(
    rng: &mut R,
    extent: i32,
    filter: &impl CellFilter,
) -> Option<Cell> {
    let cells_per_side = extent / CELL_SIZE;
    if cells_per_side <= 0 {
        return None;
    }

    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let cell = Cell::from_grid(
            rng.gen_range(0..cells_per_side),
            rng.gen_range(0..cells_per_side),
        );
        if filter.is_free(cell) {
            return Some(cell);
        }
    }

    tracing::debug!(
        attempts = MAX_SAMPLING_ATTEMPTS,
        "random sampling exhausted, scanning free cells"
    );

    let free: Vec<Cell> = (0..cells_per_side)
        .flat_map(|row| (0..cells_per_side).map(move |column| Cell::from_grid(column, row)))
        .filter(|cell| filter.is_free(*cell))
        .collect();

    free.choose(rng).copied()
}

/// Place a target anywhere not covered by the snake or an obstacle
pub fn place_target<R: Rng + ?Sized>(rng: &mut R, state: &GameState) -> Option<Cell> {
    sample_free_cell(rng, state.extent, &TargetFilter::new(state))
}

/// Place an obstacle clear of the snake, the target, other obstacles and the
/// cell the head is about to enter
pub fn place_obstacle<R: Rng + ?Sized>(rng: &mut R, state: &GameState) -> Option<Cell> {
    sample_free_cell(rng, state.extent, &ObstacleFilter::new(state))
}
