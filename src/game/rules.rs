//! Collision rules for each game variant

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::config::CELL_SIZE;
use super::state::{Cell, CollisionType, GameState};

/// The rule set a run is played under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RuleVariant {
    /// Walls and the snake's own body are deadly
    #[default]
    Regular,
    /// The board wraps around; only the snake's own body is deadly
    NoWalls,
    /// Regular rules plus a new obstacle block for every target eaten
    Blocks,
}

impl RuleVariant {
    pub const ALL: [RuleVariant; 3] = [RuleVariant::Regular, RuleVariant::NoWalls, RuleVariant::Blocks];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Regular => "regular",
            Self::NoWalls => "no-walls",
            Self::Blocks => "blocks",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Regular => Self::NoWalls,
            Self::NoWalls => Self::Blocks,
            Self::Blocks => Self::Regular,
        }
    }

    /// Whether eating a target also drops an obstacle
    pub fn spawns_obstacles(&self) -> bool {
        matches!(self, Self::Blocks)
    }

    /// Map a freshly advanced head onto the board this variant plays on.
    ///
    /// Only `NoWalls` moves the head: leaving through one edge re-enters at
    /// the opposite edge on that axis.
    pub fn normalize(&self, head: Cell, extent: i32) -> Cell {
        match self {
            Self::NoWalls => Cell::new(wrap(head.x, extent), wrap(head.y, extent)),
            Self::Regular | Self::Blocks => head,
        }
    }

    /// Check the state's head against this variant's losing conditions
    pub fn check_collision(&self, state: &GameState) -> Option<CollisionType> {
        let head = state.snake.head();

        if !matches!(self, Self::NoWalls) && !state.is_in_bounds(head) {
            return Some(CollisionType::Wall);
        }

        if state.snake.collides_with_body(head) {
            return Some(CollisionType::SelfCollision);
        }

        if matches!(self, Self::Blocks) && state.is_obstacle(head) {
            return Some(CollisionType::Obstacle);
        }

        None
    }
}

fn wrap(coordinate: i32, extent: i32) -> i32 {
    if coordinate < 0 {
        extent - CELL_SIZE
    } else if coordinate + CELL_SIZE > extent {
        0
    } else {
        coordinate
    }
}
