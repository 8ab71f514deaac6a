use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{
    action::Direction,
    config::{CELL_SIZE, GameConfig},
    placement,
    state::{Cell, CollisionType, GameState, Snake},
};

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate the target this step
    pub ate_target: bool,
    /// Obstacle dropped this step, if any
    pub obstacle: Option<Cell>,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the run has ended
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the configuration; takes effect from the next reset or step
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    /// Build the initial state for a run: the snake centred on the board
    /// heading down, and a first target
    pub fn reset(&mut self) -> Result<GameState> {
        let extent = self.config.extent();
        let centre = (extent / 2) / CELL_SIZE * CELL_SIZE;

        let snake = Snake::new(
            Cell::new(centre, centre),
            Direction::Down,
            self.config.initial_snake_length,
        );

        // Target is a placeholder until the first placement below.
        let mut state = GameState::new(snake, Cell::new(centre, centre), extent);
        state.target = placement::place_target(&mut self.rng, &state)
            .context("No free cell left for the first target")?;

        Ok(state)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                info: StepInfo {
                    ate_target: false,
                    obstacle: None,
                    collision_type: None,
                },
            };
        }

        let variant = self.config.variant;

        let old_tail = state.snake.advance();
        let head = variant.normalize(state.snake.head(), state.extent);
        state.snake.relocate_head(head);

        let ate_target = head == state.target;
        let mut obstacle = None;
        let mut collision_type = None;

        if ate_target {
            state.score += 1;
            state.snake.grow_at(old_tail);

            match placement::place_target(&mut self.rng, state) {
                Some(target) => state.target = target,
                None => collision_type = Some(CollisionType::BoardFilled),
            }

            if variant.spawns_obstacles() && collision_type.is_none() {
                obstacle = placement::place_obstacle(&mut self.rng, state);
                match obstacle {
                    Some(cell) => state.obstacles.push(cell),
                    None => tracing::debug!("no free cell for a new obstacle"),
                }
            }
        }

        // A collision outranks a full board when both happen on one step.
        if let Some(collision) = variant.check_collision(state) {
            collision_type = Some(collision);
        }

        state.steps += 1;

        if collision_type.is_some() {
            state.is_alive = false;
        }

        StepResult {
            terminated: !state.is_alive,
            info: StepInfo {
                ate_target,
                obstacle,
                collision_type,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{BoardSize, RuleVariant};

    fn engine(variant: RuleVariant) -> GameEngine {
        GameEngine::new(GameConfig::default().with_variant(variant).with_seed(42))
    }

    /// Target tucked into a corner, away from any path the tests drive
    fn park_target(state: &mut GameState) {
        state.target = Cell::new(0, 0);
    }

    #[test]
    fn test_reset() {
        let mut engine = engine(RuleVariant::Regular);
        let state = engine.reset().unwrap();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.snake.head(), Cell::new(200, 200));
        assert_eq!(state.snake.tail(), Cell::new(200, 140));
        assert_eq!(state.snake.direction, Direction::Down);
        assert!(state.obstacles.is_empty());
        assert!(!state.is_occupied_by_snake(state.target));
        assert!(state.target.is_grid_aligned());
    }

    #[test]
    fn test_reset_centres_on_each_board() {
        for board in BoardSize::ALL {
            let mut engine = GameEngine::new(GameConfig {
                board,
                ..GameConfig::default()
            });
            let state = engine.reset().unwrap();
            let centre = board.extent() / 2;
            assert_eq!(state.snake.head(), Cell::new(centre, centre));
            assert!(state.is_in_bounds(state.target));
        }
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine(RuleVariant::Regular);
        let mut state = engine.reset().unwrap();
        park_target(&mut state);

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert!(!result.info.ate_target);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), Cell::new(200, 220));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_target_consumption_grows_at_old_tail() {
        let mut engine = engine(RuleVariant::Regular);
        let mut state = engine.reset().unwrap();

        state.target = state.snake.next_head();
        let old_tail = state.snake.tail();
        let initial_length = state.snake.len();

        let result = engine.step(&mut state);

        assert!(result.info.ate_target);
        assert_eq!(result.info.obstacle, None);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), initial_length + 1);
        assert_eq!(state.snake.tail(), old_tail);
        assert!(!state.is_occupied_by_snake(state.target));
    }

    #[test]
    fn test_length_changes_only_on_consumption() {
        let mut engine = engine(RuleVariant::NoWalls);
        let mut state = engine.reset().unwrap();

        for _ in 0..200 {
            let before = state.snake.len();
            let next = RuleVariant::NoWalls.normalize(state.snake.next_head(), state.extent);
            let lands_on_target = next == state.target;
            let result = engine.step(&mut state);
            if result.terminated {
                break;
            }
            assert_eq!(result.info.ate_target, lands_on_target);
            let expected = before + usize::from(lands_on_target);
            assert_eq!(state.snake.len(), expected);
        }
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(
            Snake::new(Cell::new(0, 100), Direction::Left, 3),
            Cell::new(100, 20),
            200,
        );

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
    }

    #[test]
    fn test_no_walls_keeps_head_on_board() {
        let mut engine = GameEngine::new(GameConfig::small().with_variant(RuleVariant::NoWalls));
        let mut state = GameState::new(
            Snake::new(Cell::new(0, 100), Direction::Left, 3),
            Cell::new(100, 20),
            200,
        );

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), Cell::new(180, 100));

        for _ in 0..25 {
            engine.step(&mut state);
            let head = state.snake.head();
            assert!(state.is_in_bounds(head), "{head:?}");
        }
    }

    #[test]
    fn test_no_walls_eats_target_on_wrapped_cell() {
        let mut engine = GameEngine::new(GameConfig::small().with_variant(RuleVariant::NoWalls));
        let mut state = GameState::new(
            Snake::new(Cell::new(100, 180), Direction::Down, 3),
            Cell::new(100, 0),
            200,
        );

        let result = engine.step(&mut state);

        assert!(result.info.ate_target);
        assert_eq!(state.snake.head(), Cell::new(100, 0));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::new(GameConfig::small());

        // Body (tail first): (20,100) .. (100,100), heading right
        let snake = Snake::new(Cell::new(100, 100), Direction::Right, 5);
        let mut state = GameState::new(snake, Cell::new(160, 160), 200);

        // Right: head (120,100)
        engine.step(&mut state);
        // Down: head (120,120)
        state.snake.direction = Direction::Down;
        engine.step(&mut state);
        // Left: head (100,120)
        state.snake.direction = Direction::Left;
        engine.step(&mut state);
        // Up: head (100,100), still held by the segment ahead of the tail
        state.snake.direction = Direction::Up;
        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_growth_onto_head_is_self_collision() {
        let mut engine = GameEngine::new(GameConfig::small());

        // Closed loop: the head's next cell is the current tail.
        let mut state = GameState::new(
            Snake {
                body: vec![
                    Cell::new(40, 40),
                    Cell::new(60, 40),
                    Cell::new(60, 60),
                    Cell::new(40, 60),
                ],
                direction: Direction::Up,
            },
            Cell::new(40, 40),
            200,
        );

        let result = engine.step(&mut state);

        assert!(result.info.ate_target);
        assert_eq!(state.snake.head(), Cell::new(40, 40));
        assert_eq!(state.snake.tail(), Cell::new(40, 40));
        assert_eq!(
            result.info.collision_type,
            Some(CollisionType::SelfCollision)
        );
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        let mut engine = GameEngine::new(GameConfig::small());
        let mut state = GameState::new(
            Snake {
                body: vec![
                    Cell::new(40, 40),
                    Cell::new(60, 40),
                    Cell::new(60, 60),
                    Cell::new(40, 60),
                ],
                direction: Direction::Up,
            },
            Cell::new(180, 180),
            200,
        );

        let result = engine.step(&mut state);

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), Cell::new(40, 40));
    }

    #[test]
    fn test_regular_end_to_end() {
        let mut engine = engine(RuleVariant::Regular);
        let mut state = engine.reset().unwrap();

        // Target three cells below the head, in the path of the snake.
        state.target = Cell::new(200, 260);

        for _ in 0..2 {
            assert!(!engine.step(&mut state).info.ate_target);
        }
        assert_eq!(state.score, 0);
        assert_eq!(state.snake.len(), 4);

        let result = engine.step(&mut state);
        assert!(result.info.ate_target);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 5);

        park_target(&mut state);
        let mut ticks = 0;
        let result = loop {
            let result = engine.step(&mut state);
            ticks += 1;
            if result.terminated {
                break result;
            }
        };

        // Head was at y = 260; it leaves the 400 board after 7 more ticks.
        assert_eq!(ticks, 7);
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_blocks_end_to_end() {
        let mut engine = engine(RuleVariant::Blocks);
        let mut state = engine.reset().unwrap();
        state.target = state.snake.next_head();

        let result = engine.step(&mut state);

        assert!(result.info.ate_target);
        assert_eq!(state.obstacles.len(), 1);

        let obstacle = result.info.obstacle.unwrap();
        assert_eq!(state.obstacles[0], obstacle);
        assert!(!state.is_occupied_by_snake(obstacle));
        assert_ne!(obstacle, state.target);
        assert_ne!(obstacle, state.snake.head());
        assert_ne!(obstacle, state.snake.next_head());
    }

    #[test]
    fn test_obstacle_collision() {
        let mut engine = engine(RuleVariant::Blocks);
        let mut state = engine.reset().unwrap();
        park_target(&mut state);
        state.obstacles.push(state.snake.next_head());

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(result.info.collision_type, Some(CollisionType::Obstacle));
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine(RuleVariant::Regular);
        let mut state = engine.reset().unwrap();
        state.is_alive = false;
        let steps_before = state.steps;

        let result = engine.step(&mut state);

        assert!(result.terminated);
        assert_eq!(state.steps, steps_before); // Should not increment
    }
}
