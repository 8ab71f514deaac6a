use super::action::Direction;
use super::config::CELL_SIZE;

/// A grid-aligned cell on the board, in board units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Build a cell from grid column and row indices
    pub fn from_grid(column: i32, row: i32) -> Self {
        Self::new(column * CELL_SIZE, row * CELL_SIZE)
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta(CELL_SIZE);
        self.moved_by(dx, dy)
    }

    pub fn is_grid_aligned(&self) -> bool {
        self.x % CELL_SIZE == 0 && self.y % CELL_SIZE == 0
    }

    /// Grid column and row of this cell
    pub fn grid_index(&self) -> (i32, i32) {
        (self.x.div_euclid(CELL_SIZE), self.y.div_euclid(CELL_SIZE))
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, tail at index 0 and head last
    pub body: Vec<Cell>,
    /// Current heading
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with its head at `head`, trailing segments laid out
    /// behind it against `direction`
    pub fn new(head: Cell, direction: Direction, length: usize) -> Self {
        let behind = match direction {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        };

        let mut body = Vec::with_capacity(length);
        let mut segment = head;
        for _ in 0..length.max(1) {
            body.push(segment);
            segment = segment.moved_in_direction(behind);
        }
        body.reverse();

        Self { body, direction }
    }

    /// Get the head position (last segment)
    pub fn head(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// Get the tail position (first segment)
    pub fn tail(&self) -> Cell {
        self.body[0]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        &self.body[..self.body.len() - 1]
    }

    /// Check if a position collides with the body, head excluded
    pub fn collides_with_body(&self, pos: Cell) -> bool {
        self.body_segments().contains(&pos)
    }

    /// The cell the head enters on the next move
    pub fn next_head(&self) -> Cell {
        self.head().moved_in_direction(self.direction)
    }

    /// Shift every segment onto its successor and advance the head one cell.
    ///
    /// Returns the tail cell as it was before the move.
    pub fn advance(&mut self) -> Cell {
        let old_tail = self.tail();
        let new_head = self.next_head();
        self.body.remove(0);
        self.body.push(new_head);
        old_tail
    }

    /// Prepend a segment at `cell`, making it the new tail
    pub fn grow_at(&mut self, cell: Cell) {
        self.body.insert(0, cell);
    }

    /// Move the head to `cell` without touching the rest of the body
    pub fn relocate_head(&mut self, cell: Cell) {
        if let Some(head) = self.body.last_mut() {
            *head = cell;
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle block
    Obstacle,
    /// No free cell was left for a new target
    BoardFilled,
}

impl CollisionType {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Wall => "hit the wall",
            Self::SelfCollision => "ran into itself",
            Self::Obstacle => "hit a block",
            Self::BoardFilled => "filled the board",
        }
    }
}

/// Complete game state for one run
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub target: Cell,
    pub obstacles: Vec<Cell>,
    /// Side length of the square board, in board units
    pub extent: i32,
    pub score: u32,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state with no obstacles
    pub fn new(snake: Snake, target: Cell, extent: i32) -> Self {
        Self {
            snake,
            target,
            obstacles: Vec::new(),
            extent,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the board
    pub fn is_in_bounds(&self, pos: Cell) -> bool {
        pos.x >= 0 && pos.x + CELL_SIZE <= self.extent && pos.y >= 0 && pos.y + CELL_SIZE <= self.extent
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Cell) -> bool {
        self.snake.body.contains(&pos)
    }

    pub fn is_obstacle(&self, pos: Cell) -> bool {
        self.obstacles.contains(&pos)
    }
}
