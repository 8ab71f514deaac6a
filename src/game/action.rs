/// Axis a heading moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
}

/// Sign of movement along an axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Plus,
    Minus,
}

impl Sign {
    fn factor(self) -> i32 {
        match self {
            Sign::Plus => 1,
            Sign::Minus => -1,
        }
    }
}

/// Direction the snake can move
///
/// Screen coordinates are used, so `Down` moves toward larger `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn axis(&self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Y,
            Direction::Left | Direction::Right => Axis::X,
        }
    }

    pub fn sign(&self) -> Sign {
        match self {
            Direction::Down | Direction::Right => Sign::Plus,
            Direction::Up | Direction::Left => Sign::Minus,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.axis() == other.axis() && self.sign() != other.sign()
    }

    /// Returns the delta (dx, dy) for one step of `step` units in this direction
    pub fn delta(&self, step: i32) -> (i32, i32) {
        let amount = step * self.sign().factor();
        match self.axis() {
            Axis::X => (amount, 0),
            Axis::Y => (0, amount),
        }
    }
}
