use super::action::Direction;
use super::state::Snake;

/// What happened to a heading change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steer {
    /// The heading was changed
    Accepted,
    /// Same heading or an exact reversal; nothing changed
    Rejected,
    /// A change was already accepted this tick
    Busy,
}

/// Gate allowing at most one heading change per tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Steering {
    ready: bool,
}

impl Steering {
    pub fn new() -> Self {
        Self { ready: true }
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Try to turn the snake toward `direction`
    pub fn request(&mut self, snake: &mut Snake, direction: Direction) -> Steer {
        if !self.ready {
            return Steer::Busy;
        }

        if direction == snake.direction || direction.is_opposite(snake.direction) {
            return Steer::Rejected;
        }

        snake.direction = direction;
        self.ready = false;
        Steer::Accepted
    }

    /// Re-open the gate once the engine has finished a step
    pub fn tick_completed(&mut self) {
        self.ready = true;
    }
}

impl Default for Steering {
    fn default() -> Self {
        Self::new()
    }
}
