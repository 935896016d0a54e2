use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use super::direction::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake's body, head first
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Position>,
}

impl Snake {
    /// Create a straight snake whose body trails behind `head`,
    /// opposite to `facing`
    pub fn new(head: Position, facing: Direction, length: usize) -> Self {
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        let back = facing.opposite();
        for _ in 1..length {
            if let Some(last) = body.back().copied() {
                body.push_back(last.moved_in_direction(back));
            }
        }

        Self { body }
    }

    /// Build a snake from explicit segments, head first.
    /// Returns `None` for an empty list.
    pub fn from_segments<I>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Iterate over all segments, head first
    pub fn segments(&self) -> impl Iterator<Item = &Position> + '_ {
        self.body.iter()
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub(crate) fn push_head(&mut self, pos: Position) {
        self.body.push_front(pos);
    }

    pub(crate) fn pop_tail(&mut self) -> Option<Position> {
        if self.body.len() > 1 {
            self.body.pop_back()
        } else {
            None
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// The snake fills the board and no cell is left for food
    BoardFull,
}

impl GameOverReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Wall => "hit the wall",
            Self::SelfCollision => "ran into itself",
            Self::BoardFull => "filled the board",
        }
    }
}

/// Complete state of one game
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    pub snake: Snake,
    pub food: Position,
    /// Direction committed by the last tick
    pub direction: Direction,
    /// Direction the next tick will commit
    pub pending_direction: Direction,
    pub grid_size: i32,
    pub score: u32,
    /// Current delay between ticks
    pub tick_interval: Duration,
    /// Number of ticks that moved the snake
    pub ticks: u64,
    pub outcome: Option<GameOverReason>,
}

impl GameSession {
    /// Create a new session; direction and pending direction both start as
    /// `direction`
    pub fn new(
        snake: Snake,
        food: Position,
        direction: Direction,
        grid_size: i32,
        tick_interval: Duration,
    ) -> Self {
        Self {
            snake,
            food,
            direction,
            pending_direction: direction,
            grid_size,
            score: 0,
            tick_interval,
            ticks: 0,
            outcome: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.outcome.is_none()
    }

    /// Buffer a direction for the next tick.
    ///
    /// A request to reverse the *committed* direction is ignored and
    /// `false` is returned. The check is against the committed direction,
    /// not the pending one.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = direction;
        true
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.grid_size && pos.y >= 0 && pos.y < self.grid_size
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> GameSession {
        GameSession::new(
            Snake::new(Position::new(5, 10), Direction::Right, 3),
            Position::new(15, 15),
            Direction::Right,
            20,
            Duration::from_millis(150),
        )
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 10), Direction::Right, 3);
        let segments: Vec<Position> = snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(5, 10),
                Position::new(4, 10),
                Position::new(3, 10)
            ]
        );
        assert_eq!(snake.tail(), Position::new(3, 10));
    }

    #[test]
    fn test_snake_never_loses_head() {
        let mut snake = Snake::new(Position::new(0, 0), Direction::Right, 1);
        assert_eq!(snake.pop_tail(), None);
        assert_eq!(snake.len(), 1);
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn test_occupies_includes_head() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert!(snake.occupies(Position::new(5, 5)));
        assert!(snake.occupies(Position::new(3, 5)));
        assert!(!snake.occupies(Position::new(6, 5)));
    }

    #[test]
    fn test_reverse_request_ignored() {
        let mut session = session();
        assert!(!session.set_pending_direction(Direction::Left));
        assert_eq!(session.pending_direction, Direction::Right);
    }

    #[test]
    fn test_reverse_checked_against_committed_direction() {
        let mut session = session();
        assert!(session.set_pending_direction(Direction::Up));
        // Still moving right, so left is rejected even though pending is up.
        assert!(!session.set_pending_direction(Direction::Left));
        assert_eq!(session.pending_direction, Direction::Up);
        // Down is not the reverse of right; last accepted request wins.
        assert!(session.set_pending_direction(Direction::Down));
        assert_eq!(session.pending_direction, Direction::Down);
    }

    #[test]
    fn test_bounds_checking() {
        let session = session();
        assert!(session.is_in_bounds(Position::new(0, 0)));
        assert!(session.is_in_bounds(Position::new(19, 19)));
        assert!(!session.is_in_bounds(Position::new(-1, 10)));
        assert!(!session.is_in_bounds(Position::new(20, 0)));
        assert!(!session.is_in_bounds(Position::new(0, 20)));
    }
}
