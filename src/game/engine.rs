use super::{
    config::GameConfig,
    direction::Direction,
    state::{GameOverReason, GameSession, Position, Snake},
};
use log::{debug, warn};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// What a single tick changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Whether the tick interval shrank and the timer must be re-armed
    pub interval_changed: bool,
    /// Set once the game has ended
    pub game_over: Option<GameOverReason>,
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create an engine with a fixed seed, for reproducible food placement
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build a fresh session: straight snake facing right, food, score 0,
    /// initial tick interval
    pub fn reset(&mut self) -> GameSession {
        let snake = Snake::new(
            self.config.start_head,
            Direction::Right,
            self.config.initial_snake_length,
        );

        // Only a degenerate config leaves no room for food
        let food = self.place_food(&snake).unwrap_or(Position::new(0, 0));

        GameSession::new(
            snake,
            food,
            Direction::Right,
            self.config.grid_size(),
            self.config.initial_interval(),
        )
    }

    /// Pick a uniformly random free cell for food.
    ///
    /// Draws random cells up to `food_placement_attempts` times, then samples
    /// from the explicit list of free cells. Returns `None` only when the
    /// snake covers the whole grid.
    pub fn place_food(&mut self, snake: &Snake) -> Option<Position> {
        let grid = self.config.grid_size();
        if grid <= 0 {
            return None;
        }

        for _ in 0..self.config.food_placement_attempts {
            let pos = Position::new(self.rng.gen_range(0..grid), self.rng.gen_range(0..grid));
            if !snake.occupies(pos) {
                return Some(pos);
            }
        }

        let free: Vec<Position> = (0..grid)
            .flat_map(|y| (0..grid).map(move |x| Position::new(x, y)))
            .filter(|pos| !snake.occupies(*pos))
            .collect();

        warn!(
            "food placement fell back to scanning {} free cells (snake length {})",
            free.len(),
            snake.len()
        );

        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.gen_range(0..free.len())])
        }
    }

    /// Advance the session by one step
    pub fn tick(&mut self, session: &mut GameSession) -> TickOutcome {
        if let Some(reason) = session.outcome {
            return TickOutcome {
                game_over: Some(reason),
                ..TickOutcome::default()
            };
        }

        session.direction = session.pending_direction;
        let new_head = session.snake.head().moved_in_direction(session.direction);

        if let Some(reason) = self.check_collision(session, new_head) {
            session.outcome = Some(reason);
            return TickOutcome {
                game_over: Some(reason),
                ..TickOutcome::default()
            };
        }

        session.snake.push_head(new_head);
        session.ticks += 1;

        if new_head != session.food {
            session.snake.pop_tail();
            return TickOutcome::default();
        }

        session.score = session.score.saturating_add(self.config.food_reward);
        debug!(
            "food eaten at ({}, {}), score {}",
            new_head.x, new_head.y, session.score
        );

        let mut outcome = TickOutcome {
            ate_food: true,
            ..TickOutcome::default()
        };

        match self.place_food(&session.snake) {
            Some(food) => session.food = food,
            None => {
                session.outcome = Some(GameOverReason::BoardFull);
                outcome.game_over = session.outcome;
                return outcome;
            }
        }

        let floor = self.config.min_interval();
        if session.tick_interval > floor {
            let faster = session
                .tick_interval
                .saturating_sub(self.config.speed_step())
                .max(floor);
            if faster != session.tick_interval {
                debug!(
                    "tick interval {:?} -> {:?}",
                    session.tick_interval, faster
                );
                session.tick_interval = faster;
                outcome.interval_changed = true;
            }
        }

        outcome
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, session: &GameSession, pos: Position) -> Option<GameOverReason> {
        if !session.is_in_bounds(pos) {
            return Some(GameOverReason::Wall);
        }

        // The tail still counts: it has not moved out of the way yet.
        if session.is_occupied_by_snake(pos) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }
}
