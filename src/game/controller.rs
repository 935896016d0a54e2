use log::{info, trace};
use tokio::time::Instant;

use super::{
    direction::Direction,
    engine::{GameEngine, TickOutcome},
    state::GameSession,
    timer::TickTimer,
};

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh board, waiting for start
    Idle,
    Running,
    /// Collision or full board; the last session is kept for display
    GameOver,
}

/// Single owner of the session, the rules and the tick timer
pub struct GameController {
    engine: GameEngine,
    session: GameSession,
    phase: Phase,
    timer: TickTimer,
}

impl GameController {
    pub fn new(mut engine: GameEngine) -> Self {
        let session = engine.reset();
        Self {
            engine,
            session,
            phase: Phase::Idle,
            timer: TickTimer::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn timer(&self) -> &TickTimer {
        &self.timer
    }

    /// When the next tick is due, if a game is running
    pub fn next_tick(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Begin a new game on a fresh board.
    /// Returns `false` without touching anything if a game is already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_running() {
            return false;
        }

        self.session = self.engine.reset();
        self.phase = Phase::Running;
        self.timer.cancel();
        self.timer.start(self.session.tick_interval, now);
        info!(
            "game started on a {0}x{0} grid, tick {1:?}",
            self.session.grid_size, self.session.tick_interval
        );
        true
    }

    /// Stop any running game and put a fresh board up
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.session = self.engine.reset();
        self.phase = Phase::Idle;
        info!("game reset");
    }

    /// Request a direction for the next tick
    pub fn steer(&mut self, direction: Direction) -> bool {
        let accepted = self.session.set_pending_direction(direction);
        if !accepted {
            trace!(
                "ignored reversal {:?} while moving {:?}",
                direction,
                self.session.direction
            );
        }
        accepted
    }

    /// Run a tick if one is due at `now`.
    ///
    /// Game over cancels the timer; a faster interval re-arms it from `now`.
    pub fn on_tick(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.is_running() || !self.timer.fire(now) {
            return None;
        }

        let outcome = self.engine.tick(&mut self.session);

        if let Some(reason) = outcome.game_over {
            self.timer.cancel();
            self.phase = Phase::GameOver;
            info!(
                "game over: snake {} with score {} after {} ticks",
                reason.describe(),
                self.session.score,
                self.session.ticks
            );
        } else if outcome.interval_changed {
            self.timer.reschedule(self.session.tick_interval, now);
        }

        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, GameOverReason, Position, Snake};
    use std::time::Duration;

    fn controller() -> GameController {
        GameController::new(GameEngine::with_seed(GameConfig::default(), 42))
    }

    fn due(controller: &GameController) -> Instant {
        controller.next_tick().unwrap()
    }

    #[test]
    fn test_starts_idle() {
        let controller = controller();
        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.timer().is_active());
        assert_eq!(controller.session().snake.len(), 3);
    }

    #[test]
    fn test_start_twice_arms_one_timer() {
        let mut controller = controller();
        let now = Instant::now();

        assert!(controller.start(now));
        let session = controller.session().clone();
        assert!(!controller.start(now + Duration::from_millis(10)));

        assert_eq!(controller.timer().armed_count(), 1);
        assert_eq!(controller.session(), &session);
        assert_eq!(controller.next_tick(), Some(now + Duration::from_millis(150)));
    }

    #[test]
    fn test_no_tick_before_due() {
        let mut controller = controller();
        let now = Instant::now();
        controller.start(now);

        assert_eq!(controller.on_tick(now + Duration::from_millis(10)), None);
        assert_eq!(controller.session().ticks, 0);
    }

    #[test]
    fn test_tick_moves_snake() {
        let mut controller = controller();
        controller.start(Instant::now());
        controller.session.food = Position::new(15, 15);

        let outcome = controller.on_tick(due(&controller)).unwrap();

        assert_eq!(outcome.game_over, None);
        assert_eq!(controller.session().snake.head(), Position::new(6, 10));
        assert_eq!(controller.session().snake.tail(), Position::new(4, 10));
    }

    #[test]
    fn test_wall_collision_cancels_timer() {
        let mut controller = controller();
        controller.start(Instant::now());
        controller.session.snake =
            Snake::new(Position::new(0, 10), Direction::Left, 3);
        controller.session.direction = Direction::Left;
        controller.session.pending_direction = Direction::Left;

        let outcome = controller.on_tick(due(&controller)).unwrap();

        assert_eq!(outcome.game_over, Some(GameOverReason::Wall));
        assert_eq!(controller.phase(), Phase::GameOver);
        assert!(!controller.timer().is_active());
        assert_eq!(controller.next_tick(), None);
    }

    #[test]
    fn test_eating_reschedules_timer() {
        let mut controller = controller();
        controller.start(Instant::now());
        controller.session.food = Position::new(6, 10);

        let now = due(&controller);
        let outcome = controller.on_tick(now).unwrap();

        assert!(outcome.ate_food);
        assert_eq!(controller.session().score, 10);
        assert_eq!(controller.timer().period(), Some(Duration::from_millis(148)));
        assert_eq!(controller.next_tick(), Some(now + Duration::from_millis(148)));
        assert_eq!(controller.timer().armed_count(), 2);
    }

    #[test]
    fn test_one_direction_change_per_tick() {
        let mut controller = controller();
        controller.start(Instant::now());
        controller.session.food = Position::new(15, 15);

        assert!(controller.steer(Direction::Up));
        assert!(!controller.steer(Direction::Left));
        assert!(controller.steer(Direction::Down));

        controller.on_tick(due(&controller));
        assert_eq!(controller.session().direction, Direction::Down);
        assert_eq!(controller.session().snake.head(), Position::new(5, 11));
    }

    #[test]
    fn test_reset_cancels_and_goes_idle() {
        let mut controller = controller();
        controller.start(Instant::now());
        controller.session.score = 50;

        controller.reset();

        assert_eq!(controller.phase(), Phase::Idle);
        assert!(!controller.timer().is_active());
        assert_eq!(controller.session().score, 0);
        assert_eq!(controller.on_tick(Instant::now() + Duration::from_secs(1)), None);
    }

    #[test]
    fn test_restart_after_game_over() {
        let mut controller = controller();
        controller.start(Instant::now());
        controller.session.snake =
            Snake::new(Position::new(19, 10), Direction::Right, 3);
        controller.session.food = Position::new(0, 0);
        controller.on_tick(due(&controller));
        assert_eq!(controller.phase(), Phase::GameOver);

        assert!(controller.start(Instant::now()));
        assert!(controller.is_running());
        assert!(controller.session().is_alive());
        assert_eq!(controller.session().snake.head(), Position::new(5, 10));
        assert_eq!(controller.session().tick_interval, Duration::from_millis(150));
    }
}
