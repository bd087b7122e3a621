use std::time::{Duration, Instant};

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, DeathReason};
use crate::config::{
    Difficulty, Grid, SHRINK_MIN_LENGTH, SHRINK_SEGMENTS, SPEED_BOOST_DURATION,
    SPEED_BOOST_FACTOR, Settings,
};
use crate::food::{Food, FoodEffect};
use crate::input::GameInput;
use crate::snake::{Position, Snake};
use crate::spawner;

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Playing,
    GameOver,
    /// No free cell was left for the next food.
    Victory,
}

/// Active speed boost; the tick interval returns to the difficulty baseline
/// once `expires_at` passes.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SpeedBoost {
    pub expires_at: Instant,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Food>,
    pub obstacles: Vec<Position>,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    settings: Settings,
    tick_interval: Duration,
    speed_boost: Option<SpeedBoost>,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game seeded from OS entropy.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(settings: Settings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: Settings, rng: StdRng) -> Self {
        let (x, y) = settings.grid.center();
        let mut state = Self {
            snake: Snake::new(Position::new(x, y)),
            food: None,
            obstacles: Vec::new(),
            score: 0,
            tick_count: 0,
            status: GameStatus::Playing,
            death_reason: None,
            settings,
            tick_interval: settings.difficulty.tick_interval(),
            speed_boost: None,
            rng,
        };
        state.populate_board();
        state
    }

    /// Starts a new game on the same board size, keeping the selected
    /// difficulty and the RNG stream.
    pub fn restart(&mut self) {
        let (x, y) = self.settings.grid.center();
        self.snake = Snake::new(Position::new(x, y));
        self.score = 0;
        self.tick_count = 0;
        self.status = GameStatus::Playing;
        self.death_reason = None;
        self.speed_boost = None;
        self.tick_interval = self.settings.difficulty.tick_interval();
        self.populate_board();

        info!(
            "Game restarted on {}x{} grid at {} difficulty",
            self.settings.grid.tile_count, self.settings.grid.tile_count, self.settings.difficulty
        );
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// `now` drives the speed boost expiry; it is the frame time at which the
    /// scheduler fired.
    pub fn tick(&mut self, now: Instant) {
        if self.status != GameStatus::Playing {
            return;
        }

        self.expire_speed_boost(now);

        // A motionless snake waits for its first direction.
        if self.snake.commit_velocity().is_zero() {
            return;
        }

        self.tick_count += 1;
        let head = self.snake.push_head();

        let eaten = self.food.filter(|food| food.position == head);
        let mut board_full = false;
        if let Some(food) = eaten {
            self.score += food.points();
            self.apply_effect(food.kind.effect(), now);
            debug!(
                "Ate {} food at ({}, {}); score {}",
                food.kind.label(),
                head.x,
                head.y,
                self.score
            );
            board_full = !self.respawn_food(Some(food.position));
        } else {
            self.snake.pop_tail();
        }

        if let Some(reason) = collision::resolve(&self.snake, &self.obstacles, self.settings.grid)
        {
            self.status = GameStatus::GameOver;
            self.death_reason = Some(reason);
            info!(
                "Game over: {} with score {} after {} ticks",
                reason.describe(),
                self.score,
                self.tick_count
            );
            return;
        }

        if board_full {
            self.status = GameStatus::Victory;
            info!("Board full; game won with score {}", self.score);
        }
    }

    /// Applies one external input event.
    pub fn apply_input(&mut self, input: GameInput) {
        match input {
            GameInput::Direction(direction) => {
                if self.status == GameStatus::Playing {
                    let _ = self.snake.request_direction(direction);
                }
            }
            GameInput::Restart => {
                if self.is_over() {
                    self.restart();
                }
            }
            GameInput::SelectDifficulty(difficulty) => self.set_difficulty(difficulty),
            GameInput::CycleDifficulty => self.set_difficulty(self.settings.difficulty.next()),
            GameInput::Quit => {}
        }
    }

    /// Switches difficulty; the new interval applies from the next tick and
    /// is kept for later restarts.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if difficulty == self.settings.difficulty {
            return;
        }

        self.settings.difficulty = difficulty;
        self.tick_interval = if self.speed_boost.is_some() {
            boosted_interval(difficulty.tick_interval())
        } else {
            difficulty.tick_interval()
        };
        info!(
            "Difficulty set to {difficulty} ({} ms per tick)",
            difficulty.tick_interval_ms()
        );
    }

    /// Returns true once the game has ended, by collision or a full board.
    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver | GameStatus::Victory)
    }

    #[must_use]
    pub fn grid(&self) -> Grid {
        self.settings.grid
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.settings.difficulty
    }

    /// Time between steps, including any active speed boost.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn speed_boost(&self) -> Option<SpeedBoost> {
        self.speed_boost
    }

    /// Time left on the active speed boost, if any.
    #[must_use]
    pub fn speed_boost_remaining(&self, now: Instant) -> Option<Duration> {
        self.speed_boost
            .map(|boost| boost.expires_at.saturating_duration_since(now))
            .filter(|remaining| !remaining.is_zero())
    }

    fn apply_effect(&mut self, effect: FoodEffect, now: Instant) {
        match effect {
            FoodEffect::None => {}
            FoodEffect::TemporarySpeedBoost => {
                // Eating another speed food extends the boost without
                // compounding the interval.
                self.speed_boost = Some(SpeedBoost {
                    expires_at: now + SPEED_BOOST_DURATION,
                });
                self.tick_interval = boosted_interval(self.settings.difficulty.tick_interval());
            }
            FoodEffect::ShrinkTail => {
                let target = self
                    .snake
                    .len()
                    .saturating_sub(SHRINK_SEGMENTS)
                    .max(SHRINK_MIN_LENGTH);
                self.snake.truncate(target);
            }
        }
    }

    fn expire_speed_boost(&mut self, now: Instant) {
        if self
            .speed_boost
            .is_some_and(|boost| now >= boost.expires_at)
        {
            self.speed_boost = None;
            self.tick_interval = self.settings.difficulty.tick_interval();
        }
    }

    /// Places fresh food. Returns false when the board has no free cell.
    fn respawn_food(&mut self, previous: Option<Position>) -> bool {
        match spawner::spawn_food(
            &mut self.rng,
            self.settings.grid,
            &self.snake,
            &self.obstacles,
            previous,
        ) {
            Ok(food) => {
                self.food = Some(food);
                true
            }
            Err(error) => {
                self.food = None;
                debug!("No food placed: {error}");
                false
            }
        }
    }

    fn populate_board(&mut self) {
        self.obstacles.clear();
        if !self.respawn_food(None) {
            self.status = GameStatus::Victory;
            return;
        }

        let food = self.food.map(|food| food.position);
        if let Err(error) = spawner::init_obstacles(
            &mut self.rng,
            self.settings.grid,
            &mut self.obstacles,
            self.settings.obstacle_count,
            &self.snake,
            food,
        ) {
            warn!(
                "Placed only {} of {} obstacles: {error}",
                self.obstacles.len(),
                self.settings.obstacle_count
            );
        }
    }
}

fn boosted_interval(base: Duration) -> Duration {
    base.mul_f64(SPEED_BOOST_FACTOR)
}
