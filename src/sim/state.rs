//! Game state and core simulation types
//!
//! The round state owns every entity. Bounding rectangles are never stored on
//! moving entities; they are derived from position and size on each call, so
//! a rectangle read after a position change always reflects that change.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::Rgb;
use crate::colors;
use crate::consts::*;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the start signal
    Ready,
    /// Active gameplay
    Playing,
    /// All lives lost
    GameOver,
    /// Brick grid cleared
    Won,
}

impl GamePhase {
    /// Terminal phases only leave via an explicit start/reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Won)
    }
}

/// Who drives the paddle. Advisory only: physics never depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    /// Paddle tracks the ball
    Autopilot,
    /// Arrow keys
    Keyboard,
    /// Paddle follows the pointer x
    Pointer,
}

impl ControlMode {
    pub fn is_autopilot(&self) -> bool {
        matches!(self, ControlMode::Autopilot)
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed for the whole round)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick
    pub speed: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            x: (CANVAS_WIDTH - PADDLE_WIDTH) / 2.0,
            y: CANVAS_HEIGHT - PADDLE_HEIGHT - PADDLE_FLOOR_GAP,
            width: PADDLE_WIDTH,
            height: PADDLE_HEIGHT,
            speed: PADDLE_SPEED,
        }
    }
}

impl Paddle {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    /// Largest allowed left edge
    pub fn max_x(&self) -> f32 {
        (CANVAS_WIDTH - self.width).max(0.0)
    }

    /// Place the left edge at `x`, clamped to the canvas
    pub fn set_x(&mut self, x: f32) {
        self.x = x.clamp(0.0, self.max_x());
    }

    /// Shift horizontally by `delta`, clamped to the canvas
    pub fn move_by(&mut self, delta: f32) {
        self.set_x(self.x + delta);
    }

    /// Center the paddle under `x`, clamped to the canvas
    pub fn center_on(&mut self, x: f32) {
        self.set_x(x - self.width / 2.0);
    }
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Center
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::new(BALL_START_X, BALL_START_Y),
            vel: Vec2::new(BALL_SERVE_DX, BALL_SERVE_DY),
            radius: BALL_RADIUS,
        }
    }
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.pos, self.radius)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Where the ball will be after one more `advance`
    pub fn projected(&self) -> Vec2 {
        self.pos + self.vel
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Return to the serve position with a random horizontal direction
    pub fn serve(&mut self, rng: &mut Pcg32) {
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.pos = Vec2::new(BALL_START_X, BALL_START_Y);
        self.vel = Vec2::new(BALL_SERVE_DX * sign, BALL_SERVE_DY);
    }
}

/// Brick visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrickStatus {
    Visible,
    Destroyed,
}

/// A brick in the grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub col: usize,
    pub row: usize,
    /// Top-left corner
    pub pos: Vec2,
    pub status: BrickStatus,
    pub color: Rgb,
}

impl Brick {
    /// Brick at grid cell (`col`, `row`)
    pub fn new(col: usize, row: usize) -> Self {
        let x = col as f32 * (BRICK_WIDTH + BRICK_PADDING) + BRICK_PADDING;
        let y = row as f32 * (BRICK_HEIGHT + BRICK_PADDING) + BRICK_OFFSET_TOP;
        Self {
            col,
            row,
            pos: Vec2::new(x, y),
            status: BrickStatus::Visible,
            color: colors::brick_row(row),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BRICK_WIDTH, BRICK_HEIGHT)
    }

    pub fn is_visible(&self) -> bool {
        self.status == BrickStatus::Visible
    }

    pub fn destroy(&mut self) {
        self.status = BrickStatus::Destroyed;
    }
}

/// The full brick grid, stored column-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickGrid {
    cols: usize,
    rows: usize,
    bricks: Vec<Brick>,
}

impl Default for BrickGrid {
    fn default() -> Self {
        Self::new(BRICK_COLS, BRICK_ROWS)
    }
}

impl BrickGrid {
    pub fn new(cols: usize, rows: usize) -> Self {
        let mut bricks = Vec::with_capacity(cols * rows);
        for col in 0..cols {
            for row in 0..rows {
                bricks.push(Brick::new(col, row));
            }
        }
        Self { cols, rows, bricks }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Brick> {
        if col < self.cols && row < self.rows {
            self.bricks.get(col * self.rows + row)
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, col: usize, row: usize) -> Option<&mut Brick> {
        if col < self.cols && row < self.rows {
            self.bricks.get_mut(col * self.rows + row)
        } else {
            None
        }
    }

    /// Column-major iteration: all rows of column 0, then column 1, ...
    pub fn iter(&self) -> impl Iterator<Item = &Brick> {
        self.bricks.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Brick> {
        self.bricks.iter_mut()
    }

    pub fn visible_count(&self) -> usize {
        self.bricks.iter().filter(|b| b.is_visible()).count()
    }

    pub fn all_destroyed(&self) -> bool {
        self.bricks.iter().all(|b| !b.is_visible())
    }
}

/// A falling bonus item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    /// Top-left corner
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Pixels per tick, downward
    pub speed: f32,
    pub points: u32,
}

impl PowerUp {
    /// Power-up horizontally centered on `center_x` with its top edge at `top`
    pub fn new(center_x: f32, top: f32) -> Self {
        Self {
            pos: Vec2::new(center_x - POWERUP_WIDTH / 2.0, top),
            width: POWERUP_WIDTH,
            height: POWERUP_HEIGHT,
            speed: POWERUP_SPEED,
            points: POWERUP_POINTS,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    pub fn fall(&mut self) {
        self.pos.y += self.speed;
    }

    /// Text drawn on the power-up
    pub fn label(&self) -> String {
        format!("+{}", self.points)
    }
}

/// Something that happened during a tick (for logging and tests)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    RoundStarted,
    ControlChanged(ControlMode),
    BrickDestroyed { col: usize, row: usize },
    PowerUpSpawned { x: f32, y: f32 },
    PowerUpCaught { points: u32 },
    PowerUpMissed,
    PaddleBounce { angle: f32 },
    BallLost,
    Won,
    GameOver,
}

/// Complete round state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source for power-up spawns and serve direction
    #[serde(skip)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub lives: u8,
    pub control: ControlMode,
    /// Chance that a destroyed brick drops a power-up
    pub power_up_chance: f64,
    /// Latest pointer x (canvas pixels)
    pub pointer_x: f32,
    /// Direction keys held in the previous input snapshot (left, right)
    #[serde(skip)]
    pub(crate) prev_keys: (bool, bool),
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    pub bricks: BrickGrid,
    pub power_ups: Vec<PowerUp>,
    /// Events recorded during the most recent tick
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new round in the Ready phase with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Ready,
            score: 0,
            lives: STARTING_LIVES,
            control: ControlMode::Autopilot,
            power_up_chance: POWERUP_SPAWN_CHANCE,
            pointer_x: CANVAS_WIDTH / 2.0,
            prev_keys: (false, false),
            time_ticks: 0,
            paddle: Paddle::default(),
            ball: Ball::default(),
            bricks: BrickGrid::default(),
            power_ups: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Restore the round to its starting values and enter Playing.
    ///
    /// The RNG is not reseeded, so successive rounds of one run differ.
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.phase = GamePhase::Playing;
        self.paddle = Paddle::default();
        self.ball.serve(&mut self.rng);
        self.bricks = BrickGrid::default();
        self.power_ups.clear();
        self.events.push(GameEvent::RoundStarted);
        log::info!("Round started (seed {})", self.seed);
    }

    pub fn is_autopilot(&self) -> bool {
        self.control.is_autopilot()
    }

    /// Take one life. Returns true when this ended the round.
    pub fn lose_life(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(GameEvent::GameOver);
            log::info!("Game over (score {})", self.score);
            true
        } else {
            false
        }
    }

    /// Roll the power-up drop for one destroyed brick
    pub fn roll_power_up(&mut self) -> bool {
        self.rng.random::<f64>() < self.power_up_chance
    }
}
