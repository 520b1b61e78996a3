//! Brick Breaker - a single-screen paddle-and-ball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, tick, game phases)
//! - `render`: Per-tick frame snapshot handed to a rendering collaborator
//! - `app`: Fixed-step driver connecting input, simulation and rendering
//! - `term`: Terminal front-end (crossterm)
//! - `settings`: Data-driven configuration

pub mod app;
pub mod render;
pub mod settings;
pub mod sim;
pub mod term;

pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_HZ: u32 = 60;

    /// Canvas dimensions (pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 10.0;
    /// Gap between the paddle's bottom edge and the canvas floor
    pub const PADDLE_FLOOR_GAP: f32 = 10.0;
    /// Pixels per tick
    pub const PADDLE_SPEED: f32 = 7.0;
    /// Autopilot ignores horizontal gaps up to this many pixels
    pub const AUTOPILOT_DEADBAND: f32 = 5.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    pub const BALL_START_X: f32 = CANVAS_WIDTH / 2.0;
    pub const BALL_START_Y: f32 = CANVAS_HEIGHT - 30.0;
    /// Serve velocity components (pixels/tick); horizontal sign is randomized
    pub const BALL_SERVE_DX: f32 = 5.0;
    pub const BALL_SERVE_DY: f32 = -5.0;

    /// Brick grid
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 10;
    pub const BRICK_WIDTH: f32 = 75.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_PADDING: f32 = 5.0;
    pub const BRICK_OFFSET_TOP: f32 = 60.0;
    pub const BRICK_POINTS: u32 = 10;

    /// Power-ups
    pub const POWERUP_WIDTH: f32 = 20.0;
    pub const POWERUP_HEIGHT: f32 = 20.0;
    pub const POWERUP_SPEED: f32 = 3.0;
    pub const POWERUP_POINTS: u32 = 20;
    pub const POWERUP_SPAWN_CHANCE: f64 = 0.3;

    pub const STARTING_LIVES: u8 = 3;

    /// Score that marks a fully cleared grid
    pub const FULL_CLEAR_SCORE: u32 = (BRICK_ROWS * BRICK_COLS) as u32 * BRICK_POINTS;
}

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Fixed palette
pub mod colors {
    use super::Rgb;

    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const BLUE: Rgb = Rgb(0, 149, 221);
    pub const GOLD: Rgb = Rgb(255, 215, 0);
    pub const ORANGE: Rgb = Rgb(255, 165, 0);
    pub const GREEN: Rgb = Rgb(0, 255, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);

    /// Brick colors, cycled by row index
    pub const BRICK_ROWS: [Rgb; 5] = [
        Rgb(255, 100, 100),
        Rgb(255, 165, 0),
        Rgb(255, 255, 0),
        Rgb(0, 255, 0),
        Rgb(0, 100, 255),
    ];

    /// Color for a brick in the given row
    #[inline]
    pub fn brick_row(row: usize) -> Rgb {
        BRICK_ROWS[row % BRICK_ROWS.len()]
    }
}
