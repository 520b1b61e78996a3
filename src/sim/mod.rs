//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (column-major brick grid, power-ups by spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{bounce_angle, first_brick_hit, hit_position, paddle_bounce_velocity};
pub use rect::{Rect, overlaps};
pub use state::{
    Ball, Brick, BrickGrid, BrickStatus, ControlMode, GameEvent, GamePhase, GameState, Paddle,
    PowerUp,
};
pub use tick::{TickInput, full_clear_score, tick};
