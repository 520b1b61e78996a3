//! Fixed timestep simulation tick
//!
//! Advances the round by exactly one step. Within a Playing tick the order is
//! fixed: brick collision, ball movement, paddle movement, power-ups.

use serde::{Deserialize, Serialize};

use super::collision::{
    bounce_angle, crosses_ceiling, crosses_floor, crosses_side_wall, first_brick_hit,
    hit_position, paddle_bounce_velocity,
};
use super::state::{BrickGrid, ControlMode, GameEvent, GamePhase, GameState, PowerUp};
use crate::consts::*;

/// Input snapshot for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Left direction key held
    pub left: bool,
    /// Right direction key held
    pub right: bool,
    /// Start/reset pressed this tick
    pub start: bool,
    /// Toggle-autopilot pressed this tick
    pub toggle_autopilot: bool,
    /// Latest pointer x in canvas pixels (only meaningful when `pointer_moved`)
    pub pointer_x: f32,
    /// Pointer moved since the previous snapshot
    pub pointer_moved: bool,
    /// Exit requested
    pub quit: bool,
}

/// Score that ends the round as a win for `grid`
pub fn full_clear_score(grid: &BrickGrid) -> u32 {
    grid.len() as u32 * BRICK_POINTS
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    resolve_control(state, input);

    if input.start && state.phase != GamePhase::Playing {
        state.reset();
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    step(state, input);
}

/// One Playing step. Stops early once the round leaves Playing.
fn step(state: &mut GameState, input: &TickInput) {
    resolve_brick_hit(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    move_ball(state);
    if state.phase != GamePhase::Playing {
        return;
    }

    move_paddle(state, input);
    update_power_ups(state);
}

fn set_control(state: &mut GameState, mode: ControlMode) {
    if state.control != mode {
        state.control = mode;
        state.events.push(GameEvent::ControlChanged(mode));
        log::debug!("Control mode: {:?}", mode);
    }
}

/// Precedence: toggle, then a newly pressed direction key, then pointer motion
fn resolve_control(state: &mut GameState, input: &TickInput) {
    if input.toggle_autopilot {
        let next = if state.is_autopilot() {
            ControlMode::Keyboard
        } else {
            ControlMode::Autopilot
        };
        set_control(state, next);
        log::info!("Auto-play: {}", if state.is_autopilot() { "ON" } else { "OFF" });
    } else {
        let (prev_left, prev_right) = state.prev_keys;
        let newly_pressed = (input.left && !prev_left) || (input.right && !prev_right);
        if newly_pressed && state.is_autopilot() {
            set_control(state, ControlMode::Keyboard);
            log::info!("Auto-play: OFF");
        }
    }

    if input.pointer_moved {
        state.pointer_x = input.pointer_x;
        if !state.is_autopilot() {
            set_control(state, ControlMode::Pointer);
        }
    }

    state.prev_keys = (input.left, input.right);
}

/// Resolve at most one brick against the ball's current rectangle
fn resolve_brick_hit(state: &mut GameState) {
    let ball_rect = state.ball.rect();
    let Some((col, row)) = first_brick_hit(&ball_rect, &state.bricks) else {
        return;
    };
    let Some(brick) = state.bricks.get_mut(col, row) else {
        return;
    };
    brick.destroy();
    let drop_at = brick.rect().bottom_center();

    state.ball.vel.y = -state.ball.vel.y;
    state.score += BRICK_POINTS;
    state.events.push(GameEvent::BrickDestroyed { col, row });
    log::debug!("Brick ({}, {}) destroyed, score {}", col, row, state.score);

    if state.roll_power_up() {
        let power_up = PowerUp::new(drop_at.x, drop_at.y);
        state.events.push(GameEvent::PowerUpSpawned {
            x: power_up.pos.x,
            y: power_up.pos.y,
        });
        state.power_ups.push(power_up);
    }

    // Power-up points can push the score past the clear value, so an empty
    // grid also counts.
    if state.score == full_clear_score(&state.bricks) || state.bricks.all_destroyed() {
        state.phase = GamePhase::Won;
        state.events.push(GameEvent::Won);
        log::info!("Grid cleared (score {})", state.score);
    }
}

fn move_ball(state: &mut GameState) {
    let projected = state.ball.projected();
    let radius = state.ball.radius;

    if crosses_side_wall(projected, radius) {
        state.ball.vel.x = -state.ball.vel.x;
    }

    if crosses_ceiling(projected, radius) {
        state.ball.vel.y = -state.ball.vel.y;
    } else if crosses_floor(projected, radius) {
        if state.ball.rect().overlaps(&state.paddle.rect()) {
            let angle = bounce_angle(hit_position(state.ball.pos.x, &state.paddle));
            state.ball.vel = paddle_bounce_velocity(state.ball.vel, angle);
            state.events.push(GameEvent::PaddleBounce { angle });
            log::debug!("Paddle bounce at {:.3} rad", angle);
        } else {
            state.events.push(GameEvent::BallLost);
            log::debug!("Ball lost, {} lives left", state.lives.saturating_sub(1));
            if !state.lose_life() {
                state.ball.serve(&mut state.rng);
            }
        }
    }

    state.ball.advance();
}

fn move_paddle(state: &mut GameState, input: &TickInput) {
    let speed = state.paddle.speed;

    if state.is_autopilot() {
        let gap = state.ball.pos.x - state.paddle.center_x();
        if gap.abs() > AUTOPILOT_DEADBAND {
            state.paddle.move_by(speed * gap.signum());
        }
        return;
    }

    // Right wins when both keys are held
    if input.right {
        state.paddle.move_by(speed);
        set_control(state, ControlMode::Keyboard);
    } else if input.left {
        state.paddle.move_by(-speed);
        set_control(state, ControlMode::Keyboard);
    } else if state.control == ControlMode::Pointer {
        state.paddle.center_on(state.pointer_x);
    }
}

fn update_power_ups(state: &mut GameState) {
    let mut missed = 0;
    state.power_ups.retain_mut(|power_up| {
        power_up.fall();
        if power_up.pos.y > CANVAS_HEIGHT {
            missed += 1;
            false
        } else {
            true
        }
    });

    for _ in 0..missed {
        state.events.push(GameEvent::PowerUpMissed);
        if state.lose_life() {
            return;
        }
    }

    let paddle_rect = state.paddle.rect();
    let mut caught = Vec::new();
    state.power_ups.retain(|power_up| {
        if power_up.rect().overlaps(&paddle_rect) {
            caught.push(power_up.points);
            false
        } else {
            true
        }
    });

    for points in caught {
        state.score += points;
        state.events.push(GameEvent::PowerUpCaught { points });
        log::debug!("Power-up caught, score {}", state.score);
    }
}
