//! Collision detection and response
//!
//! Boundary tests take the ball's *projected* center (current position plus
//! velocity) so a bounce happens before the ball leaves the canvas.

use std::f32::consts::FRAC_PI_3;

use glam::Vec2;

use super::rect::Rect;
use super::state::{BrickGrid, Paddle};
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};

/// First visible brick (column-major order) overlapping `ball`, as (col, row)
pub fn first_brick_hit(ball: &Rect, grid: &BrickGrid) -> Option<(usize, usize)> {
    grid.iter()
        .find(|brick| brick.is_visible() && brick.rect().overlaps(ball))
        .map(|brick| (brick.col, brick.row))
}

/// The projected center would put the ball through the left or right wall
#[inline]
pub fn crosses_side_wall(projected: Vec2, radius: f32) -> bool {
    projected.x > CANVAS_WIDTH - radius || projected.x < radius
}

#[inline]
pub fn crosses_ceiling(projected: Vec2, radius: f32) -> bool {
    projected.y < radius
}

#[inline]
pub fn crosses_floor(projected: Vec2, radius: f32) -> bool {
    projected.y > CANVAS_HEIGHT - radius
}

/// Normalized contact offset across the paddle: 0 at the left edge, 1 at the right.
///
/// Clamped so a ball clipping a paddle corner bounces like an edge hit.
pub fn hit_position(ball_x: f32, paddle: &Paddle) -> f32 {
    ((ball_x - paddle.x) / paddle.width).clamp(0.0, 1.0)
}

/// Bounce angle from vertical, in [-π/6, π/6]. Negative sends the ball left.
#[inline]
pub fn bounce_angle(hit_pos: f32) -> f32 {
    (hit_pos - 0.5) * FRAC_PI_3
}

/// Redirect `velocity` upward at `angle` from vertical, keeping its speed
pub fn paddle_bounce_velocity(velocity: Vec2, angle: f32) -> Vec2 {
    let speed = velocity.length();
    Vec2::new(speed * angle.sin(), -speed * angle.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::BrickStatus;

    #[test]
    fn test_first_brick_hit_column_major() {
        let grid = BrickGrid::default();
        // Straddles column 0 rows 0 and 1 and column 1 row 0
        let ball = Rect::around_circle(Vec2::new(80.0, 82.0), 8.0);
        assert_eq!(first_brick_hit(&ball, &grid), Some((0, 0)));
    }

    #[test]
    fn test_first_brick_hit_skips_destroyed() {
        let mut grid = BrickGrid::default();
        grid.get_mut(0, 0).unwrap().status = BrickStatus::Destroyed;
        let ball = Rect::around_circle(Vec2::new(80.0, 82.0), 8.0);
        assert_eq!(first_brick_hit(&ball, &grid), Some((0, 1)));
    }

    #[test]
    fn test_first_brick_hit_none_below_grid() {
        let grid = BrickGrid::default();
        let ball = Rect::around_circle(Vec2::new(400.0, 570.0), 8.0);
        assert_eq!(first_brick_hit(&ball, &grid), None);
    }

    #[test]
    fn test_boundaries() {
        assert!(crosses_side_wall(Vec2::new(793.0, 300.0), 8.0));
        assert!(crosses_side_wall(Vec2::new(7.0, 300.0), 8.0));
        assert!(!crosses_side_wall(Vec2::new(8.0, 300.0), 8.0));
        assert!(crosses_ceiling(Vec2::new(100.0, 7.5), 8.0));
        assert!(!crosses_ceiling(Vec2::new(100.0, 8.0), 8.0));
        assert!(crosses_floor(Vec2::new(100.0, 592.5), 8.0));
        assert!(!crosses_floor(Vec2::new(100.0, 592.0), 8.0));
    }

    #[test]
    fn test_center_hit_bounces_straight_up() {
        let paddle = Paddle::default();
        let hit = hit_position(paddle.center_x(), &paddle);
        assert_eq!(hit, 0.5);
        let angle = bounce_angle(hit);
        assert_eq!(angle, 0.0);

        let vel = Vec2::new(5.0, 5.0);
        let out = paddle_bounce_velocity(vel, angle);
        assert!(out.x.abs() < 1e-6);
        assert!((out.y + vel.length()).abs() < 1e-5);
    }

    #[test]
    fn test_edge_hits_map_to_sixty_degree_fan() {
        let paddle = Paddle::default();
        let left = bounce_angle(hit_position(paddle.x, &paddle));
        let right = bounce_angle(hit_position(paddle.x + paddle.width, &paddle));
        assert!((left + std::f32::consts::FRAC_PI_6).abs() < 1e-6);
        assert!((right - std::f32::consts::FRAC_PI_6).abs() < 1e-6);

        // Clipped corners clamp to the edge angle
        assert_eq!(hit_position(paddle.x - 6.0, &paddle), 0.0);
        assert_eq!(hit_position(paddle.x + paddle.width + 6.0, &paddle), 1.0);
    }

    #[test]
    fn test_bounce_preserves_speed() {
        let vel = Vec2::new(-3.0, 6.5);
        for angle in [-0.5_f32, -0.2, 0.0, 0.1, 0.52] {
            let out = paddle_bounce_velocity(vel, angle);
            assert!((out.length() - vel.length()).abs() < 1e-4);
            assert!(out.y < 0.0);
        }
    }
}
