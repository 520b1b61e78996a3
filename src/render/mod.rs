//! Rendering boundary
//!
//! The simulation never draws. After each tick the driver captures a [`Frame`]
//! from the round state and hands it to a [`Renderer`].

use anyhow::Result;
use glam::Vec2;

use crate::Rgb;
use crate::colors;
use crate::sim::{BrickGrid, GamePhase, GameState, Rect};

/// Prompt shown under every overlay title
pub const START_PROMPT: &str = "Press SPACE to start";

/// Full-screen message for non-Playing phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    pub title: &'static str,
    pub prompt: &'static str,
}

impl Overlay {
    pub fn for_phase(phase: GamePhase) -> Option<Self> {
        let title = match phase {
            GamePhase::Ready => "BRICK BREAKER",
            GamePhase::GameOver => "GAME OVER",
            GamePhase::Won => "YOU WIN!",
            GamePhase::Playing => return None,
        };
        Some(Self {
            title,
            prompt: START_PROMPT,
        })
    }
}

/// A falling power-up as drawn
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUpSprite {
    pub rect: Rect,
    pub label: String,
    pub fill: Rgb,
    pub border: Rgb,
}

/// Everything a renderer needs for one tick
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub paddle: Rect,
    pub paddle_color: Rgb,
    pub ball_center: Vec2,
    pub ball_radius: f32,
    pub ball_color: Rgb,
    /// Draw only visible bricks
    pub bricks: &'a BrickGrid,
    pub power_ups: Vec<PowerUpSprite>,
    pub score: u32,
    pub lives: u8,
    pub autopilot: bool,
    pub phase: GamePhase,
}

impl<'a> Frame<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            paddle: state.paddle.rect(),
            paddle_color: colors::BLUE,
            ball_center: state.ball.pos,
            ball_radius: state.ball.radius,
            ball_color: colors::WHITE,
            bricks: &state.bricks,
            power_ups: state
                .power_ups
                .iter()
                .map(|p| PowerUpSprite {
                    rect: p.rect(),
                    label: p.label(),
                    fill: colors::GOLD,
                    border: colors::ORANGE,
                })
                .collect(),
            score: state.score,
            lives: state.lives,
            autopilot: state.is_autopilot(),
            phase: state.phase,
        }
    }

    pub fn overlay(&self) -> Option<Overlay> {
        Overlay::for_phase(self.phase)
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }

    pub fn autopilot_text(&self) -> String {
        format!(
            "Auto-play: {} (Press 'A' to toggle)",
            if self.autopilot { "ON" } else { "OFF" }
        )
    }

    pub fn autopilot_color(&self) -> Rgb {
        if self.autopilot {
            colors::GREEN
        } else {
            colors::RED
        }
    }
}

/// Rendering collaborator, called once per tick after the simulation step
pub trait Renderer {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()>;
}
