//! Terminal input: turns crossterm events into one [`TickInput`] per tick.
//!
//! Supports terminals that do not emit key release events by using a timeout:
//! a direction key counts as held until it is released or goes quiet for
//! longer than the timeout.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use crossterm::terminal;

use crate::app::InputSource;
use crate::consts::CANVAS_WIDTH;
use crate::sim::TickInput;

/// Last press/repeat of one direction key
#[derive(Debug, Clone, Copy, Default)]
struct KeyHold {
    since: Option<Instant>,
}

impl KeyHold {
    fn press(&mut self, now: Instant) {
        self.since = Some(now);
    }

    fn release(&mut self) {
        self.since = None;
    }

    fn is_held(&self, now: Instant, timeout: Option<Duration>) -> bool {
        match (self.since, timeout) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(at), Some(timeout)) => now.saturating_duration_since(at) <= timeout,
        }
    }
}

/// Accumulates events between ticks
#[derive(Debug, Clone)]
pub struct InputState {
    left: KeyHold,
    right: KeyHold,
    start: bool,
    toggle_autopilot: bool,
    pointer_x: Option<f32>,
    quit: bool,
    /// None when the terminal reports releases
    release_timeout: Option<Duration>,
}

impl InputState {
    /// `release_timeout` is ignored when `reports_releases` is set
    pub fn new(release_timeout: Duration, reports_releases: bool) -> Self {
        Self {
            left: KeyHold::default(),
            right: KeyHold::default(),
            start: false,
            toggle_autopilot: false,
            pointer_x: None,
            quit: false,
            release_timeout: if reports_releases {
                None
            } else {
                Some(release_timeout)
            },
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if should_quit(key) {
            self.quit = true;
            return;
        }

        match key.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => match key.code {
                KeyCode::Left => self.left.press(now),
                KeyCode::Right => self.right.press(now),
                KeyCode::Char(' ') if key.kind == KeyEventKind::Press => self.start = true,
                KeyCode::Char('a') | KeyCode::Char('A') if key.kind == KeyEventKind::Press => {
                    self.toggle_autopilot = true
                }
                _ => {}
            },
            KeyEventKind::Release => match key.code {
                KeyCode::Left => self.left.release(),
                KeyCode::Right => self.right.release(),
                _ => {}
            },
        }
    }

    /// Record pointer motion. `columns` is the terminal width.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, columns: u16) {
        if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) && columns > 0 {
            let px_per_col = CANVAS_WIDTH / columns as f32;
            self.pointer_x = Some((mouse.column as f32 + 0.5) * px_per_col);
        }
    }

    /// Snapshot for this tick; edge-triggered signals are consumed
    pub fn take_snapshot(&mut self, now: Instant) -> TickInput {
        let left = self.left.is_held(now, self.release_timeout);
        let right = self.right.is_held(now, self.release_timeout);
        if !left {
            self.left.release();
        }
        if !right {
            self.right.release();
        }

        let pointer = self.pointer_x.take();
        let input = TickInput {
            left,
            right,
            start: self.start,
            toggle_autopilot: self.toggle_autopilot,
            pointer_x: pointer.unwrap_or_default(),
            pointer_moved: pointer.is_some(),
            quit: self.quit,
        };
        self.start = false;
        self.toggle_autopilot = false;
        input
    }
}

/// Quit on q, Esc or Ctrl-C
pub fn should_quit(key: KeyEvent) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Polls crossterm without blocking
pub struct TerminalInput {
    state: InputState,
}

impl TerminalInput {
    pub fn new(release_timeout: Duration, reports_releases: bool) -> Self {
        Self {
            state: InputState::new(release_timeout, reports_releases),
        }
    }
}

impl InputSource for TerminalInput {
    fn sample(&mut self) -> Result<TickInput> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) => self.state.handle_key(key, Instant::now()),
                Event::Mouse(mouse) => {
                    let (columns, _) = terminal::size().unwrap_or((80, 24));
                    self.state.handle_mouse(mouse, columns);
                }
                _ => {}
            }
        }
        Ok(self.state.take_snapshot(Instant::now()))
    }
}
