//! TerminalRenderer: flushes rasterized frames to a real terminal.
//!
//! Only rows that changed since the previous frame are rewritten.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    QueueableCommand, cursor,
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use super::canvas::CellCanvas;
use crate::Rgb;
use crate::render::{Frame, Renderer};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<CellCanvas>,
    mouse: bool,
    enhanced_keys: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            mouse: false,
            enhanced_keys: false,
        }
    }

    /// Switch to raw mode and the alternate screen.
    ///
    /// Returns true when the terminal will report key releases.
    pub fn enter(&mut self, mouse: bool) -> Result<bool> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.queue(terminal::DisableLineWrap)?;

        self.enhanced_keys = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.enhanced_keys {
            self.stdout.queue(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))?;
        }
        if mouse {
            self.stdout.queue(EnableMouseCapture)?;
        }
        self.mouse = mouse;
        self.stdout.flush()?;

        log::debug!(
            "Terminal entered (mouse: {}, key releases: {})",
            mouse,
            self.enhanced_keys
        );
        Ok(self.enhanced_keys)
    }

    pub fn exit(&mut self) -> Result<()> {
        if self.mouse {
            self.stdout.queue(DisableMouseCapture)?;
        }
        if self.enhanced_keys {
            self.stdout.queue(PopKeyboardEnhancementFlags)?;
        }
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(SetAttribute(Attribute::Reset))?;
        self.stdout.queue(terminal::EnableLineWrap)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn draw(&mut self, next: CellCanvas) -> Result<()> {
        let full = match &self.last {
            Some(prev) => prev.width() != next.width() || prev.height() != next.height(),
            None => true,
        };
        if full {
            self.stdout
                .queue(terminal::Clear(terminal::ClearType::All))?;
        }

        let mut style: Option<(Rgb, Rgb)> = None;
        for y in 0..next.height() {
            let unchanged = !full
                && self
                    .last
                    .as_ref()
                    .is_some_and(|prev| prev.row(y) == next.row(y));
            if unchanged {
                continue;
            }

            self.stdout.queue(cursor::MoveTo(0, y))?;
            for cell in next.row(y) {
                if style != Some((cell.fg, cell.bg)) {
                    self.stdout.queue(SetForegroundColor(color(cell.fg)))?;
                    self.stdout.queue(SetBackgroundColor(color(cell.bg)))?;
                    style = Some((cell.fg, cell.bg));
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        self.last = Some(next);
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for TerminalRenderer {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        let (w, h) = terminal::size().unwrap_or((80, 24));
        self.draw(CellCanvas::rasterize(frame, w, h))
    }
}

fn color(c: Rgb) -> Color {
    Color::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}
