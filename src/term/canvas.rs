//! Rasterizes a [`Frame`] into terminal cells
//!
//! The 800×600 canvas is scaled into the available cell grid. The last row is
//! the status line (score, lives); the autopilot indicator sits on row 0 as in
//! the windowed layout.

use crate::Rgb;
use crate::colors;
use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::render::Frame;
use crate::sim::Rect;

/// One terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
    pub bg: Rgb,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: colors::WHITE,
            bg: colors::BLACK,
        }
    }
}

/// A grid of cells, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellCanvas {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl CellCanvas {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        if x < self.width && y < self.height {
            self.cells
                .get(y as usize * self.width as usize + x as usize)
                .copied()
        } else {
            None
        }
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let start = (y as usize * self.width as usize).min(self.cells.len());
        let end = (start + self.width as usize).min(self.cells.len());
        &self.cells[start..end]
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y as usize * self.width as usize + x as usize] = cell;
        }
    }

    /// Write `text` starting at (x, y), clipped to the row
    pub fn text(&mut self, x: u16, y: u16, text: &str, fg: Rgb) {
        for (i, ch) in text.chars().enumerate() {
            let Ok(dx) = u16::try_from(i) else { break };
            let cx = x.saturating_add(dx);
            if cx >= self.width {
                break;
            }
            let bg = self.get(cx, y).map(|c| c.bg).unwrap_or(colors::BLACK);
            self.set(cx, y, Cell { ch, fg, bg });
        }
    }

    /// Write `text` centered on row `y`
    pub fn text_centered(&mut self, y: u16, text: &str, fg: Rgb) {
        let len = u16::try_from(text.chars().count()).unwrap_or(u16::MAX);
        let x = self.width.saturating_sub(len) / 2;
        self.text(x, y, text, fg);
    }

    /// Rows used for the playfield (all but the status line)
    fn field_rows(&self) -> u16 {
        self.height.saturating_sub(1).max(1)
    }

    /// Canvas-space rect to an inclusive cell range, at least one cell in size
    fn cells_for(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }
        let sx = self.width as f32 / CANVAS_WIDTH;
        let sy = self.field_rows() as f32 / CANVAS_HEIGHT;
        let max_x = self.width - 1;
        let max_y = self.field_rows() - 1;

        let x0 = (rect.left() * sx).floor().clamp(0.0, max_x as f32) as u16;
        let y0 = (rect.top() * sy).floor().clamp(0.0, max_y as f32) as u16;
        let x1 = ((rect.right() * sx).ceil() - 1.0).clamp(x0 as f32, max_x as f32) as u16;
        let y1 = ((rect.bottom() * sy).ceil() - 1.0).clamp(y0 as f32, max_y as f32) as u16;
        Some((x0, y0, x1, y1))
    }

    fn fill(&mut self, rect: &Rect, ch: char, fg: Rgb, bg: Rgb) {
        if let Some((x0, y0, x1, y1)) = self.cells_for(rect) {
            for y in y0..=y1 {
                for x in x0..=x1 {
                    self.set(x, y, Cell { ch, fg, bg });
                }
            }
        }
    }

    /// Draw a full frame onto a fresh canvas of the given size
    pub fn rasterize(frame: &Frame<'_>, width: u16, height: u16) -> Self {
        let mut canvas = Self::new(width, height);
        if width == 0 || height == 0 {
            return canvas;
        }

        for brick in frame.bricks.iter().filter(|b| b.is_visible()) {
            canvas.fill(&brick.rect(), '█', brick.color, colors::BLACK);
        }

        for sprite in &frame.power_ups {
            canvas.fill(&sprite.rect, ' ', colors::BLACK, sprite.fill);
            if let Some((x0, y0, x1, _)) = canvas.cells_for(&sprite.rect) {
                let span = x1 - x0 + 1;
                let len = u16::try_from(sprite.label.chars().count()).unwrap_or(u16::MAX);
                let x = if span > len { x0 + (span - len) / 2 } else { x0 };
                canvas.text(x, y0, &sprite.label, colors::BLACK);
            }
        }

        canvas.fill(&frame.paddle, '▀', frame.paddle_color, colors::BLACK);

        let ball = Rect::around_circle(frame.ball_center, 0.0);
        if let Some((x, y, _, _)) = canvas.cells_for(&ball) {
            canvas.set(
                x,
                y,
                Cell {
                    ch: '●',
                    fg: frame.ball_color,
                    bg: colors::BLACK,
                },
            );
        }

        canvas.text(0, 0, &frame.autopilot_text(), frame.autopilot_color());
        let status = format!("{}   {}", frame.score_text(), frame.lives_text());
        canvas.text(0, height - 1, &status, colors::WHITE);

        if let Some(overlay) = frame.overlay() {
            canvas.dim();
            let mid = canvas.field_rows() / 2;
            canvas.text_centered(mid, overlay.title, colors::WHITE);
            canvas.text_centered(mid.saturating_add(2), overlay.prompt, colors::WHITE);
        }

        canvas
    }

    /// Darken everything for the overlay backdrop
    fn dim(&mut self) {
        for cell in &mut self.cells {
            cell.fg = darken(cell.fg);
            cell.bg = darken(cell.bg);
        }
    }
}

fn darken(c: Rgb) -> Rgb {
    Rgb(c.0 / 5, c.1 / 5, c.2 / 5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GamePhase, GameState, PowerUp};

    fn find(canvas: &CellCanvas, ch: char) -> Vec<(u16, u16)> {
        let mut found = Vec::new();
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.get(x, y).map(|c| c.ch) == Some(ch) {
                    found.push((x, y));
                }
            }
        }
        found
    }

    fn row_text(canvas: &CellCanvas, y: u16) -> String {
        canvas.row(y).iter().map(|c| c.ch).collect()
    }

    #[test]
    fn test_playing_frame_layout() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        let frame = Frame::capture(&state);
        // 10 px per column, 20 px per field row
        let canvas = CellCanvas::rasterize(&frame, 80, 31);

        assert_eq!(find(&canvas, '●'), vec![(40, 28)]);
        let paddle = find(&canvas, '▀');
        assert_eq!(paddle.first(), Some(&(35, 29)));
        assert_eq!(paddle.len(), 10);

        // Brick (0, 0) spans x 5..80, y 60..80
        let brick = canvas.get(0, 3).unwrap();
        assert_eq!(brick.ch, '█');
        assert_eq!(brick.fg, colors::brick_row(0));

        assert!(row_text(&canvas, 0).starts_with("Auto-play: ON"));
        assert!(row_text(&canvas, 30).starts_with("Score: 0   Lives: 3"));
        assert!(!row_text(&canvas, 15).contains("BRICK BREAKER"));
    }

    #[test]
    fn test_destroyed_bricks_not_drawn() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        for brick in state.bricks.iter_mut() {
            brick.destroy();
        }
        let frame = Frame::capture(&state);
        let canvas = CellCanvas::rasterize(&frame, 80, 31);
        assert!(find(&canvas, '█').is_empty());
    }

    #[test]
    fn test_power_up_label() {
        let mut state = GameState::new(1);
        state.phase = GamePhase::Playing;
        state.power_ups.push(PowerUp::new(400.0, 300.0));
        let frame = Frame::capture(&state);
        let canvas = CellCanvas::rasterize(&frame, 80, 31);
        assert!(row_text(&canvas, 15).contains("+20"));
    }

    #[test]
    fn test_overlay_title() {
        let state = GameState::new(1);
        let frame = Frame::capture(&state);
        let canvas = CellCanvas::rasterize(&frame, 80, 31);
        assert!(row_text(&canvas, 15).contains("BRICK BREAKER"));
        assert!(row_text(&canvas, 17).contains("Press SPACE to start"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let state = GameState::new(1);
        let frame = Frame::capture(&state);
        for (w, h) in [(0, 0), (1, 1), (3, 2), (200, 1)] {
            let canvas = CellCanvas::rasterize(&frame, w, h);
            assert_eq!(canvas.width(), w);
            assert_eq!(canvas.height(), h);
        }
    }
}
