//! Terminal front-end
//!
//! crossterm input and a cell-based renderer, so the game runs in any
//! terminal without a windowing stack.

pub mod canvas;
pub mod input;
pub mod renderer;

pub use canvas::{Cell, CellCanvas};
pub use input::{InputState, TerminalInput, should_quit};
pub use renderer::TerminalRenderer;
