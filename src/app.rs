//! Fixed-step driver
//!
//! One input sample, one simulation tick and one render pass per tick. When a
//! tick overruns its slot the schedule restarts from "now"; missed ticks are
//! never replayed in a burst.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::render::{Frame, Renderer};
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// Input collaborator: one snapshot per tick
pub trait InputSource {
    fn sample(&mut self) -> Result<TickInput>;
}

/// Feeds a fixed sequence of snapshots, then requests quit
#[derive(Debug, Clone)]
pub struct ScriptedInput<I> {
    inputs: I,
}

impl<I: Iterator<Item = TickInput>> ScriptedInput<I> {
    pub fn new(inputs: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            inputs: inputs.into_iter(),
        }
    }
}

impl<I: Iterator<Item = TickInput>> InputSource for ScriptedInput<I> {
    fn sample(&mut self) -> Result<TickInput> {
        Ok(self.inputs.next().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        }))
    }
}

/// Start signal on the first tick followed by `ticks - 1` idle snapshots
pub fn start_then_idle(ticks: u64) -> ScriptedInput<impl Iterator<Item = TickInput>> {
    let start = std::iter::once(TickInput {
        start: true,
        ..Default::default()
    });
    let idle = std::iter::repeat_n(TickInput::default(), ticks.saturating_sub(1) as usize);
    ScriptedInput::new(start.chain(idle).take(ticks as usize))
}

/// Renderer that only logs phase changes (headless runs)
#[derive(Debug, Default)]
pub struct LogRenderer {
    last_phase: Option<GamePhase>,
}

impl Renderer for LogRenderer {
    fn present(&mut self, frame: &Frame<'_>) -> Result<()> {
        if self.last_phase != Some(frame.phase) {
            log::info!(
                "{:?} | {} | {}",
                frame.phase,
                frame.score_text(),
                frame.lives_text()
            );
            self.last_phase = Some(frame.phase);
        }
        Ok(())
    }
}

/// Run until the input source asks to quit. Returns the number of ticks run.
pub fn run<In, R>(
    state: &mut GameState,
    input: &mut In,
    renderer: &mut R,
    tick_duration: Duration,
) -> Result<u64>
where
    In: InputSource + ?Sized,
    R: Renderer + ?Sized,
{
    let mut ticks = 0;
    let mut next = Instant::now();

    // Draw the Ready screen before the first tick
    renderer.present(&Frame::capture(state))?;

    loop {
        let snapshot = input.sample()?;
        if snapshot.quit {
            log::info!("Quit after {} ticks", ticks);
            return Ok(ticks);
        }

        tick(state, &snapshot);
        ticks += 1;
        for event in &state.events {
            log::trace!("tick {}: {:?}", state.time_ticks, event);
        }

        renderer.present(&Frame::capture(state))?;

        if tick_duration.is_zero() {
            continue;
        }
        next += tick_duration;
        let now = Instant::now();
        if next > now {
            std::thread::sleep(next - now);
        } else {
            log::debug!("Tick {} overran by {:?}", ticks, now - next);
            next = now;
        }
    }
}
