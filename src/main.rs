//! Brick Breaker entry point
//!
//! Usage: `brick-breaker [SETTINGS.json] [--headless <TICKS>] [--print-settings] [--log-file <PATH>]`
//!
//! The terminal front-end owns stderr's screen, so logs only appear there when
//! `--log-file` is given. Headless runs log to stderr as usual (`RUST_LOG`).

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use brick_breaker::Settings;
use brick_breaker::app::{self, LogRenderer};
use brick_breaker::term::{TerminalInput, TerminalRenderer};

#[derive(Parser, Debug)]
#[command(name = "brick-breaker")]
#[command(about = "Single-screen brick breaker for the terminal")]
struct Args {
    /// Settings JSON file (defaults to $BRICK_BREAKER_SETTINGS)
    settings: Option<PathBuf>,

    /// Run this many ticks on autopilot without a terminal, then print the final state
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_settings: bool,

    /// Write logs here while the terminal front-end is running
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

/// Where log lines go for this invocation
#[derive(Debug, PartialEq, Eq)]
enum LogSink {
    Stderr,
    File(PathBuf),
    Off,
}

impl LogSink {
    fn for_args(args: &Args) -> Self {
        if args.headless.is_some() || args.print_settings {
            return LogSink::Stderr;
        }
        // stderr would draw over the playfield
        match &args.log_file {
            Some(path) => LogSink::File(path.clone()),
            None => LogSink::Off,
        }
    }
}

fn init_logging(sink: &LogSink) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match sink {
        LogSink::Stderr => {}
        LogSink::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        LogSink::Off => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&LogSink::for_args(&args))?;

    let settings = Settings::resolve(args.settings.as_deref())?;

    if args.print_settings {
        println!("{}", settings.to_json()?);
        return Ok(());
    }

    match args.headless {
        Some(ticks) => run_headless(&settings, ticks),
        None => run_terminal(&settings),
    }
}

/// Run `ticks` ticks without pacing and print the final state as JSON
fn run_headless(settings: &Settings, ticks: u64) -> Result<()> {
    let mut state = settings.new_headless_game();
    log::info!("Headless run: {} ticks, seed {}", ticks, state.seed);

    let mut input = app::start_then_idle(ticks);
    let mut renderer = LogRenderer::default();
    app::run(&mut state, &mut input, &mut renderer, Duration::ZERO)?;

    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}

fn run_terminal(settings: &Settings) -> Result<()> {
    let mut state = settings.new_game();
    log::info!("Brick Breaker starting (seed {})", state.seed);

    let mut renderer = TerminalRenderer::new();
    let result = renderer.enter(settings.mouse).and_then(|reports_releases| {
        let mut input = TerminalInput::new(
            Duration::from_millis(settings.key_release_timeout_ms),
            reports_releases,
        );
        app::run(&mut state, &mut input, &mut renderer, settings.tick_duration())
    });

    // Restore the terminal even when the loop failed
    let restored = renderer.exit();
    let ticks = result?;
    restored?;

    log::info!(
        "Finished after {} ticks: {:?}, score {}, lives {}",
        ticks,
        state.phase,
        state.score,
        state.lives
    );
    Ok(())
}
