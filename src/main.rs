//! Terminal snake runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from the
//! `term` crate. Logs go to stderr, so redirect them while playing:
//!
//!   RUST_LOG=grid_snake=debug grid-snake 2>snake.log

use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::info;

use grid_snake::core::GameSnapshot;
use grid_snake::input::{should_quit, SwipeSampler};
use grid_snake::store::FileStore;
use grid_snake::term::{BoardCanvas, FrameBuffer, GameView, TerminalRenderer, Theme, Viewport};
use grid_snake::{App, FruitChime};

/// Host frame period; ticks are scheduled by the engine independently of this.
const FRAME: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(name = "grid-snake")]
#[command(about = "Snake on a 30x30 grid, in the terminal")]
struct Args {
    /// Directory holding snake_score.json and settings.json
    #[arg(long, env = "GRID_SNAKE_DATA_DIR", default_value = ".")]
    data_dir: PathBuf,

    /// Fruit placement seed (defaults to the system clock)
    #[arg(long)]
    seed: Option<u32>,

    /// Tick rate for this session, without changing the saved setting
    #[arg(long)]
    tps: Option<f32>,

    /// Never ring the bell on fruit
    #[arg(long)]
    no_beep: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::filter::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let store = FileStore::open(&args.data_dir)
        .with_context(|| format!("opening data dir {}", args.data_dir.display()))?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut app = App::new(store, seed)
        .with_tick_rate_override(args.tps)
        .with_beep_muted(args.no_beep);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    let saved = app.shutdown().context("saving scores and settings");
    result?;
    saved
}

fn run(term: &mut TerminalRenderer, app: &mut App<FileStore>) -> Result<()> {
    let epoch = Instant::now();
    let view = GameView::default();
    let mut canvas = BoardCanvas::new();
    let mut chime = FruitChime::default();
    let mut sampler = SwipeSampler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    // The engine starts faded and empty; show that before any input.
    app.publish(&mut canvas, &mut chime);

    let mut next_frame = Instant::now();
    loop {
        // Collect input until the frame boundary.
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            match event::read()? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Release && should_quit(key) {
                        info!("quit requested");
                        return Ok(());
                    }
                    sampler.handle_key(key);
                }
                Event::FocusLost => app.suspend(epoch.elapsed())?,
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }
        next_frame += FRAME;

        let now = epoch.elapsed();
        let input = sampler.take_frame();
        for &action in &input.controls {
            app.apply(action, now);
        }
        app.frame(now, input.swipe)?;

        app.publish(&mut canvas, &mut chime);
        let bell = chime.take() && app.beep_enabled();

        app.engine().snapshot_into(&mut snap);
        let theme = Theme::from_settings(app.settings());
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&canvas, &snap, &theme, &app.status(), Viewport::new(w, h), &mut fb);
        term.present(&fb, bell)?;
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
