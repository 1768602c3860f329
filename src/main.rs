//! Terminal arcade runner (default binary).
//!
//! Drives one minigame session: crossterm for input, the framebuffer renderer
//! for output, an interval ticker for round time.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};
use crossterm::event::{self, Event};
use tracing::info;

use puzzle_arcade::analytics::JsonLinesSink;
use puzzle_arcade::cli::{game_list, parse_args, Command, PlayOptions, USAGE};
use puzzle_arcade::core::IntervalTicker;
use puzzle_arcade::input::{map_key, should_quit};
use puzzle_arcade::session::Session;
use puzzle_arcade::term::{
    fingerprint, ArcadeView, FrameBuffer, RenderThrottle, TerminalRenderer, Viewport,
};

/// Redraw interval while nothing on screen is moving.
const IDLE_REDRAW_MS: u64 = 250;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = match parse_args(&args)? {
        Command::List => {
            print!("{}", game_list());
            return Ok(());
        }
        Command::Help => {
            print!("{}", USAGE);
            return Ok(());
        }
        Command::Play(opts) => opts,
    };

    if let Some(path) = &opts.log {
        init_logging(path)?;
    }
    let mut session = build_session(&opts)?;

    let mut term = TerminalRenderer::stdout();
    term.enter()?;

    let result = run(&mut term, &mut session, opts.round.tick_ms());

    // Always try to restore terminal state.
    let _ = term.exit();
    session.finish();
    result
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("cannot open log {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(|e| anyhow!("logging setup failed: {}", e))
}

fn build_session(opts: &PlayOptions) -> Result<Session> {
    let seed = opts.seed.unwrap_or_else(clock_seed);
    info!(game = opts.game.as_str(), seed, "session start");

    let mut session = Session::new(opts.game, &opts.settings, opts.round, seed);
    if let Some(path) = &opts.analytics {
        let sink = JsonLinesSink::append(path)
            .with_context(|| format!("cannot open analytics file {}", path.display()))?;
        session = session.with_sink(Box::new(sink));
    }
    Ok(session)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u32)
        .unwrap_or(1)
}

fn run(term: &mut TerminalRenderer, session: &mut Session, tick_ms: u32) -> Result<()> {
    let clock = Instant::now();
    let now_ms = || clock.elapsed().as_millis() as u64;

    let view = ArcadeView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut throttle = RenderThrottle::new(IDLE_REDRAW_MS);
    let mut ticker = IntervalTicker::new(tick_ms);

    session.mount(now_ms());
    ticker.start(now_ms());

    loop {
        let now = now_ms();
        if ticker.poll(now) {
            session.tick(now);
        }

        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let hud = session.hud();
        let frame = session.frame();
        let print = fingerprint(&(hud.status, hud.streak, hud.score, &frame, w, h));
        if throttle.should_render(now, print, session.is_animating()) {
            view.render_into(&hud, &frame, Viewport::new(w, h), &mut fb);
            term.draw_swap(&mut fb)?;
        }

        // Input with timeout until the next tick.
        let timeout = Duration::from_millis(ticker.due_in(now_ms()).unwrap_or(tick_ms as u64));
        if !event::poll(timeout)? {
            continue;
        }
        match event::read()? {
            Event::Key(key) => {
                let mode = session.input_mode();
                if should_quit(key, mode) {
                    return Ok(());
                }
                if let Some(input) = map_key(key, mode) {
                    session.handle_input(input, now_ms());
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}
