//! Terminal runner (default binary).
//!
//! Renders the game with a framebuffer-based view, maps keys through
//! `polydrop-input` and drives `GameState::tick` on a fixed period.

use std::fs::File;
use std::io::BufWriter;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use polydrop::core::{GameSnapshot, GameState, TickOutcome};
use polydrop::event_log::SessionStage;
use polydrop::input::{handle_key_event, should_quit};
use polydrop::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use polydrop::types::GameAction;
use polydrop::{EventLog, HostConfig, LogRecord};

type FileLog = EventLog<BufWriter<File>>;

fn main() -> Result<()> {
    let config = HostConfig::from_env();
    let seed = config.resolve_seed();

    let mut log = match config.log_path.as_deref() {
        Some(path) => Some(EventLog::open(path)?),
        None => None,
    };
    if let Some(log) = log.as_mut() {
        log.write(&LogRecord::session(SessionStage::Start, &config, seed, 0))?;
        log.flush()?;
    }

    let mut game = GameState::with_config(seed, config.game_config());
    game.start();

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut game, &config, log.as_mut());

    // Always try to restore terminal state.
    let _ = term.exit();

    if let Some(log) = log.as_mut() {
        log.write(&LogRecord::session(
            SessionStage::End,
            &config,
            seed,
            game.episode_id(),
        ))?;
        log.flush()?;
    }
    result
}

fn run(
    term: &mut TerminalRenderer,
    game: &mut GameState,
    config: &HostConfig,
    mut log: Option<&mut FileLog>,
) -> Result<()> {
    let view = GameView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut fb = FrameBuffer::new(w, h);
    let mut snap = GameSnapshot::default();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(config.tick_ms as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                        if action == GameAction::Restart {
                            if let Some(log) = log.as_deref_mut() {
                                log.write(&LogRecord::reset(game.episode_id()))?;
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            if game.tick() == TickOutcome::Locked {
                if let (Some(event), Some(log)) = (game.take_last_event(), log.as_deref_mut()) {
                    log.write(&LogRecord::lock(&event, game.episode_id()))?;
                    log.flush()?;
                }
            }
        }
    }
}
