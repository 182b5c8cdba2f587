mod display;
mod sound;

use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use bubble_pop::compute::{check_bubble_click, init_state, restart, start_game, take_events, tick};
use bubble_pop::config::{GameConfig, RunSettings};
use bubble_pop::entities::{EntireGameStateInfo, GameStatus};

use display::Viewport;
use sound::Sound;

/// What the input drained this frame asks the loop to do.
enum Flow {
    Continue,
    Quit,
}

fn is_quit(KeyEvent { code, modifiers, .. }: &KeyEvent) -> bool {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => true,
        KeyCode::Char('c') => modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

/// Apply one input event to the game.
fn apply_event(
    event: Event,
    state: &mut EntireGameStateInfo,
    cfg: &GameConfig,
    view: &mut Viewport,
    rng: &mut StdRng,
) -> Flow {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if is_quit(&key) {
                return Flow::Quit;
            }
            match (key.code, state.status) {
                (KeyCode::Char(' '), GameStatus::NotStarted) => *state = start_game(state),
                (KeyCode::Char('r') | KeyCode::Char('R'), GameStatus::GameOver) => {
                    *state = restart(state, cfg)
                }
                _ => {}
            }
        }
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            ..
        }) if state.status == GameStatus::Playing => {
            if let Some((x, y)) = view.cell_to_world(column, row) {
                *state = check_bubble_click(state, cfg, rng, x, y);
            }
        }
        Event::Resize(cols, rows) => {
            log::debug!("terminal resized to {cols}x{rows}");
            *view = Viewport::new(cols, rows, cfg);
        }
        _ => {}
    }
    Flow::Continue
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Each frame drains every pending input event without blocking, advances
/// the simulation once, plays the cues it produced and redraws.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    cfg: &GameConfig,
    settings: &RunSettings,
) -> std::io::Result<()> {
    let mut rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let sound = Sound::new(settings.mute);
    let frame_time = Duration::from_secs(1) / cfg.target_fps.max(1);

    let (cols, rows) = terminal::size()?;
    let mut view = Viewport::new(cols, rows, cfg);
    let mut state = init_state(cfg);

    loop {
        let frame_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            if let Flow::Quit = apply_event(ev, &mut state, cfg, &mut view, &mut rng) {
                log::info!("quit with score {}", state.score);
                return Ok(());
            }
        }

        state = tick(&state, cfg, &mut rng);

        for cue in take_events(&mut state) {
            sound.play(out, cue)?;
        }
        display::render(out, &state, &view)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cfg = GameConfig::default();
    let settings = RunSettings::from_env();
    log::info!("starting bubble pop: {settings:?}");

    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode().context("enabling raw mode")?;
    out.execute(terminal::EnterAlternateScreen)
        .context("entering alternate screen")?;
    out.execute(cursor::Hide)?;
    out.execute(EnableMouseCapture)
        .context("enabling mouse capture")?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(e) => {
                log::warn!("input reader stopped: {e}");
                break;
            }
        }
    });

    let result = game_loop(&mut out, &rx, &cfg, &settings);

    // Always restore the terminal
    let _ = out.execute(DisableMouseCapture);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.context("running game loop")
}
