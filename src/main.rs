//! Terminal block puzzle runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer from `term`
//! (no ratatui widgets/layout). Configuration comes from the environment:
//!
//! | Variable              | Default                  |
//! |-----------------------|--------------------------|
//! | `TUI_BLOCKS_DATA_DIR` | `$HOME/.tui-blocks`      |
//! | `TUI_BLOCKS_SEED`     | derived from the clock   |
//! | `TUI_BLOCKS_LOG_PATH` | unset (logging disabled) |

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use tui_blocks::core::GameSnapshot;
use tui_blocks::engine::{EventSink, Session};
use tui_blocks::input::{handle_key_event, should_quit, CursorHandler, InputAction, InputContext, Intent};
use tui_blocks::store::FileStore;
use tui_blocks::term::{FrameBuffer, GameView, HudView, TerminalRenderer, Viewport};
use tui_blocks::types::{CoreEvent, GameCommand, BAD_FLASH_MS, TICK_MS, TRIO_SIZE};

struct Config {
    data_dir: PathBuf,
    seed: u64,
    log_path: Option<PathBuf>,
}

impl Config {
    fn from_env() -> Self {
        let data_dir = std::env::var_os("TUI_BLOCKS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(FileStore::default_dir);
        let seed = std::env::var("TUI_BLOCKS_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);
        let log_path = std::env::var_os("TUI_BLOCKS_LOG_PATH").map(PathBuf::from);
        Self {
            data_dir,
            seed,
            log_path,
        }
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Log to a file only; the terminal belongs to the game.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let log_file = std::fs::File::create(path)
        .with_context(|| format!("creating log file {}", path.display()))?;

    let directives = std::env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&directives))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// `info` unless `RUST_LOG` says otherwise
fn log_filter(directives: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .parse_lossy(directives)
}

/// Collects whether anything worth a chime happened since the last frame
#[derive(Debug, Default)]
struct Chime {
    pending: bool,
}

impl EventSink for Chime {
    fn notify(&mut self, event: &CoreEvent) {
        debug!(?event, "notification");
        if matches!(event, CoreEvent::LinesCleared { .. } | CoreEvent::GameOver { .. }) {
            self.pending = true;
        }
    }
}

type GameSession = Session<FileStore, Chime>;

fn main() -> Result<()> {
    let config = Config::from_env();
    if let Some(path) = &config.log_path {
        init_logging(path)?;
    }

    let store = FileStore::open(&config.data_dir)
        .with_context(|| format!("opening data directory {}", config.data_dir.display()))?;
    let mut session = Session::new(store, Chime::default(), config.seed);

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(score = session.game().score(), "exiting");
    result
}

fn run(term: &mut TerminalRenderer, session: &mut GameSession) -> Result<()> {
    let view = GameView::default();
    let mut cursor = CursorHandler::new();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    // While a rejection flash is showing, the preview is left alone.
    let mut flash_left_ms = 0u32;

    refresh_hint(session, &cursor);

    loop {
        // Render.
        session.snapshot_into(&mut snap);
        let hud = HudView {
            theme: session.theme(),
            cursor: Some(cursor.cursor()),
            selected_slot: cursor.slot(),
            sfx_enabled: session.settings().sfx_enabled,
            music_enabled: session.settings().music_enabled,
        };
        let viewport = term.viewport().unwrap_or(Viewport::new(80, 24));
        view.render_into(&snap, &hud, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        if std::mem::take(&mut session.sink_mut().pending) && session.settings().sfx_enabled {
            term.bell()?;
        }

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        if !handle_action(session, &mut cursor, action) {
                            flash_left_ms = BAD_FLASH_MS;
                        } else {
                            flash_left_ms = 0;
                            refresh_hint(session, &cursor);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = elapsed.as_millis().min(u32::MAX as u128) as u32;
            let was_flashing = flash_left_ms > 0;
            flash_left_ms = flash_left_ms.saturating_sub(elapsed_ms);
            let changed = session.tick(elapsed_ms);
            if flash_left_ms == 0 && (changed || was_flashing) {
                refresh_hint(session, &cursor);
            }
        }
    }
}

/// Apply one input action; returns false when a placement was refused and
/// its footprint is now flashing.
fn handle_action(session: &mut GameSession, cursor: &mut CursorHandler, action: InputAction) -> bool {
    let (ids, len) = trio_ids(session);
    let ctx = input_context(session, &ids[..len]);

    match cursor.handle(action, &ctx) {
        Some(Intent::Command(command)) => {
            let accepted = session.apply(command);
            match command {
                GameCommand::Place { piece_id, row, col } if !accepted => {
                    session.flash_rejection(piece_id, row, col);
                    return false;
                }
                GameCommand::Reset(_) => cursor.reset(),
                _ => {}
            }
        }
        Some(Intent::CycleTheme) => {
            session.cycle_theme();
        }
        Some(Intent::ToggleSfx) => {
            session.toggle_sfx();
        }
        Some(Intent::ToggleMusic) => {
            session.toggle_music();
        }
        None => {}
    }
    true
}

fn refresh_hint(session: &mut GameSession, cursor: &CursorHandler) {
    let (ids, len) = trio_ids(session);
    let ctx = input_context(session, &ids[..len]);
    session.apply(cursor.hint_command(&ctx));
}

fn trio_ids(session: &GameSession) -> ([u32; TRIO_SIZE], usize) {
    let mut ids = [0u32; TRIO_SIZE];
    let trio = session.game().trio();
    for (slot, piece) in ids.iter_mut().zip(trio.iter()) {
        *slot = piece.id();
    }
    (ids, trio.len())
}

fn input_context<'a>(session: &GameSession, trio_ids: &'a [u32]) -> InputContext<'a> {
    InputContext {
        trio_ids,
        armed: session.game().armed_power_up(),
        difficulty: session.game().difficulty(),
    }
}
