//! linepad demo host.
//!
//! Thin terminal front end around one `EditSession`: translates crossterm
//! key and mouse events into input signals, keeps the host-side
//! accumulator the reconciler diffs against, and redraws the visible
//! window after every event. All editing semantics live in the core
//! crates; this binary is deliberately plumbing.

use anyhow::Result;
use clap::Parser;
use core_glyph::MonoMetrics;
use core_input::{Direction, InputSignal};
use core_session::{EditSession, InputSurface, SessionConfig, SignalOutcome, load_host_config};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use crossterm::terminal::{
    self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{cursor, execute, queue, style::Print};
use std::cell::RefCell;
use std::io::{Write, stdout};
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "linepad", version, about = "Embeddable text-entry core, terminal demo")]
struct Args {
    /// Optional configuration file path (overrides discovery of `linepad.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Override the configured line cap.
    #[arg(long = "max-lines")]
    max_lines: Option<usize>,
}

/// Host side of the platform entry surface: the accumulator lives here and
/// is shared with the event loop, so a session-initiated clear is observed
/// by the very next keystroke.
struct HostSurface {
    accumulator: Rc<RefCell<String>>,
}

impl InputSurface for HostSurface {
    fn focus(&mut self) {
        info!(target: "host.surface", "focus");
    }

    fn blur(&mut self) {
        info!(target: "host.surface", "blur");
    }

    fn clear(&mut self) {
        self.accumulator.borrow_mut().clear();
    }

    fn detach(&mut self) {
        info!(target: "host.surface", "detach");
    }
}

fn init_logging() -> WorkerGuard {
    let appender = tracing_appender::rolling::never(".", "linepad.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    guard
}

fn session_for(cols: u16, rows: u16, base: SessionConfig, text: &str) -> Result<EditSession<MonoMetrics>> {
    // Cell-per-pixel metrics: terminal columns and rows are the pixel grid.
    // The bottom row is reserved for status.
    let cfg = SessionConfig {
        viewport_width: cols.max(1) as u32,
        viewport_height: rows.saturating_sub(1).max(1) as u32,
        ..base
    };
    Ok(EditSession::with_text(cfg, MonoMetrics::terminal(), text)?)
}

fn draw(session: &EditSession<MonoMetrics>) -> Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
    for (row, line) in session.visible_lines().iter().enumerate() {
        queue!(out, cursor::MoveTo(0, row as u16), Print(line.text))?;
    }
    let stats = session.stats();
    let (_, rows) = terminal::size()?;
    queue!(
        out,
        cursor::MoveTo(0, rows.saturating_sub(1)),
        Print(format!(
            "esc: confirm | lines {} | dropped {}",
            session.buffer().line_count(),
            stats.dropped
        ))
    )?;
    let (x, y) = session.caret_screen_position();
    queue!(out, cursor::MoveTo(x as u16, y as u16))?;
    if session.caret_visible() {
        queue!(out, cursor::Show)?;
    } else {
        queue!(out, cursor::Hide)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let _log_guard = init_logging();

    let mut base = load_host_config(args.config.clone());
    if let Some(max_lines) = args.max_lines {
        base.max_lines = max_lines;
    }

    let accumulator = Rc::new(RefCell::new(String::new()));
    let (cols, rows) = terminal::size()?;
    let mut session = session_for(cols, rows, base, "")?;
    session.bind_surface(Box::new(HostSurface {
        accumulator: accumulator.clone(),
    }));

    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    info!(target: "host", cols, rows, "session started");

    let mut confirmed: Option<String> = None;
    let run = (|| -> Result<()> {
        draw(&session)?;
        loop {
            if !event::poll(Duration::from_millis(33))? {
                session.handle(InputSignal::Tick);
                draw(&session)?;
                continue;
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let signal = match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char(c) => {
                            accumulator.borrow_mut().push(c);
                            let value = accumulator.borrow().clone();
                            Some(InputSignal::RawInputChanged(value))
                        }
                        KeyCode::Enter => {
                            accumulator.borrow_mut().push('\n');
                            let value = accumulator.borrow().clone();
                            Some(InputSignal::RawInputChanged(value))
                        }
                        KeyCode::Backspace => Some(InputSignal::DeleteKey),
                        KeyCode::Left => Some(InputSignal::Navigation(Direction::Left)),
                        KeyCode::Right => Some(InputSignal::Navigation(Direction::Right)),
                        KeyCode::Up => Some(InputSignal::Navigation(Direction::Up)),
                        KeyCode::Down => Some(InputSignal::Navigation(Direction::Down)),
                        KeyCode::Esc => Some(InputSignal::ConfirmKey),
                        _ => None,
                    };
                    if let Some(signal) = signal {
                        if let SignalOutcome::Confirmed(text) = session.handle(signal) {
                            confirmed = Some(text);
                            return Ok(());
                        }
                        draw(&session)?;
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        session.handle(InputSignal::PointerDown {
                            x: mouse.column as u32,
                            y: mouse.row as u32,
                        });
                        draw(&session)?;
                    }
                }
                Event::Resize(new_cols, new_rows) => {
                    // Config is construction-time state; carry the text into
                    // a session sized for the new terminal.
                    let text = session.full_text();
                    session.teardown();
                    session = session_for(new_cols, new_rows, base, &text)?;
                    accumulator.borrow_mut().clear();
                    session.bind_surface(Box::new(HostSurface {
                        accumulator: accumulator.clone(),
                    }));
                    draw(&session)?;
                }
                _ => {}
            }
        }
    })();

    session.teardown();
    execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, cursor::Show)?;
    disable_raw_mode()?;
    run?;

    if let Some(text) = confirmed {
        println!("{text}");
    }
    Ok(())
}
