// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, run events)
// - Rendering the bars

pub mod app;
pub mod theme;
pub mod ui;

use crate::config::Config;
use crate::events::RunEvent;
use crate::logging::LogBuffer;
use crate::scheduler::FrameStream;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal when
/// the user quits (or the loop fails).
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, log_buffer);

    let result = run_event_loop(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// What woke the event loop
enum LoopEvent {
    Input(Event),
    Tick,
    Run(Option<RunEvent>),
    Idle,
}

/// Main event loop
///
/// Waits on keyboard input, a redraw tick and the active run's stream with
/// tokio::select!, responding to whichever completes first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    // Keeps the elapsed counter moving between frames
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        let wake = tokio::select! {
            input = poll_input() => input.map(LoopEvent::Input).unwrap_or(LoopEvent::Idle),
            _ = tick_interval.tick() => LoopEvent::Tick,
            run_event = next_run_event(&mut app.stream) => LoopEvent::Run(run_event),
        };

        match wake {
            LoopEvent::Input(Event::Key(key_event)) => handle_key_event(app, key_event),
            LoopEvent::Input(_) | LoopEvent::Idle => {}
            LoopEvent::Tick => app.tick(),
            LoopEvent::Run(Some(run_event)) => app.apply_event(run_event),
            LoopEvent::Run(None) => app.stream_closed(),
        }

        if app.should_quit {
            break;
        }
    }

    // Dropping an active stream stops its engine
    app.stream = None;
    Ok(())
}

async fn poll_input() -> Option<Event> {
    if event::poll(Duration::from_millis(10)).unwrap_or(false) {
        event::read().ok()
    } else {
        None
    }
}

/// Next event of the active run; pending forever while no run is active
async fn next_run_event(stream: &mut Option<FrameStream>) -> Option<RunEvent> {
    match stream {
        Some(stream) => stream.next().await,
        None => std::future::pending().await,
    }
}

/// Handle keyboard input
pub fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Right => app.next_algorithm(),
        KeyCode::Left => app.prev_algorithm(),
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => app.resize(1),
        KeyCode::Down | KeyCode::Char('-') => app.resize(-1),
        KeyCode::Char('r') | KeyCode::Char('R') => app.regenerate(),
        KeyCode::Enter | KeyCode::Char(' ') => app.start_sort(),
        _ => {}
    }
}
