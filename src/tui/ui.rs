// UI rendering logic
//
// Layout, top to bottom: title bar, bars, status line, log panel.

use super::app::App;
use super::theme;
use crate::logging::LogEntry;
use crate::sorting::sample::VALUE_MAX;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Height of the log panel including borders
const LOG_PANEL_HEIGHT: u16 = 7;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                // Title bar
            Constraint::Min(8),                   // Bars
            Constraint::Length(3),                // Status line
            Constraint::Length(LOG_PANEL_HEIGHT), // System logs
        ])
        .split(f.area());

    render_title(f, chunks[0], app);
    render_bars(f, chunks[1], app);
    render_status(f, chunks[2], app);
    render_logs(f, chunks[3], app);
}

fn render_title(f: &mut Frame, area: Rect, app: &App) {
    let algorithm = app
        .algorithm
        .map(|a| a.name())
        .unwrap_or("Choose an algorithm");
    let state = app.run_label();

    let line = Line::from(vec![
        Span::styled(
            " sortscope ",
            Style::default()
                .fg(theme::TITLE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│ "),
        Span::styled(
            format!("◀ {} ▶", algorithm),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" │ n = {} │ {}", app.size, state)),
    ]);

    let help = " ←/→ algorithm  ↑/↓ size  r new array  enter sort  q quit ";
    let title = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title_bottom(Line::from(help).style(Style::default().fg(theme::MUTED))),
    );
    f.render_widget(title, area);
}

/// Width and gap that fit `count` bars into `width` columns
pub fn bar_geometry(width: u16, count: usize) -> (u16, u16) {
    let count = u16::try_from(count.max(1)).unwrap_or(u16::MAX);
    let per_bar = (width / count).max(1);
    if per_bar >= 3 {
        (per_bar - 1, 1)
    } else {
        (per_bar, 0)
    }
}

fn render_bars(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::BORDER));
    let inner = block.inner(area);
    let (bar_width, bar_gap) = bar_geometry(inner.width, app.bars.len());

    // Value labels only fit on wide bars
    let show_values = bar_width >= 3;
    let bars: Vec<Bar> = app
        .bars
        .iter()
        .map(|element| {
            let bar = Bar::default()
                .value(u64::from(element.num))
                .style(theme::bar_style(element.highlight));
            if show_values {
                bar.value_style(
                    Style::default()
                        .fg(ratatui::style::Color::Black)
                        .bg(theme::bar_color(element.highlight)),
                )
            } else {
                bar.text_value(String::new())
            }
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(bar_gap)
        .max(u64::from(VALUE_MAX));

    f.render_widget(chart, area);
}

fn render_status(f: &mut Frame, area: Rect, app: &App) {
    let stats = &app.stats;
    let counters = format!(
        " {} frames │ {} compares │ {} swaps │ {} pivots │ {:.1}s │ {:.0} fps ",
        stats.frames,
        stats.comparisons,
        stats.swaps,
        stats.pivots,
        stats.elapsed.as_secs_f64(),
        stats.frame_rate()
    );

    let line = Line::from(vec![
        Span::styled(
            format!(" {}", app.status.message),
            theme::status_style(app.status.is_error),
        ),
        Span::raw("  "),
        Span::styled(counters, Style::default().fg(theme::MUTED)),
    ]);

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER)),
    );
    f.render_widget(status, area);
}

/// `12:00:01 INFO  scheduler: Sort started`
fn format_log_entry(entry: &LogEntry) -> String {
    let module = entry.target.rsplit("::").next().unwrap_or(&entry.target);
    format!(
        "{} {:<5} {}: {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        module,
        entry.message
    )
}

fn render_logs(f: &mut Frame, area: Rect, app: &App) {
    let visible = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .log_buffer
        .tail(visible)
        .iter()
        .map(|entry| {
            ListItem::new(format_log_entry(entry)).style(theme::log_level_style(entry.level))
        })
        .collect();

    let logs = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::BORDER))
            .title(" System Logs "),
    );
    f.render_widget(logs, area);
}
