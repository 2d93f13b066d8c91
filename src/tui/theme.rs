// Bar palette
//
// Pastel colors for each highlight state, as RGB so they render the same on
// every truecolor terminal.

use crate::logging::LogLevel;
use crate::sorting::Highlight;
use ratatui::style::{Color, Modifier, Style};

pub const BLUE: Color = Color::Rgb(0xc7, 0xe4, 0xff);
pub const LIGHT_BLUE: Color = Color::Rgb(0xbb, 0xfa, 0xf8);
pub const RED: Color = Color::Rgb(0xff, 0x94, 0x94);
pub const GREEN: Color = Color::Rgb(0xb3, 0xff, 0xc3);
pub const PURPLE: Color = Color::Rgb(0xe3, 0xc7, 0xff);

/// Chrome colors (borders, text) around the bars
pub const BORDER: Color = Color::DarkGray;
pub const TITLE: Color = BLUE;
pub const MUTED: Color = Color::Gray;

/// Fill color for a bar in the given state
pub fn bar_color(highlight: Highlight) -> Color {
    match highlight {
        Highlight::Default => BLUE,
        Highlight::Comparing => RED,
        Highlight::Swapping => LIGHT_BLUE,
        Highlight::Pivot => PURPLE,
        Highlight::Done => GREEN,
    }
}

/// Bars being worked on are drawn bold
pub fn bar_style(highlight: Highlight) -> Style {
    let style = Style::default().fg(bar_color(highlight));
    if highlight.is_transient() {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

/// Style for a log line in the log panel
pub fn log_level_style(level: LogLevel) -> Style {
    match level {
        LogLevel::Error => Style::default().fg(RED).add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(Color::Yellow),
        LogLevel::Info => Style::default().fg(MUTED),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(BORDER),
    }
}

/// Style for the status line message
pub fn status_style(is_error: bool) -> Style {
    if is_error {
        Style::default().fg(RED)
    } else {
        Style::default().fg(GREEN)
    }
}
