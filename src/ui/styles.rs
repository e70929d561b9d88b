use crate::domain::Quadrant;
use crate::timer::TimerMode;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Accent color for each quadrant
pub fn quadrant_color(quadrant: Quadrant) -> Color {
    match quadrant {
        Quadrant::Immediate => Color::Red,
        Quadrant::Today => Color::Yellow,
        Quadrant::Week => Color::Blue,
        Quadrant::Month => Color::Green,
    }
}

pub fn quadrant_title_style(quadrant: Quadrant) -> Style {
    Style::default()
        .fg(quadrant_color(quadrant))
        .add_modifier(Modifier::BOLD)
}

/// Border of the quadrant that has the selection
pub fn active_border_style(quadrant: Quadrant) -> Style {
    Style::default().fg(quadrant_color(quadrant))
}

/// Marker next to the NOW task in its quadrant
pub fn focus_marker_style() -> Style {
    Style::default()
        .fg(Color::Magenta)
        .add_modifier(Modifier::BOLD)
}

pub fn timer_style(mode: TimerMode, running: bool) -> Style {
    let color = match mode {
        TimerMode::Work => Color::Red,
        TimerMode::Break => Color::Green,
    };
    let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if running {
        style
    } else {
        style.add_modifier(Modifier::DIM)
    }
}

/// Deadline and timestamp text
pub fn deadline_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn gauge_style(mode: TimerMode) -> Style {
    let color = match mode {
        TimerMode::Work => Color::Red,
        TimerMode::Break => Color::Green,
    };
    Style::default().fg(color).bg(Color::Black)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Links in task descriptions
pub fn link_style() -> Style {
    Style::default()
        .fg(Color::Blue)
        .add_modifier(Modifier::UNDERLINED)
}

/// Countdown digits of the five-second overlay
pub fn countdown_style() -> Style {
    Style::default()
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD)
}
