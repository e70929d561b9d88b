use crate::app::Snapshot;
use crate::timer::{FiveSecondRule, TimerMode};
use crate::ui::styles::{border_style, deadline_style, gauge_style, timer_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

fn status_line(snapshot: &Snapshot) -> String {
    let timer = snapshot.timer;
    match snapshot.five_second {
        FiveSecondRule::CountingDown(n) => return format!("5-second rule: {}", n),
        FiveSecondRule::ShowingStart => return "START!".to_string(),
        FiveSecondRule::Off => {}
    }
    if snapshot.focus.is_none() {
        return "Pick a NOW task to start".to_string();
    }
    match (timer.is_running(), timer.mode()) {
        (true, TimerMode::Work) => "Focusing…".to_string(),
        (true, TimerMode::Break) => "On a break".to_string(),
        (false, _) if timer.remaining_secs() == timer.duration_of(timer.mode()) => {
            "Ready (space to start)".to_string()
        }
        (false, _) => "Paused".to_string(),
    }
}

/// Render the Pomodoro pane: mode, clock, gauge and session counter
pub fn render_pomodoro_pane(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let timer = snapshot.timer;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Pomodoro ", title_style()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Mode and clock
            Constraint::Length(1), // Gauge
            Constraint::Min(0),    // Session and status
        ])
        .split(inner);

    let clock = Paragraph::new(vec![
        Line::styled(timer.mode().label(), title_style()),
        Line::styled(
            timer.remaining_formatted(),
            timer_style(timer.mode(), timer.is_running()),
        ),
    ]);
    f.render_widget(clock, chunks[0]);

    let percent = (timer.progress() * 100.0).round().clamp(0.0, 100.0) as u16;
    let gauge = Gauge::default()
        .gauge_style(gauge_style(timer.mode()))
        .percent(percent)
        .label("");
    f.render_widget(gauge, chunks[1]);

    let footer = Paragraph::new(vec![
        Line::from(Span::styled(format!("Session {}", timer.session()), deadline_style())),
        Line::raw(status_line(snapshot)),
    ]);
    f.render_widget(footer, chunks[2]);
}
