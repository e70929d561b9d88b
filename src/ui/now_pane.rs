use crate::app::Snapshot;
use crate::ui::styles::{
    border_style, deadline_style, default_style, focus_marker_style, link_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the NOW pane with the focus task
pub fn render_now_pane(f: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let mut lines = Vec::new();

    match snapshot.focus {
        Some(task) => {
            lines.push(Line::from(vec![
                Span::styled("▶ ", focus_marker_style()),
                Span::styled(task.title.clone(), focus_marker_style()),
            ]));
            if let Some(started) = snapshot.focus_started_at {
                lines.push(Line::from(Span::styled(
                    format!("  started {}", started.format("%H:%M")),
                    deadline_style(),
                )));
            }
            lines.push(Line::raw(""));

            for text in task.description.lines().filter(|l| !l.trim().is_empty()) {
                lines.push(Line::styled(format!("  {}", text), default_style()));
            }
            for link in &task.links {
                lines.push(Line::from(vec![
                    Span::raw("  🔗 "),
                    Span::styled(link.clone(), link_style()),
                ]));
            }
            if let Some(url) = &task.image_url {
                lines.push(Line::from(vec![
                    Span::raw("  🖼 "),
                    Span::styled(url.clone(), link_style()),
                ]));
            }
        }
        None => {
            lines.push(Line::raw(""));
            lines.push(Line::styled(
                "  Nothing in focus. Add a task to Immediate Now (a, then 1).",
                deadline_style(),
            ));
        }
    }

    let mut title = vec![Span::styled(" NOW ", title_style())];
    if snapshot.waiting_immediate > 0 {
        title.push(Span::styled(
            format!("+{} waiting ", snapshot.waiting_immediate),
            deadline_style(),
        ));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Line::from(title)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
