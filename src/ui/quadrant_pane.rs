use crate::app::{AppState, QuadrantSnapshot};
use crate::domain::{format_deadline, Task, View};
use crate::ui::styles::{
    active_border_style, border_style, deadline_style, default_style, focus_marker_style,
    quadrant_title_style, selected_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{
        block::{Position, Title},
        Block, Borders, List, ListItem, ListState,
    },
    Frame,
};

/// Render one quadrant of the matrix
pub fn render_quadrant_pane(
    f: &mut Frame,
    app: &AppState,
    snapshot: &QuadrantSnapshot,
    focus_id: Option<&str>,
    area: Rect,
) {
    let quadrant = snapshot.quadrant;
    let is_active = app.view == View::Dashboard && app.selected_quadrant == quadrant;

    let items: Vec<ListItem> = snapshot
        .tasks
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let is_focus = focus_id == Some(task.id.as_str());
            let line = create_task_line(task, is_focus);
            let style = if is_active && idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let title = Line::from(vec![
        Span::styled(
            format!(" {} {} ({}) ", quadrant.symbol(), quadrant.title(), snapshot.tasks.len()),
            quadrant_title_style(quadrant),
        ),
    ]);
    let due = Line::from(Span::styled(
        format!(" Due: {} ", format_deadline(&snapshot.deadline)),
        deadline_style(),
    ));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if is_active {
            active_border_style(quadrant)
        } else {
            border_style()
        })
        .title(title)
        .title(Title::from(due).position(Position::Bottom));

    let mut state = ListState::default();
    if is_active && !snapshot.tasks.is_empty() {
        state.select(Some(app.selected_index));
    }

    f.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

/// Format: "▶ Ship spec 🔗 🖼"
fn create_task_line(task: &Task, is_focus: bool) -> Line<'static> {
    let mut spans = Vec::new();

    if is_focus {
        spans.push(Span::styled("▶ ".to_string(), focus_marker_style()));
    } else {
        spans.push(Span::raw("  ".to_string()));
    }
    spans.push(Span::raw(task.title.clone()));

    if !task.links.is_empty() {
        spans.push(Span::styled(" 🔗".to_string(), deadline_style()));
    }
    if task.image_url.is_some() {
        spans.push(Span::styled(" 🖼".to_string(), deadline_style()));
    }

    Line::from(spans)
}
