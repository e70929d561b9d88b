use crate::app::AppState;
use crate::domain::{Task, UiMode};
use crate::ui::styles::{
    border_style, deadline_style, default_style, done_style, modal_title_style, selected_style,
    title_style,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

fn create_done_line(task: &Task) -> Line<'static> {
    let mut spans = vec![
        Span::styled("✓ ".to_string(), done_style()),
        Span::styled(task.title.clone(), default_style()),
        Span::raw("  ".to_string()),
        Span::styled(
            task.history_date().format("%Y-%m-%d %H:%M").to_string(),
            deadline_style(),
        ),
        Span::styled(format!("  {}", task.quadrant.title()), deadline_style()),
    ];
    if !task.description.is_empty() {
        let first = task.description.lines().next().unwrap_or_default();
        spans.push(Span::styled(format!("  {}", first), deadline_style()));
    }
    Line::from(spans)
}

/// Render the history view: search box above the completed list
pub fn render_history_pane(f: &mut Frame, app: &AppState, history: &[&Task], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let searching = app.ui_mode == UiMode::SearchingHistory;
    let search = Paragraph::new(Line::from(vec![
        Span::raw("> "),
        Span::styled(app.history_search.clone(), modal_title_style()),
        if searching {
            Span::styled("█", modal_title_style())
        } else {
            Span::raw("")
        },
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(
                format!(" Search  ·  sort: {} ", app.history_sort.label()),
                title_style(),
            )),
    );
    f.render_widget(search, chunks[0]);

    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let style = if idx == app.history_selected {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_done_line(task)).style(style)
        })
        .collect();

    let total = app.store().completed().len();
    let title = if history.len() == total {
        format!(" Completed ({}) ", total)
    } else {
        format!(" Completed ({} of {}) ", history.len(), total)
    };

    let mut state = ListState::default();
    if !history.is_empty() {
        state.select(Some(app.history_selected));
    }
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );
    f.render_stateful_widget(list, chunks[1], &mut state);
}
