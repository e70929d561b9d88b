use crate::app::AppState;
use crate::domain::{deadline_for, format_deadline, is_focusable, Quadrant, SundayPolicy};
use crate::ui::{
    layout::create_modal_area,
    styles::{deadline_style, link_style, modal_bg_style, modal_title_style, title_style},
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the task details modal
pub fn render_details_modal(f: &mut Frame, app: &AppState, policy: SundayPolicy, area: Rect) {
    let Some(task) = app.detail_task() else {
        return;
    };
    let modal_area = create_modal_area(area, 18);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Title:    ", title_style()),
            Span::raw(task.title.clone()),
        ]),
        Line::from(vec![
            Span::styled("Quadrant: ", title_style()),
            Span::raw(task.quadrant.title()),
        ]),
        Line::from(vec![
            Span::styled("Due:      ", title_style()),
            Span::styled(
                format_deadline(&deadline_for(task.quadrant, &Local::now(), policy)),
                deadline_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Created:  ", title_style()),
            Span::styled(task.created_at.format("%Y-%m-%d %H:%M").to_string(), deadline_style()),
        ]),
        Line::from(vec![
            Span::styled("Id:       ", title_style()),
            Span::styled(task.short_id().to_string(), deadline_style()),
        ]),
        Line::raw(""),
    ];

    if task.description.trim().is_empty() {
        lines.push(Line::styled("Description: (empty)", deadline_style()));
    } else {
        lines.push(Line::styled("Description:", title_style()));
        for text in task.description.lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
    }

    for link in &task.links {
        lines.push(Line::from(vec![
            Span::raw("🔗 "),
            Span::styled(link.clone(), link_style()),
        ]));
    }
    if let Some(url) = &task.image_url {
        lines.push(Line::from(vec![
            Span::raw("🖼 "),
            Span::styled(url.clone(), link_style()),
        ]));
    }
    lines.push(Line::raw(""));

    let mut options = Vec::new();
    if is_focusable(task) {
        options.push(Span::styled("[Enter]", modal_title_style()));
        options.push(Span::raw(" Make NOW  "));
    } else if task.quadrant != Quadrant::Immediate {
        options.push(Span::styled(
            "Move to Immediate Now to focus  ",
            deadline_style(),
        ));
    }
    options.push(Span::styled("[Esc]", modal_title_style()));
    options.push(Span::raw(" Close"));
    lines.push(Line::from(options));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Task Details ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}
