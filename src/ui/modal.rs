use crate::app::{AppState, Toast};
use crate::timer::FiveSecondRule;
use crate::ui::{
    layout::{create_modal_area, create_toast_area},
    styles::{countdown_style, done_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Full-screen-ish overlay while the five-second rule runs
pub fn render_five_second_overlay(f: &mut Frame, rule: FiveSecondRule, area: Rect) {
    let (headline, big) = match rule {
        FiveSecondRule::CountingDown(n) => ("Get ready…", n.to_string()),
        FiveSecondRule::ShowingStart => ("Go!", "START!".to_string()),
        FiveSecondRule::Off => return,
    };

    let modal_area = create_modal_area(area, 9);
    f.render_widget(Clear, modal_area);

    let lines = vec![
        Line::raw(""),
        Line::raw(headline),
        Line::raw(""),
        Line::styled(big, countdown_style()),
        Line::raw(""),
        Line::styled("5 4 3 2 1 and move", done_style()),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" 5-Second Rule ", modal_title_style()))
                .style(modal_bg_style()),
        );

    f.render_widget(paragraph, modal_area);
}

/// Session-complete toast in the corner
pub fn render_toast(f: &mut Frame, toast: &Toast, area: Rect) {
    let toast_area = create_toast_area(area);
    f.render_widget(Clear, toast_area);

    let paragraph = Paragraph::new(Line::raw(toast.body.clone()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", toast.title), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: true });

    f.render_widget(paragraph, toast_area);
}

/// Ask before wiping the completed list
pub fn render_confirm_clear_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area, 8);
    f.render_widget(Clear, modal_area);

    let count = app.store().completed().len();
    let lines = vec![
        Line::raw(""),
        Line::raw(format!("  Delete all {} completed tasks?", count)),
        Line::raw("  This cannot be undone."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  [y]", modal_title_style()),
            Span::raw(" Clear history  "),
            Span::styled("[n]", modal_title_style()),
            Span::raw(" Keep"),
        ]),
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Clear History ", modal_title_style()))
            .style(modal_bg_style()),
    );

    f.render_widget(paragraph, modal_area);
}
