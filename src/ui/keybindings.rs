use crate::app::AppState;
use crate::domain::View;
use crate::ui::styles::{error_style, hint_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

fn hints(view: View) -> &'static [&'static str] {
    match view {
        View::Dashboard => &[
            " ←/→/↑/↓ select   ",
            "1-4 quadrant   ",
            "</> move   ",
            "Enter details   ",
            "a add   ",
            "d done   ",
            "x delete   ",
            "space timer   ",
            "r reset   ",
            "f 5-sec   ",
            "h history   ",
            "q quit",
        ],
        View::History => &[
            " ↑/↓ select   ",
            "/ search   ",
            "s sort   ",
            "x delete   ",
            "C clear all   ",
            "h/Esc back   ",
            "q quit",
        ],
    }
}

/// Render the keybindings hint bar, or the latest status message
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(format!(" {}", message), error_style())),
        None => Line::from(hints(app.view).iter().map(|h| Span::raw(*h)).collect::<Vec<_>>()),
    };

    let paragraph = Paragraph::new(line).style(hint_style());
    f.render_widget(paragraph, area);
}
