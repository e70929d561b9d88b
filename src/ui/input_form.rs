use crate::app::{AppState, FormField, InputFormState};
use crate::domain::Quadrant;
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style, quadrant_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn field_lines<'a>(label: &'a str, value: &'a str, editing: bool) -> Vec<Line<'a>> {
    let label = if editing {
        Line::raw(format!("{} (editing)", label))
    } else {
        Line::raw(label)
    };
    let mut lines = vec![label];
    let mut values = value.split('\n').peekable();
    let mut first = true;
    while let Some(text) = values.next() {
        let prefix = if first { "> " } else { "  " };
        first = false;
        let mut spans = vec![Span::raw(prefix), Span::styled(text, modal_title_style())];
        if editing && values.peek().is_none() {
            spans.push(Span::styled("█", modal_title_style())); // Cursor
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    lines
}

fn quadrant_line(form: &InputFormState) -> Line<'static> {
    let mut spans = vec![Span::raw("> ")];
    for q in Quadrant::all() {
        let text = format!("{} {}", q.index() + 1, q.title());
        if *q == form.quadrant {
            spans.push(Span::styled(format!("[{}]", text), quadrant_title_style(*q)));
        } else {
            spans.push(Span::raw(format!(" {} ", text)));
        }
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Render the input form for adding tasks
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.input_form else {
        return;
    };
    let modal_area = create_modal_area(area, 20);

    // Clear the area behind the form
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    lines.extend(field_lines(
        "Title:",
        &form.title,
        form.editing_field == FormField::Title,
    ));
    lines.extend(field_lines(
        "Description (links are picked up):",
        &form.description,
        form.editing_field == FormField::Description,
    ));
    lines.extend(field_lines(
        "Image URL:",
        &form.image_url,
        form.editing_field == FormField::ImageUrl,
    ));

    let quadrant_label = if form.editing_field == FormField::Quadrant {
        "Quadrant: (editing, ←/→ or 1-4)"
    } else {
        "Quadrant:"
    };
    lines.push(Line::raw(quadrant_label));
    lines.push(quadrant_line(form));
    lines.push(Line::raw(""));

    if let Some(error) = &form.error {
        lines.push(Line::styled(error.clone(), error_style()));
    }
    if form.checking_image {
        lines.push(Line::styled("Checking image…", modal_title_style()));
    } else {
        lines.push(Line::raw(
            "Tab next field  ·  Alt+Enter new line  ·  Enter submit  ·  Esc cancel",
        ));
        lines.push(Line::raw("Image URLs are fetched on submit and dropped if they do not load"));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Add Task ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_field_lines_cursor_on_last_line() {
        let lines = field_lines("Description:", "one\ntwo", true);
        assert_eq!(text(&lines[0]), "Description: (editing)");
        assert_eq!(text(&lines[1]), "> one");
        assert_eq!(text(&lines[2]), "  two█");
    }

    #[test]
    fn test_quadrant_line_marks_choice() {
        let form = InputFormState {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            quadrant: Quadrant::Week,
            editing_field: FormField::Quadrant,
            error: None,
            checking_image: false,
        };
        assert!(text(&quadrant_line(&form)).contains("[3 This Week]"));
    }
}
