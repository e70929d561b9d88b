use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    /// Everything below the bar; the history view uses all of it
    pub content_area: Rect,
    pub now_area: Rect,
    pub timer_area: Rect,
    /// Immediate, Today, Week, Month from left to right
    pub quadrant_areas: [Rect; 4],
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Top row: NOW (60%) | Pomodoro (40%)
/// - Bottom row: the four quadrants side by side
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
        ])
        .split(area);

    let keybindings_area = main_chunks[0];
    let content_area = main_chunks[1];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(10), Constraint::Min(0)])
        .split(content_area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(rows[0]);

    let quadrants = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(rows[1]);

    MainLayout {
        keybindings_area,
        content_area,
        now_area: top[0],
        timer_area: top[1],
        quadrant_areas: [quadrants[0], quadrants[1], quadrants[2], quadrants[3]],
    }
}

/// Centered modal area of a fixed height
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

/// Small box in the top-right corner for toasts
pub fn create_toast_area(area: Rect) -> Rect {
    let width = area.width.min(40);
    let height = area.height.min(4);
    Rect::new(
        area.x + area.width - width,
        area.y + 1.min(area.height - height),
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_layout() {
        let area = Rect::new(0, 0, 120, 40);
        let layout = create_layout(area);

        assert_eq!(layout.keybindings_area.height, 1);
        assert_eq!(layout.now_area.height, 10);
        assert!(layout.timer_area.width > 0);
        for quadrant in layout.quadrant_areas {
            assert!(quadrant.height > 0);
            assert!(quadrant.width >= 29);
        }
        assert_eq!(layout.content_area.height, 39);
    }

    #[test]
    fn test_create_modal_area() {
        let area = Rect::new(0, 0, 100, 50);
        let modal = create_modal_area(area, 16);

        assert!(modal.width < area.width);
        assert_eq!(modal.height, 16);

        let tiny = create_modal_area(Rect::new(0, 0, 30, 8), 16);
        assert_eq!(tiny.height, 8);
    }

    #[test]
    fn test_toast_area_fits() {
        let area = Rect::new(0, 0, 100, 30);
        let toast = create_toast_area(area);
        assert_eq!(toast.x + toast.width, 100);
        assert_eq!(toast.height, 4);

        let narrow = create_toast_area(Rect::new(0, 0, 20, 3));
        assert_eq!(narrow.width, 20);
        assert_eq!(narrow.height, 3);
    }
}
