pub mod details_pane;
pub mod history_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod modal;
pub mod now_pane;
pub mod pomodoro_pane;
pub mod quadrant_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::{UiMode, View};
use chrono::Local;
use details_pane::render_details_modal;
use history_pane::render_history_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use modal::{render_confirm_clear_modal, render_five_second_overlay, render_toast};
use now_pane::render_now_pane;
use pomodoro_pane::render_pomodoro_pane;
use quadrant_pane::render_quadrant_pane;
use ratatui::Frame;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);
    let snapshot = app.snapshot(Local::now());

    render_keybindings(f, app, layout.keybindings_area);

    match app.view {
        View::Dashboard => {
            render_now_pane(f, &snapshot, layout.now_area);
            render_pomodoro_pane(f, &snapshot, layout.timer_area);

            let focus_id = snapshot.focus.map(|t| t.id.as_str());
            for (quadrant, area) in snapshot.quadrants.iter().zip(layout.quadrant_areas) {
                render_quadrant_pane(f, app, quadrant, focus_id, area);
            }
        }
        View::History => render_history_pane(f, app, &snapshot.history, layout.content_area),
    }

    match app.ui_mode {
        UiMode::AddingTask => render_input_form(f, app, size),
        UiMode::TaskDetails => render_details_modal(f, app, app.sunday_policy(), size),
        UiMode::ConfirmClearHistory => render_confirm_clear_modal(f, app, size),
        UiMode::Normal | UiMode::SearchingHistory => {}
    }

    render_five_second_overlay(f, snapshot.five_second, size);

    if let Some(toast) = snapshot.toast {
        render_toast(f, toast, size);
    }
}
