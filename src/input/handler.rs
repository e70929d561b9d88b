use crate::app::{Action, AppState, FormField};
use crate::domain::{Quadrant, UiMode, View};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Status messages last until the next key press
    app.status_message = None;

    match app.ui_mode {
        UiMode::Normal => match app.view {
            View::Dashboard => handle_dashboard_mode(app, key),
            View::History => handle_history_mode(app, key),
        },
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::TaskDetails => handle_details_mode(app, key),
        UiMode::SearchingHistory => handle_search_mode(app, key),
        UiMode::ConfirmClearHistory => handle_confirm_clear_mode(app, key),
    }
}

/// Keys that work on both screens. Returns None when the key is not one of them.
fn handle_global_key(app: &mut AppState, key: KeyEvent) -> Option<bool> {
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return Some(true),
        KeyCode::Char(' ') if app.pomodoro().is_running() => Action::PauseTimer,
        KeyCode::Char(' ') => Action::StartTimer,
        KeyCode::Char('r') => Action::ResetTimer,
        KeyCode::Char('f') | KeyCode::Char('F') => Action::TriggerFiveSecondRule,
        KeyCode::Char('h') | KeyCode::Char('H') => {
            app.toggle_history();
            return Some(false);
        }
        _ => return None,
    };
    // Timer actions never fail validation
    let _ = app.dispatch(action);
    Some(false)
}

/// Handle keys on the quadrant dashboard
fn handle_dashboard_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if let Some(quit) = handle_global_key(app, key) {
        return Ok(quit);
    }

    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    match key.code {
        // Navigation (with Shift modifier for moving the task)
        KeyCode::Up => app.move_selection_up(),
        KeyCode::Down => app.move_selection_down(),
        KeyCode::Left if shift => app.move_selected(false),
        KeyCode::Right if shift => app.move_selected(true),
        KeyCode::Left => app.select_prev_quadrant(),
        KeyCode::Right => app.select_next_quadrant(),
        KeyCode::Char('<') => app.move_selected(false),
        KeyCode::Char('>') => app.move_selected(true),

        KeyCode::Char(c @ '1'..='4') => {
            let index = c as usize - '1' as usize;
            if let Some(q) = Quadrant::from_index(index) {
                app.select_quadrant(q);
            }
        }

        KeyCode::Enter => app.open_details(),
        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('d') | KeyCode::Char('D') => app.complete_selected(),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.delete_selected(),
        KeyCode::Char('c') | KeyCode::Char('C') => {
            let _ = app.dispatch(Action::ClearFocus);
        }
        _ => {}
    }
    Ok(false)
}

/// Handle keys on the history screen
fn handle_history_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if let Some(quit) = handle_global_key(app, key) {
        return Ok(quit);
    }

    match key.code {
        KeyCode::Up => app.history_selection_up(),
        KeyCode::Down => app.history_selection_down(),
        KeyCode::Char('/') => app.start_history_search(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.toggle_history_sort(),
        KeyCode::Char('x') | KeyCode::Delete => app.delete_selected_history(),
        KeyCode::Char('C') => app.request_clear_history(),
        KeyCode::Esc => app.toggle_history(),
        _ => {}
    }
    Ok(false)
}

fn handle_search_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter | KeyCode::Esc => app.finish_history_search(),
        KeyCode::Backspace => app.history_search_backspace(),
        KeyCode::Char(c) => app.history_search_add_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_confirm_clear_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear_history(),
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_clear_history(),
        _ => {}
    }
    Ok(false)
}

fn handle_details_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.focus_detail_task(),
        KeyCode::Esc | KeyCode::Char('q') => app.close_details(),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add-task form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    if app.input_form.as_ref().map(|form| form.checking_image).unwrap_or(false) {
        return Ok(false);
    }
    let editing_quadrant = app
        .input_form
        .as_ref()
        .map(|form| form.editing_field == FormField::Quadrant)
        .unwrap_or(false);

    match key.code {
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Tab => app.input_form_next_field(),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => app.input_form_newline(),
        KeyCode::Enter => app.submit_input_form(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Left if editing_quadrant => app.input_form_shift_quadrant(false),
        KeyCode::Right if editing_quadrant => app.input_form_shift_quadrant(true),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::NewTask;
    use crate::config::Config;
    use crate::images::OfflineImageValidator;
    use crate::notifications::SilentNotifier;
    use crate::persistence::{MemoryRepository, UserScope};
    use crate::store::TaskStore;
    use crate::timer::{FiveSecondRule, ManualClock, TimerQueue};

    fn create_test_app() -> AppState {
        let store = TaskStore::new(Box::new(MemoryRepository::new()), UserScope::default());
        let mut app = AppState::new(
            store,
            TimerQueue::new(Box::new(ManualClock::new())),
            Box::new(SilentNotifier),
            Box::new(OfflineImageValidator),
            &Config::default(),
        );
        app.dispatch(Action::AddTask(NewTask::new("Test task", Quadrant::Immediate)))
            .unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn shift(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::SHIFT)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_quadrant_navigation() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('3'))).unwrap();
        assert_eq!(app.selected_quadrant, Quadrant::Week);
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.selected_quadrant, Quadrant::Month);
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        assert_eq!(app.selected_quadrant, Quadrant::Month);
        handle_key(&mut app, key(KeyCode::Left)).unwrap();
        assert_eq!(app.selected_quadrant, Quadrant::Week);
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        let initial_count = app.store().active().len();

        handle_key(&mut app, key(KeyCode::Char('2'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);

        type_text(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.store().active().len(), initial_count + 1);
        assert_eq!(app.store().active()[0].quadrant, Quadrant::Today);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
    }

    #[test]
    fn test_form_quadrant_field() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Later");
        for _ in 0..3 {
            handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        }
        handle_key(&mut app, key(KeyCode::Right)).unwrap();
        handle_key(&mut app, key(KeyCode::Char('4'))).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        assert_eq!(app.store().active()[0].title, "Later");
        assert_eq!(app.store().active()[0].quadrant, Quadrant::Month);
    }

    #[test]
    fn test_form_keys_ignored_while_image_is_checked() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        type_text(&mut app, "Moodboard");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_text(&mut app, "https://example.com/a.png");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        type_text(&mut app, "zzz");
        let form = app.input_form.as_ref().unwrap();
        assert!(form.checking_image);
        assert_eq!(form.image_url, "https://example.com/a.png");

        assert!(app.finish_pending_submit());
        assert_eq!(app.store().active()[0].title, "Moodboard");
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_shift_arrow_moves_task() {
        let mut app = create_test_app();
        handle_key(&mut app, shift(KeyCode::Right)).unwrap();
        assert_eq!(app.store().active()[0].quadrant, Quadrant::Today);
        assert_eq!(app.selected_quadrant, Quadrant::Today);

        handle_key(&mut app, key(KeyCode::Char('<'))).unwrap();
        assert_eq!(app.store().active()[0].quadrant, Quadrant::Immediate);
    }

    #[test]
    fn test_done_and_delete_keys() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();
        assert!(app.store().active().is_empty());
        assert_eq!(app.store().completed().len(), 1);

        app.dispatch(Action::AddTask(NewTask::new("Scratch", Quadrant::Immediate)))
            .unwrap();
        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.store().active().is_empty());
    }

    #[test]
    fn test_timer_keys() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.pomodoro().is_running());
        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(!app.pomodoro().is_running());

        handle_key(&mut app, key(KeyCode::Char('f'))).unwrap();
        assert_eq!(app.five_second(), FiveSecondRule::CountingDown(5));
    }

    #[test]
    fn test_details_enter_focuses() {
        let mut app = create_test_app();
        app.dispatch(Action::AddTask(NewTask::new("Second", Quadrant::Immediate)))
            .unwrap();
        assert_eq!(app.focus().unwrap().title, "Test task");

        // The newest task sits at the top of the quadrant
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::TaskDetails);
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.focus().unwrap().title, "Second");
    }

    #[test]
    fn test_history_search_and_clear() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('d'))).unwrap();

        handle_key(&mut app, key(KeyCode::Char('h'))).unwrap();
        assert_eq!(app.view, View::History);

        handle_key(&mut app, key(KeyCode::Char('/'))).unwrap();
        type_text(&mut app, "test");
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.history_search, "test");
        assert_eq!(app.history().len(), 1);

        handle_key(&mut app, key(KeyCode::Char('C'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::ConfirmClearHistory);
        handle_key(&mut app, key(KeyCode::Char('n'))).unwrap();
        assert_eq!(app.store().completed().len(), 1);

        handle_key(&mut app, key(KeyCode::Char('C'))).unwrap();
        handle_key(&mut app, key(KeyCode::Char('y'))).unwrap();
        assert!(app.store().completed().is_empty());

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.view, View::Dashboard);
    }
}
