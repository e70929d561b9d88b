use crate::config::Config;
use crate::domain::{
    deadline_for, filter_history, is_focusable, select_focus, HistorySort, Quadrant, SundayPolicy, Task,
    TaskDraft, UiMode, ValidationError, View,
};
use crate::images::ImageValidator;
use crate::notifications::Notifier;
use crate::persistence::{save_metadata, SessionMetadata, StoreError};
use crate::store::TaskStore;
use crate::timer::{
    CancelToken, CountdownStep, FiveSecondRule, Intervals, Pomodoro, TimerKey, TimerQueue, START_BANNER,
};
use anyhow::Result;
use chrono::{DateTime, Local};
use std::path::PathBuf;
use std::time::Duration;

const ONE_SECOND: Duration = Duration::from_secs(1);

/// How long the session-complete toast stays up
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Raw input for a new task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub quadrant: Quadrant,
}

impl NewTask {
    pub fn new(title: impl Into<String>, quadrant: Quadrant) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            image_url: None,
            quadrant,
        }
    }
}

/// Every state change goes through one of these
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddTask(NewTask),
    CompleteTask(String),
    DeleteTask(String),
    MoveTask { id: String, to: Quadrant },
    ClearHistory,
    SelectFocus(String),
    ClearFocus,
    StartTimer,
    PauseTimer,
    ResetTimer,
    TriggerFiveSecondRule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub body: String,
}

/// Field being edited in the add-task form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    ImageUrl,
    Quadrant,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            Self::Title => Self::Description,
            Self::Description => Self::ImageUrl,
            Self::ImageUrl => Self::Quadrant,
            Self::Quadrant => Self::Title,
        }
    }
}

/// Input form state for adding tasks
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub quadrant: Quadrant,
    pub editing_field: FormField,
    pub error: Option<String>,
    /// Submitted with an image URL; the network check runs after the next draw
    pub checking_image: bool,
}

/// Tasks of one quadrant with its current deadline
#[derive(Debug)]
pub struct QuadrantSnapshot<'a> {
    pub quadrant: Quadrant,
    pub deadline: DateTime<Local>,
    pub tasks: Vec<&'a Task>,
}

/// Read-only view of everything the screen shows
#[derive(Debug)]
pub struct Snapshot<'a> {
    pub quadrants: Vec<QuadrantSnapshot<'a>>,
    pub focus: Option<&'a Task>,
    pub focus_started_at: Option<DateTime<Local>>,
    /// Immediate tasks other than the focus
    pub waiting_immediate: usize,
    pub timer: &'a Pomodoro,
    pub five_second: FiveSecondRule,
    pub toast: Option<&'a Toast>,
    pub history: Vec<&'a Task>,
}

/// Main application state
pub struct AppState {
    store: TaskStore,
    timers: TimerQueue,
    notifier: Box<dyn Notifier>,
    images: Box<dyn ImageValidator>,
    sunday_policy: SundayPolicy,
    intervals: Intervals,

    focus_id: Option<String>,
    /// Set by ClearFocus; the slot stays empty until the task list changes
    focus_parked: bool,
    focus_started_at: Option<DateTime<Local>>,
    pomodoro: Pomodoro,
    five_second: FiveSecondRule,
    pomodoro_token: Option<CancelToken>,
    five_second_token: Option<CancelToken>,
    toast: Option<Toast>,
    toast_token: Option<CancelToken>,

    pub view: View,
    pub ui_mode: UiMode,
    pub selected_quadrant: Quadrant,
    pub selected_index: usize,
    pub input_form: Option<InputFormState>,
    pub detail_task_id: Option<String>,
    pub history_search: String,
    pub history_sort: HistorySort,
    pub history_selected: usize,
    pub status_message: Option<String>,
    pub needs_save: bool,
    pub session_path: Option<PathBuf>,
}

impl AppState {
    pub fn new(
        store: TaskStore,
        timers: TimerQueue,
        notifier: Box<dyn Notifier>,
        images: Box<dyn ImageValidator>,
        config: &Config,
    ) -> Self {
        let intervals = config.intervals();
        let mut app = Self {
            store,
            timers,
            notifier,
            images,
            sunday_policy: config.sunday_policy,
            intervals,
            focus_id: None,
            focus_parked: false,
            focus_started_at: None,
            pomodoro: Pomodoro::new(intervals),
            five_second: FiveSecondRule::Off,
            pomodoro_token: None,
            five_second_token: None,
            toast: None,
            toast_token: None,
            view: View::Dashboard,
            ui_mode: UiMode::Normal,
            selected_quadrant: Quadrant::Immediate,
            selected_index: 0,
            input_form: None,
            detail_task_id: None,
            history_search: String::new(),
            history_sort: HistorySort::Date,
            history_selected: 0,
            status_message: None,
            needs_save: false,
            session_path: None,
        };
        app.reconcile_focus();
        app
    }

    /// Apply saved focus and timer state. A timer that was running comes
    /// back paused.
    pub fn restore_session(&mut self, metadata: &SessionMetadata) {
        self.pomodoro = Pomodoro::restore(
            self.intervals,
            metadata.timer_mode,
            metadata.timer_remaining_secs,
            metadata.session,
        );
        // A saved focus that is gone is dropped without touching the timer
        self.focus_id = metadata
            .focus_task_id
            .clone()
            .filter(|id| self.store.active().iter().any(|t| t.id == *id && is_focusable(t)));
        self.focus_started_at = self.focus_id.as_ref().map(|_| Local::now());
        self.reconcile_focus();
    }

    pub fn session_metadata(&self) -> SessionMetadata {
        SessionMetadata {
            focus_task_id: self.focus_id.clone(),
            timer_mode: self.pomodoro.mode(),
            timer_remaining_secs: self.pomodoro.remaining_secs(),
            session: self.pomodoro.session(),
            saved_at: Some(Local::now().to_rfc3339()),
        }
    }

    /// Write session.json when a session path is set
    pub fn save(&mut self) -> Result<()> {
        if let Some(path) = &self.session_path {
            save_metadata(path, &self.session_metadata())?;
        }
        self.needs_save = false;
        Ok(())
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn pomodoro(&self) -> &Pomodoro {
        &self.pomodoro
    }

    pub fn five_second(&self) -> FiveSecondRule {
        self.five_second
    }

    pub fn sunday_policy(&self) -> SundayPolicy {
        self.sunday_policy
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    pub fn focus(&self) -> Option<&Task> {
        let id = self.focus_id.as_deref()?;
        self.store.active().iter().find(|t| t.id == id)
    }

    /// Time until the next scheduled timer is due
    pub fn next_timer_in(&self) -> Option<Duration> {
        self.timers.next_due_in()
    }

    // ----- reducer -----

    /// Single mutation entry point. Only validation failures are returned;
    /// repository failures are logged and leave the state untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ValidationError> {
        tracing::debug!(?action, "dispatch");
        match action {
            Action::AddTask(new_task) => self.add_task(new_task)?,
            Action::CompleteTask(id) => self.complete_task(&id),
            Action::DeleteTask(id) => self.delete_task(&id),
            Action::MoveTask { id, to } => self.move_task(&id, to),
            Action::ClearHistory => self.clear_history(),
            Action::SelectFocus(id) => self.select_focus(&id),
            Action::ClearFocus => {
                if let Some(id) = self.focus_id.take() {
                    tracing::info!(id = %id, "focus cleared");
                    self.stop_focus_session();
                    self.focus_started_at = None;
                    self.needs_save = true;
                }
                self.focus_parked = true;
            }
            Action::StartTimer => {
                self.start_pomodoro();
            }
            Action::PauseTimer => self.pause_pomodoro(),
            Action::ResetTimer => {
                self.pomodoro.reset();
                self.cancel_pomodoro_tick();
                self.needs_save = true;
            }
            Action::TriggerFiveSecondRule => {
                if self.focus_id.is_none() {
                    self.status_message = Some("Pick a NOW task before the five-second rule".to_string());
                } else if self.five_second.trigger() {
                    self.cancel_five_second_tick();
                    let token = self.timers.after(ONE_SECOND, TimerKey::FiveSecondTick);
                    self.five_second_token = Some(token);
                    tracing::info!("five-second rule started");
                }
            }
        }
        Ok(())
    }

    fn add_task(&mut self, new_task: NewTask) -> Result<(), ValidationError> {
        let image_url = new_task.image_url.filter(|url| {
            let ok = url.trim().is_empty() || self.images.is_loadable(url);
            if !ok {
                tracing::info!(url = %url, "image did not load, dropping it");
            }
            ok
        });
        let draft = TaskDraft::new(
            &new_task.title,
            &new_task.description,
            image_url,
            new_task.quadrant,
        )?;

        match self.store.create(draft) {
            Ok(task) => {
                tracing::info!(id = %task.id, quadrant = %task.quadrant, "task added");
                self.selected_quadrant = task.quadrant;
                self.selected_index = 0;
                self.focus_parked = false;
                self.reconcile_focus();
            }
            Err(e) => self.report_store_error("add task", e),
        }
        Ok(())
    }

    fn complete_task(&mut self, id: &str) {
        match self.store.complete(id, Local::now()) {
            Ok(true) => {
                tracing::info!(id, "task completed");
                self.after_list_change();
            }
            Ok(false) => tracing::debug!(id, "complete ignored, not an active task"),
            Err(e) => self.report_store_error("complete task", e),
        }
    }

    fn delete_task(&mut self, id: &str) {
        match self.store.delete(id) {
            Ok(true) => {
                tracing::info!(id, "task deleted");
                self.after_list_change();
            }
            Ok(false) => tracing::debug!(id, "delete ignored, unknown task"),
            Err(e) => self.report_store_error("delete task", e),
        }
    }

    fn move_task(&mut self, id: &str, to: Quadrant) {
        match self.store.move_to(id, to) {
            Ok(true) => {
                tracing::info!(id, to = %to, "task moved");
                self.after_list_change();
            }
            Ok(false) => {}
            Err(e) => self.report_store_error("move task", e),
        }
    }

    fn clear_history(&mut self) {
        match self.store.clear_history() {
            Ok(removed) => {
                tracing::info!(removed, "history cleared");
                self.history_selected = 0;
                self.status_message = Some(format!("Cleared {} completed tasks", removed));
            }
            Err(e) => self.report_store_error("clear history", e),
        }
    }

    fn select_focus(&mut self, id: &str) {
        let Some(task) = self.store.active().iter().find(|t| t.id == id) else {
            return;
        };
        if !is_focusable(task) {
            self.status_message = Some("Only Immediate Now tasks can be focused".to_string());
            return;
        }
        if self.focus_id.as_deref() != Some(id) {
            tracing::info!(id, "focus selected");
            self.focus_parked = false;
            self.focus_id = Some(id.to_string());
            self.focus_started_at = Some(Local::now());
            self.needs_save = true;
        }
    }

    fn after_list_change(&mut self) {
        self.focus_parked = false;
        self.reconcile_focus();
        self.clamp_selection();
        self.clamp_history_selection();
    }

    /// Keep the NOW slot consistent with the task list. A focus that is no
    /// longer an open immediate task is cleared, which stops its timers,
    /// before the slot is refilled.
    fn reconcile_focus(&mut self) {
        if self.focus_id.is_none() && self.focus_parked {
            return;
        }
        let next = select_focus(self.store.active(), self.focus_id.as_deref()).map(|t| t.id.clone());
        if next == self.focus_id {
            return;
        }

        if self.focus_id.is_some() {
            tracing::info!(previous = ?self.focus_id, "focus task left the NOW slot");
            self.stop_focus_session();
        }
        self.focus_started_at = next.as_ref().map(|_| Local::now());
        self.focus_id = next;
        self.needs_save = true;
    }

    fn stop_focus_session(&mut self) {
        self.pomodoro.reset();
        self.cancel_pomodoro_tick();
        self.five_second.cancel();
        self.cancel_five_second_tick();
    }

    /// Log a repository failure and surface it in the status bar
    pub fn report_store_error(&mut self, operation: &str, error: StoreError) {
        tracing::warn!(error = %error, "{} failed", operation);
        self.status_message = Some(format!("Could not {}: {}", operation, error));
    }

    // ----- timers -----

    fn start_pomodoro(&mut self) -> bool {
        if self.focus_id.is_none() {
            self.status_message = Some("Pick a NOW task before starting the timer".to_string());
            return false;
        }
        if !self.pomodoro.start() {
            return false;
        }
        let due = self.timers.now() + ONE_SECOND;
        self.schedule_pomodoro_tick(due);
        self.needs_save = true;
        tracing::info!(mode = ?self.pomodoro.mode(), remaining = self.pomodoro.remaining_secs(), "timer started");
        true
    }

    fn pause_pomodoro(&mut self) {
        if self.pomodoro.pause() {
            self.cancel_pomodoro_tick();
            self.needs_save = true;
            tracing::info!(remaining = self.pomodoro.remaining_secs(), "timer paused");
        }
    }

    fn schedule_pomodoro_tick(&mut self, due: Duration) {
        self.cancel_pomodoro_tick();
        self.pomodoro_token = Some(self.timers.at(due, TimerKey::PomodoroTick));
    }

    fn cancel_pomodoro_tick(&mut self) {
        if let Some(token) = self.pomodoro_token.take() {
            self.timers.cancel(token);
        }
    }

    fn cancel_five_second_tick(&mut self) {
        if let Some(token) = self.five_second_token.take() {
            self.timers.cancel(token);
        }
    }

    fn show_toast(&mut self, title: String, body: String) {
        if let Some(token) = self.toast_token.take() {
            self.timers.cancel(token);
        }
        self.toast = Some(Toast { title, body });
        self.toast_token = Some(self.timers.after(TOAST_DURATION, TimerKey::ToastExpired));
    }

    /// Fire every due timer. Returns true when anything fired.
    pub fn pump_timers(&mut self) -> bool {
        let mut fired_any = false;
        while let Some(fired) = self.timers.pop_due() {
            fired_any = true;
            match fired.key {
                TimerKey::PomodoroTick => {
                    self.pomodoro_token = None;
                    if let Some(done) = self.pomodoro.tick() {
                        let (title, body) = done.message(self.intervals.break_secs);
                        tracing::info!(ended = ?done.ended, session = self.pomodoro.session(), "interval finished");
                        self.notifier.notify(&title, &body);
                        self.show_toast(title, body);
                        self.needs_save = true;
                    } else if self.pomodoro.is_running() {
                        self.schedule_pomodoro_tick(fired.due + ONE_SECOND);
                    }
                }
                TimerKey::FiveSecondTick => {
                    self.five_second_token = None;
                    match self.five_second.tick() {
                        Some(CountdownStep::Continue) => {
                            let token = self.timers.at(fired.due + ONE_SECOND, TimerKey::FiveSecondTick);
                            self.five_second_token = Some(token);
                        }
                        Some(CountdownStep::Launch) => {
                            let token = self.timers.at(fired.due + START_BANNER, TimerKey::StartBannerElapsed);
                            self.five_second_token = Some(token);
                        }
                        None => {}
                    }
                }
                TimerKey::StartBannerElapsed => {
                    self.five_second_token = None;
                    if self.five_second.finish() && self.focus_id.is_some() {
                        self.start_pomodoro();
                    }
                }
                TimerKey::ToastExpired => {
                    self.toast_token = None;
                    self.toast = None;
                }
            }
        }
        fired_any
    }

    // ----- snapshot -----

    pub fn history(&self) -> Vec<&Task> {
        filter_history(self.store.completed(), &self.history_search, self.history_sort)
    }

    pub fn snapshot(&self, now: DateTime<Local>) -> Snapshot<'_> {
        let quadrants = Quadrant::all()
            .iter()
            .map(|&quadrant| QuadrantSnapshot {
                quadrant,
                deadline: deadline_for(quadrant, &now, self.sunday_policy),
                tasks: self.store.in_quadrant(quadrant),
            })
            .collect();
        let focus = self.focus();
        let waiting_immediate = self
            .store
            .active()
            .iter()
            .filter(|t| is_focusable(t) && Some(t.id.as_str()) != focus.map(|f| f.id.as_str()))
            .count();

        Snapshot {
            quadrants,
            focus,
            focus_started_at: self.focus_started_at,
            waiting_immediate,
            timer: &self.pomodoro,
            five_second: self.five_second,
            toast: self.toast.as_ref(),
            history: self.history(),
        }
    }

    // ----- selection -----

    pub fn selected_task(&self) -> Option<&Task> {
        self.store
            .in_quadrant(self.selected_quadrant)
            .get(self.selected_index)
            .copied()
    }

    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn move_selection_down(&mut self) {
        let len = self.store.in_quadrant(self.selected_quadrant).len();
        if self.selected_index + 1 < len {
            self.selected_index += 1;
        }
    }

    pub fn select_quadrant(&mut self, quadrant: Quadrant) {
        self.selected_quadrant = quadrant;
        self.selected_index = 0;
    }

    pub fn select_prev_quadrant(&mut self) {
        if let Some(q) = self.selected_quadrant.prev() {
            self.select_quadrant(q);
        }
    }

    pub fn select_next_quadrant(&mut self) {
        if let Some(q) = self.selected_quadrant.next() {
            self.select_quadrant(q);
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.store.in_quadrant(self.selected_quadrant).len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
    }

    /// Move the selected task to the neighbouring quadrant, keeping it selected
    pub fn move_selected(&mut self, forward: bool) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let id = task.id.clone();
        let target = if forward {
            task.quadrant.next()
        } else {
            task.quadrant.prev()
        };
        let Some(to) = target else {
            return;
        };

        let _ = self.dispatch(Action::MoveTask { id: id.clone(), to });
        if self.store.get(&id).map(|t| t.quadrant) == Some(to) {
            self.selected_quadrant = to;
            self.selected_index = self
                .store
                .in_quadrant(to)
                .iter()
                .position(|t| t.id == id)
                .unwrap_or(0);
        }
    }

    pub fn complete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            let _ = self.dispatch(Action::CompleteTask(id));
        }
    }

    pub fn delete_selected(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            let _ = self.dispatch(Action::DeleteTask(id));
        }
    }

    // ----- details modal -----

    pub fn open_details(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            self.detail_task_id = Some(id);
            self.ui_mode = UiMode::TaskDetails;
        }
    }

    pub fn detail_task(&self) -> Option<&Task> {
        self.store.get(self.detail_task_id.as_deref()?)
    }

    /// Make the task shown in the details modal the NOW task
    pub fn focus_detail_task(&mut self) {
        if let Some(id) = self.detail_task_id.clone() {
            let _ = self.dispatch(Action::SelectFocus(id));
        }
        self.close_details();
    }

    pub fn close_details(&mut self) {
        self.detail_task_id = None;
        self.ui_mode = UiMode::Normal;
    }

    // ----- add-task form -----

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState {
            title: String::new(),
            description: String::new(),
            image_url: String::new(),
            quadrant: self.selected_quadrant,
            editing_field: FormField::Title,
            error: None,
            checking_image: false,
        });
        self.ui_mode = UiMode::AddingTask;
    }

    pub fn input_form_next_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = form.editing_field.next();
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                FormField::Title => form.title.push(c),
                FormField::Description => form.description.push(c),
                FormField::ImageUrl => form.image_url.push(c),
                FormField::Quadrant => {
                    if let Some(q) = c
                        .to_digit(10)
                        .and_then(|d| (d as usize).checked_sub(1))
                        .and_then(Quadrant::from_index) {
                        form.quadrant = q;
                    }
                }
            }
        }
    }

    pub fn input_form_newline(&mut self) {
        if let Some(form) = &mut self.input_form {
            if form.editing_field == FormField::Description {
                form.description.push('\n');
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            match form.editing_field {
                FormField::Title => {
                    form.title.pop();
                }
                FormField::Description => {
                    form.description.pop();
                }
                FormField::ImageUrl => {
                    form.image_url.pop();
                }
                FormField::Quadrant => {}
            }
        }
    }

    /// Cycle the form's quadrant
    pub fn input_form_shift_quadrant(&mut self, forward: bool) {
        if let Some(form) = &mut self.input_form {
            let next = if forward {
                form.quadrant.next()
            } else {
                form.quadrant.prev()
            };
            if let Some(q) = next {
                form.quadrant = q;
            }
        }
    }

    /// Submit the form. An empty title keeps the form open with an error.
    /// Submit the add form. With an image URL the form first shows a
    /// checking state and the task is added by `finish_pending_submit`.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.as_mut() else {
            return;
        };
        if form.checking_image {
            return;
        }
        if !form.image_url.trim().is_empty() && !form.title.trim().is_empty() {
            form.checking_image = true;
            form.error = None;
            return;
        }
        self.commit_input_form();
    }

    /// Run a submit that is waiting on its image check. Blocks for up to the
    /// validator timeout. Returns true if there was one.
    pub fn finish_pending_submit(&mut self) -> bool {
        let pending = self
            .input_form
            .as_ref()
            .map(|form| form.checking_image)
            .unwrap_or(false);
        if pending {
            self.commit_input_form();
        }
        pending
    }

    fn commit_input_form(&mut self) {
        let Some(form) = self.input_form.take() else {
            return;
        };
        let image_url = Some(form.image_url.trim().to_string()).filter(|u| !u.is_empty());
        let new_task = NewTask {
            title: form.title.clone(),
            description: form.description.clone(),
            image_url,
            quadrant: form.quadrant,
        };

        match self.dispatch(Action::AddTask(new_task)) {
            Ok(()) => self.ui_mode = UiMode::Normal,
            Err(e) => {
                self.input_form = Some(InputFormState {
                    error: Some(e.to_string()),
                    checking_image: false,
                    ..form
                });
            }
        }
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }

    // ----- history view -----

    pub fn toggle_history(&mut self) {
        self.view = match self.view {
            View::Dashboard => View::History,
            View::History => View::Dashboard,
        };
        self.ui_mode = UiMode::Normal;
        self.history_selected = 0;
    }

    pub fn start_history_search(&mut self) {
        self.ui_mode = UiMode::SearchingHistory;
    }

    pub fn history_search_add_char(&mut self, c: char) {
        self.history_search.push(c);
        self.history_selected = 0;
    }

    pub fn history_search_backspace(&mut self) {
        self.history_search.pop();
        self.history_selected = 0;
    }

    pub fn finish_history_search(&mut self) {
        self.ui_mode = UiMode::Normal;
    }

    pub fn toggle_history_sort(&mut self) {
        self.history_sort = self.history_sort.toggle();
        self.history_selected = 0;
    }

    pub fn history_selection_up(&mut self) {
        self.history_selected = self.history_selected.saturating_sub(1);
    }

    pub fn history_selection_down(&mut self) {
        if self.history_selected + 1 < self.history().len() {
            self.history_selected += 1;
        }
    }

    fn clamp_history_selection(&mut self) {
        let len = self.history().len();
        if self.history_selected >= len {
            self.history_selected = len.saturating_sub(1);
        }
    }

    pub fn delete_selected_history(&mut self) {
        let id = self
            .history()
            .get(self.history_selected)
            .map(|t| t.id.clone());
        if let Some(id) = id {
            let _ = self.dispatch(Action::DeleteTask(id));
        }
    }

    pub fn request_clear_history(&mut self) {
        if !self.store.completed().is_empty() {
            self.ui_mode = UiMode::ConfirmClearHistory;
        }
    }

    pub fn confirm_clear_history(&mut self) {
        let _ = self.dispatch(Action::ClearHistory);
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_clear_history(&mut self) {
        self.ui_mode = UiMode::Normal;
    }
}
