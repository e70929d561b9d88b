use super::enums::Quadrant;
use super::task::Task;

/// Whether a task may sit in the NOW slot
pub fn is_focusable(task: &Task) -> bool {
    !task.completed && task.quadrant == Quadrant::Immediate
}

/// Decide which task occupies the NOW slot.
///
/// The current focus is kept while it is still listed, open and immediate.
/// Otherwise the first immediate task in list order is picked, or nothing.
pub fn select_focus<'a>(tasks: &'a [Task], current: Option<&str>) -> Option<&'a Task> {
    if let Some(current_id) = current {
        if let Some(task) = tasks.iter().find(|t| t.id == current_id) {
            if is_focusable(task) {
                return Some(task);
            }
        }
    }

    tasks.iter().find(|t| is_focusable(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    fn task(id: &str, quadrant: Quadrant) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {}", id),
            description: String::new(),
            links: Vec::new(),
            image_url: None,
            quadrant,
            completed: false,
            created_at: Local::now(),
            completed_at: None,
        }
    }

    #[test]
    fn test_keeps_valid_current_focus() {
        let tasks = vec![task("a", Quadrant::Immediate), task("b", Quadrant::Immediate)];
        let picked = select_focus(&tasks, Some("b")).map(|t| t.id.as_str());
        assert_eq!(picked, Some("b"));
    }

    #[test]
    fn test_picks_first_immediate_when_empty() {
        let tasks = vec![
            task("a", Quadrant::Today),
            task("b", Quadrant::Immediate),
            task("c", Quadrant::Immediate),
        ];
        let picked = select_focus(&tasks, None).map(|t| t.id.as_str());
        assert_eq!(picked, Some("b"));
    }

    #[test]
    fn test_replaces_focus_that_left_immediate() {
        let tasks = vec![task("a", Quadrant::Immediate), task("b", Quadrant::Week)];
        let picked = select_focus(&tasks, Some("b")).map(|t| t.id.as_str());
        assert_eq!(picked, Some("a"));
    }

    #[test]
    fn test_replaces_missing_or_completed_focus() {
        let mut done = task("a", Quadrant::Immediate);
        done.completed = true;
        let tasks = vec![done, task("b", Quadrant::Immediate)];
        assert_eq!(select_focus(&tasks, Some("a")).map(|t| t.id.as_str()), Some("b"));
        assert_eq!(select_focus(&tasks, Some("gone")).map(|t| t.id.as_str()), Some("b"));
    }

    #[test]
    fn test_none_without_immediate_tasks() {
        let tasks = vec![task("a", Quadrant::Today), task("b", Quadrant::Month)];
        assert!(select_focus(&tasks, None).is_none());
        assert!(select_focus(&tasks, Some("a")).is_none());
        assert!(select_focus(&[], None).is_none());
    }
}
