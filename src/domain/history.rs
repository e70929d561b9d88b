use super::task::Task;

/// Ordering for the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistorySort {
    /// Most recently completed first
    #[default]
    Date,
    /// Alphabetical, case-insensitive
    Title,
}

impl HistorySort {
    pub fn toggle(self) -> Self {
        match self {
            Self::Date => Self::Title,
            Self::Title => Self::Date,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Title => "title",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "title" => Some(Self::Title),
            _ => None,
        }
    }
}

/// Search and sort completed tasks
pub fn filter_history<'a>(completed: &'a [Task], search: &str, sort: HistorySort) -> Vec<&'a Task> {
    let needle = search.trim().to_lowercase();
    let mut matches: Vec<&Task> = completed
        .iter()
        .filter(|t| {
            needle.is_empty()
                || t.title.to_lowercase().contains(&needle)
                || t.description.to_lowercase().contains(&needle)
        })
        .collect();

    match sort {
        HistorySort::Date => matches.sort_by(|a, b| b.history_date().cmp(&a.history_date())),
        HistorySort::Title => {
            matches.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quadrant;
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn done(title: &str, description: &str, day: u32) -> Task {
        let at = Local.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap();
        Task {
            id: title.to_lowercase(),
            title: title.to_string(),
            description: description.to_string(),
            links: Vec::new(),
            image_url: None,
            quadrant: Quadrant::Today,
            completed: true,
            created_at: at,
            completed_at: Some(at),
        }
    }

    fn titles(tasks: &[&Task]) -> Vec<String> {
        tasks.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn test_sort_by_date_newest_first() {
        let tasks = vec![done("Alpha", "", 1), done("Bravo", "", 3), done("Charlie", "", 2)];
        let sorted = filter_history(&tasks, "", HistorySort::Date);
        assert_eq!(titles(&sorted), vec!["Bravo", "Charlie", "Alpha"]);
    }

    #[test]
    fn test_sort_by_title() {
        let tasks = vec![done("bravo", "", 1), done("Alpha", "", 3), done("charlie", "", 2)];
        let sorted = filter_history(&tasks, "", HistorySort::Title);
        assert_eq!(titles(&sorted), vec!["Alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_search_matches_title_or_description() {
        let tasks = vec![
            done("Pay rent", "", 1),
            done("Groceries", "remember RENT receipt", 2),
            done("Gym", "", 3),
        ];
        let found = filter_history(&tasks, "rent", HistorySort::Date);
        assert_eq!(titles(&found), vec!["Groceries", "Pay rent"]);
    }

    #[test]
    fn test_falls_back_to_created_at() {
        let mut legacy = done("Legacy", "", 4);
        legacy.completed_at = None;
        let tasks = vec![done("Recent", "", 2), legacy];
        let sorted = filter_history(&tasks, "", HistorySort::Date);
        assert_eq!(titles(&sorted), vec!["Legacy", "Recent"]);
    }

    #[test]
    fn test_sort_toggle_and_labels() {
        assert_eq!(HistorySort::Date.toggle(), HistorySort::Title);
        assert_eq!(HistorySort::from_label("TITLE"), Some(HistorySort::Title));
        assert_eq!(HistorySort::from_label("size"), None);
    }
}
