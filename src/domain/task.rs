use super::enums::Quadrant;
use chrono::{DateTime, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

/// Rejected user input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title must not be empty")]
    EmptyTitle,
}

/// A task in the priority matrix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Opaque unique id
    pub id: String,
    pub title: String,
    /// Free-form description, may be empty
    pub description: String,
    /// URLs found in the description, in order of appearance
    pub links: Vec<String>,
    /// Image reference, only kept when it loaded successfully
    pub image_url: Option<String>,
    pub quadrant: Quadrant,
    pub completed: bool,
    pub created_at: DateTime<Local>,
    /// Set exactly when `completed` is true
    pub completed_at: Option<DateTime<Local>>,
}

impl Task {
    /// Mark as done at `now`
    pub fn mark_done(&mut self, now: DateTime<Local>) {
        self.completed = true;
        self.completed_at = Some(now);
    }

    /// Apply a partial update, keeping `completed_at` consistent with `completed`
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
            self.links = extract_links(description);
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(quadrant) = patch.quadrant {
            self.quadrant = quadrant;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
            self.completed_at = if completed {
                patch.completed_at.or(self.completed_at).or_else(|| Some(Local::now()))
            } else {
                None
            };
        }
    }

    /// Short id for display and CLI prefixes
    pub fn short_id(&self) -> &str {
        let end = self
            .id
            .char_indices()
            .nth(8)
            .map(|(idx, _)| idx)
            .unwrap_or(self.id.len());
        &self.id[..end]
    }

    /// Date used when sorting history: completion time, else creation time
    pub fn history_date(&self) -> DateTime<Local> {
        self.completed_at.unwrap_or(self.created_at)
    }
}

/// Validated input for creating a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub links: Vec<String>,
    pub image_url: Option<String>,
    pub quadrant: Quadrant,
}

impl TaskDraft {
    /// Build a draft from raw form input. Title and description are trimmed
    /// and links are extracted from the description.
    pub fn new(
        title: &str,
        description: &str,
        image_url: Option<String>,
        quadrant: Quadrant,
    ) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let description = description.trim().to_string();
        Ok(Self {
            title: title.to_string(),
            links: extract_links(&description),
            description,
            image_url: image_url.filter(|u| !u.trim().is_empty()),
            quadrant,
        })
    }
}

/// Partial update sent to the repository
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the image
    pub image_url: Option<Option<String>>,
    pub quadrant: Option<Quadrant>,
    pub completed: Option<bool>,
    pub completed_at: Option<DateTime<Local>>,
}

impl TaskPatch {
    pub fn move_to(quadrant: Quadrant) -> Self {
        Self {
            quadrant: Some(quadrant),
            ..Self::default()
        }
    }

    pub fn complete(now: DateTime<Local>) -> Self {
        Self {
            completed: Some(true),
            completed_at: Some(now),
            ..Self::default()
        }
    }
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://\S+").expect("link pattern is valid"))
}

/// Extract every http(s) URL from free text, in order
pub fn extract_links(text: &str) -> Vec<String> {
    link_pattern()
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Generate a new opaque task id
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
