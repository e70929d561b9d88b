use crate::timer::TimerMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Focus and timer state stored in session.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMetadata {
    #[serde(default)]
    pub focus_task_id: Option<String>,
    pub timer_mode: TimerMode,
    pub timer_remaining_secs: u32,
    #[serde(default = "default_session")]
    pub session: u32,

    #[serde(default)]
    pub saved_at: Option<String>, // ISO8601 timestamp
}

fn default_session() -> u32 {
    1
}

impl Default for SessionMetadata {
    fn default() -> Self {
        Self {
            focus_task_id: None,
            timer_mode: TimerMode::Work,
            timer_remaining_secs: crate::timer::pomodoro::WORK_SECS,
            session: 1,
            saved_at: None,
        }
    }
}

/// Load session metadata, falling back to defaults when the file is absent
pub fn load_metadata<P: AsRef<Path>>(path: P) -> Result<SessionMetadata> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(SessionMetadata::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read session file: {}", path.display()))?;
    let metadata: SessionMetadata = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse session file: {}", path.display()))?;
    Ok(metadata)
}

/// Save session metadata to session.json
pub fn save_metadata<P: AsRef<Path>>(path: P, metadata: &SessionMetadata) -> Result<()> {
    let json = serde_json::to_string_pretty(metadata)?;
    super::files::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_metadata() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("session.json");

        let metadata = load_metadata(&meta_path).unwrap();
        assert_eq!(metadata, SessionMetadata::default());
        assert_eq!(metadata.timer_remaining_secs, 1500);
    }

    #[test]
    fn test_save_and_load_metadata() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("session.json");

        let metadata = SessionMetadata {
            focus_task_id: Some("abc".to_string()),
            timer_mode: TimerMode::Break,
            timer_remaining_secs: 120,
            session: 3,
            saved_at: Some("2024-03-04T10:00:00+00:00".to_string()),
        };

        save_metadata(&meta_path, &metadata).unwrap();
        let loaded = load_metadata(&meta_path).unwrap();
        assert_eq!(loaded, metadata);
    }

    #[test]
    fn test_load_tolerates_missing_fields() {
        let temp_dir = tempdir().unwrap();
        let meta_path = temp_dir.path().join("session.json");
        std::fs::write(&meta_path, r#"{"timer_mode":"work","timer_remaining_secs":900}"#).unwrap();

        let loaded = load_metadata(&meta_path).unwrap();
        assert_eq!(loaded.focus_task_id, None);
        assert_eq!(loaded.session, 1);
        assert_eq!(loaded.timer_remaining_secs, 900);
    }
}
