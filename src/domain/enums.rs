use serde::{Deserialize, Serialize};

/// Priority bucket a task is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quadrant {
    Immediate,
    Today,
    Week,
    Month,
}

impl Quadrant {
    /// Parse a quadrant from its storage tag like "immediate"
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "immediate" | "now" => Some(Self::Immediate),
            "today" => Some(Self::Today),
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    /// Storage tag, matching the remote schema
    pub fn to_tag(&self) -> &'static str {
        match self {
            Self::Immediate => "immediate",
            Self::Today => "today",
            Self::Week => "week",
            Self::Month => "month",
        }
    }

    /// Pane title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Immediate => "Immediate Now",
            Self::Today => "Today",
            Self::Week => "This Week",
            Self::Month => "This Month",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Immediate => "🔥",
            Self::Today => "📅",
            Self::Week => "📋",
            Self::Month => "🗓",
        }
    }

    /// Position in the matrix, left to right
    pub fn index(&self) -> usize {
        match self {
            Self::Immediate => 0,
            Self::Today => 1,
            Self::Week => 2,
            Self::Month => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Neighbour to the left, if any
    pub fn prev(&self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    /// Neighbour to the right, if any
    pub fn next(&self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// Get all quadrants in display order
    pub fn all() -> &'static [Quadrant] {
        &[
            Quadrant::Immediate,
            Quadrant::Today,
            Quadrant::Week,
            Quadrant::Month,
        ]
    }
}

impl std::fmt::Display for Quadrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_tag())
    }
}

impl std::str::FromStr for Quadrant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| {
            format!(
                "unknown quadrant '{}' (expected immediate, today, week or month)",
                s
            )
        })
    }
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    History,
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    TaskDetails,
    SearchingHistory,
    ConfirmClearHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadrant_from_tag() {
        assert_eq!(Quadrant::from_tag("immediate"), Some(Quadrant::Immediate));
        assert_eq!(Quadrant::from_tag("TODAY"), Some(Quadrant::Today));
        assert_eq!(Quadrant::from_tag(" week "), Some(Quadrant::Week));
        assert_eq!(Quadrant::from_tag("month"), Some(Quadrant::Month));
        assert_eq!(Quadrant::from_tag("year"), None);
    }

    #[test]
    fn test_quadrant_tag_round_trip() {
        for q in Quadrant::all() {
            assert_eq!(Quadrant::from_tag(q.to_tag()), Some(*q));
        }
    }

    #[test]
    fn test_quadrant_neighbours() {
        assert_eq!(Quadrant::Immediate.prev(), None);
        assert_eq!(Quadrant::Immediate.next(), Some(Quadrant::Today));
        assert_eq!(Quadrant::Week.prev(), Some(Quadrant::Today));
        assert_eq!(Quadrant::Month.next(), None);
    }

    #[test]
    fn test_quadrant_serde_uses_lowercase_tags() {
        let json = serde_json::to_string(&Quadrant::Week).unwrap();
        assert_eq!(json, "\"week\"");
        let parsed: Quadrant = serde_json::from_str("\"immediate\"").unwrap();
        assert_eq!(parsed, Quadrant::Immediate);
    }

    #[test]
    fn test_quadrant_from_str_error() {
        let err = "someday".parse::<Quadrant>().unwrap_err();
        assert!(err.contains("someday"));
    }
}
