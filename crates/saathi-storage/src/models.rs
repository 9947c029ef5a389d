use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One chat message, from the user or the companion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub id: Uuid,
    pub text: String,
    pub is_from_user: bool,
    pub created_at: DateTime<Utc>,
}

impl ConversationTurn {
    #[must_use]
    pub fn new(text: impl Into<String>, is_from_user: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            is_from_user,
            created_at: Utc::now(),
        }
    }

    /// A turn typed by the user
    #[must_use]
    pub fn from_user(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// A turn produced by the companion
    #[must_use]
    pub fn from_companion(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

/// One mood log on the 1-5 scale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: Uuid,
    pub mood: u8,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

impl MoodEntry {
    #[must_use]
    pub fn new(mood: u8, note: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            mood,
            note: note.into(),
            created_at,
        }
    }

    /// Human-readable label for the mood value
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self.mood {
            1 => "Very Sad",
            2 => "Sad",
            3 => "Okay",
            4 => "Good",
            5 => "Great",
            _ => "Unknown",
        }
    }
}
