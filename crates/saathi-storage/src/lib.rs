pub mod conversation;
pub mod models;
pub mod mood;
pub mod profile;
pub mod store;

pub use conversation::ConversationLog;
pub use models::{ConversationTurn, MoodEntry};
pub use mood::{MoodJournal, MoodTrend};
pub use profile::{clear_history, UserSettings, UserStats};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
