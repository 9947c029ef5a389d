use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::conversation::CHAT_HISTORY_KEY;
use crate::mood::MOOD_HISTORY_KEY;
use crate::store::KeyValueStore;

/// Store key holding the settings blob
pub const USER_SETTINGS_KEY: &str = "user_settings";

/// User preferences persisted as a single JSON blob
///
/// Unknown or missing fields fall back to defaults so older blobs keep
/// loading after new settings are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub dark_mode: bool,
    pub notifications: bool,
    pub daily_reminder: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            daily_reminder: true,
        }
    }
}

impl UserSettings {
    /// Load settings, falling back to defaults on a missing or corrupt blob
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: &impl KeyValueStore) -> Result<Self> {
        let Some(blob) = store.get(USER_SETTINGS_KEY)? else {
            return Ok(Self::default());
        };
        match serde_json::from_str(&blob) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                log::warn!("Corrupt settings, using defaults: {err}");
                Ok(Self::default())
            }
        }
    }

    /// Persist settings
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<()> {
        let blob = serde_json::to_string(self)?;
        store.set(USER_SETTINGS_KEY, &blob)
    }
}

/// Usage counters shown on the profile screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub days_active: usize,
    pub conversations_count: usize,
    pub moods_logged: usize,
}

impl UserStats {
    /// Derive stats from the persisted histories
    ///
    /// Days active is an estimate: whichever is larger of one day per five
    /// conversation turns or one day per mood entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn collect(store: &impl KeyValueStore) -> Result<Self> {
        let conversations_count = count_entries(store, CHAT_HISTORY_KEY)?;
        let moods_logged = count_entries(store, MOOD_HISTORY_KEY)?;
        let days_active = conversations_count.div_ceil(5).max(moods_logged);
        Ok(Self {
            days_active,
            conversations_count,
            moods_logged,
        })
    }
}

/// Length of the JSON array stored under `key`, 0 when missing or corrupt
fn count_entries(store: &impl KeyValueStore, key: &str) -> Result<usize> {
    let Some(blob) = store.get(key)? else {
        return Ok(0);
    };
    match serde_json::from_str::<Vec<serde_json::Value>>(&blob) {
        Ok(items) => Ok(items.len()),
        Err(err) => {
            log::warn!("Corrupt blob under '{key}', counting as empty: {err}");
            Ok(0)
        }
    }
}

/// Remove the conversation and mood histories in one sweep
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn clear_history(store: &mut impl KeyValueStore) -> Result<()> {
    log::info!("Clearing all persisted history");
    store.remove(CHAT_HISTORY_KEY)?;
    store.remove(MOOD_HISTORY_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::ConversationLog;
    use crate::models::ConversationTurn;
    use crate::mood::MoodJournal;
    use crate::store::MemoryStore;
    use chrono::TimeZone;

    #[test]
    fn test_settings_default_when_missing() {
        let store = MemoryStore::new();
        let settings = UserSettings::load(&store).unwrap();
        assert_eq!(settings, UserSettings::default());
        assert!(!settings.dark_mode);
        assert!(settings.notifications);
        assert!(settings.daily_reminder);
    }

    #[test]
    fn test_settings_save_load_roundtrip() {
        let mut store = MemoryStore::new();
        let settings = UserSettings {
            dark_mode: true,
            notifications: false,
            daily_reminder: true,
        };
        settings.save(&mut store).unwrap();
        assert_eq!(UserSettings::load(&store).unwrap(), settings);
    }

    #[test]
    fn test_settings_corrupt_blob_uses_defaults() {
        let mut store = MemoryStore::new();
        store.set(USER_SETTINGS_KEY, "][").unwrap();
        assert_eq!(
            UserSettings::load(&store).unwrap(),
            UserSettings::default()
        );
    }

    #[test]
    fn test_settings_partial_blob_fills_defaults() {
        let mut store = MemoryStore::new();
        store.set(USER_SETTINGS_KEY, r#"{"dark_mode":true}"#).unwrap();
        let settings = UserSettings::load(&store).unwrap();
        assert!(settings.dark_mode);
        assert!(settings.notifications);
    }

    #[test]
    fn test_stats_empty_store() {
        let store = MemoryStore::new();
        let stats = UserStats::collect(&store).unwrap();
        assert_eq!(stats.days_active, 0);
        assert_eq!(stats.conversations_count, 0);
        assert_eq!(stats.moods_logged, 0);
    }

    #[test]
    fn test_stats_counts_histories() {
        let mut store = MemoryStore::new();

        let mut log = ConversationLog::new(&mut store);
        for i in 0..7 {
            log.push(ConversationTurn::from_user(format!("turn {i}")))
                .unwrap();
        }

        let mut journal = MoodJournal::new(&mut store);
        let when = chrono::Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
        journal.log_mood(4, "", when).unwrap();

        let stats = UserStats::collect(&store).unwrap();
        assert_eq!(stats.conversations_count, 7);
        assert_eq!(stats.moods_logged, 1);
        // ceil(7 / 5) = 2 beats 1 mood entry
        assert_eq!(stats.days_active, 2);
    }

    #[test]
    fn test_clear_history_keeps_settings() {
        let mut store = MemoryStore::new();

        let mut log = ConversationLog::new(&mut store);
        log.push(ConversationTurn::from_user("hello")).unwrap();
        let settings = UserSettings {
            dark_mode: true,
            notifications: true,
            daily_reminder: false,
        };
        settings.save(&mut store).unwrap();

        clear_history(&mut store).unwrap();

        let stats = UserStats::collect(&store).unwrap();
        assert_eq!(stats.conversations_count, 0);
        assert_eq!(stats.moods_logged, 0);
        assert_eq!(UserSettings::load(&store).unwrap(), settings);
    }
}
