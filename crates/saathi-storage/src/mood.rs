use anyhow::{ensure, Result};
use chrono::{DateTime, Duration, Utc};

use crate::models::MoodEntry;
use crate::store::KeyValueStore;

/// Store key holding the mood history blob
pub const MOOD_HISTORY_KEY: &str = "mood_history";

/// Number of most-recent entries kept by default
pub const DEFAULT_RETENTION: usize = 30;

/// Threshold between a stable and a moving three-entry average
const TREND_THRESHOLD: f64 = 0.3;

/// Direction the recent mood entries are heading
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum MoodTrend {
    Improving,
    Declining,
    Stable,
    /// Not enough entries to compare
    Neutral,
}

/// Daily mood log persisted through a key-value store
///
/// One entry per calendar day: logging again on the same day replaces that
/// day's entry. Like the conversation log, a missing or corrupt blob reads
/// as an empty journal.
pub struct MoodJournal<S> {
    store: S,
    retention: usize,
}

impl<S: KeyValueStore> MoodJournal<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            retention: DEFAULT_RETENTION,
        }
    }

    /// Override the retention window
    #[must_use]
    pub fn with_retention(mut self, retention: usize) -> Self {
        self.retention = retention;
        self
    }

    /// Record a mood for the day of `now`, replacing any same-day entry
    ///
    /// # Errors
    ///
    /// Returns an error if `mood` is outside 1..=5 or the store cannot be
    /// read or written.
    pub fn log_mood(
        &mut self,
        mood: u8,
        note: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<MoodEntry> {
        ensure!(
            (1..=5).contains(&mood),
            "mood must be between 1 and 5, got {mood}"
        );

        let entry = MoodEntry::new(mood, note, now);
        let mut entries = self.entries()?;

        let today = now.date_naive();
        if let Some(existing) = entries
            .iter_mut()
            .find(|e| e.created_at.date_naive() == today)
        {
            log::debug!("Replacing existing mood entry for {today}");
            *existing = entry.clone();
        } else {
            entries.push(entry.clone());
        }

        let overflow = entries.len().saturating_sub(self.retention);
        if overflow > 0 {
            entries.drain(..overflow);
        }

        let blob = serde_json::to_string(&entries)?;
        self.store.set(MOOD_HISTORY_KEY, &blob)?;
        Ok(entry)
    }

    /// The retained entries, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn entries(&self) -> Result<Vec<MoodEntry>> {
        let Some(blob) = self.store.get(MOOD_HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&blob) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                log::warn!("Corrupt mood history, starting fresh: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Mean mood over the 7 days before `now`, rounded to one decimal
    ///
    /// Returns 0.0 when the window holds no entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn weekly_average(&self, now: DateTime<Utc>) -> Result<f64> {
        let one_week_ago = now - Duration::days(7);
        let entries = self.entries()?;
        let recent: Vec<&MoodEntry> = entries
            .iter()
            .filter(|e| e.created_at >= one_week_ago)
            .collect();
        if recent.is_empty() {
            return Ok(0.0);
        }
        let sum: f64 = recent.iter().map(|e| f64::from(e.mood)).sum();
        let average = sum / recent.len() as f64;
        Ok((average * 10.0).round() / 10.0)
    }

    /// Compare the last three entries against the three before them
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn trend(&self) -> Result<MoodTrend> {
        let entries = self.entries()?;
        let len = entries.len();
        // Fewer than four entries leaves nothing to compare against
        if len <= 3 {
            return Ok(MoodTrend::Neutral);
        }

        let recent = mean(&entries[len - 3..]);
        let earlier = mean(&entries[len.saturating_sub(6)..len - 3]);

        if recent > earlier + TREND_THRESHOLD {
            Ok(MoodTrend::Improving)
        } else if recent < earlier - TREND_THRESHOLD {
            Ok(MoodTrend::Declining)
        } else {
            Ok(MoodTrend::Stable)
        }
    }

    /// Delete the whole journal
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&mut self) -> Result<()> {
        log::info!("Clearing mood journal");
        self.store.remove(MOOD_HISTORY_KEY)
    }
}

fn mean(entries: &[MoodEntry]) -> f64 {
    let sum: f64 = entries.iter().map(|e| f64::from(e.mood)).sum();
    sum / entries.len() as f64
}
