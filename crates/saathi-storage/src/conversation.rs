use anyhow::Result;

use crate::models::ConversationTurn;
use crate::store::KeyValueStore;

/// Store key holding the conversation history blob
pub const CHAT_HISTORY_KEY: &str = "chat_history";

/// Number of most-recent turns kept by default
pub const DEFAULT_RETENTION: usize = 50;

/// Ordered conversation history persisted through a key-value store
///
/// The log keeps only the most recent turns, dropping the oldest ones once
/// the retention window is exceeded. A missing or corrupt blob degrades to
/// an empty history rather than an error; losing old chat turns is
/// acceptable, failing the chat screen is not.
pub struct ConversationLog<S> {
    store: S,
    retention: usize,
}

impl<S: KeyValueStore> ConversationLog<S> {
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

    /// Append a turn, trimming the history to the retention window
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub fn push(&mut self, turn: ConversationTurn) -> Result<()> {
        let mut turns = self.recent()?;
        turns.push(turn);
        let overflow = turns.len().saturating_sub(self.retention);
        if overflow > 0 {
            turns.drain(..overflow);
        }
        let blob = serde_json::to_string(&turns)?;
        self.store.set(CHAT_HISTORY_KEY, &blob)
    }

    /// The retained turns, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn recent(&self) -> Result<Vec<ConversationTurn>> {
        let Some(blob) = self.store.get(CHAT_HISTORY_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&blob) {
            Ok(turns) => Ok(turns),
            Err(err) => {
                log::warn!("Corrupt chat history, starting fresh: {err}");
                Ok(Vec::new())
            }
        }
    }

    /// Number of retained turns
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn len(&self) -> Result<usize> {
        Ok(self.recent()?.len())
    }

    /// Whether no turns are retained
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.recent()?.is_empty())
    }

    /// Delete the whole history
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn clear(&mut self) -> Result<()> {
        log::info!("Clearing conversation history");
        self.store.remove(CHAT_HISTORY_KEY)
    }
}
