use std::{collections::HashMap, fmt, sync::Arc};

use auracore::ParsedMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::types::ChatId;
use tokio::sync::Mutex;

/// Channel an aura update arrived on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuraSource {
    Sms,
    Web,
    Watch,
    Shortcut,
    Telegram,
}

impl fmt::Display for AuraSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AuraSource::Sms => "sms",
            AuraSource::Web => "web",
            AuraSource::Watch => "watch",
            AuraSource::Shortcut => "shortcut",
            AuraSource::Telegram => "telegram",
        };
        f.write_str(name)
    }
}

/// Stored aura update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuraEvent {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub emoji: String,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub source: AuraSource,
}

/// Trait for aura event storage operations
#[async_trait::async_trait]
pub trait AuraEventStorageTrait: Send + Sync {
    /// Get events for a specific chat in insertion order
    async fn get_chat_events(&self, chat_id: ChatId) -> Result<Vec<AuraEvent>, String>;

    /// Store a parsed message, assigning the next id of the chat
    async fn add_event(
        &self,
        chat_id: ChatId,
        parsed: ParsedMessage,
        source: AuraSource,
        timestamp: DateTime<Utc>,
    ) -> Result<AuraEvent, String>;

    /// Replace all events of a chat
    async fn replace_events(&self, chat_id: ChatId, events: Vec<AuraEvent>)
    -> Result<(), String>;
}

type AuraEventStorageData = Arc<Mutex<HashMap<ChatId, Vec<AuraEvent>>>>;

/// Per-chat in-memory storage for aura events
#[derive(Clone)]
pub struct AuraEventStorage {
    data: AuraEventStorageData,
}

impl AuraEventStorage {
    pub fn new() -> Self {
        Self {
            data: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl Default for AuraEventStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl AuraEventStorageTrait for AuraEventStorage {
    async fn get_chat_events(&self, chat_id: ChatId) -> Result<Vec<AuraEvent>, String> {
        let storage_guard = self.data.lock().await;
        Ok(storage_guard.get(&chat_id).cloned().unwrap_or_default())
    }

    async fn add_event(
        &self,
        chat_id: ChatId,
        parsed: ParsedMessage,
        source: AuraSource,
        timestamp: DateTime<Utc>,
    ) -> Result<AuraEvent, String> {
        let mut storage_guard = self.data.lock().await;
        let chat_events = storage_guard.entry(chat_id).or_default();
        let id = chat_events.last().map_or(1, |last| last.id + 1);
        let event = AuraEvent {
            id,
            timestamp,
            emoji: parsed.emoji,
            points: parsed.points,
            note: parsed.note,
            source,
        };
        chat_events.push(event.clone());
        Ok(event)
    }

    async fn replace_events(
        &self,
        chat_id: ChatId,
        events: Vec<AuraEvent>,
    ) -> Result<(), String> {
        let mut storage_guard = self.data.lock().await;
        storage_guard.insert(chat_id, events);
        Ok(())
    }
}
