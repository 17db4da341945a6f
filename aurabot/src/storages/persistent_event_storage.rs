use std::{collections::HashSet, path::PathBuf, sync::Arc};

use auracore::ParsedMessage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::types::ChatId;
use tokio::{fs, sync::Mutex};

use super::event_storage::{AuraEvent, AuraEventStorage, AuraEventStorageTrait, AuraSource};

/// Serializable structure for a chat's events that can be saved/loaded as YAML
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EventData {
    pub events: Vec<AuraEvent>,
}

/// Persistent event storage that saves each chat's events to a YAML file named by chat ID.
/// Files are loaded lazily on first access and rewritten after every change.
#[derive(Clone)]
pub struct PersistentAuraEventStorage {
    storage_dir: PathBuf,
    memory_storage: AuraEventStorage,
    // chats already read from disk; held while loading so a chat is read once
    loaded_chats: Arc<Mutex<HashSet<ChatId>>>,
}

impl PersistentAuraEventStorage {
    pub fn new(storage_dir: PathBuf) -> Self {
        Self {
            storage_dir,
            memory_storage: AuraEventStorage::new(),
            loaded_chats: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    fn get_file_path(&self, chat_id: ChatId) -> PathBuf {
        self.storage_dir.join(format!("{}.yaml", chat_id))
    }

    /// Load events from disk. A missing file means no events yet, an unreadable
    /// one is an error so that it never gets overwritten with partial data.
    async fn load_chat_events(&self, chat_id: ChatId) -> Result<Vec<AuraEvent>, String> {
        let file_path = self.get_file_path(chat_id);
        let content = match fs::read_to_string(&file_path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                log::error!("Failed to read events from {:?}: {}", file_path, e);
                return Err(format!("Failed to read stored aura events: {}", e));
            }
        };
        log::info!("Loaded events from file: {:?}", file_path);
        serde_yaml::from_str::<EventData>(&content)
            .map(|data| data.events)
            .map_err(|e| {
                log::error!("Failed to parse events in {:?}: {}", file_path, e);
                format!("Stored aura events are corrupted: {}", e)
            })
    }

    async fn save_chat_events(
        &self,
        chat_id: ChatId,
        events: &[AuraEvent],
    ) -> Result<(), std::io::Error> {
        fs::create_dir_all(&self.storage_dir).await?;

        let file_path = self.get_file_path(chat_id);
        let event_data = EventData {
            events: events.to_vec(),
        };

        match serde_yaml::to_string(&event_data) {
            Ok(content) => fs::write(&file_path, content).await,
            Err(e) => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to serialize events to YAML: {}", e),
            )),
        }
    }

    async fn ensure_loaded(&self, chat_id: ChatId) -> Result<(), String> {
        let mut loaded_guard = self.loaded_chats.lock().await;
        if loaded_guard.contains(&chat_id) {
            return Ok(());
        }
        let events = self.load_chat_events(chat_id).await?;
        self.memory_storage.replace_events(chat_id, events).await?;
        loaded_guard.insert(chat_id);
        Ok(())
    }

    async fn persist(&self, chat_id: ChatId) -> Result<(), String> {
        let events = self.memory_storage.get_chat_events(chat_id).await?;
        self.save_chat_events(chat_id, &events).await.map_err(|e| {
            log::error!("Failed to save events for chat {}: {}", chat_id, e);
            format!("Failed to save aura events: {}", e)
        })
    }
}

#[async_trait::async_trait]
impl AuraEventStorageTrait for PersistentAuraEventStorage {
    async fn get_chat_events(&self, chat_id: ChatId) -> Result<Vec<AuraEvent>, String> {
        self.ensure_loaded(chat_id).await?;
        self.memory_storage.get_chat_events(chat_id).await
    }

    async fn add_event(
        &self,
        chat_id: ChatId,
        parsed: ParsedMessage,
        source: AuraSource,
        timestamp: DateTime<Utc>,
    ) -> Result<AuraEvent, String> {
        self.ensure_loaded(chat_id).await?;
        let event = self
            .memory_storage
            .add_event(chat_id, parsed, source, timestamp)
            .await?;
        self.persist(chat_id).await?;
        Ok(event)
    }

    async fn replace_events(
        &self,
        chat_id: ChatId,
        events: Vec<AuraEvent>,
    ) -> Result<(), String> {
        // no ensure_loaded here - we are replacing anyway
        self.memory_storage.replace_events(chat_id, events).await?;
        self.loaded_chats.lock().await.insert(chat_id);
        self.persist(chat_id).await
    }
}
