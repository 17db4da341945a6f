mod event_storage;
mod persistent_event_storage;

pub use event_storage::{AuraEvent, AuraEventStorage, AuraEventStorageTrait, AuraSource};
pub use persistent_event_storage::PersistentAuraEventStorage;
