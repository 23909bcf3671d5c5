//! The selected-DAO holder.
//!
//! Loaded once from storage, then passed explicitly to whatever needs the
//! current DAO. Writes go to memory first and are persisted afterwards, so the
//! in-memory value always reflects the latest choice.

use daocean_types::DaoSelection;
use tracing::{info, warn};

use crate::storage::{SelectionStorage, StorageError, SELECTION_KEY};

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("no DAO selected")]
    NoSelection,
    #[error("failed to encode selection: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct DaoContext<S> {
    storage: S,
    selected: Option<DaoSelection>,
}

impl<S: SelectionStorage> DaoContext<S> {
    /// Restore the persisted selection.
    ///
    /// Missing, unreadable or malformed data all yield an empty selection.
    pub fn load(storage: S) -> Self {
        let selected = match storage.get_item(SELECTION_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<DaoSelection>(&raw) {
                Ok(dao) => {
                    info!(dao_id = %dao.dao_id, name = %dao.name, "Restored DAO selection");
                    Some(dao)
                }
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed DAO selection");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read DAO selection");
                None
            }
        };

        Self { storage, selected }
    }

    pub fn selected(&self) -> Option<&DaoSelection> {
        self.selected.as_ref()
    }

    /// The selection, or `NoSelection` for operations that need one.
    pub fn require(&self) -> Result<&DaoSelection, ContextError> {
        self.selected.as_ref().ok_or(ContextError::NoSelection)
    }

    /// Replace the selection and persist it.
    ///
    /// The in-memory selection is replaced even when persisting fails.
    pub fn set_selected(&mut self, dao: DaoSelection) -> Result<(), ContextError> {
        let encoded = serde_json::to_string(&dao);
        info!(dao_id = %dao.dao_id, name = %dao.name, "Selected DAO");
        self.selected = Some(dao);

        self.storage.set_item(SELECTION_KEY, &encoded?).inspect_err(|e| {
            warn!(error = %e, "Failed to persist DAO selection");
        })?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ContextError> {
        self.selected = None;
        self.storage.remove_item(SELECTION_KEY)?;
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    struct FailingStorage;

    impl SelectionStorage for FailingStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Poisoned)
        }
        fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
        fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Poisoned)
        }
    }

    fn first_dao() -> DaoSelection {
        DaoSelection::new("0x1112", "My First DAO", 1u64)
    }

    #[test]
    fn test_load_without_persisted_selection() {
        let ctx = DaoContext::load(MemoryStorage::new());
        assert!(ctx.selected().is_none());
        assert!(matches!(ctx.require(), Err(ContextError::NoSelection)));
    }

    #[test]
    fn test_selection_survives_reload() {
        let storage = MemoryStorage::new();
        let mut ctx = DaoContext::load(storage.clone());
        ctx.set_selected(first_dao()).unwrap();
        drop(ctx);

        let reloaded = DaoContext::load(storage);
        assert_eq!(reloaded.selected(), Some(&first_dao()));
    }

    #[test]
    fn test_selection_survives_reload_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = DaoContext::load(FileStorage::new(dir.path()));
        ctx.set_selected(first_dao()).unwrap();

        let reloaded = DaoContext::load(FileStorage::new(dir.path()));
        assert_eq!(reloaded.require().unwrap(), &first_dao());
    }

    #[test]
    fn test_last_write_wins() {
        let storage = MemoryStorage::new();
        let mut ctx = DaoContext::load(storage.clone());
        ctx.set_selected(first_dao()).unwrap();
        ctx.set_selected(DaoSelection::new("0x2220", "Second", 2u64)).unwrap();

        let reloaded = DaoContext::load(storage);
        assert_eq!(reloaded.selected().map(|d| d.name.as_str()), Some("Second"));
    }

    #[test]
    fn test_malformed_data_loads_as_absent() {
        let storage = MemoryStorage::new();
        storage.set_item(SELECTION_KEY, "{not json").unwrap();
        assert!(DaoContext::load(storage.clone()).selected().is_none());

        storage
            .set_item(SELECTION_KEY, r#"{"id":"x","name":"n","daoId":"abc"}"#)
            .unwrap();
        assert!(DaoContext::load(storage).selected().is_none());
    }

    #[test]
    fn test_accepts_string_dao_id() {
        let storage = MemoryStorage::new();
        storage
            .set_item(SELECTION_KEY, r#"{"id":"0x1112","name":"My First DAO","daoId":"1"}"#)
            .unwrap();
        assert_eq!(DaoContext::load(storage).selected(), Some(&first_dao()));
    }

    #[test]
    fn test_read_failure_loads_as_absent() {
        assert!(DaoContext::load(FailingStorage).selected().is_none());
    }

    #[test]
    fn test_persist_failure_keeps_in_memory_selection() {
        let mut ctx = DaoContext::load(FailingStorage);
        let err = ctx.set_selected(first_dao()).unwrap_err();
        assert!(matches!(err, ContextError::Storage(StorageError::Poisoned)));
        assert_eq!(ctx.selected(), Some(&first_dao()));
    }

    #[test]
    fn test_clear_removes_persisted_selection() {
        let storage = MemoryStorage::new();
        let mut ctx = DaoContext::load(storage.clone());
        ctx.set_selected(first_dao()).unwrap();
        ctx.clear().unwrap();

        assert!(ctx.selected().is_none());
        assert!(DaoContext::load(storage).selected().is_none());
    }
}
