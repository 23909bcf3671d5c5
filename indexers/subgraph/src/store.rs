//! Write-once entity store.
//!
//! Entities are append-only: a second write under an existing id is rejected,
//! and there is no update or delete path.

use std::collections::{HashMap, HashSet};

use daocean_types::{Entity, EventKind};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: EventKind, id: String },
}

/// Backing store for indexed entities.
pub trait EntityStore {
    /// Persist a new entity. Fails if the id already exists for its kind.
    fn insert(&mut self, entity: Entity) -> Result<(), StoreError>;

    /// Persist a batch atomically: either every entity is written or none is.
    fn insert_all(&mut self, entities: Vec<Entity>) -> Result<(), StoreError>;

    fn get(&self, kind: EventKind, id: &str) -> Option<&Entity>;

    /// All entities of a kind, in insertion order.
    fn scan(&self, kind: EventKind) -> Box<dyn Iterator<Item = &Entity> + '_>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Default)]
struct Collection {
    rows: Vec<Entity>,
    by_id: HashMap<String, usize>,
}

/// In-process store keyed by (kind, id).
#[derive(Default)]
pub struct MemoryStore {
    collections: HashMap<EventKind, Collection>,
    total: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn contains(&self, kind: EventKind, id: &str) -> bool {
        self.collections
            .get(&kind)
            .is_some_and(|c| c.by_id.contains_key(id))
    }

    fn push(&mut self, entity: Entity) {
        let collection = self.collections.entry(entity.kind()).or_default();
        collection.by_id.insert(entity.id().to_string(), collection.rows.len());
        collection.rows.push(entity);
        self.total += 1;
    }
}

impl EntityStore for MemoryStore {
    fn insert(&mut self, entity: Entity) -> Result<(), StoreError> {
        if self.contains(entity.kind(), entity.id()) {
            return Err(StoreError::DuplicateId {
                kind: entity.kind(),
                id: entity.id().to_string(),
            });
        }
        self.push(entity);
        Ok(())
    }

    fn insert_all(&mut self, entities: Vec<Entity>) -> Result<(), StoreError> {
        let mut batch: HashSet<(EventKind, &str)> = HashSet::with_capacity(entities.len());
        for entity in &entities {
            let key = (entity.kind(), entity.id());
            if self.contains(key.0, key.1) || !batch.insert(key) {
                return Err(StoreError::DuplicateId {
                    kind: entity.kind(),
                    id: entity.id().to_string(),
                });
            }
        }
        for entity in entities {
            self.push(entity);
        }
        Ok(())
    }

    fn get(&self, kind: EventKind, id: &str) -> Option<&Entity> {
        let collection = self.collections.get(&kind)?;
        collection.by_id.get(id).map(|&i| &collection.rows[i])
    }

    fn scan(&self, kind: EventKind) -> Box<dyn Iterator<Item = &Entity> + '_> {
        match self.collections.get(&kind) {
            Some(c) => Box::new(c.rows.iter()),
            None => Box::new(std::iter::empty()),
        }
    }

    fn len(&self) -> usize {
        self.total
    }
}
