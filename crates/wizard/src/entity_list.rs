use tracing::{debug, warn};

use crate::{
    draft::{normalize_name, EntityDraft},
    error::EntityListError,
};

/// Committed sub-entities of one wizard session, in insertion order.
///
/// The display counter is tracked apart from the entries and is not kept in
/// sync on deletes: a delete always decrements it by one, whether it removed
/// zero, one or several entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityList {
    entries: Vec<EntityDraft>,
    counter: i64,
}

impl EntityList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn counter(&self) -> i64 {
        self.counter
    }

    pub fn summary(&self) -> String {
        format!("{} pozos ingresados", self.counter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EntityDraft> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[EntityDraft] {
        &self.entries
    }

    pub fn find(&self, name: &str) -> Option<&EntityDraft> {
        let key = normalize_name(name);
        self.entries.iter().find(|entry| entry.key() == key)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn add(&mut self, entity: EntityDraft) -> Result<(), EntityListError> {
        let name = entity.name().unwrap_or_default().to_string();
        if self.contains(&name) {
            warn!(%name, "rejected duplicate entity");
            return Err(EntityListError::Duplicate { name });
        }
        self.entries.push(entity);
        self.counter += 1;
        debug!(%name, counter = self.counter, "entity added");
        Ok(())
    }

    /// Replaces the entry whose name matches `entity`. Returns whether a
    /// replacement happened; a miss leaves the list untouched.
    pub fn update(&mut self, entity: EntityDraft) -> bool {
        let key = entity.key();
        match self.entries.iter_mut().find(|entry| entry.key() == key) {
            Some(entry) => {
                *entry = entity;
                true
            }
            None => {
                debug!(name = %key, "update found no matching entity");
                false
            }
        }
    }

    /// Removes every entry named `name` and returns how many were removed.
    pub fn delete(&mut self, name: &str) -> usize {
        let key = normalize_name(name);
        let before = self.entries.len();
        self.entries.retain(|entry| entry.key() != key);
        self.counter -= 1;
        let removed = before - self.entries.len();
        debug!(name = %key, removed, counter = self.counter, "entity delete");
        removed
    }

    /// Entries not yet stored server-side.
    pub fn pending(&self) -> impl Iterator<Item = &EntityDraft> {
        self.entries.iter().filter(|entry| !entry.persisted)
    }

    pub fn mark_persisted(&mut self) -> usize {
        let mut marked = 0;
        for entry in self.entries.iter_mut().filter(|entry| !entry.persisted) {
            entry.persisted = true;
            marked += 1;
        }
        marked
    }

    pub fn select_for_edit(&self, name: &str) -> Option<EntityDraft> {
        self.find(name).map(EntityDraft::for_edit)
    }
}

#[cfg(test)]
#[path = "tests/entity_list_tests.rs"]
mod tests;
