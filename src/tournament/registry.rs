//! Entrant registry: the validated pool of participants to seed.

use std::collections::HashSet;

use super::errors::{BracketError, BracketResult};
use super::models::{Entrant, EntrantId};

/// Reject entrants with a blank id or display name
pub fn validate_entrant(entrant: &Entrant) -> BracketResult<()> {
    if entrant.id.as_str().trim().is_empty() {
        return Err(BracketError::InvalidEntrant("entrant id is blank".to_string()));
    }
    if entrant.display_name.trim().is_empty() {
        return Err(BracketError::InvalidEntrant(format!(
            "entrant {} has no display name",
            entrant.id
        )));
    }
    Ok(())
}

/// Pool of unique entrants, bounded by the bracket capacity
#[derive(Debug, Clone)]
pub struct EntrantRegistry {
    capacity: usize,
    entrants: Vec<Entrant>,
    ids: HashSet<EntrantId>,
}

impl EntrantRegistry {
    /// Create an empty registry holding at most `capacity` entrants
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entrants: Vec::new(),
            ids: HashSet::new(),
        }
    }

    /// Build a registry of ad-hoc entrants from plain names
    pub fn from_names<I, S>(names: I, capacity: usize) -> BracketResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::new(capacity);
        for name in names {
            registry.register(Entrant::from_name(name.as_ref()))?;
        }
        Ok(registry)
    }

    /// Add an entrant to the pool
    pub fn register(&mut self, entrant: Entrant) -> BracketResult<()> {
        validate_entrant(&entrant)?;

        if self.ids.contains(&entrant.id) {
            return Err(BracketError::DuplicateEntrant(entrant.id));
        }

        if self.entrants.len() >= self.capacity {
            return Err(BracketError::RegistryFull(self.capacity));
        }

        self.ids.insert(entrant.id.clone());
        self.entrants.push(entrant);
        Ok(())
    }

    pub fn contains(&self, id: &EntrantId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.entrants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrants.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    /// Entrants in registration order
    pub fn into_entrants(self) -> Vec<Entrant> {
        self.entrants
    }
}
