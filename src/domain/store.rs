//! In-memory store of index records.
//!
//! The [`Store`] knows nothing about files. It keys every [`Record`] by its
//! [`Identifier`], resolves references between records, and derives each
//! record's [`Classification`](crate::domain::Classification) from the
//! relations that touch it.

use std::collections::BTreeMap;

use tracing::{instrument, warn};

use crate::domain::{Error, Identifier, Record};

/// All records of one index, keyed by identifier.
///
/// The index is assumed to be closed: every relation names a document that is
/// also in the store. Looking up anything else is an error.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Store {
    records: BTreeMap<Identifier, Record>,
}

impl Store {
    /// Builds a store from parsed records and runs the classification pass.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if a backward relation names a
    /// document that is not among `records`.
    pub fn from_records(records: impl IntoIterator<Item = Record>) -> Result<Self, Error> {
        let mut store = Self::default();
        for record in records {
            store.insert(record);
        }
        store.escalate()?;
        Ok(store)
    }

    /// Inserts a record, keyed by its identifier.
    ///
    /// An existing record with the same identifier is replaced and returned.
    pub fn insert(&mut self, record: Record) -> Option<Record> {
        let previous = self.records.insert(record.id.clone(), record);
        if let Some(previous) = &previous {
            warn!(id = %previous.id, "duplicate identifier, keeping the later record");
        }
        previous
    }

    /// Looks up a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if no record has this identifier.
    pub fn get(&self, id: &Identifier) -> Result<&Record, Error> {
        self.records
            .get(id)
            .ok_or_else(|| Error::UnknownIdentifier(id.clone()))
    }

    /// Whether a record with this identifier exists.
    #[must_use]
    pub fn contains(&self, id: &Identifier) -> bool {
        self.records.contains_key(id)
    }

    /// Iterates over all identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &Identifier> {
        self.records.keys()
    }

    /// The number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Propagates relation kinds into record classifications.
    ///
    /// For every forward relation (`Updated by`/`Obsoleted by`) the owning
    /// record is escalated; for every backward relation
    /// (`Updates`/`Obsoletes`) the referenced record is. Escalation is a
    /// monotone maximum, so the result does not depend on iteration order and
    /// running the pass again changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if a backward relation references
    /// a document that is not in the store. No record is modified in that
    /// case.
    #[instrument(skip(self), fields(records = self.records.len()))]
    pub fn escalate(&mut self) -> Result<(), Error> {
        let mut escalations = Vec::new();

        for record in self.records.values() {
            for &kind in record.forwards.values() {
                escalations.push((record.id.clone(), kind));
            }
            for (target, &kind) in &record.backwards {
                if !self.records.contains_key(target) {
                    return Err(Error::UnknownIdentifier(target.clone()));
                }
                escalations.push((target.clone(), kind));
            }
        }

        for (id, kind) in escalations {
            if let Some(record) = self.records.get_mut(&id) {
                record.escalate(kind);
            }
        }

        Ok(())
    }
}
