//! Connected components of the relation graph.
//!
//! Relations are treated as undirected for reachability: a record is
//! connected to everything it is updated/obsoleted by and everything it
//! updates/obsoletes. Each record is attributed to at most one finalized
//! component across a whole [`Analysis`].

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::{Error, Identifier, RelationKind, Store};

/// A directed relation edge, as rendered.
///
/// Edges point from the older document to the one that updates or
/// obsoletes it. Ordering is by `from`, then `to`, then `kind`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// The document being updated or obsoleted.
    pub from: Identifier,
    /// The document doing the updating or obsoleting.
    pub to: Identifier,
    /// The kind of relation.
    pub kind: RelationKind,
}

/// A connected set of records, summarised.
///
/// Ordered by leader.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Component {
    /// The member with the lexicographically smallest identifier.
    pub leader: Identifier,
    /// The number of members.
    pub size: usize,
}

/// Shared state for component discovery over one [`Store`].
///
/// Components that pass the size threshold are *finalized*: their members
/// join the processed set and their edges join the edge collection. Neither
/// shrinks, so rerunning discovery over the same roots is a no-op.
#[derive(Debug, Clone)]
pub struct Analysis<'a> {
    store: &'a Store,
    processed: BTreeSet<Identifier>,
    edges: BTreeSet<Edge>,
    components: BTreeSet<Component>,
}

impl<'a> Analysis<'a> {
    /// Starts an analysis with nothing processed.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self {
            store,
            processed: BTreeSet::new(),
            edges: BTreeSet::new(),
            components: BTreeSet::new(),
        }
    }

    /// The store being analysed.
    #[must_use]
    pub const fn store(&self) -> &'a Store {
        self.store
    }

    /// Members of every finalized component.
    #[must_use]
    pub const fn processed(&self) -> &BTreeSet<Identifier> {
        &self.processed
    }

    /// Edges of every finalized component, sorted by `(from, to)`.
    #[must_use]
    pub const fn edges(&self) -> &BTreeSet<Edge> {
        &self.edges
    }

    /// Every finalized component, sorted by leader.
    #[must_use]
    pub const fn components(&self) -> &BTreeSet<Component> {
        &self.components
    }

    /// Measures the component containing `start`, ignoring records that
    /// already belong to a finalized component.
    ///
    /// Returns `None` if `start` itself is already processed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if the walk reaches a document
    /// that is not in the store.
    pub fn measure(&self, start: &Identifier) -> Result<Option<Component>, Error> {
        let mut seen = BTreeSet::new();
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if self.processed.contains(id) || seen.contains(id) {
                continue;
            }
            let record = self.store.get(id)?;
            seen.insert(id);
            stack.extend(record.neighbours());
        }

        Ok(seen.first().map(|&leader| Component {
            leader: leader.clone(),
            size: seen.len(),
        }))
    }

    /// Finalizes the component containing `start`: marks every member as
    /// processed and records every edge touching a member.
    ///
    /// Edges are deduplicated on `(from, to, kind)`, so a relation declared
    /// on both ends is recorded once.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if the walk reaches a document
    /// that is not in the store.
    pub fn finalize(&mut self, start: &Identifier) -> Result<(), Error> {
        let store = self.store;
        let mut stack = vec![start];

        while let Some(id) = stack.pop() {
            if self.processed.contains(id) {
                continue;
            }
            let record = store.get(id)?;
            self.processed.insert(id.clone());

            for (target, &kind) in &record.forwards {
                self.edges.insert(Edge {
                    from: id.clone(),
                    to: target.clone(),
                    kind,
                });
                stack.push(target);
            }
            for (source, &kind) in &record.backwards {
                self.edges.insert(Edge {
                    from: source.clone(),
                    to: id.clone(),
                    kind,
                });
                stack.push(source);
            }
        }

        Ok(())
    }

    /// Discovers and finalizes every component reachable from `roots` with
    /// at least `min_size` members.
    ///
    /// Roots inside an already finalized component are skipped. The order of
    /// `roots` only affects which root triggers discovery of a component,
    /// not the components found.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if a root, or any document
    /// reached from one, is not in the store.
    #[instrument(skip(self, roots))]
    pub fn find_components<'r>(
        &mut self,
        roots: impl IntoIterator<Item = &'r Identifier>,
        min_size: usize,
    ) -> Result<(), Error> {
        for root in roots {
            let Some(component) = self.measure(root)? else {
                continue;
            };
            if component.size < min_size {
                continue;
            }

            debug!(leader = %component.leader, size = component.size, "component");
            self.finalize(&component.leader)?;
            self.components.insert(component);
        }

        Ok(())
    }

    /// Runs [`Analysis::find_components`] with every identifier in the store
    /// as a root.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownIdentifier`] if any relation names a document
    /// that is not in the store.
    pub fn sweep(&mut self, min_size: usize) -> Result<(), Error> {
        let store = self.store;
        self.find_components(store.ids(), min_size)
    }
}
