use std::collections::HashSet;

use tracing::instrument;

use crate::domain::{Error, Identifier, Record, Store};

/// Walks the relation graph depth-first from `start`, treating relations as
/// undirected.
///
/// Every reachable record is returned exactly once, in visit order. From
/// each record, forward relations are followed before backward ones, each in
/// identifier order.
///
/// # Errors
///
/// Returns [`Error::UnknownIdentifier`] if `start`, or any document reached
/// from it, is not in the store.
#[instrument(skip(store))]
pub fn traverse<'s>(store: &'s Store, start: &Identifier) -> Result<Vec<&'s Record>, Error> {
    let mut seen = HashSet::new();
    let mut visited = Vec::new();
    let mut stack = vec![start];

    while let Some(id) = stack.pop() {
        if !seen.insert(id) {
            continue;
        }
        let record = store.get(id)?;
        visited.push(record);

        let neighbours: Vec<_> = record.neighbours().collect();
        stack.extend(neighbours.into_iter().rev());
    }

    Ok(visited)
}
