use super::types::{PathItem, Swagger};
use crate::error::SpecError;
use std::collections::btree_map::Entry;
use tracing::trace;

/// Combine two built documents, the union semantics behind a `Choice` node.
///
/// Paths union; a path present on both sides unions its path items
/// per-method. Definitions union key-wise with last write winning, which is
/// idempotent for a deterministic schema oracle. Tags append in order.
///
/// # Errors
///
/// Returns [`SpecError::DuplicateRoute`] when both sides declare an
/// operation for the same path and method; there is no precedence rule
/// between the two sides of a choice.
pub fn combine(left: Swagger, mut right: Swagger) -> Result<Swagger, SpecError> {
    let mut doc = left;
    for (path, item) in std::mem::take(&mut right.paths) {
        match doc.paths.entry(path) {
            Entry::Vacant(entry) => {
                entry.insert(item);
            }
            Entry::Occupied(mut entry) => {
                trace!(path = %entry.key(), "merging path items from both sides of a choice");
                let path = entry.key().clone();
                merge_path_item(&path, entry.get_mut(), item)?;
            }
        }
    }
    doc.definitions.extend(right.definitions);
    doc.tags.append(&mut right.tags);
    Ok(doc)
}

fn merge_path_item(path: &str, into: &mut PathItem, from: PathItem) -> Result<(), SpecError> {
    for (method, op) in from.into_operations() {
        // into_operations only yields methods representable in Swagger 2.0,
        // so the slot always exists.
        let Some(slot) = into.slot_mut(&method) else {
            continue;
        };
        if slot.is_some() {
            return Err(SpecError::DuplicateRoute {
                path: path.to_string(),
                method,
            });
        }
        *slot = Some(op);
    }
    Ok(())
}
