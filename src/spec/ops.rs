//! Post-processing utilities over a built document: operation selection,
//! tagging, and the default-response injection rules shared with the
//! builder.

use super::build::build_spec;
use super::types::{Operation, Parameter, Response, Swagger, Tag};
use crate::error::SpecError;
use crate::routes::RouteTree;
use http::Method;
use std::collections::btree_map::Entry;
use tracing::debug;

/// A selection of `(path, method)` pairs addressing operations inside a
/// document. Selectors are resolved against a document at application time;
/// mutations land in that document.
#[derive(Debug, Clone)]
pub struct OperationSelector {
    keys: Vec<(String, Method)>,
}

impl OperationSelector {
    /// Select every operation in `doc`.
    pub fn all(doc: &Swagger) -> Self {
        let keys = doc
            .paths
            .iter()
            .flat_map(|(path, item)| {
                item.operations()
                    .map(move |(method, _)| (path.clone(), method))
            })
            .collect();
        OperationSelector { keys }
    }

    /// Apply `f` to every selected operation present in `doc`.
    pub fn for_each(&self, doc: &mut Swagger, mut f: impl FnMut(&mut Operation)) {
        for (path, method) in &self.keys {
            if let Some(op) = doc
                .paths
                .get_mut(path)
                .and_then(|item| item.operation_mut(method))
            {
                f(op);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Resolve the operations a route sub-tree covers within a full tree.
///
/// Both trees are built and every `(path, method)` pair documented by `sub`
/// is required to appear in `full`'s document as well. The compile-time
/// subset guarantee of the source ecosystem becomes this runtime
/// precondition; a non-subset fails fast instead of silently selecting
/// nothing.
///
/// # Errors
///
/// [`SpecError::InvalidSubset`] naming the first pair missing from the full
/// document, or any build error from either tree.
pub fn sub_operations(sub: &RouteTree, full: &RouteTree) -> Result<OperationSelector, SpecError> {
    let sub_doc = build_spec(sub)?;
    let full_doc = build_spec(full)?;

    let mut keys = Vec::new();
    for (path, item) in &sub_doc.paths {
        for (method, _) in item.operations() {
            if full_doc
                .paths
                .get(path)
                .and_then(|full_item| full_item.operation(&method))
                .is_none()
            {
                return Err(SpecError::InvalidSubset {
                    path: path.clone(),
                    method,
                });
            }
            keys.push((path.clone(), method));
        }
    }
    debug!(operations = keys.len(), "resolved sub-tree operation selection");
    Ok(OperationSelector { keys })
}

/// Append each tag's name to every selected operation and register the tags
/// in the document's tag list.
///
/// Deliberately does not deduplicate: applying the same tags twice doubles
/// the per-operation lists. Deduplication is the caller's concern.
pub fn apply_tags(doc: &mut Swagger, selector: &OperationSelector, tags: &[Tag]) {
    selector.for_each(doc, |op| {
        for tag in tags {
            op.tags.push(tag.name.clone());
        }
    });
    doc.tags.extend(tags.iter().cloned());
}

/// Append `param` to every operation in the document.
pub fn add_parameter(doc: &mut Swagger, param: Parameter) {
    for op in doc.operations_mut() {
        op.parameters.push(param.clone());
    }
}

/// Union `media_types` into every operation's `consumes` list, preserving
/// first-seen order.
pub fn add_consumes(doc: &mut Swagger, media_types: &[String]) {
    for op in doc.operations_mut() {
        for mt in media_types {
            if !op.consumes.contains(mt) {
                op.consumes.push(mt.clone());
            }
        }
    }
}

/// Ensure every operation documents a `404` for a missing `name`.
///
/// A fresh response reads ``"`name` not found"``. When a 404 is already
/// present the new name is PREPENDED: ``"`name` or <old description>"``.
/// Note the asymmetry with [`add_default_response_400`], which appends;
/// both orders affect generated text and are pinned by tests.
pub fn add_default_response_404(doc: &mut Swagger, name: &str) {
    for op in doc.operations_mut() {
        match op.responses.entry(404) {
            Entry::Occupied(mut entry) => {
                let old = entry.get().description.clone();
                entry.get_mut().description = format!("`{name}` or {old}");
            }
            Entry::Vacant(entry) => {
                entry.insert(Response::new(format!("`{name}` not found")));
            }
        }
    }
}

/// Ensure every operation documents a `400` for an invalid `name`.
///
/// A fresh response reads ``"Invalid `name`"``. When a 400 is already
/// present the new name is APPENDED: ``"<old description> or `name`"``.
pub fn add_default_response_400(doc: &mut Swagger, name: &str) {
    for op in doc.operations_mut() {
        match op.responses.entry(400) {
            Entry::Occupied(mut entry) => {
                let old = entry.get().description.clone();
                entry.get_mut().description = format!("{old} or `{name}`");
            }
            Entry::Vacant(entry) => {
                entry.insert(Response::new(format!("Invalid `{name}`")));
            }
        }
    }
}
