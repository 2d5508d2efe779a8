use super::merge::combine;
use super::ops::{
    add_consumes, add_default_response_400, add_default_response_404, add_parameter,
};
use super::types::{Operation, Parameter, PathItem, Response, Swagger};
use crate::error::SpecError;
use crate::routes::{Endpoint, RouteTree};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Build a Swagger document covering every endpoint reachable in `tree`.
///
/// The build is a structural recursion with post-order merge. Each node
/// contributes its own fragment on the way back up, so the final path key
/// for a leaf is the root-to-leaf concatenation of literals and `{name}`
/// placeholders regardless of traversal order.
///
/// # Errors
///
/// Returns [`SpecError::DuplicateRoute`] if two sides of a `Choice` declare
/// the same path and method. A well-formed tree never fails.
pub fn build_spec(tree: &RouteTree) -> Result<Swagger, SpecError> {
    let doc = build_node(tree)?;
    debug!(
        paths = doc.paths.len(),
        definitions = doc.definitions.len(),
        "built swagger document"
    );
    Ok(doc)
}

fn build_node(node: &RouteTree) -> Result<Swagger, SpecError> {
    match node {
        RouteTree::Leaf(endpoint) => Ok(build_leaf(endpoint)),
        RouteTree::Raw => {
            // A handler exists here but nothing more is known about it.
            let mut doc = Swagger::new();
            doc.paths.insert("/".to_string(), PathItem::default());
            Ok(doc)
        }
        RouteTree::Path { literal, child } => {
            let mut doc = build_node(child)?;
            prepend_path(&mut doc, literal);
            Ok(doc)
        }
        RouteTree::Capture {
            name,
            schema,
            child,
        } => {
            let mut doc = build_node(child)?;
            add_parameter(&mut doc, Parameter::path(name, schema.clone()));
            add_default_response_404(&mut doc, name);
            prepend_path(&mut doc, &format!("{{{name}}}"));
            Ok(doc)
        }
        RouteTree::Query {
            name,
            schema,
            multi,
            child,
        } => {
            let mut doc = build_node(child)?;
            let schema = if *multi {
                json!({
                    "type": "array",
                    "items": schema,
                    "collectionFormat": "multi",
                })
            } else {
                schema.clone()
            };
            add_parameter(&mut doc, Parameter::query(name, schema));
            add_default_response_400(&mut doc, name);
            Ok(doc)
        }
        RouteTree::Flag { name, child } => {
            let mut doc = build_node(child)?;
            let schema = json!({
                "type": "boolean",
                "allowEmptyValue": true,
                "default": false,
            });
            add_parameter(&mut doc, Parameter::query(name, schema));
            add_default_response_400(&mut doc, name);
            Ok(doc)
        }
        RouteTree::Header {
            name,
            schema,
            child,
        } => {
            let mut doc = build_node(child)?;
            add_parameter(&mut doc, Parameter::header(name, schema.clone()));
            add_default_response_400(&mut doc, name);
            Ok(doc)
        }
        RouteTree::Body {
            content_types,
            schema,
            child,
        } => {
            let mut doc = build_node(child)?;
            add_parameter(&mut doc, Parameter::body(schema.reference.clone()));
            for (name, definition) in &schema.definitions {
                doc.definitions.insert(name.clone(), definition.clone());
            }
            add_consumes(&mut doc, content_types);
            add_default_response_400(&mut doc, "body");
            Ok(doc)
        }
        RouteTree::PassThrough(child) => build_node(child),
        RouteTree::Choice(left, right) => combine(build_node(left)?, build_node(right)?),
    }
}

fn build_leaf(endpoint: &Endpoint) -> Swagger {
    let mut doc = Swagger::new();
    let mut op = Operation {
        produces: endpoint.content_types.clone(),
        ..Operation::default()
    };

    for declared in &endpoint.responses {
        let mut response = Response::new("");
        for (name, schema) in &declared.headers {
            response.headers.insert(name.clone(), schema.clone());
        }
        if let Some(named) = &declared.schema {
            response.schema = Some(named.reference.clone());
            for (name, definition) in &named.definitions {
                doc.definitions.insert(name.clone(), definition.clone());
            }
        }
        op.responses.insert(declared.status, response);
    }

    let mut item = PathItem::default();
    match item.slot_mut(&endpoint.method) {
        Some(slot) => *slot = Some(op),
        None => trace!(method = %endpoint.method, "method not representable in swagger 2.0, skipped"),
    }
    doc.paths.insert("/".to_string(), item);
    doc
}

/// Prepend one path fragment to every path key in the document. Keys
/// accumulate right-to-left as the recursion unwinds, so the root segment
/// is prepended last.
fn prepend_path(doc: &mut Swagger, segment: &str) {
    let paths = std::mem::take(&mut doc.paths);
    let mut renamed = BTreeMap::new();
    for (key, item) in paths {
        let rest = if key == "/" { "" } else { key.as_str() };
        renamed.insert(format!("/{segment}{rest}"), item);
    }
    doc.paths = renamed;
}
