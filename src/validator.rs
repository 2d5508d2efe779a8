//! Encoding-vs-schema validation harness.
//!
//! The test oracle for the whole crate: a type's JSON encoding must always
//! validate against its own derived schema. The harness assembles a
//! self-contained JSON Schema document from [`ApiSchema`] output, compiles
//! it with the `jsonschema` crate and checks the `serde_json` encoding of a
//! sample value against it. Sample generation is the caller's concern.

use crate::schema::ApiSchema;
use serde::Serialize;
use serde_json::Value;

/// A single point where an encoded value failed its derived schema.
#[derive(Debug, Clone)]
pub struct SchemaIssue {
    /// JSON pointer into the encoded instance.
    pub location: String,
    pub kind: String,
    pub message: String,
}

impl SchemaIssue {
    pub fn new(
        location: impl Into<String>,
        kind: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        SchemaIssue {
            location: location.into(),
            kind: kind.into(),
            message: message.into(),
        }
    }
}

/// Render a list of issues for humans, one line each.
pub fn render_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("[{}] {}: {}", issue.kind, issue.location, issue.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The self-contained schema document for `T`: its reference schema with
/// the transitive `definitions` attached for `$ref` resolution. `None` for
/// no-content types.
pub fn schema_document<T: ApiSchema>() -> Option<Value> {
    let named = T::api_schema()?;
    let mut root = match named.reference {
        Value::Object(map) => map,
        other => {
            // A bare non-object reference still needs a definitions channel,
            // so wrap it in an allOf.
            let mut map = serde_json::Map::new();
            map.insert("allOf".to_string(), Value::Array(vec![other]));
            map
        }
    };
    if !named.definitions.is_empty() {
        let defs = named
            .definitions
            .into_iter()
            .collect::<serde_json::Map<String, Value>>();
        root.insert("definitions".to_string(), Value::Object(defs));
    }
    Some(Value::Object(root))
}

/// Validate that `value`'s JSON encoding conforms to `T`'s derived schema.
///
/// Returns one issue per validation error; an empty list means the encoding
/// conforms. No-content types trivially conform.
///
/// # Errors
///
/// Fails if the derived schema itself does not compile or the value does
/// not encode. Both are oracle-contract violations, not data errors.
pub fn validate_encoding<T: ApiSchema + Serialize>(value: &T) -> anyhow::Result<Vec<SchemaIssue>> {
    let Some(schema) = schema_document::<T>() else {
        return Ok(Vec::new());
    };
    let validator = jsonschema::validator_for(&schema)
        .map_err(|err| anyhow::anyhow!("derived schema does not compile: {err}"))?;
    let instance = serde_json::to_value(value)?;
    let issues = validator
        .iter_errors(&instance)
        .map(|err| {
            SchemaIssue::new(
                err.instance_path().to_string(),
                "SchemaMismatch",
                err.to_string(),
            )
        })
        .collect();
    Ok(issues)
}

/// Test helper: panic with a rendered issue list when the encoding does not
/// match the schema.
pub fn assert_encoding_matches_schema<T: ApiSchema + Serialize>(value: &T) {
    match validate_encoding(value) {
        Ok(issues) if issues.is_empty() => {}
        Ok(issues) => panic!(
            "encoding does not match derived schema, {} issue(s):\n{}",
            issues.len(),
            render_issues(&issues)
        ),
        Err(err) => panic!("schema validation could not run: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{NamedSchema, NoContent};
    use serde_json::json;

    #[derive(Serialize)]
    struct Todo {
        id: i64,
        title: String,
    }

    impl ApiSchema for Todo {
        fn api_schema() -> Option<NamedSchema> {
            Some(NamedSchema::named(
                "Todo",
                json!({
                    "type": "object",
                    "required": ["id", "title"],
                    "properties": {
                        "id": { "type": "integer" },
                        "title": { "type": "string" },
                    }
                }),
            ))
        }
    }

    #[test]
    fn test_conforming_value_yields_no_issues() {
        let todo = Todo {
            id: 1,
            title: "write docs".to_string(),
        };
        let issues = validate_encoding(&todo).unwrap();
        assert!(issues.is_empty(), "{}", render_issues(&issues));
    }

    #[test]
    fn test_schema_document_inlines_definitions() {
        let doc = schema_document::<Todo>().unwrap();
        assert_eq!(doc["$ref"], json!("#/definitions/Todo"));
        assert!(doc["definitions"]["Todo"].is_object());
    }

    #[test]
    fn test_no_content_trivially_conforms() {
        assert!(schema_document::<NoContent>().is_none());
    }

    #[derive(Serialize)]
    struct Lying {
        count: String,
    }

    // Advertises an integer field but encodes a string.
    impl ApiSchema for Lying {
        fn api_schema() -> Option<NamedSchema> {
            Some(NamedSchema::named(
                "Lying",
                json!({
                    "type": "object",
                    "required": ["count"],
                    "properties": { "count": { "type": "integer" } }
                }),
            ))
        }
    }

    #[test]
    fn test_mismatch_is_reported() {
        let bad = Lying {
            count: "three".to_string(),
        };
        let issues = validate_encoding(&bad).unwrap();
        assert!(!issues.is_empty());
        assert_eq!(issues[0].kind, "SchemaMismatch");
    }
}
