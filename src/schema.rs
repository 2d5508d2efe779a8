//! Schema oracle traits consumed by the spec builder.
//!
//! The builder never derives a JSON Schema itself; it asks the types in the
//! route table for theirs through [`ApiSchema`] (bodies and responses) and
//! [`ApiParam`] (path/query/header parameters). Implementations must be
//! pure and deterministic: the same type always yields the same schema, so
//! re-merging a definition under the same name is idempotent.

use serde_json::{json, Value};
use std::collections::BTreeMap;

/// A type's JSON Schema split into its shared definitions and the schema
/// (usually a `$ref`) used at the point of reference.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NamedSchema {
    /// Transitive definitions, keyed by the name assigned to each type.
    pub definitions: BTreeMap<String, Value>,
    /// The schema placed where the type is used. Either an inline primitive
    /// schema or a `{"$ref": "#/definitions/<name>"}` pointer.
    pub reference: Value,
}

impl NamedSchema {
    /// An anonymous schema used inline, with no shared definitions.
    pub fn inline(schema: Value) -> Self {
        NamedSchema {
            definitions: BTreeMap::new(),
            reference: schema,
        }
    }

    /// A named schema: the full definition lands in `definitions` and the
    /// point of use gets a `$ref` to it.
    pub fn named(name: &str, schema: Value) -> Self {
        let mut definitions = BTreeMap::new();
        definitions.insert(name.to_string(), schema);
        NamedSchema {
            definitions,
            reference: json!({ "$ref": format!("#/definitions/{name}") }),
        }
    }

    /// Add another schema's definitions to this one's definition set.
    /// Last write wins on a name collision; a deterministic oracle makes
    /// collisions idempotent.
    pub fn absorb(&mut self, other: &NamedSchema) {
        for (name, schema) in &other.definitions {
            self.definitions.insert(name.clone(), schema.clone());
        }
    }
}

/// JSON Schema derivation for request body and response types.
///
/// Returning `None` marks a no-content type: the builder documents it as a
/// `204` response with no schema. Everything else returns the schema plus
/// whatever definitions it transitively needs.
pub trait ApiSchema {
    fn api_schema() -> Option<NamedSchema>;
}

/// Flat, primitive-only schema for path, query and header parameters.
///
/// Swagger 2.0 does not allow `$ref` in non-body parameters, so this trait
/// intentionally has no definitions channel.
pub trait ApiParam {
    fn param_schema() -> Value;
}

/// Marker type for endpoints that return no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NoContent;

impl ApiSchema for NoContent {
    fn api_schema() -> Option<NamedSchema> {
        None
    }
}

impl ApiSchema for () {
    fn api_schema() -> Option<NamedSchema> {
        None
    }
}

macro_rules! primitive_schema {
    ($ty:ty, $schema:expr) => {
        impl ApiSchema for $ty {
            fn api_schema() -> Option<NamedSchema> {
                Some(NamedSchema::inline($schema))
            }
        }

        impl ApiParam for $ty {
            fn param_schema() -> Value {
                $schema
            }
        }
    };
}

primitive_schema!(String, json!({ "type": "string" }));
primitive_schema!(bool, json!({ "type": "boolean" }));
primitive_schema!(i32, json!({ "type": "integer", "format": "int32" }));
// 64-bit integers carry explicit bounds so consumers in languages without
// native 64-bit integers know the representable range.
primitive_schema!(
    i64,
    json!({
        "type": "integer",
        "format": "int64",
        "minimum": i64::MIN,
        "maximum": i64::MAX,
    })
);
primitive_schema!(f32, json!({ "type": "number", "format": "float" }));
primitive_schema!(f64, json!({ "type": "number", "format": "double" }));

impl<T: ApiSchema> ApiSchema for Vec<T> {
    fn api_schema() -> Option<NamedSchema> {
        let item = T::api_schema()?;
        Some(NamedSchema {
            definitions: item.definitions,
            reference: json!({ "type": "array", "items": item.reference }),
        })
    }
}

// Swagger 2.0 has no nullability on schemas; an optional field documents
// the same as its inner type.
impl<T: ApiSchema> ApiSchema for Option<T> {
    fn api_schema() -> Option<NamedSchema> {
        T::api_schema()
    }
}
