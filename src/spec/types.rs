use http::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Well-known media types, rendered as full MIME strings as they appear in
/// `consumes`/`produces` lists.
pub mod media {
    pub const APPLICATION_JSON: &str = "application/json;charset=utf-8";
    pub const TEXT_PLAIN: &str = "text/plain;charset=utf-8";
    pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";
}

/// Where a parameter lives in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
    Header,
    Body,
}

impl std::fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterLocation::Path => write!(f, "path"),
            ParameterLocation::Query => write!(f, "query"),
            ParameterLocation::Header => write!(f, "header"),
            ParameterLocation::Body => write!(f, "body"),
        }
    }
}

/// Document metadata. Title and version serialize even when empty; an empty
/// `info` block is `{"title": "", "version": ""}`, not `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Info {
    pub title: String,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A registered tag with an optional human description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            description: Some(description.into()),
        }
    }
}

/// A single request parameter.
///
/// Body parameters carry their schema under `schema`; path, query and
/// header parameters flatten their primitive schema fields (`type`,
/// `format`, `items`, `collectionFormat`, ...) directly into the parameter
/// object, which is the Swagger 2.0 wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(skip_serializing_if = "std::ops::Not::not", default)]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(flatten, default)]
    pub spec: serde_json::Map<String, Value>,
}

impl Parameter {
    /// A required path parameter with a flattened primitive schema.
    pub fn path(name: impl Into<String>, schema: Value) -> Self {
        Parameter {
            name: name.into(),
            location: ParameterLocation::Path,
            required: true,
            schema: None,
            spec: flatten_schema(schema),
        }
    }

    /// An optional query parameter with a flattened primitive schema.
    pub fn query(name: impl Into<String>, schema: Value) -> Self {
        Parameter {
            name: name.into(),
            location: ParameterLocation::Query,
            required: false,
            schema: None,
            spec: flatten_schema(schema),
        }
    }

    /// An optional header parameter with a flattened primitive schema.
    pub fn header(name: impl Into<String>, schema: Value) -> Self {
        Parameter {
            name: name.into(),
            location: ParameterLocation::Header,
            required: false,
            schema: None,
            spec: flatten_schema(schema),
        }
    }

    /// The required body parameter. Swagger 2.0 allows at most one and it
    /// is conventionally named `body`.
    pub fn body(schema: Value) -> Self {
        Parameter {
            name: "body".to_string(),
            location: ParameterLocation::Body,
            required: true,
            schema: Some(schema),
            spec: serde_json::Map::new(),
        }
    }
}

fn flatten_schema(schema: Value) -> serde_json::Map<String, Value> {
    match schema {
        Value::Object(map) => map,
        // Primitive parameter schemas are always objects; anything else is
        // dropped rather than emitted as malformed JSON.
        _ => serde_json::Map::new(),
    }
}

/// One documented response of an operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Response {
    #[serde(default)]
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub headers: BTreeMap<String, Value>,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Response {
            description: description.into(),
            schema: None,
            headers: BTreeMap::new(),
        }
    }
}

/// One HTTP operation: the method entry under a path item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Operation {
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub consumes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub produces: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub responses: BTreeMap<u16, Response>,
}

/// The operations declared on one path, at most one per method.
///
/// Swagger 2.0 knows exactly these seven methods. An empty path item is
/// legal and marks a raw handler with no generated detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PathItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
}

impl PathItem {
    /// The mutable slot for `method`, or `None` for methods Swagger 2.0
    /// cannot represent (e.g. TRACE).
    pub fn slot_mut(&mut self, method: &Method) -> Option<&mut Option<Operation>> {
        match method.as_str() {
            "GET" => Some(&mut self.get),
            "PUT" => Some(&mut self.put),
            "POST" => Some(&mut self.post),
            "DELETE" => Some(&mut self.delete),
            "OPTIONS" => Some(&mut self.options),
            "HEAD" => Some(&mut self.head),
            "PATCH" => Some(&mut self.patch),
            _ => None,
        }
    }

    pub fn operation(&self, method: &Method) -> Option<&Operation> {
        match method.as_str() {
            "GET" => self.get.as_ref(),
            "PUT" => self.put.as_ref(),
            "POST" => self.post.as_ref(),
            "DELETE" => self.delete.as_ref(),
            "OPTIONS" => self.options.as_ref(),
            "HEAD" => self.head.as_ref(),
            "PATCH" => self.patch.as_ref(),
            _ => None,
        }
    }

    pub fn operation_mut(&mut self, method: &Method) -> Option<&mut Operation> {
        self.slot_mut(method).and_then(|slot| slot.as_mut())
    }

    /// Iterate the populated operations with their methods.
    pub fn operations(&self) -> impl Iterator<Item = (Method, &Operation)> {
        [
            (Method::GET, self.get.as_ref()),
            (Method::PUT, self.put.as_ref()),
            (Method::POST, self.post.as_ref()),
            (Method::DELETE, self.delete.as_ref()),
            (Method::OPTIONS, self.options.as_ref()),
            (Method::HEAD, self.head.as_ref()),
            (Method::PATCH, self.patch.as_ref()),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }

    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        [
            self.get.as_mut(),
            self.put.as_mut(),
            self.post.as_mut(),
            self.delete.as_mut(),
            self.options.as_mut(),
            self.head.as_mut(),
            self.patch.as_mut(),
        ]
        .into_iter()
        .flatten()
    }

    /// Consume the item, yielding each populated operation.
    pub fn into_operations(self) -> impl Iterator<Item = (Method, Operation)> {
        [
            (Method::GET, self.get),
            (Method::PUT, self.put),
            (Method::POST, self.post),
            (Method::DELETE, self.delete),
            (Method::OPTIONS, self.options),
            (Method::HEAD, self.head),
            (Method::PATCH, self.patch),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.map(|op| (method, op)))
    }
}

/// The accumulated Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swagger {
    pub swagger: String,
    pub info: Info,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(rename = "basePath", skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    pub paths: BTreeMap<String, PathItem>,
    pub definitions: BTreeMap<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub tags: Vec<Tag>,
}

impl Default for Swagger {
    fn default() -> Self {
        Swagger {
            swagger: "2.0".to_string(),
            info: Info::default(),
            host: None,
            base_path: None,
            paths: BTreeMap::new(),
            definitions: BTreeMap::new(),
            tags: Vec::new(),
        }
    }
}

impl Swagger {
    pub fn new() -> Self {
        Swagger::default()
    }

    /// Iterate every operation in the document, mutably.
    pub fn operations_mut(&mut self) -> impl Iterator<Item = &mut Operation> {
        self.paths
            .values_mut()
            .flat_map(|item| item.operations_mut())
    }

    /// Pretty-printed JSON rendition of the document.
    pub fn to_json_string(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// YAML rendition of the document.
    pub fn to_yaml_string(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
