use crate::schema::{ApiParam, ApiSchema, NamedSchema};
use crate::spec::media;
use http::Method;
use serde_json::Value;

/// A terminal route node: one HTTP method's full response contract.
///
/// An endpoint declares one response per status it can produce. The common
/// single-status case is covered by [`Endpoint::new`] and [`Endpoint::json`];
/// multi-status endpoints chain [`Endpoint::with_response`].
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub method: Method,
    /// Full MIME strings the endpoint can produce, e.g.
    /// `application/json;charset=utf-8`. Non-empty for any endpoint with a
    /// response body.
    pub content_types: Vec<String>,
    pub responses: Vec<EndpointResponse>,
}

/// One declared response of an [`Endpoint`].
#[derive(Debug, Clone)]
pub struct EndpointResponse {
    pub status: u16,
    /// `None` marks a no-content response; the builder omits the schema.
    pub schema: Option<NamedSchema>,
    /// Documented response headers as `(name, header schema)` pairs.
    pub headers: Vec<(String, Value)>,
}

impl Endpoint {
    /// An endpoint producing `T` at `status` with the given content types.
    ///
    /// A no-content `T` (such as `()` or [`NoContent`](crate::schema::NoContent))
    /// collapses to a `204` with no schema, whatever `status` was passed.
    pub fn new<T: ApiSchema>(method: Method, status: u16, content_types: Vec<String>) -> Self {
        let (status, schema) = match T::api_schema() {
            Some(schema) => (status, Some(schema)),
            None => (204, None),
        };
        Endpoint {
            method,
            content_types,
            responses: vec![EndpointResponse {
                status,
                schema,
                headers: Vec::new(),
            }],
        }
    }

    /// Shorthand for a JSON endpoint.
    pub fn json<T: ApiSchema>(method: Method, status: u16) -> Self {
        Endpoint::new::<T>(method, status, vec![media::APPLICATION_JSON.to_string()])
    }

    /// An endpoint with no response body, documented as `204`.
    pub fn no_content(method: Method) -> Self {
        Endpoint {
            method,
            content_types: Vec::new(),
            responses: vec![EndpointResponse {
                status: 204,
                schema: None,
                headers: Vec::new(),
            }],
        }
    }

    /// Declare a further response status producing `T`.
    ///
    /// Used for endpoints that can answer with one of several statuses,
    /// each with its own body type.
    pub fn with_response<T: ApiSchema>(mut self, status: u16) -> Self {
        let (status, schema) = match T::api_schema() {
            Some(schema) => (status, Some(schema)),
            None => (204, None),
        };
        self.responses.push(EndpointResponse {
            status,
            schema,
            headers: Vec::new(),
        });
        self
    }

    /// Document a response header on the most recently declared response.
    pub fn with_header<H: ApiParam>(mut self, name: &str) -> Self {
        if let Some(last) = self.responses.last_mut() {
            last.headers.push((name.to_string(), H::param_schema()));
        }
        self
    }
}

/// The runtime route table: sequential path, parameter and header
/// combinators terminating in endpoints, with [`RouteTree::Choice`] joining
/// disjoint sub-APIs that share the root path.
///
/// Trees are immutable once constructed; the builder walks them without
/// modifying them. Nodes own their children, so a tree is built innermost
/// first with the wrapping constructors below.
#[derive(Debug, Clone)]
pub enum RouteTree {
    /// Terminal operation.
    Leaf(Endpoint),
    /// An opaque handler with no generated detail; contributes a path entry
    /// with an empty path item.
    Raw,
    /// Literal path segment.
    Path {
        literal: String,
        child: Box<RouteTree>,
    },
    /// Path capture rendered as `{name}` in the path template.
    Capture {
        name: String,
        schema: Value,
        child: Box<RouteTree>,
    },
    /// Optional query parameter. `multi` documents a repeatable parameter
    /// collected as an array.
    Query {
        name: String,
        schema: Value,
        multi: bool,
        child: Box<RouteTree>,
    },
    /// Valueless boolean query flag.
    Flag { name: String, child: Box<RouteTree> },
    /// Request header parameter.
    Header {
        name: String,
        schema: Value,
        child: Box<RouteTree>,
    },
    /// Request body.
    Body {
        content_types: Vec<String>,
        schema: NamedSchema,
        child: Box<RouteTree>,
    },
    /// Disjoint union of two sub-APIs.
    Choice(Box<RouteTree>, Box<RouteTree>),
    /// Combinators with no effect on the document (security wrappers,
    /// context markers and the like). The builder treats these as
    /// transparent.
    PassThrough(Box<RouteTree>),
}

impl RouteTree {
    pub fn leaf(endpoint: Endpoint) -> Self {
        RouteTree::Leaf(endpoint)
    }

    pub fn path(literal: impl Into<String>, child: RouteTree) -> Self {
        RouteTree::Path {
            literal: literal.into(),
            child: Box::new(child),
        }
    }

    pub fn capture<T: ApiParam>(name: impl Into<String>, child: RouteTree) -> Self {
        RouteTree::Capture {
            name: name.into(),
            schema: T::param_schema(),
            child: Box::new(child),
        }
    }

    pub fn query<T: ApiParam>(name: impl Into<String>, child: RouteTree) -> Self {
        RouteTree::Query {
            name: name.into(),
            schema: T::param_schema(),
            multi: false,
            child: Box::new(child),
        }
    }

    /// A repeatable query parameter, documented as an array of `T` with the
    /// `multi` collection format.
    pub fn query_multi<T: ApiParam>(name: impl Into<String>, child: RouteTree) -> Self {
        RouteTree::Query {
            name: name.into(),
            schema: T::param_schema(),
            multi: true,
            child: Box::new(child),
        }
    }

    pub fn flag(name: impl Into<String>, child: RouteTree) -> Self {
        RouteTree::Flag {
            name: name.into(),
            child: Box::new(child),
        }
    }

    pub fn header<T: ApiParam>(name: impl Into<String>, child: RouteTree) -> Self {
        RouteTree::Header {
            name: name.into(),
            schema: T::param_schema(),
            child: Box::new(child),
        }
    }

    /// A JSON request body of type `T`.
    ///
    /// A no-content `T` documents as a body with a null schema; passing one
    /// here is almost certainly a mistake in the route description.
    pub fn body<T: ApiSchema>(content_types: Vec<String>, child: RouteTree) -> Self {
        RouteTree::Body {
            content_types,
            schema: T::api_schema().unwrap_or_default(),
            child: Box::new(child),
        }
    }

    pub fn json_body<T: ApiSchema>(child: RouteTree) -> Self {
        RouteTree::body::<T>(vec![media::APPLICATION_JSON.to_string()], child)
    }

    pub fn choice(left: RouteTree, right: RouteTree) -> Self {
        RouteTree::Choice(Box::new(left), Box::new(right))
    }

    pub fn pass_through(child: RouteTree) -> Self {
        RouteTree::PassThrough(Box::new(child))
    }
}
