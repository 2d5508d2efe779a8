//! # swaggen
//!
//! Derive [Swagger 2.0](https://swagger.io/specification/v2/) documents from
//! a runtime route table.
//!
//! The caller describes an API as a [`RouteTree`]: sequential path,
//! parameter and header combinators terminating in [`Endpoint`] leaves,
//! joined with a choice combinator for disjoint sub-APIs. [`build_spec`]
//! folds that tree into a complete [`Swagger`] document: path templates,
//! parameters, per-status responses with default 400/404 descriptions,
//! and a global `definitions` section populated through the [`ApiSchema`]
//! oracle traits.
//!
//! ## Modules
//!
//! - **[`routes`]** - the route-table data model and its constructors
//! - **[`schema`]** - schema oracle traits ([`ApiSchema`], [`ApiParam`])
//! - **[`spec`]** - the Swagger document model, the builder fold and the
//!   post-processing utilities (tagging, sub-document selection, default
//!   responses)
//! - **[`validator`]** - harness checking that a value's JSON encoding
//!   validates against its own derived schema
//! - **[`error`]** - the fail-fast error taxonomy
//!
//! ## Quick start
//!
//! ```
//! use http::Method;
//! use swaggen::{build_spec, Endpoint, RouteTree};
//!
//! let api = RouteTree::path(
//!     "todo",
//!     RouteTree::capture::<i64>(
//!         "id",
//!         RouteTree::leaf(Endpoint::json::<String>(Method::GET, 200)),
//!     ),
//! );
//!
//! let doc = build_spec(&api).unwrap();
//! assert!(doc.paths.contains_key("/todo/{id}"));
//! ```
//!
//! The build is a pure, single-pass fold: no I/O, no shared state, and it
//! either completes or the route table was malformed. Serializing the
//! resulting document (`to_json_string`/`to_yaml_string`) and writing it
//! anywhere is the caller's concern.

pub mod error;
pub mod routes;
pub mod schema;
pub mod spec;
pub mod validator;

pub use error::SpecError;
pub use routes::{Endpoint, EndpointResponse, RouteTree};
pub use schema::{ApiParam, ApiSchema, NamedSchema, NoContent};
pub use spec::{
    add_consumes, add_default_response_400, add_default_response_404, add_parameter, apply_tags,
    build_spec, media, sub_operations, Info, Operation, OperationSelector, Parameter,
    ParameterLocation, PathItem, Response, Swagger, Tag,
};
