use http::Method;
use thiserror::Error;

/// Errors surfaced by the spec builder and the document utilities.
///
/// Every variant is a programmer error in the route description, not a
/// runtime data error. Callers should treat them as fatal and fix the
/// route table; there is nothing transient to retry.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Two endpoints joined by a `Choice` resolved to the same path and
    /// method. There is no precedence rule between the sides, so the
    /// collision is rejected instead of silently picking one.
    #[error("duplicate route: {method} {path} is declared on both sides of a choice")]
    DuplicateRoute { path: String, method: Method },

    /// The sub-tree passed to [`sub_operations`](crate::spec::sub_operations)
    /// documents an operation that the full tree does not.
    #[error("sub-tree is not contained in the full tree: {method} {path} missing from the full document")]
    InvalidSubset { path: String, method: Method },
}
