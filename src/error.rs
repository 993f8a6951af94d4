use crate::graph::Var;
use crate::primitive::Primitive;

/// All errors that can come out of building or evaluating a graph.
///
/// Every error aborts the evaluation it occurred in; there are no partial
/// results to recover.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A variable was read before anything bound it, either during an
    /// evaluation or while constructing a graph.
    #[error("unbound variable {var}")]
    UnboundVariable { var: Var },

    /// The number of supplied values disagrees with the number expected.
    /// `what` names the site: an argument list, a primitive's operands, or
    /// a primitive's results.
    #[error("arity mismatch in {what}: expected {expected}, got {got}")]
    ArityMismatch {
        what: String,
        expected: usize,
        got: usize,
    },

    /// Inverse evaluation reached a primitive with no registered inverse.
    #[error("no inverse registered for {primitive}")]
    NoInverseRegistered { primitive: Primitive },

    /// The graph uses a construct outside what the operation supports.
    #[error("{primitive} not supported: {reason}")]
    NotSupported { primitive: Primitive, reason: String },
}

/// Convenience Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
