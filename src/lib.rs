#![warn(clippy::pedantic)]

mod env;
mod error;
mod eval;
mod graph;
mod graph_display;
mod inverse;
mod math_macros;
mod primitive;
mod primitive_ops;
mod primitive_ops_float;
mod primitive_ops_string;
mod trace;

pub use env::Environment;
pub use error::{Error, Result};
pub use eval::eval_graph;
pub use graph::{Atom, Aval, DType, Equation, Graph, GraphBuilder, ToAval, Var};
pub use inverse::{inverse_eval_graph, InverseRegistry};
pub use primitive::{ParamValue, Params, Primitive};
pub use primitive_ops::PrimitiveOps;
pub use trace::{trace, trace1, Trace, Traced, Tracer};

// TODO:
// - Invert binary equations where one operand is a constant, by solving for the other operand.
//   Needs the registry to know which operand is unknown.
// - Support primitives with more than one output. Equation and the arity checks are ready for it,
//   but no primitive in the set produces one, and inversion would need a protocol for partial
//   outputs.
// - A numeric gradient-style checker for inverses: verify f(inverse(y)) == y on random samples
//   for every registered pair.
