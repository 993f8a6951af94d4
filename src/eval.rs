use log::{debug, trace};

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::primitive_ops::PrimitiveOps;

/// Evaluate a graph forward: bind `args` to the graph's inputs and `consts`
/// to its constants, run every equation in order through
/// [`PrimitiveOps::apply`], and return the values of the graph's outputs.
///
/// Deterministic for deterministic interpreters; the only state is a fresh
/// [`Environment`] that lives for this call.
///
/// # Errors
/// - [`Error::ArityMismatch`] if `args` or `consts` don't match the graph's
///   input and constant counts, or an interpreter returns the wrong number of
///   results for an equation.
/// - [`Error::UnboundVariable`] if an equation reads a variable nothing
///   bound. Graphs from [`GraphBuilder`](crate::GraphBuilder) can't trigger
///   this.
/// - Whatever [`PrimitiveOps::apply`] itself reports.
pub fn eval_graph<T: PrimitiveOps + Clone>(
    graph: &Graph<T>,
    consts: &[T],
    args: &[T],
) -> Result<Vec<T>> {
    if args.len() != graph.inputs().len() {
        return Err(Error::ArityMismatch {
            what: "inputs".to_string(),
            expected: graph.inputs().len(),
            got: args.len(),
        });
    }
    if consts.len() != graph.constants().len() {
        return Err(Error::ArityMismatch {
            what: "constants".to_string(),
            expected: graph.constants().len(),
            got: consts.len(),
        });
    }

    debug!(
        "eval: {} equations, {} inputs, {} constants",
        graph.eqns().len(),
        graph.inputs().len(),
        graph.constants().len()
    );

    let mut env = Environment::new(graph.var_count());
    for (var, value) in graph.inputs().iter().zip(args) {
        env.write(*var, value.clone());
    }
    for (var, value) in graph.constants().iter().zip(consts) {
        env.write(*var, value.clone());
    }

    for (i, eqn) in graph.eqns().iter().enumerate() {
        let inputs = eqn
            .inputs
            .iter()
            .map(|atom| env.read(atom).cloned())
            .collect::<Result<Vec<_>>>()?;
        let results = T::apply(eqn.prim, &inputs, &eqn.params)?;
        if results.len() != eqn.outputs.len() {
            return Err(Error::ArityMismatch {
                what: format!("results of {}", eqn.prim),
                expected: eqn.outputs.len(),
                got: results.len(),
            });
        }
        trace!("eval equation {i}: {}", eqn.prim);
        for (var, value) in eqn.outputs.iter().zip(results) {
            env.write(*var, value);
        }
    }

    graph
        .outputs()
        .iter()
        .map(|var| env.read_var(*var).cloned())
        .collect()
}
