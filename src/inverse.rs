use std::collections::HashMap;

use log::{debug, trace};

use crate::env::Environment;
use crate::error::{Error, Result};
use crate::graph::{Atom, Graph};
use crate::primitive::Primitive;

/// A table of per-primitive inverse operations, built by the caller and
/// passed into [`inverse_eval_graph`]. Plain data: once built it is only
/// looked up, never mutated, by an evaluation.
pub struct InverseRegistry<T> {
    inverses: HashMap<Primitive, Box<dyn Fn(&T) -> T>>,
}

impl<T> InverseRegistry<T> {
    #[must_use]
    pub fn new() -> Self {
        InverseRegistry {
            inverses: HashMap::new(),
        }
    }

    /// Register the inverse of a primitive. Registering the same primitive
    /// again replaces the previous entry.
    pub fn register(&mut self, prim: Primitive, inverse: impl Fn(&T) -> T + 'static) {
        self.inverses.insert(prim, Box::new(inverse));
    }

    #[must_use]
    pub fn lookup(&self, prim: Primitive) -> Option<&dyn Fn(&T) -> T> {
        self.inverses.get(&prim).map(AsRef::as_ref)
    }
}

impl<T> Default for InverseRegistry<T> {
    fn default() -> Self {
        InverseRegistry::new()
    }
}

impl<T> std::fmt::Debug for InverseRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut prims: Vec<&str> = self.inverses.keys().map(|p| p.name()).collect();
        prims.sort_unstable();
        f.debug_tuple("InverseRegistry").field(&prims).finish()
    }
}

/// Evaluate a graph backward: bind `outputs` to the graph's output variables
/// and `consts` to its constants, walk the equations in reverse order
/// applying each primitive's registered inverse, and return the values
/// recovered for the graph's inputs.
///
/// Inversion is scoped to equations with a single output and a single
/// variable operand; each step solves `output = prim(input)` for `input`.
///
/// # Errors
/// - [`Error::ArityMismatch`] if `outputs` or `consts` don't match the
///   graph's output and constant counts.
/// - [`Error::NotSupported`] for an equation with multiple operands, a
///   literal operand, or multiple outputs.
/// - [`Error::UnboundVariable`] if an equation's output was never bound,
///   which happens for equations not on the path to any graph output.
/// - [`Error::NoInverseRegistered`], naming the primitive, if the registry
///   has no entry for it.
pub fn inverse_eval_graph<T: Clone>(
    graph: &Graph<T>,
    consts: &[T],
    outputs: &[T],
    registry: &InverseRegistry<T>,
) -> Result<Vec<T>> {
    if outputs.len() != graph.outputs().len() {
        return Err(Error::ArityMismatch {
            what: "outputs".to_string(),
            expected: graph.outputs().len(),
            got: outputs.len(),
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
        "inverse eval: {} equations, {} outputs, {} constants",
        graph.eqns().len(),
        graph.outputs().len(),
        graph.constants().len()
    );

    let mut env = Environment::new(graph.var_count());
    for (var, value) in graph.outputs().iter().zip(outputs) {
        env.write(*var, value.clone());
    }
    for (var, value) in graph.constants().iter().zip(consts) {
        env.write(*var, value.clone());
    }

    for (i, eqn) in graph.eqns().iter().enumerate().rev() {
        if eqn.outputs.len() != 1 {
            return Err(Error::NotSupported {
                primitive: eqn.prim,
                reason: format!(
                    "inversion requires a single output, this equation has {}",
                    eqn.outputs.len()
                ),
            });
        }
        let input_var = match eqn.inputs.as_slice() {
            [Atom::Var(var)] => *var,
            [Atom::Lit(_)] => {
                return Err(Error::NotSupported {
                    primitive: eqn.prim,
                    reason: "cannot invert through a literal operand".to_string(),
                })
            }
            _ => {
                return Err(Error::NotSupported {
                    primitive: eqn.prim,
                    reason: format!(
                        "inversion requires a single operand, this equation has {}",
                        eqn.inputs.len()
                    ),
                })
            }
        };
        let value = env.read_var(eqn.outputs[0])?;
        let inverse = registry.lookup(eqn.prim).ok_or(Error::NoInverseRegistered {
            primitive: eqn.prim,
        })?;
        let recovered = inverse(value);
        trace!("inverse equation {i}: {}", eqn.prim);
        env.write(input_var, recovered);
    }

    graph
        .inputs()
        .iter()
        .map(|var| env.read_var(*var).cloned())
        .collect()
}
