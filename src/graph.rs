use crate::error::{Error, Result};
use crate::primitive::{Params, Primitive};

/// A variable in a graph, identified by its index into the graph's variable
/// arena. Identity, equality and hashing are all index comparisons; the
/// abstract value lives in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Var(pub(crate) u32);

impl Var {
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Element type of an abstract value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    F32,
    F64,
}

/// An abstract value: the shape and element type of a variable, without any
/// data. Tracers create these; the evaluators never look at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aval {
    pub shape: Vec<usize>,
    pub dtype: DType,
}

impl Aval {
    #[must_use]
    pub fn new(shape: &[usize], dtype: DType) -> Self {
        Aval {
            shape: shape.to_vec(),
            dtype,
        }
    }

    #[must_use]
    pub fn scalar(dtype: DType) -> Self {
        Aval {
            shape: vec![],
            dtype,
        }
    }
}

/// Conversion from a concrete value to its abstract value, so tracing can
/// type graph variables from example arguments.
pub trait ToAval {
    fn to_aval(&self) -> Aval;
}

impl ToAval for f64 {
    fn to_aval(&self) -> Aval {
        Aval::scalar(DType::F64)
    }
}

impl ToAval for f32 {
    fn to_aval(&self) -> Aval {
        Aval::scalar(DType::F32)
    }
}

// Symbolic values have no element type of their own. f64 keeps printed
// graphs consistent with the numeric interpreters.
impl ToAval for String {
    fn to_aval(&self) -> Aval {
        Aval::scalar(DType::F64)
    }
}

/// An equation operand: a variable reference or an inline literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom<T> {
    Var(Var),
    Lit(T),
}

/// One step of a graph: `outputs = prim[params] inputs`.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation<T> {
    pub prim: Primitive,
    pub inputs: Vec<Atom<T>>,
    pub outputs: Vec<Var>,
    pub params: Params,
}

/// A program graph: a topologically ordered list of equations over variables,
/// with designated input, constant and output variables.
///
/// Graphs are immutable once built and can be evaluated repeatedly and
/// concurrently; every evaluation gets its own environment. Constant values
/// are not stored in the graph itself, they travel next to it (see
/// [`Traced`](crate::Traced)) and are bound positionally to
/// [`Graph::constants`].
#[derive(Debug, Clone)]
pub struct Graph<T> {
    avals: Vec<Aval>,
    eqns: Vec<Equation<T>>,
    inputs: Vec<Var>,
    constants: Vec<Var>,
    outputs: Vec<Var>,
}

impl<T> Graph<T> {
    #[must_use]
    pub fn eqns(&self) -> &[Equation<T>] {
        &self.eqns
    }

    #[must_use]
    pub fn inputs(&self) -> &[Var] {
        &self.inputs
    }

    #[must_use]
    pub fn constants(&self) -> &[Var] {
        &self.constants
    }

    #[must_use]
    pub fn outputs(&self) -> &[Var] {
        &self.outputs
    }

    /// The number of variables in the arena, and so the size of the
    /// environment an evaluation needs.
    #[must_use]
    pub fn var_count(&self) -> usize {
        self.avals.len()
    }

    /// The abstract value of a variable.
    ///
    /// # Panics
    /// If `var` does not belong to this graph.
    #[must_use]
    pub fn aval(&self, var: Var) -> &Aval {
        &self.avals[var.index()]
    }
}

/// Builds a [`Graph`] one variable and equation at a time.
///
/// The builder hands out variables only as it defines them, so equations can
/// never refer forward; a variable from another builder surfaces as
/// [`Error::UnboundVariable`], and operand counts are checked against the
/// primitive's declared arity when the equation is bound.
#[derive(Debug)]
pub struct GraphBuilder<T> {
    avals: Vec<Aval>,
    eqns: Vec<Equation<T>>,
    inputs: Vec<Var>,
    constants: Vec<Var>,
}

impl<T> GraphBuilder<T> {
    #[must_use]
    pub fn new() -> Self {
        GraphBuilder {
            avals: vec![],
            eqns: vec![],
            inputs: vec![],
            constants: vec![],
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fresh(&mut self, aval: Aval) -> Var {
        let var = Var(self.avals.len() as u32);
        self.avals.push(aval);
        var
    }

    fn check_var(&self, var: Var) -> Result<()> {
        if var.index() < self.avals.len() {
            Ok(())
        } else {
            Err(Error::UnboundVariable { var })
        }
    }

    /// Declare an input variable, bound from caller arguments at evaluation
    /// time.
    pub fn input(&mut self, aval: Aval) -> Var {
        let var = self.fresh(aval);
        self.inputs.push(var);
        var
    }

    /// Declare a constant variable, bound positionally from the constant
    /// values passed alongside the graph at evaluation time.
    pub fn constant(&mut self, aval: Aval) -> Var {
        let var = self.fresh(aval);
        self.constants.push(var);
        var
    }

    /// Bind an equation, checking the operand count against the primitive's
    /// declared arity and that every operand variable belongs to this
    /// builder. Returns the equation's output variable.
    ///
    /// # Errors
    /// [`Error::ArityMismatch`] for a wrong operand count,
    /// [`Error::UnboundVariable`] for an operand variable from another
    /// builder.
    pub fn eqn(&mut self, prim: Primitive, inputs: Vec<Atom<T>>, params: Params) -> Result<Var>
    where
        T: ToAval,
    {
        if inputs.len() != prim.in_arity() {
            return Err(Error::ArityMismatch {
                what: prim.name().to_string(),
                expected: prim.in_arity(),
                got: inputs.len(),
            });
        }
        for atom in &inputs {
            if let Atom::Var(var) = atom {
                self.check_var(*var)?;
            }
        }
        Ok(self.push_eqn(prim, inputs, params))
    }

    /// Push an equation without checks. Callers guarantee the operands come
    /// from this builder and match the primitive's arity.
    pub(crate) fn push_eqn(&mut self, prim: Primitive, inputs: Vec<Atom<T>>, params: Params) -> Var
    where
        T: ToAval,
    {
        // Primitives are elementwise, so the result has the abstract value of
        // the first operand. Every primitive takes at least one operand.
        let aval = match &inputs[0] {
            Atom::Var(var) => self.avals[var.index()].clone(),
            Atom::Lit(x) => x.to_aval(),
        };
        let outputs: Vec<Var> = (0..prim.out_arity()).map(|_| self.fresh(aval.clone())).collect();
        let out = outputs[0];
        self.eqns.push(Equation {
            prim,
            inputs,
            outputs,
            params,
        });
        out
    }

    /// Finish the graph with the given output variables.
    ///
    /// # Errors
    /// [`Error::UnboundVariable`] if an output variable does not belong to
    /// this builder.
    pub fn finish(self, outputs: &[Var]) -> Result<Graph<T>> {
        for &var in outputs {
            self.check_var(var)?;
        }
        Ok(Graph {
            avals: self.avals,
            eqns: self.eqns,
            inputs: self.inputs,
            constants: self.constants,
            outputs: outputs.to_vec(),
        })
    }

    #[must_use]
    pub fn var_count(&self) -> usize {
        self.avals.len()
    }
}

impl<T> Default for GraphBuilder<T> {
    fn default() -> Self {
        GraphBuilder::new()
    }
}
