use std::cell::RefCell;
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::ptr;

use log::debug;

use crate::error::Result;
use crate::eval::eval_graph;
use crate::graph::{Atom, Aval, Graph, GraphBuilder, ToAval, Var};
use crate::inverse::{inverse_eval_graph, InverseRegistry};
use crate::primitive::{ParamValue, Params, Primitive};
use crate::primitive_ops::PrimitiveOps;

/// An in-progress trace: a graph builder plus the constant values captured
/// while a host closure runs over [`Tracer`] values.
///
/// Most callers go through [`trace`] or [`trace1`]; the type is public for
/// programs that need captured constants or multiple outputs.
#[derive(Debug)]
pub struct Trace<T> {
    builder: RefCell<GraphBuilder<T>>,
    consts: RefCell<Vec<T>>,
}

impl<T> Trace<T> {
    #[must_use]
    pub fn new() -> Self {
        Trace {
            builder: RefCell::new(GraphBuilder::new()),
            consts: RefCell::new(vec![]),
        }
    }

    /// Introduce an input variable with the given abstract value.
    #[must_use]
    pub fn var(&self, aval: Aval) -> Tracer<'_, T> {
        Tracer::Tracer(self, self.builder.borrow_mut().input(aval))
    }

    /// Capture a value as a graph constant. Unlike a lifted value, a
    /// constant stays a variable in the graph; its value is bound at
    /// evaluation time rather than embedded in an equation.
    #[must_use]
    pub fn constant(&self, value: T) -> Tracer<'_, T>
    where
        T: ToAval,
    {
        let aval = value.to_aval();
        self.consts.borrow_mut().push(value);
        Tracer::Tracer(self, self.builder.borrow_mut().constant(aval))
    }

    fn push_eqn(&self, prim: Primitive, inputs: Vec<Atom<T>>, params: Params) -> Tracer<'_, T>
    where
        T: ToAval,
    {
        let var = self.builder.borrow_mut().push_eqn(prim, inputs, params);
        Tracer::Tracer(self, var)
    }

    /// Finish tracing: freeze the graph with the given outputs. Output
    /// tracers that are lifted values are captured as constants. This drains
    /// the trace; the graph and constants move into the result.
    ///
    /// # Errors
    /// Any graph validation error, see [`GraphBuilder::finish`].
    ///
    /// # Panics
    /// If an output tracer belongs to a different trace.
    pub fn finish(&self, outputs: &[&Tracer<'_, T>]) -> Result<Traced<T>>
    where
        T: ToAval + Clone,
    {
        let out_vars: Vec<Var> = outputs
            .iter()
            .map(|tracer| match tracer {
                Tracer::Tracer(trace, var) => {
                    assert!(
                        ptr::eq(*trace, self),
                        "traces must be the same - likely mixing tracers from different traces. Are lifts in the right place?"
                    );
                    *var
                }
                Tracer::Lift(x) => {
                    self.consts.borrow_mut().push(x.clone());
                    self.builder.borrow_mut().constant(x.to_aval())
                }
            })
            .collect();
        let builder = self.builder.take();
        let consts = self.consts.take();
        let graph = builder.finish(&out_vars)?;
        debug!(
            "traced {} equations, {} inputs, {} constants",
            graph.eqns().len(),
            graph.inputs().len(),
            consts.len()
        );
        Ok(Traced { graph, consts })
    }
}

impl<T> Default for Trace<T> {
    fn default() -> Self {
        Trace::new()
    }
}

/// A value flowing through a host closure while it is being traced.
///
/// `Lift` wraps a plain value the trace does not track; operations on lifted
/// values only are computed eagerly and stay lifted. The `Tracer` variant
/// carries the trace it belongs to and the variable standing for its future
/// value; operations on it record equations. Where the two meet, the lifted
/// value is inlined as a literal operand.
#[derive(Clone)]
pub enum Tracer<'t, T> {
    Lift(T),
    Tracer(&'t Trace<T>, Var),
}

impl<T> Tracer<'_, T> {
    #[must_use]
    pub fn lift(x: T) -> Self {
        Tracer::Lift(x)
    }

    #[must_use]
    pub fn lifted(&self) -> Option<&T> {
        match self {
            Tracer::Lift(x) => Some(x),
            Tracer::Tracer(..) => None,
        }
    }
}

impl<T: Debug> Debug for Tracer<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tracer::Lift(x) => write!(f, "Lift({x:?})"),
            Tracer::Tracer(_, var) => write!(f, "Tracer(_, {var})"),
        }
    }
}

impl<'t, T: PrimitiveOps + ToAval + Clone> Tracer<'t, T> {
    fn unary(&self, prim: Primitive, params: Params, f: impl FnOnce(&T) -> T) -> Self {
        match self {
            Tracer::Lift(x) => Tracer::Lift(f(x)),
            Tracer::Tracer(trace, var) => trace.push_eqn(prim, vec![Atom::Var(*var)], params),
        }
    }

    fn binary(&self, rhs: &Self, prim: Primitive, f: impl FnOnce(&T, &T) -> T) -> Self {
        match (self, rhs) {
            (Tracer::Lift(a), Tracer::Lift(b)) => Tracer::Lift(f(a, b)),
            (Tracer::Lift(a), Tracer::Tracer(trace, b)) => {
                trace.push_eqn(prim, vec![Atom::Lit(a.clone()), Atom::Var(*b)], Params::new())
            }
            (Tracer::Tracer(trace, a), Tracer::Lift(b)) => {
                trace.push_eqn(prim, vec![Atom::Var(*a), Atom::Lit(b.clone())], Params::new())
            }
            (Tracer::Tracer(left_trace, a), Tracer::Tracer(right_trace, b)) => {
                assert!(
                    ptr::eq(*left_trace, *right_trace),
                    "traces must be the same - likely mixing tracers from different traces. Are lifts in the right place?"
                );
                left_trace.push_eqn(prim, vec![Atom::Var(*a), Atom::Var(*b)], Params::new())
            }
        }
    }
}

impl<'t, T: PrimitiveOps + ToAval + Clone> PrimitiveOps for Tracer<'t, T> {
    fn neg(&self) -> Self {
        self.unary(Primitive::Neg, Params::new(), T::neg)
    }

    fn recip(&self) -> Self {
        self.unary(Primitive::Recip, Params::new(), T::recip)
    }

    fn exp(&self) -> Self {
        self.unary(Primitive::Exp, Params::new(), T::exp)
    }

    fn log(&self) -> Self {
        self.unary(Primitive::Log, Params::new(), T::log)
    }

    fn sqrt(&self) -> Self {
        self.unary(Primitive::Sqrt, Params::new(), T::sqrt)
    }

    fn square(&self) -> Self {
        self.unary(Primitive::Square, Params::new(), T::square)
    }

    fn tanh(&self) -> Self {
        self.unary(Primitive::Tanh, Params::new(), T::tanh)
    }

    fn atanh(&self) -> Self {
        self.unary(Primitive::Atanh, Params::new(), T::atanh)
    }

    fn powi(&self, exponent: i64) -> Self {
        let mut params = Params::new();
        params.insert("exponent".to_string(), ParamValue::Int(exponent));
        self.unary(Primitive::Powi, params, |x| x.powi(exponent))
    }

    fn add(&self, rhs: &Self) -> Self {
        self.binary(rhs, Primitive::Add, T::add)
    }

    fn sub(&self, rhs: &Self) -> Self {
        self.binary(rhs, Primitive::Sub, T::sub)
    }

    fn mul(&self, rhs: &Self) -> Self {
        self.binary(rhs, Primitive::Mul, T::mul)
    }

    fn div(&self, rhs: &Self) -> Self {
        self.binary(rhs, Primitive::Div, T::div)
    }

    fn pow(&self, rhs: &Self) -> Self {
        self.binary(rhs, Primitive::Pow, T::pow)
    }
}

crate::math_macros::impl_bin_op!(Add, add, Tracer<'t, T: PrimitiveOps + ToAval + Clone>);
crate::math_macros::impl_bin_op!(Sub, sub, Tracer<'t, T: PrimitiveOps + ToAval + Clone>);
crate::math_macros::impl_bin_op!(Mul, mul, Tracer<'t, T: PrimitiveOps + ToAval + Clone>);
crate::math_macros::impl_bin_op!(Div, div, Tracer<'t, T: PrimitiveOps + ToAval + Clone>);
crate::math_macros::impl_un_op!(Neg, neg, Tracer<'t, T: PrimitiveOps + ToAval + Clone>);

/// The result of tracing: a graph plus the constant values captured while
/// building it. The constants line up positionally with
/// [`Graph::constants`].
#[derive(Debug, Clone)]
pub struct Traced<T> {
    graph: Graph<T>,
    consts: Vec<T>,
}

impl<T> Traced<T> {
    #[must_use]
    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }

    #[must_use]
    pub fn consts(&self) -> &[T] {
        &self.consts
    }

    #[must_use]
    pub fn into_parts(self) -> (Graph<T>, Vec<T>) {
        (self.graph, self.consts)
    }
}

impl<T: PrimitiveOps + Clone> Traced<T> {
    /// Forward-evaluate the traced graph at the given arguments.
    ///
    /// # Errors
    /// See [`eval_graph`].
    pub fn eval(&self, args: &[T]) -> Result<Vec<T>> {
        eval_graph(&self.graph, &self.consts, args)
    }

    /// Run the traced graph backward from the given output values.
    ///
    /// # Errors
    /// See [`inverse_eval_graph`].
    pub fn eval_inverse(&self, registry: &InverseRegistry<T>, outputs: &[T]) -> Result<Vec<T>> {
        inverse_eval_graph(&self.graph, &self.consts, outputs, registry)
    }
}

fn wrap_slice<'a, T: ToAval>(at: &[&T], trace: &'a Trace<T>) -> Vec<Tracer<'a, T>> {
    at.iter().map(|&ati| trace.var(ati.to_aval())).collect()
}

/// Trace a function of several arguments into a graph, using the example
/// arguments only for their abstract values.
///
/// # Errors
/// Any graph validation error, see [`GraphBuilder::finish`].
pub fn trace<T, F>(f: F, at: &[&T]) -> Result<Traced<T>>
where
    T: PrimitiveOps + ToAval + Clone,
    for<'a> F: Fn(&'a [&'a Tracer<'a, T>]) -> Vec<Tracer<'a, T>>,
{
    let trace = Trace::new();

    let owned_vars = wrap_slice(at, &trace);
    let vars: Vec<_> = owned_vars.iter().collect();

    let results = f(&vars);

    let result_refs: Vec<_> = results.iter().collect();
    trace.finish(&result_refs)
}

/// Trace a function of one argument with one result.
///
/// # Errors
/// Any graph validation error, see [`GraphBuilder::finish`].
pub fn trace1<T, F>(f: F, at: &T) -> Result<Traced<T>>
where
    T: PrimitiveOps + ToAval + Clone,
    for<'a> F: Fn(&'a Tracer<'a, T>) -> Tracer<'a, T>,
{
    trace(|s| vec![f(s[0])], &[at])
}
