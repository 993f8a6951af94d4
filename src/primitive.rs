use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// The closed set of elementary operations a graph can contain.
///
/// A primitive is only an identifier; what it computes is up to the
/// [`PrimitiveOps`](crate::PrimitiveOps) implementation that interprets it.
/// Each primitive declares a fixed signature via [`Primitive::in_arity`] and
/// [`Primitive::out_arity`], checked when an equation is bound into a graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Neg,
    Recip,
    Exp,
    Log,
    Sqrt,
    Square,
    Tanh,
    Atanh,
    /// Integer power. Takes its exponent from the `exponent` equation
    /// parameter rather than an operand.
    Powi,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Primitive {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Neg => "neg",
            Primitive::Recip => "recip",
            Primitive::Exp => "exp",
            Primitive::Log => "log",
            Primitive::Sqrt => "sqrt",
            Primitive::Square => "square",
            Primitive::Tanh => "tanh",
            Primitive::Atanh => "atanh",
            Primitive::Powi => "powi",
            Primitive::Add => "add",
            Primitive::Sub => "sub",
            Primitive::Mul => "mul",
            Primitive::Div => "div",
            Primitive::Pow => "pow",
        }
    }

    /// The number of operands an equation with this primitive must have.
    #[must_use]
    pub fn in_arity(self) -> usize {
        match self {
            Primitive::Neg
            | Primitive::Recip
            | Primitive::Exp
            | Primitive::Log
            | Primitive::Sqrt
            | Primitive::Square
            | Primitive::Tanh
            | Primitive::Atanh
            | Primitive::Powi => 1,
            Primitive::Add
            | Primitive::Sub
            | Primitive::Mul
            | Primitive::Div
            | Primitive::Pow => 2,
        }
    }

    /// The number of results an equation with this primitive produces.
    /// Single-output for every primitive in the current set.
    #[allow(clippy::unused_self)]
    #[must_use]
    pub fn out_arity(self) -> usize {
        1
    }
}

impl Display for Primitive {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Named parameters attached to an equation, e.g. `powi`'s exponent.
/// The forward interpreter receives them as-is; inverse evaluation ignores
/// them.
pub type Params = BTreeMap<String, ParamValue>;

#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl ParamValue {
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamValue::Int(i) => write!(f, "{i}"),
            ParamValue::Float(x) => write!(f, "{x}"),
            ParamValue::Str(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arities() {
        assert_eq!(Primitive::Exp.in_arity(), 1);
        assert_eq!(Primitive::Powi.in_arity(), 1);
        assert_eq!(Primitive::Add.in_arity(), 2);
        assert_eq!(Primitive::Pow.in_arity(), 2);
        assert_eq!(Primitive::Exp.out_arity(), 1);
    }

    #[test]
    fn test_display_is_name() {
        assert_eq!(Primitive::Tanh.to_string(), "tanh");
        assert_eq!(format!("{}", Primitive::Sqrt), "sqrt");
    }

    #[test]
    fn test_param_value_as_int() {
        assert_eq!(ParamValue::Int(3).as_int(), Some(3));
        assert_eq!(ParamValue::Float(3.0).as_int(), None);
    }
}
