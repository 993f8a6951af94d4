use crate::primitive_ops::PrimitiveOps;

/// A symbolic interpreter: instead of computing, build the expression that
/// would have been computed. Useful for tests and for seeing what a graph
/// does.
impl PrimitiveOps for String {
    fn neg(&self) -> Self {
        format!("(-{self})")
    }

    fn recip(&self) -> Self {
        format!("{self}.recip()")
    }

    fn exp(&self) -> Self {
        format!("{self}.exp()")
    }

    fn log(&self) -> Self {
        format!("{self}.log()")
    }

    fn sqrt(&self) -> Self {
        format!("{self}.sqrt()")
    }

    fn square(&self) -> Self {
        format!("{self}.square()")
    }

    fn tanh(&self) -> Self {
        format!("{self}.tanh()")
    }

    fn atanh(&self) -> Self {
        format!("{self}.atanh()")
    }

    fn powi(&self, exponent: i64) -> Self {
        format!("{self}.powi({exponent})")
    }

    fn add(&self, rhs: &Self) -> Self {
        format!("({self} + {rhs})")
    }

    fn sub(&self, rhs: &Self) -> Self {
        format!("({self} - {rhs})")
    }

    fn mul(&self, rhs: &Self) -> Self {
        format!("({self} * {rhs})")
    }

    fn div(&self, rhs: &Self) -> Self {
        format!("({self} / {rhs})")
    }

    fn pow(&self, rhs: &Self) -> Self {
        format!("{self}.pow({rhs})")
    }
}
