use crate::error::{Error, Result};
use crate::primitive::{ParamValue, Params, Primitive};

/// The interface an interpreter of [`Primitive`]s implements. One method per
/// primitive; [`PrimitiveOps::apply`] dispatches an equation's primitive tag
/// to the right method and normalizes the results to an ordered sequence.
///
/// Three interpreters ship with the crate: `f64` and `f32` do scalar math,
/// `String` builds the expression it would have computed. The tracer's
/// [`Tracer`](crate::Tracer) is itself an implementation, which is what lets
/// one closure be traced or evaluated directly.
pub trait PrimitiveOps: Sized {
    fn neg(&self) -> Self;
    fn recip(&self) -> Self;
    fn exp(&self) -> Self;
    fn log(&self) -> Self;
    fn sqrt(&self) -> Self;
    fn square(&self) -> Self;
    fn tanh(&self) -> Self;
    fn atanh(&self) -> Self;
    fn powi(&self, exponent: i64) -> Self;
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    fn div(&self, rhs: &Self) -> Self;
    fn pow(&self, rhs: &Self) -> Self;

    /// Apply a primitive to already-resolved operand values.
    ///
    /// The result is an ordered sequence with one element per declared
    /// output; the evaluator checks its length against the equation. `Powi`
    /// reads its `exponent` parameter from `params`; the other primitives
    /// ignore `params`.
    ///
    /// # Errors
    /// [`Error::NotSupported`] if a parametrized primitive is missing its
    /// required parameter.
    ///
    /// # Panics
    /// If `inputs` does not match the primitive's declared input arity. The
    /// evaluator establishes this from the graph, which checked it at
    /// construction.
    fn apply(prim: Primitive, inputs: &[Self], params: &Params) -> Result<Vec<Self>> {
        assert!(
            inputs.len() == prim.in_arity(),
            "{prim} takes {} operands, got {}",
            prim.in_arity(),
            inputs.len()
        );
        let out = match prim {
            Primitive::Neg => inputs[0].neg(),
            Primitive::Recip => inputs[0].recip(),
            Primitive::Exp => inputs[0].exp(),
            Primitive::Log => inputs[0].log(),
            Primitive::Sqrt => inputs[0].sqrt(),
            Primitive::Square => inputs[0].square(),
            Primitive::Tanh => inputs[0].tanh(),
            Primitive::Atanh => inputs[0].atanh(),
            Primitive::Powi => {
                let exponent = params
                    .get("exponent")
                    .and_then(ParamValue::as_int)
                    .ok_or_else(|| Error::NotSupported {
                        primitive: prim,
                        reason: "missing int param \"exponent\"".to_string(),
                    })?;
                inputs[0].powi(exponent)
            }
            Primitive::Add => inputs[0].add(&inputs[1]),
            Primitive::Sub => inputs[0].sub(&inputs[1]),
            Primitive::Mul => inputs[0].mul(&inputs[1]),
            Primitive::Div => inputs[0].div(&inputs[1]),
            Primitive::Pow => inputs[0].pow(&inputs[1]),
        };
        Ok(vec![out])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_dispatches_by_tag() {
        let r = f64::apply(Primitive::Exp, &[0.0], &Params::new()).unwrap();
        assert_eq!(r, vec![1.0]);
        let r = f64::apply(Primitive::Add, &[2.0, 3.0], &Params::new()).unwrap();
        assert_eq!(r, vec![5.0]);
    }

    #[test]
    fn test_apply_reads_powi_param() {
        let mut params = Params::new();
        params.insert("exponent".to_string(), ParamValue::Int(3));
        let r = f64::apply(Primitive::Powi, &[2.0], &params).unwrap();
        assert_eq!(r, vec![8.0]);
    }

    #[test]
    fn test_apply_powi_without_param() {
        let err = f64::apply(Primitive::Powi, &[2.0], &Params::new()).unwrap_err();
        assert!(matches!(
            err,
            Error::NotSupported {
                primitive: Primitive::Powi,
                ..
            }
        ));
    }

    #[test]
    #[should_panic(expected = "takes 2 operands")]
    fn test_apply_operand_count_is_a_precondition() {
        let _ = f64::apply(Primitive::Add, &[1.0], &Params::new());
    }
}
