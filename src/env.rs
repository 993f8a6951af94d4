use crate::error::{Error, Result};
use crate::graph::{Atom, Var};

/// Per-evaluation bindings of variables to concrete values, a dense array
/// keyed by variable index. Created fresh for every evaluation and discarded
/// with it.
#[derive(Debug)]
pub struct Environment<T> {
    slots: Vec<Option<T>>,
}

impl<T> Environment<T> {
    #[must_use]
    pub fn new(var_count: usize) -> Self {
        let mut slots = Vec::with_capacity(var_count);
        slots.resize_with(var_count, || None);
        Environment { slots }
    }

    /// Resolve an operand. Literals return their embedded value without
    /// touching the environment; variables must have been written.
    ///
    /// # Errors
    /// [`Error::UnboundVariable`] if the operand is an unwritten variable.
    pub fn read<'a>(&'a self, atom: &'a Atom<T>) -> Result<&'a T> {
        match atom {
            Atom::Lit(x) => Ok(x),
            Atom::Var(var) => self.read_var(*var),
        }
    }

    /// # Errors
    /// [`Error::UnboundVariable`] if the variable was never written.
    pub fn read_var(&self, var: Var) -> Result<&T> {
        self.slots
            .get(var.index())
            .and_then(Option::as_ref)
            .ok_or(Error::UnboundVariable { var })
    }

    /// Bind a variable. Rebinding is not checked; evaluators only write each
    /// variable once per run.
    ///
    /// # Panics
    /// If `var` is out of range for this environment.
    pub fn write(&mut self, var: Var, value: T) {
        self.slots[var.index()] = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Aval, DType, GraphBuilder};

    fn one_var() -> Var {
        let mut builder = GraphBuilder::<f64>::new();
        builder.input(Aval::scalar(DType::F64))
    }

    #[test]
    fn test_write_then_read() {
        let var = one_var();
        let mut env = Environment::new(1);
        env.write(var, 3.5);
        assert_eq!(env.read_var(var).unwrap(), &3.5);
        assert_eq!(env.read(&Atom::Var(var)).unwrap(), &3.5);
    }

    #[test]
    fn test_read_unbound() {
        let var = one_var();
        let env = Environment::<f64>::new(1);
        assert!(matches!(
            env.read_var(var),
            Err(Error::UnboundVariable { var: v }) if v == var
        ));
    }

    #[test]
    fn test_literal_needs_no_environment() {
        // A zero-slot environment can still resolve literals.
        let env = Environment::<f64>::new(0);
        assert_eq!(env.read(&Atom::Lit(42.0)).unwrap(), &42.0);
    }

    #[test]
    fn test_rebind_overwrites() {
        let var = one_var();
        let mut env = Environment::new(1);
        env.write(var, 1.0);
        env.write(var, 2.0);
        assert_eq!(env.read_var(var).unwrap(), &2.0);
    }
}
