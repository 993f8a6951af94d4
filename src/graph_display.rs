use std::fmt::{Display, Formatter};
use std::sync::OnceLock;

use prettytable::{format, Cell, Table};

use crate::graph::{Atom, Aval, DType, Equation, Graph, Var};
use crate::primitive::Params;

static FORMAT_GRAPH: OnceLock<format::TableFormat> = OnceLock::new();

fn get_graph_format() -> &'static format::TableFormat {
    FORMAT_GRAPH.get_or_init(|| {
        format::FormatBuilder::new()
            .column_separator(' ')
            .borders('│')
            .separators(
                &[format::LinePosition::Top],
                format::LineSeparator::new(' ', ' ', '┌', '┐'),
            )
            .separators(
                &[format::LinePosition::Bottom],
                format::LineSeparator::new(' ', ' ', '└', '┘'),
            )
            .padding(1, 1)
            .build()
    })
}

impl Display for DType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DType::F32 => write!(f, "f32"),
            DType::F64 => write!(f, "f64"),
        }
    }
}

impl Display for Var {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl Display for Aval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let shape = self
            .shape
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "{}[{shape}]", self.dtype)
    }
}

impl<T: Display> Display for Atom<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Atom::Var(var) => write!(f, "{var}"),
            Atom::Lit(x) => write!(f, "{x}"),
        }
    }
}

fn join_params(params: &Params) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn prim_with_params<T>(eqn: &Equation<T>) -> String {
    if eqn.params.is_empty() {
        eqn.prim.to_string()
    } else {
        format!("{}[{}]", eqn.prim, join_params(&eqn.params))
    }
}

impl<T: Display> Display for Equation<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let outs = self
            .outputs
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{outs} = {}", prim_with_params(self))?;
        for input in &self.inputs {
            write!(f, " {input}")?;
        }
        Ok(())
    }
}

fn join_with_avals<T>(graph: &Graph<T>, vars: &[Var]) -> String {
    vars.iter()
        .map(|var| format!("{var}:{}", graph.aval(*var)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders the graph in the shape it is written: typed inputs and constants,
/// one boxed row per equation, then the outputs.
impl<T: Display> Display for Graph<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "inputs:    {}", join_with_avals(self, self.inputs()))?;
        if !self.constants().is_empty() {
            writeln!(f, "constants: {}", join_with_avals(self, self.constants()))?;
        }
        if !self.eqns().is_empty() {
            let mut table = Table::new();
            table.set_format(*get_graph_format());
            for eqn in self.eqns() {
                let outs = eqn
                    .outputs
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                let ins = eqn
                    .inputs
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                let row = table.add_empty_row();
                row.add_cell(Cell::new(&outs));
                row.add_cell(Cell::new("="));
                row.add_cell(Cell::new(&prim_with_params(eqn)));
                row.add_cell(Cell::new(&ins));
            }
            write!(f, "{table}")?;
        }
        let outs = self
            .outputs()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "outputs:   {outs}")
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::{Atom, Aval, DType, GraphBuilder};
    use crate::primitive::{ParamValue, Params, Primitive};

    #[test]
    fn test_var_and_aval_display() {
        let mut builder = GraphBuilder::<f64>::new();
        let x = builder.input(Aval::new(&[2, 3], DType::F64));
        assert_eq!(x.to_string(), "v0");
        assert_eq!(Aval::new(&[2, 3], DType::F64).to_string(), "f64[2,3]");
        assert_eq!(Aval::scalar(DType::F32).to_string(), "f32[]");
    }

    #[test]
    fn test_equation_display() {
        let mut builder = GraphBuilder::<f64>::new();
        let x = builder.input(Aval::scalar(DType::F64));
        builder
            .eqn(Primitive::Tanh, vec![Atom::Var(x)], Params::new())
            .unwrap();
        let mut params = Params::new();
        params.insert("exponent".to_string(), ParamValue::Int(3));
        builder
            .eqn(Primitive::Powi, vec![Atom::Var(x)], params)
            .unwrap();
        let graph = builder.finish(&[x]).unwrap();
        assert_eq!(graph.eqns()[0].to_string(), "v1 = tanh v0");
        assert_eq!(graph.eqns()[1].to_string(), "v2 = powi[exponent=3] v0");
    }

    #[test]
    fn test_graph_display_mentions_everything() {
        let mut builder = GraphBuilder::<f64>::new();
        let x = builder.input(Aval::scalar(DType::F64));
        let t = builder
            .eqn(Primitive::Tanh, vec![Atom::Var(x)], Params::new())
            .unwrap();
        let e = builder
            .eqn(Primitive::Exp, vec![Atom::Var(t)], Params::new())
            .unwrap();
        let graph = builder.finish(&[e]).unwrap();
        let rendered = graph.to_string();
        assert!(rendered.contains("inputs:    v0:f64[]"));
        assert!(rendered.contains("tanh"));
        assert!(rendered.contains("exp"));
        assert!(rendered.contains("outputs:   v2"));
    }
}
