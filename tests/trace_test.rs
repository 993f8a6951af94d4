use graphken::{
    trace, trace1, Atom, Aval, DType, ParamValue, Primitive, PrimitiveOps, Trace, Tracer,
};

fn assert_vec_eq(a: &[f64], b: &[f64]) {
    assert!(
        a.iter()
            .zip(b.iter())
            .all(|(a, b)| (a.is_nan() && b.is_nan()) || (a - b).abs() < 1e-6),
        "\r\nleft : {a:?}\r\nright: {b:?}"
    );
}

#[test]
fn test_trace_records_chain() {
    let traced = trace1(|x| x.tanh().exp(), &0.0).unwrap();
    let graph = traced.graph();

    assert_eq!(graph.inputs().len(), 1);
    assert_eq!(graph.eqns().len(), 2);
    assert_eq!(graph.eqns()[0].prim, Primitive::Tanh);
    assert_eq!(graph.eqns()[1].prim, Primitive::Exp);

    // Each equation consumes the previous one's output.
    assert_eq!(graph.eqns()[0].inputs, vec![Atom::Var(graph.inputs()[0])]);
    assert_eq!(
        graph.eqns()[1].inputs,
        vec![Atom::Var(graph.eqns()[0].outputs[0])]
    );
    assert_eq!(graph.outputs(), &[graph.eqns()[1].outputs[0]]);
}

#[test]
fn test_trace_captures_constants() {
    let trace = Trace::new();
    let x = trace.var(Aval::scalar(DType::F64));
    let k = trace.constant(10.0);
    let y = x.add(&k);
    let traced = trace.finish(&[&y]).unwrap();

    assert_eq!(traced.consts(), &[10.0]);
    assert_eq!(traced.graph().constants().len(), 1);
    assert_vec_eq(&traced.eval(&[5.0]).unwrap(), &[15.0]);
}

#[test]
fn test_trace_inlines_lifted_values_as_literals() {
    let traced = trace1(|x| x + &Tracer::lift(10.0), &0.0).unwrap();
    let graph = traced.graph();

    assert_eq!(graph.eqns().len(), 1);
    assert_eq!(graph.eqns()[0].inputs[1], Atom::Lit(10.0));
    assert!(graph.constants().is_empty());
    assert_vec_eq(&traced.eval(&[5.0]).unwrap(), &[15.0]);
}

// Arithmetic between lifted values happens immediately and records nothing.
#[test]
fn test_trace_folds_lifted_values() {
    assert_eq!(Tracer::<f64>::lift(2.0).exp().lifted().copied(), Some(2.0f64.exp()));

    let traced = trace1(
        |x| {
            let k = Tracer::lift(2.0) * Tracer::lift(3.0);
            x * &k
        },
        &0.0,
    )
    .unwrap();
    let graph = traced.graph();
    assert_eq!(graph.eqns().len(), 1);
    assert_eq!(graph.eqns()[0].inputs[1], Atom::Lit(6.0));
}

// A result that never touched a trace variable is interned as a constant so
// the graph still has a variable to output.
#[test]
fn test_trace_interns_lifted_results() {
    let traced = trace(|_args| vec![Tracer::lift(5.0)], &[&1.0]).unwrap();

    assert!(traced.graph().eqns().is_empty());
    assert_eq!(traced.consts(), &[5.0]);
    assert_vec_eq(&traced.eval(&[1.0]).unwrap(), &[5.0]);
}

#[test]
fn test_trace_multiple_inputs_and_outputs() {
    let traced = trace(
        |args| vec![args[0] + args[1], args[0] * args[1]],
        &[&0.0, &0.0],
    )
    .unwrap();

    assert_eq!(traced.graph().inputs().len(), 2);
    assert_eq!(traced.graph().outputs().len(), 2);
    assert_vec_eq(&traced.eval(&[2.0, 3.0]).unwrap(), &[5.0, 6.0]);
}

#[test]
#[should_panic(expected = "traces must be the same")]
fn test_trace_panics_on_mixed_traces() {
    let t1 = Trace::<f64>::new();
    let t2 = Trace::<f64>::new();
    let x1 = t1.var(Aval::scalar(DType::F64));
    let x2 = t2.var(Aval::scalar(DType::F64));
    let _ = x1.add(&x2);
}

#[test]
fn test_trace_records_powi_param() {
    let traced = trace1(|x| x.powi(3), &0.0).unwrap();
    let graph = traced.graph();

    assert_eq!(graph.eqns()[0].prim, Primitive::Powi);
    assert_eq!(
        graph.eqns()[0].params.get("exponent"),
        Some(&ParamValue::Int(3))
    );
    assert_vec_eq(&traced.eval(&[2.0]).unwrap(), &[8.0]);
}

// Reusing a tracer fans its variable out to several equations instead of
// re-recording the computation that produced it.
#[test]
fn test_trace_reuses_variables_on_fan_out() {
    let traced = trace1(
        |x| {
            let t = x.tanh();
            &t * &t
        },
        &0.0,
    )
    .unwrap();
    let graph = traced.graph();

    assert_eq!(graph.eqns().len(), 2);
    assert_eq!(graph.eqns()[1].prim, Primitive::Mul);
    assert_eq!(graph.eqns()[1].inputs[0], graph.eqns()[1].inputs[1]);
    assert_vec_eq(
        &traced.eval(&[1.0]).unwrap(),
        &[1.0f64.tanh() * 1.0f64.tanh()],
    );
}

#[test]
fn test_tracer_debug_format() {
    assert_eq!(format!("{:?}", Tracer::<f64>::lift(2.0)), "Lift(2.0)");

    let trace = Trace::<f64>::new();
    let x = trace.var(Aval::scalar(DType::F64));
    assert_eq!(format!("{x:?}"), "Tracer(_, v0)");
}
