use graphken::{trace1, InverseRegistry, Primitive, PrimitiveOps};

/// A macro to print the result of an expression and the expression itself.
macro_rules! do_example {
    ($e:expr) => {
        println!(">>> {}", stringify!($e));
        let result = $e;
        println!("{result}");
    };
    ($e:expr, $debug:literal) => {
        println!(">>> {}", stringify!($e));
        let result = $e;
        println!("{result:?}");
    };
}

/// Like `do_example!`, but also binds the result to a variable.
macro_rules! let_example {
    ($t:ident, $e:expr, $debug:literal) => {
        println!(">>> {}", stringify!(let $t = $e));
        let $t = $e;
        println!("{:?}", $t);
    };
}

fn main() {
    env_logger::init();

    // Trace f(x) = exp(tanh(x)) into a graph and show it.
    let traced = trace1(|x| x.tanh().exp(), &0.0).unwrap();
    do_example!(traced.graph());

    // Run the graph forward.
    let_example!(forward, traced.eval(&[1.0]).unwrap(), true);

    // Register an inverse for each primitive in the graph, then run it
    // backward to recover the input from the output.
    let mut registry = InverseRegistry::new();
    registry.register(Primitive::Exp, |x: &f64| x.ln());
    registry.register(Primitive::Tanh, |x: &f64| x.atanh());
    do_example!(&registry, true);
    do_example!(traced.eval_inverse(&registry, &forward).unwrap(), true);

    // The string interpreter does the same symbolically: trace the function
    // over String and the backward pass builds the inverse expression.
    let symbolic = trace1(|x| x.tanh().exp(), &String::new()).unwrap();
    let mut registry = InverseRegistry::new();
    registry.register(Primitive::Exp, |s: &String| s.log());
    registry.register(Primitive::Tanh, |s: &String| s.atanh());
    do_example!(
        symbolic
            .eval_inverse(&registry, &["y".to_string()])
            .unwrap(),
        true
    );
}
