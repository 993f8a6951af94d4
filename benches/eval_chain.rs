use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use graphken::{trace1, InverseRegistry, Primitive, PrimitiveOps, Traced};
use rand::{rngs::StdRng, Rng, SeedableRng};

// Cycles exp/tanh/recip so intermediate values stay bounded at any depth.
fn chain(depth: usize) -> Traced<f64> {
    trace1(
        |x| {
            let mut acc = x.exp();
            for i in 1..depth {
                acc = match i % 3 {
                    0 => acc.exp(),
                    1 => acc.tanh(),
                    _ => acc.recip(),
                };
            }
            acc
        },
        &0.0,
    )
    .unwrap()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(12345u64);

    let mut registry = InverseRegistry::new();
    registry.register(Primitive::Exp, |x: &f64| x.ln());
    registry.register(Primitive::Tanh, |x: &f64| x.atanh());
    registry.register(Primitive::Recip, |x: &f64| x.recip());

    let mut group = c.benchmark_group("Graph: eval chain");

    for depth in [8, 64, 512] {
        let traced = chain(depth);
        let at = rng.gen_range(0.1..1.5);
        let out = traced.eval(&[at]).unwrap();

        group.bench_with_input(BenchmarkId::new("trace", depth), &depth, |b, _| {
            b.iter(|| black_box(chain(depth)))
        });
        group.bench_with_input(BenchmarkId::new("forward", depth), &depth, |b, _| {
            b.iter(|| black_box(traced.eval(&[at]).unwrap()))
        });
        group.bench_with_input(BenchmarkId::new("inverse", depth), &depth, |b, _| {
            b.iter(|| black_box(traced.eval_inverse(&registry, &out).unwrap()))
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
