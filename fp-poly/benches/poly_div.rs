use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use fp_poly::prelude::*;

criterion_main!(benches);
criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = poly_div<4>,
              poly_div<6>,
              poly_div<8>,
);

fn poly_div<const LOG2_DEGREE: usize>(c: &mut Criterion) {
    let field = Field::prime_field(251).unwrap();
    let group_name = format!("Division of Polynomials of Degree 2^{LOG2_DEGREE}");
    let mut group = c.benchmark_group(group_name);

    let dividend = Polynomial::random(2 << LOG2_DEGREE, &field).unwrap();
    let divisor = Polynomial::random(1 << LOG2_DEGREE, &field).unwrap();

    let id = BenchmarkId::new("Long division", LOG2_DEGREE);
    group.bench_function(id, |b| b.iter(|| dividend.divide(&divisor, &field)));

    let id = BenchmarkId::new("GCD", LOG2_DEGREE);
    group.bench_function(id, |b| b.iter(|| dividend.gcd(&divisor, &field)));

    let id = BenchmarkId::new("Extended GCD", LOG2_DEGREE);
    group.bench_function(id, |b| b.iter(|| dividend.gcd_extended(&divisor, &field)));

    group.finish();
}
