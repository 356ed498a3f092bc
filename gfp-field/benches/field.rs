//! Runtime-modulus field element benchmarks over the secp256r1 base field

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use gfp_field::{FieldElement, Modular, MontyParams, MontyScratch, num_bigint::BigUint};
use hex_literal::hex;

fn params() -> MontyParams {
    MontyParams::new(&BigUint::from_bytes_be(&hex!(
        "ffffffff00000001000000000000000000000000ffffffffffffffffffffffff"
    )))
    .unwrap()
}

fn test_field_element_x(params: &MontyParams) -> FieldElement {
    params.to_montgomery(&BigUint::from_bytes_be(&hex!(
        "1ccbe91c075fc7f4f033bfa248db8fccd3565de94bbfb12f3c59ff46c271bf83"
    )))
}

fn test_field_element_y(params: &MontyParams) -> FieldElement {
    params.to_montgomery(&BigUint::from_bytes_be(&hex!(
        "ce4014c68811f9a21a1fdb2c0e6113e06db7ca93b7404e78dc7ccd5ca89a4ca9"
    )))
}

fn bench_field_element_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let params = params();
    let x = test_field_element_x(&params);
    let y = test_field_element_y(&params);
    let mut out = params.zero();
    let mut scratch = MontyScratch::new(&params);
    group.bench_function("mul", |b| {
        b.iter(|| params.mul_into(&mut out, &x, &y, &mut scratch))
    });
}

fn bench_field_element_square<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let params = params();
    let x = test_field_element_x(&params);
    let mut out = params.zero();
    let mut scratch = MontyScratch::new(&params);
    group.bench_function("square", |b| {
        b.iter(|| params.square_into(&mut out, &x, &mut scratch))
    });
}

fn bench_field_element_sqrt<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let params = params();
    let modular = Modular::new(params.modulus().clone());
    let x = params.from_montgomery(&test_field_element_x(&params));
    group.bench_function("sqrt", |b| b.iter(|| modular.sqrt(&x)));
}

fn bench_field_element_invert<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let params = params();
    let modular = Modular::new(params.modulus().clone());
    let x = params.from_montgomery(&test_field_element_x(&params));
    group.bench_function("invert", |b| b.iter(|| modular.invert(&x)));
}

fn bench_field_element(c: &mut Criterion) {
    let mut group = c.benchmark_group("field element operations");
    bench_field_element_mul(&mut group);
    bench_field_element_square(&mut group);
    bench_field_element_invert(&mut group);
    bench_field_element_sqrt(&mut group);
    group.finish();
}

criterion_group!(benches, bench_field_element);
criterion_main!(benches);
