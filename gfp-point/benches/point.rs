//! Point arithmetic benchmarks over secp256r1

use criterion::{
    BenchmarkGroup, Criterion, criterion_group, criterion_main, measurement::Measurement,
};
use gfp_point::{
    ProjectivePoint, Workspace, named,
    num_bigint::{BigInt, Sign},
    sec1::PointFormat,
};
use hex_literal::hex;

fn test_scalar() -> BigInt {
    BigInt::from_bytes_be(
        Sign::Plus,
        &hex!("519b423d715f8b581f4fa8ee59f4771a5b44c8130b4e3eacca54a56dda72b464"),
    )
}

fn bench_point_double<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let curve = named::secp256r1().unwrap();
    let mut ws = Workspace::new(curve.domain());
    let mut p = curve.generator();
    group.bench_function("double", |b| b.iter(|| p.double_with(&mut ws)));
}

fn bench_point_add<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let curve = named::secp256r1().unwrap();
    let mut ws = Workspace::new(curve.domain());
    let g = curve.generator();
    let mut p = g.double();
    group.bench_function("add", |b| b.iter(|| p.add_assign_with(&g, &mut ws)));
}

fn bench_point_mul<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let curve = named::secp256r1().unwrap();
    let mut ws = Workspace::new(curve.domain());
    let g = curve.generator();
    let k = test_scalar();
    group.bench_function("point-scalar mul", |b| {
        b.iter(|| {
            let mut p = g.clone();
            p.mul_assign_with(&k, &mut ws);
            p
        })
    });
}

fn bench_point_to_affine<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let curve = named::secp256r1().unwrap();
    let p = &curve.generator() * &test_scalar();
    group.bench_function("to_affine", |b| b.iter(|| p.to_affine()));
}

fn bench_point_decompress<M: Measurement>(group: &mut BenchmarkGroup<'_, M>) {
    let curve = named::secp256r1().unwrap();
    let bytes = (&curve.generator() * &test_scalar()).to_sec1_bytes(PointFormat::Compressed);
    group.bench_function("decompress", |b| {
        b.iter(|| ProjectivePoint::from_sec1_bytes(curve.domain(), &bytes))
    });
}

fn bench_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("point operations");
    bench_point_double(&mut group);
    bench_point_add(&mut group);
    bench_point_mul(&mut group);
    bench_point_to_affine(&mut group);
    bench_point_decompress(&mut group);
    group.finish();
}

criterion_group!(benches, bench_point);
criterion_main!(benches);
