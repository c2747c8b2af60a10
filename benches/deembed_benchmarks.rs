// File: benches/deembed_benchmarks.rs

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use deembed::prelude::*;
use ndarray::prelude::*;
use num::complex::c64;
use std::f64::consts::PI;
use std::hint::black_box;

// Lossy symmetric two-port whose phase rotates across the sweep
fn measured(npts: usize) -> Network {
    let freqs: Vec<f64> = (1..=npts).map(|i| i as f64 * 10.0).collect();
    let s = Points::from_shape_fn((npts, 2, 2), |(i, j, k)| {
        let phase = 2.0 * PI * i as f64 / npts as f64;
        if j == k {
            c64(0.3 * phase.cos(), -0.3 * phase.sin())
        } else {
            c64(0.6 * (phase / 2.0).cos(), 0.6 * (phase / 2.0).sin())
        }
    });
    NetworkBuilder::new()
        .name("bench")
        .freq(Frequency::from_vec(freqs, Unit::Mega))
        .z0_scalar(c64(50.0, 0.0))
        .s(s)
        .build()
        .expect("benchmark network")
}

fn bench_deembed_point(c: &mut Criterion) {
    let net = measured(1);
    let z0 = net.z0().clone();
    let y_loads = [c64(1.0 / 80.0, 0.0), c64(0.01, -0.002)];

    c.bench_function("deembed_point", |b| {
        b.iter(|| deembed_point(black_box(&net.s_at(0)), &z0, black_box(y_loads), &z0))
    });
}

fn bench_deembed_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deembed_sweep");
    for npts in [10, 101, 1001, 10001] {
        let net = measured(npts);
        let z_fixed = PortPoints::from_elem(npts, c64(80.0, 0.0));
        let z_swept = PortPoints::from_shape_fn(npts, |i| c64(50.0, 10.0 + i as f64 / npts as f64));

        group.throughput(Throughput::Elements(npts as u64));
        group.bench_with_input(BenchmarkId::new("fixed_and_swept", npts), &net, |b, net| {
            b.iter(|| black_box(deembed(net, &z_fixed, &z_swept, None)))
        });
    }
    group.finish();
}

fn bench_touchstone_write(c: &mut Criterion) {
    let net = measured(1001);
    c.bench_function("write_touchstone_1001", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(1 << 17);
            write_touchstone_to(black_box(&net), &mut buf, RFDataFormat::RI).expect("write");
            black_box(buf)
        })
    });
}

criterion_group!(
    deembed_benches,
    bench_deembed_point,
    bench_deembed_sweep,
    bench_touchstone_write,
);
criterion_main!(deembed_benches);
