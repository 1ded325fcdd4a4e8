//! Benchmarks for batch, one-shot and streaming conversion.

#![allow(missing_docs, clippy::unwrap_used, clippy::cast_precision_loss)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use ndarray::{Array2, ArrayD, Axis};
use ratewise::{Quality, Representation, ResampleStream, resample, resample_oneshot};
use std::thread;

const IN_RATE: f64 = 48000.0;
const OUT_RATE: f64 = 44100.0;

/// Four-channel exponential chirp.
fn make_chirp(frames: usize) -> ArrayD<f64> {
    let offset = 2000.0;
    let (lo, hi) = ((offset + 100.0_f64).ln(), (offset + 23900.0_f64).ln());
    let mut phase = 0.0;
    let mono: Vec<f64> = (0..frames)
        .map(|i| {
            let freq = (lo + (hi - lo) * i as f64 / frames as f64).exp() - offset;
            phase += 2.0 * std::f64::consts::PI * freq / IN_RATE;
            phase.sin()
        })
        .collect();
    Array2::from_shape_fn((frames, 4), |(f, _)| mono[f]).into_dyn()
}

fn bench_batch_vs_oneshot(c: &mut Criterion) {
    let signal = make_chirp(96000 * 5);
    let mut group = c.benchmark_group("batch_10s_4ch");
    group.sample_size(10);

    group.bench_function("resample", |b| {
        b.iter(|| black_box(resample(black_box(signal.view()), IN_RATE, OUT_RATE, Quality::HQ).unwrap()));
    });
    group.bench_function("resample_oneshot", |b| {
        b.iter(|| black_box(resample_oneshot(black_box(signal.view()), IN_RATE, OUT_RATE, Quality::HQ).unwrap()));
    });
    group.finish();
}

fn bench_stream_chunks(c: &mut Criterion) {
    let signal = make_chirp(96000);
    let mut group = c.benchmark_group("stream_2s_4ch");

    for chunk in [480, 4800, 48000] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut stream = ResampleStream::new(IN_RATE, OUT_RATE, 4, Representation::F64, Quality::HQ).unwrap();
                let pieces: Vec<_> = signal.axis_chunks_iter(Axis(0), chunk).collect();
                for (i, piece) in pieces.iter().enumerate() {
                    black_box(stream.resample_chunk(piece.view(), i + 1 == pieces.len()).unwrap());
                }
            });
        });
    }
    group.finish();
}

fn bench_parallel(c: &mut Criterion) {
    let signal = make_chirp(96000);
    let mut group = c.benchmark_group("parallel_2s_4ch");
    group.sample_size(10);

    for threads in [1, 2, 4] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| {
                thread::scope(|scope| {
                    for _ in 0..threads {
                        scope.spawn(|| black_box(resample(signal.view(), IN_RATE, OUT_RATE, Quality::HQ).unwrap()));
                    }
                });
            });
        });
    }
    group.finish();
}

fn bench_quality(c: &mut Criterion) {
    let signal = make_chirp(48000);
    let mut group = c.benchmark_group("quality_1s_4ch");

    for quality in Quality::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(quality), &quality, |b, &quality| {
            b.iter(|| black_box(resample(signal.view(), IN_RATE, OUT_RATE, quality).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_batch_vs_oneshot, bench_stream_chunks, bench_parallel, bench_quality);
criterion_main!(benches);
