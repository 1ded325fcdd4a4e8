//! Shared helpers for integration tests.

#![allow(dead_code, clippy::cast_precision_loss, clippy::cast_possible_truncation)]

use ndarray::{Array2, ArrayD};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Route crate logs to the test harness when `RUST_LOG` is set.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Uniform noise in `[-1, 1)`, `[frames, channels]`, reproducible per seed.
pub fn noise(frames: usize, channels: usize, seed: u64) -> Array2<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array2::from_shape_simple_fn((frames, channels), || rng.random_range(-1.0..1.0))
}

/// Noise scaled to the `i16` range, kept clear of full scale.
pub fn noise_i16(frames: usize, channels: usize, seed: u64) -> Array2<i16> {
    noise(frames, channels, seed).mapv(|v| (v * 12_000.0).round() as i16)
}

/// Largest absolute difference between two float arrays of the same shape.
pub fn max_abs_diff(a: &ArrayD<f64>, b: &ArrayD<f64>) -> f64 {
    assert_eq!(a.shape(), b.shape());
    a.iter().zip(b).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max)
}
