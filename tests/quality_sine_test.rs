//! Sine tone accuracy across quality presets.

#![allow(
    clippy::unwrap_used,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

mod common;

use ndarray::{Array1, ArrayD};
use ratewise::{Quality, resample};
use std::f64::consts::PI;

const TONE_HZ: f64 = 32.0;
const DURATION_S: f64 = 2.0;

/// Hann-windowed sine sampled at `rate`, so both ends fade to silence.
fn windowed_tone(rate: f64) -> ArrayD<f64> {
    let len = (rate * DURATION_S) as usize;
    Array1::from_shape_fn(len, |n| {
        let t = n as f64 / rate;
        let window = 0.5 * (1.0 - (2.0 * PI * t / DURATION_S).cos());
        (2.0 * PI * TONE_HZ * t).sin() * window
    })
    .into_dyn()
}

fn bound(quality: Quality) -> f64 {
    match quality {
        Quality::QQ => 5e-2,
        Quality::LQ => 3e-2,
        Quality::MQ => 2e-2,
        Quality::HQ => 1.5e-2,
        Quality::VHQ => 1e-2,
    }
}

#[test]
fn test_bounds_tighten_with_quality() {
    for pair in Quality::ALL.windows(2) {
        assert!(bound(pair[1]) < bound(pair[0]));
    }
}

#[test]
fn test_sine_matches_reference_at_every_quality() {
    common::init_tracing();
    for (in_rate, out_rate) in [(44100.0, 22050.0), (16000.0, 48000.0), (48000.0, 24000.0)] {
        let input = windowed_tone(in_rate);
        let reference = windowed_tone(out_rate);

        for quality in Quality::ALL {
            let out = resample(input.view(), in_rate, out_rate, quality).unwrap();
            let error = common::max_abs_diff(&out, &reference);
            assert!(
                error < bound(quality),
                "{quality} {in_rate} -> {out_rate}: error {error:e}"
            );
        }
    }
}
