//! Whole-array resampling.
//!
//! The batch driver feeds a session fixed windows of the input so peak
//! working memory stays bounded for long signals. The windowed result is
//! identical to [`resample_oneshot`], which hands the engine everything at
//! once.

use crate::config::{ConversionSpec, validate_rates};
use crate::constants::BATCH_WINDOW_OUTPUT_FRAMES;
use crate::engine::{Engine, RubatoEngine};
use crate::error::{Error, Result};
use crate::layout::map_frames;
use crate::quality::Quality;
use crate::sample::{Representation, Sample};
use crate::stream::ResampleStream;
use ndarray::{Array1, Array2, ArrayD, ArrayViewD, s};
use tracing::debug;

/// Resample a `[frame]` or `[frame, channel]` array on the default engine.
///
/// The output keeps the rank and element type of `input` and holds
/// `ceil(frames * out_rate / in_rate)` frames.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use ratewise::{Quality, resample};
///
/// let stereo = Array2::<f32>::zeros((44100, 2)).into_dyn();
/// let out = resample(stereo.view(), 44100.0, 16000.0, Quality::HQ)?;
/// assert_eq!(out.shape(), &[16000, 2]);
/// # Ok::<(), ratewise::Error>(())
/// ```
pub fn resample<T: Sample>(
    input: ArrayViewD<'_, T>,
    in_rate: f64,
    out_rate: f64,
    quality: Quality,
) -> Result<ArrayD<T>> {
    resample_with::<RubatoEngine, T>(input, in_rate, out_rate, quality)
}

/// Resample a whole array on engine `E`, window by window.
pub fn resample_with<E: Engine, T: Sample>(
    input: ArrayViewD<'_, T>,
    in_rate: f64,
    out_rate: f64,
    quality: Quality,
) -> Result<ArrayD<T>> {
    let mut session = open_session::<E, T>(&input, in_rate, out_rate, quality)?;
    let window = window_frames(in_rate, out_rate);
    debug!(
        "Batch resampling {} frames in windows of {} frames",
        input.shape()[0],
        window
    );

    map_frames(input, |view| {
        let frames = view.nrows();
        let channels = view.ncols();
        let mut out = Vec::with_capacity(expected_len(session.spec(), frames) * channels);

        if frames == 0 {
            out.extend(session.process_view(view, true)?);
        }
        let mut start = 0;
        while start < frames {
            let end = (start + window).min(frames);
            out.extend(session.process_view(view.slice(s![start..end, ..]), end == frames)?);
            start = end;
        }

        collect_frames(out, channels)
    })
}

/// Resample a whole array with a single final engine call.
///
/// Produces the same samples as [`resample`]; useful as a reference and for
/// benchmarking the windowing overhead.
pub fn resample_oneshot<T: Sample>(
    input: ArrayViewD<'_, T>,
    in_rate: f64,
    out_rate: f64,
    quality: Quality,
) -> Result<ArrayD<T>> {
    let mut session = open_session::<RubatoEngine, T>(&input, in_rate, out_rate, quality)?;
    map_frames(input, |view| {
        let channels = view.ncols();
        collect_frames(session.process_view(view, true)?, channels)
    })
}

/// Resample plain values as a mono `float32` signal.
pub fn resample_values<I>(values: I, in_rate: f64, out_rate: f64, quality: Quality) -> Result<ArrayD<f32>>
where
    I: IntoIterator,
    I::Item: Into<f64>,
{
    #[allow(clippy::cast_possible_truncation)]
    let samples: Array1<f32> = values.into_iter().map(|v| v.into() as f32).collect();
    resample(samples.into_dyn().view(), in_rate, out_rate, quality)
}

/// Input frames per batch window, covering [`BATCH_WINDOW_OUTPUT_FRAMES`] output frames.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn window_frames(in_rate: f64, out_rate: f64) -> usize {
    ((BATCH_WINDOW_OUTPUT_FRAMES * in_rate / out_rate).ceil() as usize).max(1)
}

/// Validate in the order rates, element type, rank, channels, then open a session.
fn open_session<E: Engine, T: Sample>(
    input: &ArrayViewD<'_, T>,
    in_rate: f64,
    out_rate: f64,
    quality: Quality,
) -> Result<ResampleStream<E>> {
    validate_rates(in_rate, out_rate)?;
    let representation = Representation::of::<T>()?;
    let channels = match input.ndim() {
        1 => 1,
        2 => input.shape()[1],
        ndim => return Err(Error::InvalidRank { ndim }),
    };
    let spec = ConversionSpec::new(in_rate, out_rate, channels, representation, quality)?;
    ResampleStream::<E>::create(spec)
}

#[allow(clippy::cast_possible_truncation)]
fn expected_len(spec: &ConversionSpec, frames: usize) -> usize {
    spec.expected_output_frames(frames as u64) as usize
}

fn collect_frames<T>(out: Vec<T>, channels: usize) -> Result<Array2<T>> {
    Ok(Array2::from_shape_vec((out.len() / channels, channels), out)?)
}
