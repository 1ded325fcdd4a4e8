//! Streaming resampler session.

use crate::config::{ConversionSpec, StreamConfig};
use crate::engine::{Engine, Frames, RubatoEngine};
use crate::error::{Error, Result};
use crate::layout::{map_frames, route};
use crate::quality::{Quality, quality_to_enum};
use crate::sample::{Representation, Sample};
use ndarray::{Array2, ArrayD, ArrayView2, ArrayViewD};
use tracing::{debug, trace};

/// Incremental resampler over one logical stream.
///
/// Feed chunks in order with [`resample_chunk`](Self::resample_chunk) and
/// flag the final one with `last = true`. Concatenating every returned chunk
/// gives the same samples as converting the whole stream at once, however
/// the input was split.
///
/// After the final chunk the session rejects input with
/// [`Error::StreamEnded`] until [`clear`](Self::clear) is called.
#[derive(Debug)]
pub struct ResampleStream<E: Engine = RubatoEngine> {
    spec: ConversionSpec,
    engine: E,
    finished: bool,
}

impl ResampleStream<RubatoEngine> {
    /// Create a session on the default engine.
    pub fn new(
        in_rate: f64,
        out_rate: f64,
        channels: usize,
        representation: Representation,
        quality: Quality,
    ) -> Result<Self> {
        let spec = ConversionSpec::new(in_rate, out_rate, channels, representation, quality)?;
        Self::create(spec)
    }

    /// Create a session from dtype and quality tokens, e.g. `"int16"` and `"VHQ"`.
    pub fn with_dtype(
        in_rate: f64,
        out_rate: f64,
        channels: usize,
        dtype: &str,
        quality: &str,
    ) -> Result<Self> {
        let representation: Representation = dtype.parse()?;
        let quality = quality_to_enum(quality)?;
        Self::new(in_rate, out_rate, channels, representation, quality)
    }

    /// Create a session for an already validated spec.
    pub fn from_spec(spec: ConversionSpec) -> Result<Self> {
        Self::create(spec)
    }

    /// Create a session from serializable settings.
    pub fn from_config(config: &StreamConfig) -> Result<Self> {
        Self::create(config.to_conversion_spec()?)
    }
}

impl<E: Engine> ResampleStream<E> {
    /// Create a session on engine `E`.
    pub fn create(spec: ConversionSpec) -> Result<Self> {
        let engine = E::create(&spec)?;
        debug!(
            "Opened stream: {} Hz -> {} Hz, {} channel(s), {}, {}",
            spec.in_rate(),
            spec.out_rate(),
            spec.channels(),
            spec.representation(),
            spec.quality()
        );
        Ok(Self {
            spec,
            engine,
            finished: false,
        })
    }

    /// Resample one chunk.
    ///
    /// `data` is `[frame]` for mono or `[frame, channel]`, in any memory
    /// order; the result has the same rank and element type.
    pub fn resample_chunk<T: Sample>(&mut self, data: ArrayViewD<'_, T>, last: bool) -> Result<ArrayD<T>> {
        self.check_input::<T>()?;
        let channels = match data.ndim() {
            1 => 1,
            2 => data.shape()[1],
            ndim => return Err(Error::InvalidRank { ndim }),
        };
        self.check_channels(channels)?;

        map_frames(data, |view| {
            let out = self.process_view(view, last)?;
            let channels = self.spec.channels();
            Ok(Array2::from_shape_vec((out.len() / channels, channels), out)?)
        })
    }

    /// Resample frame-major samples; output is interleaved as well.
    pub fn process_interleaved<T: Sample>(&mut self, data: &[T], last: bool) -> Result<Vec<T>> {
        self.check_input::<T>()?;
        self.process_frames(Frames::Interleaved(data), last)
    }

    /// Resample one slice per channel; output is interleaved.
    pub fn process_planar<T: Sample>(&mut self, planes: &[&[T]], last: bool) -> Result<Vec<T>> {
        self.check_input::<T>()?;
        self.check_channels(planes.len())?;
        self.process_frames(Frames::Planar(planes), last)
    }

    /// Samples clamped to the output range so far; always 0 for float output.
    pub fn num_clips(&self) -> u64 {
        self.engine.num_clips()
    }

    /// Output frames still held inside the engine.
    pub fn delay(&self) -> f64 {
        self.engine.current_delay()
    }

    /// Reset the engine and re-arm the session for a new stream.
    pub fn clear(&mut self) {
        self.engine.reset();
        self.finished = false;
        debug!("Cleared stream");
    }

    /// The conversion this session performs.
    pub const fn spec(&self) -> &ConversionSpec {
        &self.spec
    }

    /// Whether the final chunk has been processed.
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Route a checked `[frame, channel]` view to the engine.
    pub(crate) fn process_view<T: Sample>(&mut self, view: ArrayView2<'_, T>, last: bool) -> Result<Vec<T>> {
        let routed = route(view);
        self.process_frames(routed.frames(), last)
    }

    fn process_frames<T: Sample>(&mut self, frames: Frames<'_, T>, last: bool) -> Result<Vec<T>> {
        let out = self.engine.process(frames, last)?;
        if last {
            self.finished = true;
        }
        trace!(
            "Chunk done: {} samples out, last={}, delay {:.1}",
            out.len(),
            last,
            self.engine.current_delay()
        );
        Ok(out)
    }

    fn check_input<T: Sample>(&self) -> Result<()> {
        if self.finished {
            return Err(Error::StreamEnded);
        }
        let actual = Representation::of::<T>()?;
        let expected = self.spec.representation();
        if actual != expected {
            return Err(Error::DtypeMismatch { expected, actual });
        }
        Ok(())
    }

    fn check_channels(&self, actual: usize) -> Result<()> {
        let expected = self.spec.channels();
        if actual == expected {
            Ok(())
        } else {
            Err(Error::ChannelMismatch { expected, actual })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::cast_precision_loss)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};

    fn stream(channels: usize, representation: Representation) -> ResampleStream {
        ResampleStream::new(44100.0, 48000.0, channels, representation, Quality::HQ).unwrap()
    }

    #[test]
    fn test_mono_chunk_keeps_rank() {
        let mut s = stream(1, Representation::F32);
        let input = Array1::from_shape_fn(4410, |i| (i as f32 * 0.01).sin()).into_dyn();
        let out = s.resample_chunk(input.view(), true).unwrap();
        assert_eq!(out.ndim(), 1);
        assert_eq!(out.len(), 4800);
    }

    #[test]
    fn test_stereo_chunk_keeps_channels() {
        let mut s = stream(2, Representation::F64);
        let input = Array2::<f64>::zeros((4410, 2)).into_dyn();
        let out = s.resample_chunk(input.view(), true).unwrap();
        assert_eq!(out.shape(), &[4800, 2]);
    }

    #[test]
    fn test_rejects_wrong_dtype() {
        let mut s = stream(1, Representation::F32);
        let input = Array1::<f64>::zeros(100).into_dyn();
        let err = s.resample_chunk(input.view(), false).unwrap_err();
        assert!(matches!(
            err,
            Error::DtypeMismatch {
                expected: Representation::F32,
                actual: Representation::F64
            }
        ));
    }

    #[test]
    fn test_rejects_unsupported_dtype() {
        let mut s = stream(1, Representation::F32);
        let err = s.process_interleaved(&[0_i8; 4], false).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType { .. }));
    }

    #[test]
    fn test_rejects_wrong_channel_count() {
        let mut s = stream(2, Representation::F32);
        let input = Array2::<f32>::zeros((100, 3)).into_dyn();
        let err = s.resample_chunk(input.view(), false).unwrap_err();
        assert!(matches!(err, Error::ChannelMismatch { expected: 2, actual: 3 }));

        let mono = Array1::<f32>::zeros(100).into_dyn();
        let err = s.resample_chunk(mono.view(), false).unwrap_err();
        assert!(matches!(err, Error::ChannelMismatch { expected: 2, actual: 1 }));
    }

    #[test]
    fn test_rejects_rank_three() {
        let mut s = stream(2, Representation::F32);
        let input = Array3::<f32>::zeros((4, 2, 2)).into_dyn();
        let err = s.resample_chunk(input.view(), false).unwrap_err();
        assert!(matches!(err, Error::InvalidRank { ndim: 3 }));
    }

    #[test]
    fn test_input_after_last_is_rejected_until_clear() {
        let mut s = stream(1, Representation::F32);
        let input = vec![0.5_f32; 441];
        s.process_interleaved(input.as_slice(), true).unwrap();
        assert!(s.is_finished());

        let err = s.process_interleaved(input.as_slice(), false).unwrap_err();
        assert!(matches!(err, Error::StreamEnded));

        s.clear();
        assert!(!s.is_finished());
        assert_eq!(s.delay(), 0.0);
        assert_eq!(s.process_interleaved(input.as_slice(), true).unwrap().len(), 480);
    }

    #[test]
    fn test_ended_takes_precedence_over_dtype() {
        let mut s = stream(1, Representation::F32);
        s.process_interleaved(&[] as &[f32], true).unwrap();
        let err = s.process_interleaved(&[0.0_f64; 4], false).unwrap_err();
        assert!(matches!(err, Error::StreamEnded));
    }

    #[test]
    fn test_planar_entry_matches_interleaved() {
        let left: Vec<f32> = (0..3000).map(|i| (i as f32 * 0.02).sin()).collect();
        let right: Vec<f32> = (0..3000).map(|i| (i as f32 * 0.03).cos()).collect();
        let interleaved: Vec<f32> = left.iter().zip(&right).flat_map(|(&l, &r)| [l, r]).collect();

        let mut a = stream(2, Representation::F32);
        let mut b = stream(2, Representation::F32);
        let expected = a.process_interleaved(interleaved.as_slice(), true).unwrap();
        let actual = b.process_planar(&[left.as_slice(), right.as_slice()], true).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_with_dtype_resolves_tokens() {
        let s = ResampleStream::with_dtype(8000.0, 16000.0, 2, "int16", "soxr_vhq").unwrap();
        assert_eq!(s.spec().representation(), Representation::I16);
        assert_eq!(s.spec().quality(), Quality::VHQ);

        let err = ResampleStream::with_dtype(8000.0, 16000.0, 2, "int16", "best").unwrap_err();
        assert!(matches!(err, Error::InvalidQuality { .. }));
    }

    #[test]
    fn test_invalid_parameters_fail_construction() {
        for channels in [0, crate::constants::CHANNEL_LIMIT + 1] {
            let err = ResampleStream::new(44100.0, 48000.0, channels, Representation::F32, Quality::HQ)
                .unwrap_err();
            assert!(matches!(err, Error::InvalidChannelCount { .. }));
        }
        let err = ResampleStream::new(0.0, 48000.0, 1, Representation::F32, Quality::HQ).unwrap_err();
        assert!(matches!(err, Error::InvalidSampleRate { .. }));
    }
}
