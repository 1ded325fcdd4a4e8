//! Default engine built on rubato's asynchronous resampler.
//!
//! Rubato consumes fixed-size chunks. The engine picks the chunk size once
//! from the rate ratio, stages caller input into an interleaved `f64` chunk
//! buffer and only runs the resampler on full chunks,
//! so the sequence of resampler calls depends on the total input alone and
//! never on how the caller split it. The final call zero-pads the tail,
//! drains the filter and cuts the stream to its exact length.

use super::{Engine, Frames};
use crate::config::ConversionSpec;
use crate::constants::{ENGINE_CHUNK_FRAMES, sinc};
use crate::error::{Error, Result};
use crate::quality::Quality;
use crate::sample::Sample;
use audioadapter_buffers::direct::InterleavedSlice;
use rubato::{
    Async, FixedAsync, PolynomialDegree, Resampler, SincInterpolationParameters,
    SincInterpolationType, WindowFunction,
};
use tracing::{debug, trace};

/// Rubato-backed [`Engine`].
pub struct RubatoEngine {
    spec: ConversionSpec,
    resampler: Async<f64>,
    /// Input frames per resampler call.
    chunk_frames: usize,
    /// Interleaved input frames waiting for a full chunk.
    pending: Vec<f64>,
    /// Output of one resampler call.
    scratch: Vec<f64>,
    /// Leading output frames still to discard (filter delay).
    skip: usize,
    frames_in: u64,
    frames_out: u64,
    clips: u64,
}

impl std::fmt::Debug for RubatoEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RubatoEngine")
            .field("spec", &self.spec)
            .field("chunk_frames", &self.chunk_frames)
            .field("pending_frames", &self.pending_frames())
            .field("skip", &self.skip)
            .field("frames_in", &self.frames_in)
            .field("frames_out", &self.frames_out)
            .field("clips", &self.clips)
            .finish_non_exhaustive()
    }
}

impl RubatoEngine {
    fn pending_frames(&self) -> usize {
        self.pending.len() / self.spec.channels()
    }

    /// Convert `count` frames starting at `start` into the chunk buffer.
    fn stage<T: Sample>(&mut self, input: Frames<'_, T>, start: usize, count: usize) {
        let channels = self.spec.channels();
        match input {
            Frames::Interleaved(data) => {
                let run = &data[start * channels..(start + count) * channels];
                self.pending.extend(run.iter().map(|&s| s.to_f64()));
            }
            Frames::Planar(_) => {
                for frame in start..start + count {
                    for channel in 0..channels {
                        let value = input.get(frame, channel, channels);
                        self.pending.push(value.to_f64());
                    }
                }
            }
        }
    }

    /// Run the resampler over one full chunk and append the trimmed output.
    fn run_chunk(&mut self, out: &mut Vec<f64>) -> Result<()> {
        let channels = self.spec.channels();
        let input = InterleavedSlice::new(self.pending.as_slice(), channels, self.chunk_frames).map_err(
            |e| Error::Engine {
                reason: format!("failed to create input adapter: {e}"),
            },
        )?;
        let capacity = self.scratch.len() / channels;
        let mut output = InterleavedSlice::new_mut(self.scratch.as_mut_slice(), channels, capacity)
            .map_err(|e| Error::Engine {
                reason: format!("failed to create output adapter: {e}"),
            })?;

        let (_, produced) = self
            .resampler
            .process_into_buffer(&input, &mut output, None)
            .map_err(|e| Error::Engine {
                reason: e.to_string(),
            })?;
        self.pending.clear();

        let skipped = self.skip.min(produced);
        self.skip -= skipped;
        out.extend_from_slice(&self.scratch[skipped * channels..produced * channels]);
        trace!("Resampled chunk: {produced} frames out, {skipped} trimmed");
        Ok(())
    }

    /// Drain the filter and cut the output to the exact stream length.
    fn flush(&mut self, out: &mut Vec<f64>) -> Result<()> {
        let channels = self.spec.channels();
        let target = self.spec.expected_output_frames(self.frames_in);
        let emitted = |out: &[f64], frames_out: u64| frames_out + (out.len() / channels) as u64;

        while emitted(out.as_slice(), self.frames_out) < target {
            self.pending.resize(self.chunk_frames * channels, 0.0);
            self.run_chunk(out)?;
        }
        self.pending.clear();

        #[allow(clippy::cast_possible_truncation)]
        let keep = target.saturating_sub(self.frames_out) as usize;
        out.truncate(keep * channels);
        debug!(
            "Flushed stream: {} frames in, {} frames out",
            self.frames_in, target
        );
        Ok(())
    }

    /// Narrow working samples to the output element type, counting clips.
    fn narrow<T: Sample>(&mut self, samples: &[f64]) -> Vec<T> {
        let mut clips = 0_u64;
        let narrowed = samples
            .iter()
            .map(|&value| {
                let (sample, clipped) = T::from_f64(value);
                clips += u64::from(clipped);
                sample
            })
            .collect();
        self.clips += clips;
        narrowed
    }
}

impl Engine for RubatoEngine {
    fn create(spec: &ConversionSpec) -> Result<Self> {
        let chunk_frames = chunk_frames_for(spec.ratio());
        let resampler = build_resampler(spec, chunk_frames)?;
        let skip = resampler.output_delay();
        let channels = spec.channels();
        debug!(
            "Created {} engine: {} Hz -> {} Hz, {} channel(s), {}, chunk {} frames, delay {} frames",
            spec.quality(),
            spec.in_rate(),
            spec.out_rate(),
            channels,
            spec.representation(),
            chunk_frames,
            skip
        );

        Ok(Self {
            spec: *spec,
            scratch: vec![0.0; resampler.output_frames_max() * channels],
            pending: Vec::with_capacity(chunk_frames * channels),
            resampler,
            chunk_frames,
            skip,
            frames_in: 0,
            frames_out: 0,
            clips: 0,
        })
    }

    fn process<T: Sample>(&mut self, input: Frames<'_, T>, is_final: bool) -> Result<Vec<T>> {
        let channels = self.spec.channels();
        let frames = input.frame_count(channels)?;

        let capacity = estimate_output_len(&self.spec, frames) + self.scratch.len() / channels;
        let mut out = Vec::with_capacity(capacity * channels);
        let mut pos = 0;
        while pos < frames {
            let take = (self.chunk_frames - self.pending_frames()).min(frames - pos);
            self.stage(input, pos, take);
            pos += take;
            if self.pending_frames() == self.chunk_frames {
                self.run_chunk(&mut out)?;
            }
        }
        self.frames_in += frames as u64;

        if is_final {
            self.flush(&mut out)?;
        }
        self.frames_out += (out.len() / channels) as u64;
        Ok(self.narrow(&out))
    }

    fn num_clips(&self) -> u64 {
        self.clips
    }

    #[allow(clippy::cast_precision_loss)]
    fn current_delay(&self) -> f64 {
        (self.frames_in as f64 * self.spec.ratio() - self.frames_out as f64).max(0.0)
    }

    fn reset(&mut self) {
        self.resampler.reset();
        self.pending.clear();
        self.skip = self.resampler.output_delay();
        self.frames_in = 0;
        self.frames_out = 0;
        self.clips = 0;
    }
}

/// Input frames per resampler call for a given output/input ratio.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn chunk_frames_for(ratio: f64) -> usize {
    ((ENGINE_CHUNK_FRAMES as f64 / ratio.max(1.0)).ceil() as usize).max(1)
}

/// Build the rubato resampler for the requested quality preset.
fn build_resampler(spec: &ConversionSpec, chunk_frames: usize) -> Result<Async<f64>> {
    let ratio = spec.ratio();
    let channels = spec.channels();
    let resampler = match sinc_parameters(spec.quality()) {
        None => Async::<f64>::new_poly(
            ratio,
            1.0,
            PolynomialDegree::Cubic,
            chunk_frames,
            channels,
            FixedAsync::Input,
        ),
        Some(parameters) => Async::<f64>::new_sinc(
            ratio,
            1.0,
            &parameters,
            chunk_frames,
            channels,
            FixedAsync::Input,
        ),
    };
    resampler.map_err(|e| Error::Engine {
        reason: e.to_string(),
    })
}

/// Sinc filter settings per quality level; `QQ` uses polynomial interpolation.
fn sinc_parameters(quality: Quality) -> Option<SincInterpolationParameters> {
    let (sinc_len, window, oversampling_factor, interpolation) = match quality {
        Quality::QQ => return None,
        Quality::LQ => (
            sinc::LQ_LEN,
            WindowFunction::Hann2,
            sinc::COARSE_OVERSAMPLING,
            SincInterpolationType::Linear,
        ),
        Quality::MQ => (
            sinc::MQ_LEN,
            WindowFunction::Blackman2,
            sinc::COARSE_OVERSAMPLING,
            SincInterpolationType::Linear,
        ),
        Quality::HQ => (
            sinc::HQ_LEN,
            WindowFunction::BlackmanHarris2,
            sinc::HQ_OVERSAMPLING,
            SincInterpolationType::Quadratic,
        ),
        Quality::VHQ => (
            sinc::VHQ_LEN,
            WindowFunction::BlackmanHarris2,
            sinc::VHQ_OVERSAMPLING,
            SincInterpolationType::Cubic,
        ),
    };

    Some(SincInterpolationParameters {
        sinc_len,
        f_cutoff: rubato::calculate_cutoff(sinc_len, window),
        oversampling_factor,
        interpolation,
        window,
    })
}

/// Estimate output frames for the input of one call.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn estimate_output_len(spec: &ConversionSpec, frames: usize) -> usize {
    (frames as f64 * spec.ratio()).ceil() as usize
}
