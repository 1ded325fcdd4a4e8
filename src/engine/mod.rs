//! Resampling engine contract.
//!
//! The session and batch layers drive an engine only through [`Engine`]:
//! create, process, clip count, delay and reset. [`RubatoEngine`] is the
//! default implementation.

mod rubato_impl;

pub use rubato_impl::RubatoEngine;

use crate::config::ConversionSpec;
use crate::error::{Error, Result};
use crate::sample::Sample;

/// Input buffer descriptor handed to [`Engine::process`].
#[derive(Debug, Clone, Copy)]
pub enum Frames<'a, T> {
    /// Frame-major samples: `[f0c0, f0c1, .., f1c0, ..]`.
    Interleaved(&'a [T]),
    /// One contiguous slice per channel, all of equal length.
    Planar(&'a [&'a [T]]),
}

impl<T: Copy> Frames<'_, T> {
    /// Number of frames, given the stream's channel count.
    ///
    /// Fails when the buffer does not describe whole frames of exactly
    /// `channels` channels.
    pub fn frame_count(&self, channels: usize) -> Result<usize> {
        match *self {
            Self::Interleaved(data) => {
                if channels == 0 || data.len() % channels != 0 {
                    return Err(Error::PartialFrame {
                        len: data.len(),
                        channels,
                    });
                }
                Ok(data.len() / channels)
            }
            Self::Planar(planes) => {
                if planes.len() != channels {
                    return Err(Error::ChannelMismatch {
                        expected: channels,
                        actual: planes.len(),
                    });
                }
                let frames = planes.first().map_or(0, |plane| plane.len());
                if planes.iter().any(|plane| plane.len() != frames) {
                    return Err(Error::RaggedPlanes);
                }
                Ok(frames)
            }
        }
    }

    /// Sample of `channel` in `frame`.
    pub fn get(&self, frame: usize, channel: usize, channels: usize) -> T {
        match *self {
            Self::Interleaved(data) => data[frame * channels + channel],
            Self::Planar(planes) => planes[channel][frame],
        }
    }
}

/// A stateful resampler bound to one [`ConversionSpec`].
///
/// One engine serves one logical stream; calls arrive in order and at most
/// one of them carries `is_final`.
pub trait Engine: Send + Sized {
    /// Allocate an engine for `spec`.
    fn create(spec: &ConversionSpec) -> Result<Self>;

    /// Consume `input` and return the interleaved frames ready so far.
    ///
    /// The output may be shorter than the input (algorithmic delay). With
    /// `is_final` the engine flushes everything it still holds.
    fn process<T: Sample>(&mut self, input: Frames<'_, T>, is_final: bool) -> Result<Vec<T>>;

    /// Samples clamped to the output range since creation or the last reset.
    fn num_clips(&self) -> u64;

    /// Output frames still owed for the input consumed so far.
    fn current_delay(&self) -> f64;

    /// Return to the post-construction state.
    fn reset(&mut self);
}
