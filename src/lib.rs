//! Ratewise - high quality sample-rate conversion for audio arrays.
//!
//! This crate resamples `ndarray` buffers of `f32`, `f64`, `i16` or `i32`
//! samples, either whole with [`resample`] or incrementally with
//! [`ResampleStream`]. Both paths produce identical samples for the same
//! input, however it is split.
//!
//! ```
//! use ndarray::Array1;
//! use ratewise::{Quality, ResampleStream, resample};
//!
//! let tone = Array1::from_shape_fn(48000, |i| (i as f32 * 0.05).sin()).into_dyn();
//! let whole = resample(tone.view(), 48000.0, 16000.0, Quality::HQ)?;
//!
//! let mut stream = ResampleStream::with_dtype(48000.0, 16000.0, 1, "float32", "HQ")?;
//! let head = stream.resample_chunk(tone.slice(ndarray::s![..24000]).into_dyn(), false)?;
//! let tail = stream.resample_chunk(tone.slice(ndarray::s![24000..]).into_dyn(), true)?;
//! assert_eq!(head.len() + tail.len(), whole.len());
//! # Ok::<(), ratewise::Error>(())
//! ```

#![warn(missing_docs)]

pub mod batch;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod layout;
pub mod quality;
pub mod sample;
pub mod stream;

pub use batch::{resample, resample_oneshot, resample_values, resample_with};
pub use config::{ConversionSpec, StreamConfig, load_stream_config, save_stream_config};
pub use engine::{Engine, Frames, RubatoEngine};
pub use error::{Error, Result};
pub use layout::{Layout, detect_layout};
pub use quality::{Quality, quality_to_enum};
pub use sample::{Representation, Sample, representation_of};
pub use stream::ResampleStream;
