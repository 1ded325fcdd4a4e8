//! Configuration type definitions.

use crate::constants::DEFAULT_DTYPE;
use crate::error::Result;
use crate::quality::Quality;
use crate::sample::Representation;
use serde::{Deserialize, Serialize};

use super::validate::{validate_channels, validate_rates};

/// Validated, immutable description of one conversion.
///
/// Only constructible through [`ConversionSpec::new`], so every value in
/// circulation has positive finite rates and an in-range channel count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionSpec {
    in_rate: f64,
    out_rate: f64,
    channels: usize,
    representation: Representation,
    quality: Quality,
}

impl ConversionSpec {
    /// Validate and freeze a conversion description.
    pub fn new(
        in_rate: f64,
        out_rate: f64,
        channels: usize,
        representation: Representation,
        quality: Quality,
    ) -> Result<Self> {
        validate_rates(in_rate, out_rate)?;
        validate_channels(channels)?;
        Ok(Self {
            in_rate,
            out_rate,
            channels,
            representation,
            quality,
        })
    }

    /// Input sample rate.
    pub const fn in_rate(&self) -> f64 {
        self.in_rate
    }

    /// Output sample rate.
    pub const fn out_rate(&self) -> f64 {
        self.out_rate
    }

    /// Number of interleaved channels per frame.
    pub const fn channels(&self) -> usize {
        self.channels
    }

    /// Element representation.
    pub const fn representation(&self) -> Representation {
        self.representation
    }

    /// Quality preset.
    pub const fn quality(&self) -> Quality {
        self.quality
    }

    /// Output frames per input frame.
    pub fn ratio(&self) -> f64 {
        self.out_rate / self.in_rate
    }

    /// Output length of a complete conversion of `input_frames` frames.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn expected_output_frames(&self, input_frames: u64) -> u64 {
        // Multiply before dividing so integral rate pairs stay exact.
        (input_frames as f64 * self.out_rate / self.in_rate).ceil() as u64
    }
}

/// Serializable stream settings, e.g. a `[stream]` table in a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Input sample rate.
    pub in_rate: f64,

    /// Output sample rate.
    pub out_rate: f64,

    /// Channel count.
    #[serde(default = "default_channels")]
    pub channels: usize,

    /// Element type name (`float32`, `float64`, `int16`, `int32`).
    #[serde(default = "default_dtype")]
    pub dtype: String,

    /// Quality token (`QQ` .. `VHQ`, aliases accepted).
    #[serde(default = "default_quality")]
    pub quality: String,
}

impl StreamConfig {
    /// Settings with the default channel count, dtype and quality.
    pub fn new(in_rate: f64, out_rate: f64) -> Self {
        Self {
            in_rate,
            out_rate,
            channels: default_channels(),
            dtype: default_dtype(),
            quality: default_quality(),
        }
    }

    /// Resolve the tokens and validate into a [`ConversionSpec`].
    ///
    /// Tokens are resolved before the rates and channels are checked, the
    /// same order as [`ResampleStream::with_dtype`](crate::ResampleStream::with_dtype).
    pub fn to_conversion_spec(&self) -> Result<ConversionSpec> {
        let representation = self.dtype.parse::<Representation>()?;
        let quality = self.quality.parse::<Quality>()?;
        ConversionSpec::new(
            self.in_rate,
            self.out_rate,
            self.channels,
            representation,
            quality,
        )
    }
}

const fn default_channels() -> usize {
    1
}

fn default_dtype() -> String {
    DEFAULT_DTYPE.to_string()
}

fn default_quality() -> String {
    Quality::default().to_string()
}
