//! Conversion parameter validation.

use crate::constants::CHANNEL_LIMIT;
use crate::error::{Error, Result};

/// Validate that both sample rates are positive and finite.
pub fn validate_rates(in_rate: f64, out_rate: f64) -> Result<()> {
    let valid = |rate: f64| rate.is_finite() && rate > 0.0;
    if valid(in_rate) && valid(out_rate) {
        Ok(())
    } else {
        Err(Error::InvalidSampleRate { in_rate, out_rate })
    }
}

/// Validate a channel count against [`CHANNEL_LIMIT`].
pub fn validate_channels(channels: usize) -> Result<()> {
    if (1..=CHANNEL_LIMIT).contains(&channels) {
        Ok(())
    } else {
        Err(Error::InvalidChannelCount { channels })
    }
}
