//! Crate-wide constants.
//!
//! All tuning values are defined here so the batch driver, the streaming
//! session and the default engine agree on them.

use crate::quality::Quality;

/// Maximum number of channels a conversion may carry.
///
/// The engine allocates filter state per channel, so very large channel
/// counts exhaust memory long before they become useful.
pub const CHANNEL_LIMIT: usize = 65_536;

/// Quality preset used when the caller does not pick one.
pub const DEFAULT_QUALITY: Quality = Quality::HQ;

/// Element type used when a configuration does not name one.
pub const DEFAULT_DTYPE: &str = "float32";

/// Output frames produced per batch window.
///
/// The batch driver sizes its input windows so each engine call yields about
/// this many output frames. Small windows pay per-call overhead; very large
/// single calls grow the engine's pending buffers without bound.
pub const BATCH_WINDOW_OUTPUT_FRAMES: f64 = 48_000.0;

/// Input frames per rubato call when not upsampling.
///
/// Upsampling divides this by the ratio so one call yields about this many
/// output frames, whatever the ratio.
pub const ENGINE_CHUNK_FRAMES: usize = 1024;

/// Rubato sinc preset parameters per quality level.
pub mod sinc {
    /// Filter length for `LQ`.
    pub const LQ_LEN: usize = 64;
    /// Filter length for `MQ`.
    pub const MQ_LEN: usize = 128;
    /// Filter length for `HQ`.
    pub const HQ_LEN: usize = 192;
    /// Filter length for `VHQ`.
    pub const VHQ_LEN: usize = 256;

    /// Oversampling factor for the linear-interpolated presets.
    pub const COARSE_OVERSAMPLING: usize = 1024;
    /// Oversampling factor for `HQ`.
    pub const HQ_OVERSAMPLING: usize = 512;
    /// Oversampling factor for `VHQ`.
    pub const VHQ_OVERSAMPLING: usize = 256;
}
