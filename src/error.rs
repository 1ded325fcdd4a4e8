//! Error types for ratewise.

use crate::sample::Representation;

/// Result type alias for ratewise operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for ratewise.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // Invalid parameters
    /// Input or output sample rate is not a positive, finite number.
    #[error("sample rate should be over 0 (in_rate: {in_rate}, out_rate: {out_rate})")]
    InvalidSampleRate {
        /// Requested input rate.
        in_rate: f64,
        /// Requested output rate.
        out_rate: f64,
    },

    /// Channel count outside the supported range.
    #[error("channel num ({channels}) out of limit, should be in [1, {limit}]", limit = crate::constants::CHANNEL_LIMIT)]
    InvalidChannelCount {
        /// Offending channel count.
        channels: usize,
    },

    /// Quality token did not match any preset or alias.
    #[error("quality must be one of [QQ, LQ, MQ, HQ, VHQ], not '{token}'")]
    InvalidQuality {
        /// Token as given by the caller.
        token: String,
    },

    /// Element type outside the supported representations.
    #[error("data type must be one of [float32, float64, int16, int32], not {dtype}")]
    UnsupportedType {
        /// Name of the rejected element type.
        dtype: String,
    },

    // Shape errors
    /// Array rank is neither 1 nor 2.
    #[error("input must be a 1-D or 2-D array, got {ndim}-D")]
    InvalidRank {
        /// Rank of the rejected array.
        ndim: usize,
    },

    /// Chunk element type differs from the stream's representation.
    #[error("input dtype {actual} does not match stream dtype {expected}")]
    DtypeMismatch {
        /// Representation the stream was created with.
        expected: Representation,
        /// Representation of the rejected chunk.
        actual: Representation,
    },

    /// Chunk channel count differs from the stream's channel count.
    #[error("channel num mismatch: stream has {expected}, input has {actual}")]
    ChannelMismatch {
        /// Channel count the stream was created with.
        expected: usize,
        /// Channel count of the rejected chunk.
        actual: usize,
    },

    /// Flat buffer length is not a whole number of frames.
    #[error("buffer of {len} samples is not a whole number of {channels}-channel frames")]
    PartialFrame {
        /// Buffer length in samples.
        len: usize,
        /// Channel count of the stream.
        channels: usize,
    },

    /// Planar channel slices have different lengths.
    #[error("planar channel buffers differ in length")]
    RaggedPlanes,

    /// Output buffer could not be shaped into an array.
    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// A chunk was submitted after the final chunk.
    #[error("input after last input; call clear() before reusing the stream")]
    StreamEnded,

    /// The resampling engine failed.
    #[error("resampling engine failed: {reason}")]
    Engine {
        /// Description reported by the engine.
        reason: String,
    },

    // Configuration errors
    /// Failed to read a configuration file.
    #[error("failed to read config file: {path}")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a TOML stream configuration.
    #[error("failed to parse stream configuration")]
    ConfigParse {
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize a stream configuration.
    #[error("failed to serialize stream configuration")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Failed to write a configuration file.
    #[error("failed to write config file: {path}")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
