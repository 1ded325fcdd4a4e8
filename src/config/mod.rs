//! Conversion parameters: validation and serializable settings.

mod file;
mod types;
mod validate;

pub use file::{load_stream_config, save_stream_config};
pub use types::{ConversionSpec, StreamConfig};
pub use validate::{validate_channels, validate_rates};
