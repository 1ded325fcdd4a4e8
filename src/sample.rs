//! Element types and their conversion to the engine's working precision.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Element representation a conversion runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// 32-bit float.
    F32,
    /// 64-bit float.
    F64,
    /// 16-bit signed integer.
    I16,
    /// 32-bit signed integer.
    I32,
}

impl Representation {
    /// All supported representations.
    pub const ALL: [Self; 4] = [Self::F32, Self::F64, Self::I16, Self::I32];

    /// Numpy-style name of the element type.
    pub const fn dtype_name(self) -> &'static str {
        match self {
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::I16 => "int16",
            Self::I32 => "int32",
        }
    }

    /// Whether the representation is floating point (and therefore never clips).
    pub const fn is_float(self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }

    /// Representation of the element type `T`.
    pub fn of<T: Sample>() -> Result<Self> {
        T::REPRESENTATION.ok_or_else(|| Error::UnsupportedType {
            dtype: T::DTYPE.to_string(),
        })
    }
}

impl fmt::Display for Representation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dtype_name())
    }
}

impl FromStr for Representation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "float32" | "f32" => Ok(Self::F32),
            "float64" | "f64" => Ok(Self::F64),
            "int16" | "i16" => Ok(Self::I16),
            "int32" | "i32" => Ok(Self::I32),
            _ => Err(Error::UnsupportedType {
                dtype: s.to_string(),
            }),
        }
    }
}

/// Resolve the representation of element type `T`.
///
/// Fails with [`Error::UnsupportedType`] for anything but `f32`, `f64`,
/// `i16` and `i32`.
pub fn representation_of<T: Sample>() -> Result<Representation> {
    Representation::of::<T>()
}

/// A numeric array element.
///
/// Implemented for every primitive numeric type so callers can hand in any
/// array; only the types with a [`Sample::REPRESENTATION`] are accepted by
/// the converters.
pub trait Sample: Copy + Default + Send + Sync + fmt::Debug + 'static {
    /// Conventional element type name, e.g. `float32`.
    const DTYPE: &'static str;

    /// Representation this element maps to, if supported.
    const REPRESENTATION: Option<Representation>;

    /// Widen to the engine's working precision.
    fn to_f64(self) -> f64;

    /// Narrow from working precision.
    ///
    /// Integers round to nearest and saturate; the flag reports saturation.
    fn from_f64(value: f64) -> (Self, bool);
}

macro_rules! impl_float_sample {
    ($($ty:ty => $name:literal, $repr:expr);* $(;)?) => {
        $(
            impl Sample for $ty {
                const DTYPE: &'static str = $name;
                const REPRESENTATION: Option<Representation> = $repr;

                fn to_f64(self) -> f64 {
                    f64::from(self)
                }

                #[allow(clippy::cast_possible_truncation, clippy::cast_lossless)]
                fn from_f64(value: f64) -> (Self, bool) {
                    (value as $ty, false)
                }
            }
        )*
    };
}

macro_rules! impl_int_sample {
    ($($ty:ty => $name:literal, $repr:expr);* $(;)?) => {
        $(
            impl Sample for $ty {
                const DTYPE: &'static str = $name;
                const REPRESENTATION: Option<Representation> = $repr;

                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_lossless
                )]
                fn from_f64(value: f64) -> (Self, bool) {
                    let rounded = value.round();
                    if rounded > <$ty>::MAX as f64 {
                        (<$ty>::MAX, true)
                    } else if rounded < <$ty>::MIN as f64 {
                        (<$ty>::MIN, true)
                    } else {
                        (rounded as $ty, false)
                    }
                }
            }
        )*
    };
}

impl_float_sample! {
    f32 => "float32", Some(Representation::F32);
    f64 => "float64", Some(Representation::F64);
}

impl_int_sample! {
    i16 => "int16", Some(Representation::I16);
    i32 => "int32", Some(Representation::I32);
    i8 => "int8", None;
    i64 => "int64", None;
    u8 => "uint8", None;
    u16 => "uint16", None;
    u32 => "uint32", None;
    u64 => "uint64", None;
}
