//! Quality presets and token resolution.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Conversion quality, ordered from fastest to highest fidelity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    /// Quick cubic interpolation, no anti-aliasing filter.
    QQ,
    /// Low quality sinc filter.
    LQ,
    /// Medium quality sinc filter.
    MQ,
    /// High quality sinc filter.
    HQ,
    /// Very high quality sinc filter.
    VHQ,
}

/// Accepted spellings, compared case-insensitively.
static ALIASES: [(&str, Quality); 10] = [
    ("qq", Quality::QQ),
    ("soxr_qq", Quality::QQ),
    ("lq", Quality::LQ),
    ("soxr_lq", Quality::LQ),
    ("mq", Quality::MQ),
    ("soxr_mq", Quality::MQ),
    ("hq", Quality::HQ),
    ("soxr_hq", Quality::HQ),
    ("vhq", Quality::VHQ),
    ("soxr_vhq", Quality::VHQ),
];

impl Quality {
    /// All presets, lowest to highest fidelity.
    pub const ALL: [Self; 5] = [Self::QQ, Self::LQ, Self::MQ, Self::HQ, Self::VHQ];

    /// Canonical spelling of the preset.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::QQ => "QQ",
            Self::LQ => "LQ",
            Self::MQ => "MQ",
            Self::HQ => "HQ",
            Self::VHQ => "VHQ",
        }
    }
}

impl Default for Quality {
    fn default() -> Self {
        crate::constants::DEFAULT_QUALITY
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        quality_to_enum(s)
    }
}

/// Resolve a quality token such as `"HQ"`, `"vhq"` or `"SOXR_MQ"`.
pub fn quality_to_enum(token: &str) -> Result<Quality> {
    let token = token.trim();
    ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(token))
        .map(|&(_, quality)| quality)
        .ok_or_else(|| Error::InvalidQuality {
            token: token.to_string(),
        })
}
