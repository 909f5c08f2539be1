use std::{fmt, str::FromStr};

use thiserror::Error;

const SI_BASE: u64 = 1000;
const IEC_BASE: u64 = 1024;

const SI_UNITS: [&str; 6] = ["K", "M", "G", "T", "P", "E"];
const IEC_UNITS: [&str; 6] = ["Ki", "Mi", "Gi", "Ti", "Pi", "Ei"];

/// A number of bytes, written with an optional SI or IEC unit.
///
/// `"10K"` is 10,000 and `"10Ki"` is 10,240. Units range from kilo/kibi to
/// exa/exbi, are case-insensitive and may be followed by `B`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSize(pub u64);

/// Why a byte size string was refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ByteSizeError {
    /// The text does not start with a number
    #[error("'{0}' does not start with a number")]
    MissingNumber(String),

    /// Something other than a unit follows the number
    #[error("'{0}' has an unknown unit")]
    UnknownUnit(String),

    /// The value does not fit into 64 bits
    #[error("'{0}' is too large")]
    Overflow(String),
}

impl FromStr for ByteSize {
    type Err = ByteSizeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let digits_end = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());

        if digits_end == 0 {
            return Err(ByteSizeError::MissingNumber(s.to_string()));
        }

        let number: u64 = text[..digits_end]
            .parse()
            .map_err(|_| ByteSizeError::Overflow(s.to_string()))?;

        let mut unit = text[digits_end..].trim_start().chars().peekable();

        let power = match unit.peek().map(char::to_ascii_uppercase) {
            Some('K') => 1,
            Some('M') => 2,
            Some('G') => 3,
            Some('T') => 4,
            Some('P') => 5,
            Some('E') => 6,
            _ => 0,
        };

        let mut base = SI_BASE;
        if power > 0 {
            unit.next();
            if unit.peek().is_some_and(|c| c.eq_ignore_ascii_case(&'i')) {
                base = IEC_BASE;
                unit.next();
            }
        }

        if unit.peek().is_some_and(|c| c.eq_ignore_ascii_case(&'b')) {
            unit.next();
        }

        if unit.any(|c| !c.is_whitespace()) {
            return Err(ByteSizeError::UnknownUnit(s.to_string()));
        }

        (0..power)
            .try_fold(number, |value, _| value.checked_mul(base))
            .map(ByteSize)
            .ok_or_else(|| ByteSizeError::Overflow(s.to_string()))
    }
}

impl fmt::Display for ByteSize {
    /// Writes the shortest exact form, preferring SI over IEC units.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (mut value, units, base) = match self.0 {
            0 => return write!(f, "0"),
            v if v % SI_BASE == 0 => (v, &SI_UNITS, SI_BASE),
            v if v % IEC_BASE == 0 => (v, &IEC_UNITS, IEC_BASE),
            v => return write!(f, "{v}"),
        };

        let mut order = 0;
        while value % base == 0 && order < units.len() {
            value /= base;
            order += 1;
        }

        write!(f, "{value}{}", units[order - 1])
    }
}

impl From<u64> for ByteSize {
    fn from(value: u64) -> Self {
        ByteSize(value)
    }
}

impl From<ByteSize> for u64 {
    fn from(value: ByteSize) -> Self {
        value.0
    }
}
