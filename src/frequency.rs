//! Sampling-frequency labels such as `"1h"`, `"15min"` or `"1D"`.
//!
//! Only a fixed set of unit suffixes is understood:
//!
//! | suffix        | unit   | minutes |
//! |---------------|--------|---------|
//! | `min`, `T`    | minute | 1       |
//! | `h`, `H`      | hour   | 60      |
//! | `D`, `d`      | day    | 1440    |
//!
//! An optional positive integer multiplier may precede the suffix.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrequencyUnit {
    Minute,
    Hour,
    Day,
}

impl FrequencyUnit {
    pub fn minutes(self) -> i64 {
        match self {
            Self::Minute => 1,
            Self::Hour => 60,
            Self::Day => 1440,
        }
    }

    /// Suffix used in canonical labels.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "D",
        }
    }

    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "min" | "T" => Some(Self::Minute),
            "h" | "H" => Some(Self::Hour),
            "D" | "d" => Some(Self::Day),
            _ => None,
        }
    }
}

/// A parsed sampling frequency: `multiplier` times `unit`.
///
/// # Examples
///
/// ```
/// use solar_sim::frequency::Frequency;
///
/// let freq: Frequency = "15T".parse().unwrap();
/// assert_eq!(freq.minutes(), 15);
/// assert_eq!(freq.to_string(), "15min");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Frequency {
    multiplier: u32,
    unit: FrequencyUnit,
}

impl Frequency {
    pub const HOURLY: Self = Self {
        multiplier: 1,
        unit: FrequencyUnit::Hour,
    };

    /// Returns `None` for a zero multiplier.
    pub fn new(multiplier: u32, unit: FrequencyUnit) -> Option<Self> {
        (multiplier > 0).then_some(Self { multiplier, unit })
    }

    /// Parses a label such as `"1h"`, `"15min"`, `"15T"` or `"1D"`.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::UnknownFrequency` for an unknown suffix, a
    /// missing suffix, or a zero or out-of-range multiplier.
    pub fn parse(label: &str) -> Result<Self, ValidationError> {
        let unknown = || ValidationError::UnknownFrequency(label.to_string());

        let trimmed = label.trim();
        let split = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(unknown)?;
        let (digits, suffix) = trimmed.split_at(split);

        let multiplier = if digits.is_empty() {
            1
        } else {
            digits.parse::<u32>().map_err(|_| unknown())?
        };
        let unit = FrequencyUnit::from_suffix(suffix).ok_or_else(unknown)?;
        Self::new(multiplier, unit).ok_or_else(unknown)
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Step length in minutes.
    pub fn minutes(&self) -> i64 {
        i64::from(self.multiplier) * self.unit.minutes()
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.multiplier, self.unit.suffix())
    }
}

impl Serialize for Frequency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_labels() {
        let cases: &[(&str, i64, &str)] = &[
            ("1h", 60, "1h"),
            ("1H", 60, "1h"),
            ("h", 60, "1h"),
            ("3h", 180, "3h"),
            ("15min", 15, "15min"),
            ("15T", 15, "15min"),
            ("min", 1, "1min"),
            ("1D", 1440, "1D"),
            ("2d", 2880, "2D"),
            (" 30min ", 30, "30min"),
        ];
        for &(label, minutes, canonical) in cases {
            let freq = Frequency::parse(label).unwrap_or_else(|e| panic!("{label}: {e}"));
            assert_eq!(freq.minutes(), minutes, "{label}");
            assert_eq!(freq.to_string(), canonical, "{label}");
        }
    }

    #[test]
    fn unknown_labels_are_rejected() {
        for label in ["invalid", "", "15", "0h", "1W", "1s", "1M", "1.5h", "-1h", "1h30min", "99999999999h"] {
            assert_eq!(
                Frequency::parse(label),
                Err(ValidationError::UnknownFrequency(label.to_string())),
                "{label}"
            );
        }
    }

    #[test]
    fn from_str_matches_parse() {
        let freq: Result<Frequency, _> = "1D".parse();
        assert_eq!(freq, Frequency::parse("1D"));
    }

    #[test]
    fn new_rejects_zero_multiplier() {
        assert!(Frequency::new(0, FrequencyUnit::Hour).is_none());
        assert_eq!(Frequency::new(1, FrequencyUnit::Hour), Some(Frequency::HOURLY));
    }

    #[test]
    fn serializes_as_canonical_label() {
        let value = toml::Value::try_from(Frequency::HOURLY).ok();
        assert_eq!(value.as_ref().and_then(toml::Value::as_str), Some("1h"));
    }
}
