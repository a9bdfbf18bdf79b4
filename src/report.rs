//! Typed fortune payload returned by the AI backends.
//!
//! The backends are prompted for a fixed camelCase JSON shape; parsing it
//! into [`FortuneReport`] validates the numeric fields so nothing
//! out-of-range reaches rendering or the cache.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// Highest category score
const MAX_SCORE: u8 = 5;
/// Highest lucky number
const MAX_LUCKY_NUMBER: u8 = 9;

/// Error type for fortune payload handling.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    /// A numeric field is outside its prompted range.
    #[error("Invalid {what}: {value} (must be 1-{max})")]
    OutOfRange {
        what: &'static str,
        value: u8,
        max: u8,
    },

    /// The payload is not the prompted JSON shape.
    #[error("invalid fortune payload: {0}")]
    Parse(String),
}

/// A category score in `1..=5`.
/// Uses `NonZeroU8` internally, so 0 is not a valid score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Score(NonZeroU8);

impl Score {
    /// # Errors
    /// Returns `ReportError::OutOfRange` if the value is 0 or > 5.
    pub fn new(value: u8) -> Result<Self, ReportError> {
        let non_zero = NonZeroU8::new(value).ok_or(ReportError::OutOfRange {
            what: "score",
            value,
            max: MAX_SCORE,
        })?;
        if value > MAX_SCORE {
            return Err(ReportError::OutOfRange {
                what: "score",
                value,
                max: MAX_SCORE,
            });
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Score {
    type Error = ReportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0.get()
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lucky number in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LuckyNumber(NonZeroU8);

impl LuckyNumber {
    /// # Errors
    /// Returns `ReportError::OutOfRange` if the value is 0 or > 9.
    pub fn new(value: u8) -> Result<Self, ReportError> {
        let non_zero = NonZeroU8::new(value).ok_or(ReportError::OutOfRange {
            what: "lucky number",
            value,
            max: MAX_LUCKY_NUMBER,
        })?;
        if value > MAX_LUCKY_NUMBER {
            return Err(ReportError::OutOfRange {
                what: "lucky number",
                value,
                max: MAX_LUCKY_NUMBER,
            });
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for LuckyNumber {
    type Error = ReportError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LuckyNumber> for u8 {
    fn from(number: LuckyNumber) -> Self {
        number.0.get()
    }
}

impl fmt::Display for LuckyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One generated fortune, as prompted from the backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneReport {
    pub overall_fortune: String,
    pub love_fortune: String,
    pub career_fortune: String,
    pub money_fortune: String,
    pub health_fortune: String,
    pub lucky_number: LuckyNumber,
    pub lucky_color: String,
    pub lucky_direction: String,
    pub today_advice: String,
    pub warning_advice: String,
    pub overall_score: Score,
    pub love_score: Score,
    pub career_score: Score,
    pub money_score: Score,
    pub health_score: Score,
}

impl FortuneReport {
    /// Parses a backend response body.
    ///
    /// # Errors
    /// Returns `ReportError::Parse` for malformed JSON, missing fields, or
    /// numeric fields outside their prompted ranges.
    pub fn parse(json: &str) -> Result<Self, ReportError> {
        serde_json::from_str(json).map_err(|err| ReportError::Parse(err.to_string()))
    }
}
