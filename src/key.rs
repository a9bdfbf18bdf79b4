//! Birth keys: the derived identity a generated fortune is cached under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::KEY_SEPARATOR;
use crate::types::{Day, Month, Year};
use crate::{BirthDate, DateError, prelude::*};

/// The text-generation backend a fortune is produced by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiModel {
    #[display(fmt = "openai")]
    OpenAi,
    /// The form's default backend.
    #[default]
    #[display(fmt = "gemini")]
    Gemini,
}

impl FromStr for AiModel {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "openai" => Ok(Self::OpenAi),
            "gemini" => Ok(Self::Gemini),
            other => Err(KeyError::UnknownModel(other.to_owned())),
        }
    }
}

/// Error type for birth key operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// Not the `year-month-day-model` shape.
    #[error("Invalid birth key format: {0}")]
    InvalidFormat(String),

    /// Unrecognized backend name.
    #[error("Unknown model: {0}")]
    UnknownModel(String),

    /// Error validating a date component.
    #[error(transparent)]
    Date(#[from] DateError),
}

/// Cache identity for one generated fortune: birth date plus backend.
///
/// Renders as the unpadded `year-month-day-model` string (`1991-8-15-gemini`)
/// and round-trips through `FromStr`; serde uses the same string form. The
/// day component is only checked structurally, since a key may name a lunar
/// date whose month length no solar rule predicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthKey {
    date: BirthDate,
    model: AiModel,
}

impl BirthKey {
    pub const fn new(date: BirthDate, model: AiModel) -> Self {
        Self { date, model }
    }

    pub const fn date(&self) -> BirthDate {
        self.date
    }

    pub const fn model(&self) -> AiModel {
        self.model
    }
}

impl fmt::Display for BirthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{sep}{}{sep}{}{sep}{}",
            self.date.year(),
            self.date.month(),
            self.date.day(),
            self.model,
            sep = KEY_SEPARATOR
        )
    }
}

impl FromStr for BirthKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let parts: Vec<&str> = trimmed.split(KEY_SEPARATOR).map(|p| p.trim()).collect();
        let [year_str, month_str, day_str, model_str] = parts[..] else {
            return Err(KeyError::InvalidFormat(trimmed.to_owned()));
        };

        let year_u16 = year_str
            .parse::<u16>()
            .map_err(|_| KeyError::InvalidFormat(year_str.to_owned()))?;
        let month_u8 = month_str
            .parse::<u8>()
            .map_err(|_| KeyError::InvalidFormat(month_str.to_owned()))?;
        let day_u8 = day_str
            .parse::<u8>()
            .map_err(|_| KeyError::InvalidFormat(day_str.to_owned()))?;

        let year = Year::new(year_u16)?;
        let month = Month::new(month_u8)?;
        let day = Day::try_from(day_u8)?;
        let model = model_str.parse::<AiModel>()?;

        Ok(Self::new(BirthDate::new(year, month, day), model))
    }
}

impl Serialize for BirthKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for BirthKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
