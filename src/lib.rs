mod cache;
mod config;
mod consts;
mod form;
mod key;
mod lunar;
mod prelude;
mod prompt;
mod report;
mod types;

#[cfg(test)]
mod test_utils;

pub use cache::{FortuneCache, StoredFortune};
pub use config::{ConfigError, KeyCell, ProviderKeys};
pub use consts::*;
pub use form::{FieldChange, FormState};
pub use key::{AiModel, BirthKey, KeyError};
pub use lunar::{
    EmbeddedLunarTable, LUNAR_TABLE_FIRST_YEAR, LUNAR_TABLE_LAST_YEAR, LunarTable,
    LunarTableError, MonthOption, lunar_month_options,
};
pub use prompt::{Language, PromptTemplate, template_for};
pub use report::{FortuneReport, LuckyNumber, ReportError, Score};
pub use types::{Day, Month, Year, days_in_solar_month, is_leap_year};

use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// The calendar system a birth date is expressed in.
///
/// Month and day counts are not comparable across systems, so switching
/// systems invalidates any previously chosen month and day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Calendar {
    /// Proleptic Gregorian calendar
    #[default]
    #[display(fmt = "solar")]
    Solar,
    /// East Asian lunisolar calendar
    #[display(fmt = "lunar")]
    Lunar,
}

/// A birth date while it is being edited: any subset of fields may be unset.
///
/// Holds the raw selector integers; typed values exist only after
/// [`Validator::check`] succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialBirthDate {
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub day: Option<u8>,
}

impl PartialBirthDate {
    /// An empty date, as the form starts out.
    pub const fn new() -> Self {
        Self {
            year: None,
            month: None,
            day: None,
        }
    }

    /// All three fields filled in (validity aside)
    pub const fn is_complete(&self) -> bool {
        self.year.is_some() && self.month.is_some() && self.day.is_some()
    }

    pub const fn from_parts(year: u16, month: u8, day: u8) -> Self {
        Self {
            year: Some(year),
            month: Some(month),
            day: Some(day),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_BIRTH_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
}

impl std::error::Error for DateError {}

/// A validated birth date.
///
/// Constructed by [`Validator::check`]; once built it is immutable and is
/// handed to collaborators as a plain three-integer record via
/// [`BirthDate::to_parts`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.get()", "day.get()")]
pub struct BirthDate {
    year: Year,
    month: Month,
    day: Day,
}

impl BirthDate {
    /// Creates a birth date from already-validated components
    pub const fn new(year: Year, month: Month, day: Day) -> Self {
        Self { year, month, day }
    }

    /// Returns the year component (as u16 for convenience)
    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    /// Returns the month component (as u8 for convenience)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the day component (as u8 for convenience)
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// The plain `(year, month, day)` record handed to collaborators
    pub const fn to_parts(&self) -> (u16, u8, u8) {
        (self.year.get(), self.month.get(), self.day.get())
    }
}

/// Why a birth-date tuple failed validation.
///
/// Everything except `LunarData` is ordinary invalidity; `LunarData` means
/// the table collaborator could not answer at all, which callers may log
/// but must still treat as "not valid".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// One or more of year/month/day is unset.
    #[error("birth date is incomplete")]
    Incomplete,

    /// A component is structurally out of bounds, including a solar day
    /// that would overflow its month (April 31 is rejected, never rolled
    /// over into May 1).
    #[error(transparent)]
    Date(#[from] DateError),

    /// Year is after the latest accepted birth year.
    #[error("year {year} is after the latest accepted year {max}")]
    FutureYear { year: u16, max: u16 },

    /// The leap flag is set but the year's leap month differs, or the year
    /// has no leap month at all.
    #[error("month {month} is not the leap month of year {year}")]
    InvalidLeapMonth { year: u16, month: u8 },

    /// The lunar table has no answer for the requested year.
    #[error(transparent)]
    LunarData(#[from] LunarTableError),
}

/// Pure validity checks over a possibly-incomplete birth date.
///
/// The validator owns the accepted year ceiling and the lunar data source,
/// so `check` is a pure function of its inputs and can run inside any
/// field-change callback. It never mutates state; cascading field clearing
/// is [`FormState`]'s job.
#[derive(Debug, Clone)]
pub struct Validator<T> {
    table: T,
    current_year: u16,
}

impl<T: LunarTable> Validator<T> {
    /// `current_year` is the inclusive ceiling on accepted birth years;
    /// callers supply it so the validator stays clock-free.
    pub const fn new(table: T, current_year: u16) -> Self {
        Self {
            table,
            current_year,
        }
    }

    pub const fn current_year(&self) -> u16 {
        self.current_year
    }

    pub const fn table(&self) -> &T {
        &self.table
    }

    /// Validates the tuple and returns the typed date.
    ///
    /// # Errors
    /// See [`ValidationError`]; ordinary invalidity and missing lunar data
    /// are both errors here, distinguishable by variant.
    pub fn check(
        &self,
        date: &PartialBirthDate,
        calendar: Calendar,
        leap_month: bool,
    ) -> Result<BirthDate, ValidationError> {
        let (Some(y), Some(m), Some(d)) = (date.year, date.month, date.day) else {
            return Err(ValidationError::Incomplete);
        };

        let year = Year::new(y)?;
        if y > self.current_year {
            return Err(ValidationError::FutureYear {
                year: y,
                max: self.current_year,
            });
        }
        let month = Month::new(m)?;

        match calendar {
            Calendar::Solar => {
                let day = Day::new(d, y, m)?;
                Ok(BirthDate::new(year, month, day))
            }
            Calendar::Lunar => {
                if leap_month && self.table.leap_month(year)? != Some(month) {
                    return Err(ValidationError::InvalidLeapMonth { year: y, month: m });
                }
                let max = self.table.days_in_month(year, month, leap_month)?;
                if d == 0 || d > max {
                    return Err(DateError::InvalidDay {
                        month: m,
                        day: d,
                        year: y,
                    }
                    .into());
                }
                let day = Day::try_from(d)?;
                Ok(BirthDate::new(year, month, day))
            }
        }
    }

    /// Boolean form of [`Validator::check`]: every failure is `false`.
    ///
    /// Missing lunar data is logged here so it stays observable without
    /// crashing or blocking the form.
    pub fn is_valid(&self, date: &PartialBirthDate, calendar: Calendar, leap_month: bool) -> bool {
        match self.check(date, calendar, leap_month) {
            Ok(_) => true,
            Err(ValidationError::LunarData(err)) => {
                tracing::warn!(%err, "lunar table could not answer; treating date as invalid");
                false
            }
            Err(_) => false,
        }
    }
}
