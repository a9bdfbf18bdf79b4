//! East Asian lunisolar calendar data.
//!
//! Day counts and leap months of the lunisolar calendar are observational
//! table data, not something this crate derives. [`LunarTable`] is the seam
//! to that data source; [`EmbeddedLunarTable`] ships the standard published
//! table for birth years 1900..=2049 as packed per-year records.

use crate::types::{Month, Year};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::consts::MAX_MONTH;

/// Days in a long lunar month
const LONG_MONTH: u8 = 30;
/// Days in a short lunar month
const SHORT_MONTH: u8 = 29;

/// Error type for lunar table lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LunarTableError {
    /// The table has no data for the requested year. Distinguishable from
    /// "date is invalid": the caller may log it but must treat the date as
    /// not validatable.
    #[error("lunar calendar data unavailable for year {year}")]
    Unsupported { year: u16 },

    /// A leap day count was requested for a month that is not the leap
    /// month of that year.
    #[error("year {year} has no leap month {month}")]
    NoLeapMonth { year: u16, month: u8 },
}

/// Read-only source of lunisolar calendar facts.
///
/// Implementations must answer synchronously; the validator and the form
/// reducer both query inside a single user-interaction callback.
pub trait LunarTable {
    /// Number of days in the given lunar month.
    ///
    /// With `leap` set, answers for the intercalary month, which must be
    /// the leap month of `year`.
    ///
    /// # Errors
    /// Returns `LunarTableError::Unsupported` outside the covered year range
    /// and `LunarTableError::NoLeapMonth` for a leap query on a non-leap month.
    fn days_in_month(&self, year: Year, month: Month, leap: bool) -> Result<u8, LunarTableError>;

    /// The month number doubled as a leap month in `year`, if any.
    ///
    /// # Errors
    /// Returns `LunarTableError::Unsupported` outside the covered year range.
    fn leap_month(&self, year: Year) -> Result<Option<Month>, LunarTableError>;
}

/// One selectable month entry: a month number plus whether it is the
/// intercalary (leap) month sharing that number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthOption {
    pub month: Month,
    pub leap: bool,
}

impl MonthOption {
    /// A regular (non-leap) month entry.
    pub const fn regular(month: Month) -> Self {
        Self { month, leap: false }
    }

    /// The leap entry sharing `month`'s number.
    pub const fn leap(month: Month) -> Self {
        Self { month, leap: true }
    }
}

impl fmt::Display for MonthOption {
    /// Leap entries render with an `L` suffix (`8L`), matching the month
    /// codes used by lunisolar calendar implementations.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.leap {
            write!(f, "{}L", self.month)
        } else {
            write!(f, "{}", self.month)
        }
    }
}

/// Ordered selector entries for a lunar year: months 1..=12, with the leap
/// entry (when the year has one) inserted immediately after its base month.
///
/// # Errors
/// Returns `LunarTableError::Unsupported` when the table cannot answer for `year`.
pub fn lunar_month_options<T: LunarTable>(
    table: &T,
    year: Year,
) -> Result<Vec<MonthOption>, LunarTableError> {
    let leap_month = table.leap_month(year)?;
    let mut options = Vec::with_capacity(13);
    for number in 1..=MAX_MONTH {
        let Ok(month) = Month::new(number) else {
            continue;
        };
        options.push(MonthOption::regular(month));
        if leap_month == Some(month) {
            options.push(MonthOption::leap(month));
        }
    }
    Ok(options)
}

/// First year covered by [`EmbeddedLunarTable`] (inclusive)
pub const LUNAR_TABLE_FIRST_YEAR: u16 = 1900;

/// Last year covered by [`EmbeddedLunarTable`] (inclusive)
pub const LUNAR_TABLE_LAST_YEAR: u16 = LUNAR_TABLE_FIRST_YEAR + PACKED_YEARS.len() as u16 - 1;

/// One packed record per lunar year:
/// - bits 0..=3: leap month number, 0 when the year has none
/// - bits 4..=15: month lengths for months 12..=1 (bit `16 - m` is month `m`);
///   a set bit is a 30-day month, clear is 29
/// - bit 16: length of the leap month (set is 30 days, clear is 29)
const PACKED_YEARS: [u32; 150] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x06e95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b5a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x055c0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
];

/// The standard published lunisolar year table, compiled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbeddedLunarTable;

impl EmbeddedLunarTable {
    pub const fn new() -> Self {
        Self
    }

    fn packed(year: Year) -> Result<u32, LunarTableError> {
        let y = year.get();
        if !(LUNAR_TABLE_FIRST_YEAR..=LUNAR_TABLE_LAST_YEAR).contains(&y) {
            return Err(LunarTableError::Unsupported { year: y });
        }
        Ok(PACKED_YEARS[(y - LUNAR_TABLE_FIRST_YEAR) as usize])
    }
}

impl LunarTable for EmbeddedLunarTable {
    fn days_in_month(&self, year: Year, month: Month, leap: bool) -> Result<u8, LunarTableError> {
        let packed = Self::packed(year)?;
        if leap {
            if self.leap_month(year)? != Some(month) {
                return Err(LunarTableError::NoLeapMonth {
                    year: year.get(),
                    month: month.get(),
                });
            }
            // bit 16 is the leap month's length
            return Ok(if packed & 0x10000 != 0 {
                LONG_MONTH
            } else {
                SHORT_MONTH
            });
        }
        let bit = 0x10000_u32 >> month.get();
        Ok(if packed & bit != 0 { LONG_MONTH } else { SHORT_MONTH })
    }

    fn leap_month(&self, year: Year) -> Result<Option<Month>, LunarTableError> {
        let nibble = (Self::packed(year)? & 0xf) as u8;
        Ok(match nibble {
            0 => None,
            n => Month::new(n).ok(),
        })
    }
}
