//! Form-state reducer for the birth-date selectors.
//!
//! The form owns one [`FormState`] value and feeds every selector change
//! through [`FormState::apply`], which returns the next state with any
//! dependent fields cleared. Nothing here mutates in place, so the cascade
//! rules are testable without a UI.

use crate::consts::{MAX_DAY, MAX_MONTH, MIN_BIRTH_YEAR, MIN_DAY};
use crate::lunar::{LunarTable, LunarTableError, MonthOption, lunar_month_options};
use crate::types::{Month, Year, days_in_solar_month};
use crate::{Calendar, PartialBirthDate};
use serde::{Deserialize, Serialize};

/// A single selector change event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldChange {
    Calendar(Calendar),
    Year(u16),
    /// Month selection carries the leap flag of the chosen entry, so
    /// selecting a leap month never requires a separate user action.
    Month(MonthOption),
    Day(u8),
}

/// The editing state of the birth-date form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub calendar: Calendar,
    pub year: Option<u16>,
    pub month: Option<u8>,
    pub leap_month: bool,
    pub day: Option<u8>,
}

impl FormState {
    /// The empty state the form mounts with.
    pub const fn new() -> Self {
        Self {
            calendar: Calendar::Solar,
            year: None,
            month: None,
            leap_month: false,
            day: None,
        }
    }

    /// The date fields, for handing to [`Validator::check`](crate::Validator::check).
    pub const fn partial(&self) -> PartialBirthDate {
        PartialBirthDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }

    /// Applies one selector change and returns the next state.
    ///
    /// Clearing rules:
    /// - a calendar change clears month and day and resets the leap flag;
    /// - a year change clears whatever the new year no longer supports
    ///   (a vanished leap month clears month, day and the flag; a shorter
    ///   month clears just the day);
    /// - a month change clears a day beyond the new month's length and
    ///   takes its leap flag from the chosen entry.
    ///
    /// A lunar table failure clears the fields that depended on the answer;
    /// the reducer itself never fails, since the form has to keep working.
    pub fn apply<T: LunarTable>(&self, change: FieldChange, table: &T) -> Self {
        match change {
            FieldChange::Calendar(calendar) => {
                if calendar == self.calendar {
                    return *self;
                }
                Self {
                    calendar,
                    year: self.year,
                    month: None,
                    leap_month: false,
                    day: None,
                }
            }
            FieldChange::Year(new_year) => self.with_year(new_year, table),
            FieldChange::Month(option) => self.with_month(option, table),
            FieldChange::Day(day) => Self {
                day: Some(day),
                ..*self
            },
        }
    }

    fn with_year<T: LunarTable>(&self, new_year: u16, table: &T) -> Self {
        let mut next = Self {
            year: Some(new_year),
            ..*self
        };
        let Some(m) = self.month else {
            return next;
        };

        match self.calendar {
            Calendar::Solar => {
                if let Some(d) = self.day {
                    if !(1..=MAX_MONTH).contains(&m) || d > days_in_solar_month(new_year, m) {
                        next.day = None;
                    }
                }
            }
            Calendar::Lunar => match lunar_day_limit(new_year, m, self.leap_month, table) {
                Ok(Some(max_day)) => {
                    if self.day.is_some_and(|d| d > max_day) {
                        next.day = None;
                    }
                }
                Ok(None) => {
                    // the selected month (or its leap slot) does not exist
                    // in the new year
                    next.month = None;
                    next.leap_month = false;
                    next.day = None;
                }
                Err(err) => {
                    tracing::warn!(%err, "lunar table could not answer; clearing month and day");
                    next.month = None;
                    next.leap_month = false;
                    next.day = None;
                }
            },
        }
        next
    }

    fn with_month<T: LunarTable>(&self, option: MonthOption, table: &T) -> Self {
        let mut next = Self {
            month: Some(option.month.get()),
            leap_month: option.leap,
            ..*self
        };
        let (Some(y), Some(d)) = (self.year, self.day) else {
            return next;
        };

        let max_day = match self.calendar {
            Calendar::Solar => days_in_solar_month(y, option.month.get()),
            Calendar::Lunar => match lunar_day_limit(y, option.month.get(), option.leap, table) {
                Ok(Some(max)) => max,
                Ok(None) => {
                    next.day = None;
                    return next;
                }
                Err(err) => {
                    tracing::warn!(%err, "lunar table could not answer; clearing day");
                    next.day = None;
                    return next;
                }
            },
        };
        if d > max_day {
            next.day = None;
        }
        next
    }

    /// Years for the year selector, newest first.
    pub fn year_options(current_year: u16) -> Vec<u16> {
        (MIN_BIRTH_YEAR..=current_year).rev().collect()
    }

    /// Entries for the month selector under the current calendar and year.
    ///
    /// Solar years, lunar years the table cannot answer for, and the
    /// no-year-yet state all get the twelve regular months.
    pub fn month_options<T: LunarTable>(&self, table: &T) -> Vec<MonthOption> {
        if self.calendar == Calendar::Lunar {
            if let Some(year) = self.year.and_then(|y| Year::new(y).ok()) {
                match lunar_month_options(table, year) {
                    Ok(options) => return options,
                    Err(err) => {
                        tracing::warn!(%err, "lunar table could not answer; offering regular months");
                    }
                }
            }
        }
        regular_months()
    }

    /// Days for the day selector: `1..=31` until year and month pin the
    /// real length down.
    pub fn day_options<T: LunarTable>(&self, table: &T) -> Vec<u8> {
        (MIN_DAY..=self.max_day(table)).collect()
    }

    fn max_day<T: LunarTable>(&self, table: &T) -> u8 {
        let (Some(y), Some(m)) = (self.year, self.month) else {
            return MAX_DAY;
        };
        match self.calendar {
            Calendar::Solar => {
                if (1..=MAX_MONTH).contains(&m) {
                    days_in_solar_month(y, m)
                } else {
                    MAX_DAY
                }
            }
            Calendar::Lunar => match lunar_day_limit(y, m, self.leap_month, table) {
                Ok(Some(max)) => max,
                Ok(None) => MAX_DAY,
                Err(err) => {
                    tracing::warn!(%err, "lunar table could not answer; offering placeholder days");
                    MAX_DAY
                }
            },
        }
    }
}

/// Day count of the given lunar month, `Ok(None)` when the month (or its
/// leap slot) does not exist in that year.
fn lunar_day_limit<T: LunarTable>(
    year: u16,
    month: u8,
    leap: bool,
    table: &T,
) -> Result<Option<u8>, LunarTableError> {
    let (Ok(y), Ok(m)) = (Year::new(year), Month::new(month)) else {
        return Ok(None);
    };
    if leap && table.leap_month(y)? != Some(m) {
        return Ok(None);
    }
    Ok(Some(table.days_in_month(y, m, leap)?))
}

fn regular_months() -> Vec<MonthOption> {
    let mut options = Vec::with_capacity(MAX_MONTH as usize);
    for number in 1..=MAX_MONTH {
        if let Ok(month) = Month::new(number) {
            options.push(MonthOption::regular(month));
        }
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lunar::EmbeddedLunarTable;
    use crate::test_utils::month;

    fn table() -> EmbeddedLunarTable {
        EmbeddedLunarTable::new()
    }

    fn lunar_state(year: u16, m: u8, leap: bool, day: u8) -> FormState {
        FormState {
            calendar: Calendar::Lunar,
            year: Some(year),
            month: Some(m),
            leap_month: leap,
            day: Some(day),
        }
    }

    #[test]
    fn test_new_state_is_empty_solar() {
        let state = FormState::new();
        assert_eq!(state.calendar, Calendar::Solar);
        assert_eq!(state.year, None);
        assert_eq!(state.month, None);
        assert_eq!(state.day, None);
        assert!(!state.leap_month);
        assert!(!state.partial().is_complete());
    }

    #[test]
    fn test_calendar_change_clears_month_and_day() {
        let state = FormState {
            calendar: Calendar::Solar,
            year: Some(1991),
            month: Some(8),
            leap_month: false,
            day: Some(15),
        };
        let next = state.apply(FieldChange::Calendar(Calendar::Lunar), &table());
        assert_eq!(next.calendar, Calendar::Lunar);
        assert_eq!(next.year, Some(1991));
        assert_eq!(next.month, None);
        assert_eq!(next.day, None);
        assert!(!next.leap_month);
    }

    #[test]
    fn test_calendar_reselect_is_a_no_op() {
        let state = FormState {
            calendar: Calendar::Solar,
            year: Some(1991),
            month: Some(8),
            leap_month: false,
            day: Some(15),
        };
        let next = state.apply(FieldChange::Calendar(Calendar::Solar), &table());
        assert_eq!(next, state);
    }

    #[test]
    fn test_year_change_clears_overflowing_solar_day() {
        // Feb 29 survives only in leap years
        let state = FormState {
            calendar: Calendar::Solar,
            year: Some(2024),
            month: Some(2),
            leap_month: false,
            day: Some(29),
        };
        let next = state.apply(FieldChange::Year(2023), &table());
        assert_eq!(next.year, Some(2023));
        assert_eq!(next.month, Some(2));
        assert_eq!(next.day, None);

        // ...and survives a change to another leap year
        let next = state.apply(FieldChange::Year(2020), &table());
        assert_eq!(next.day, Some(29));
    }

    #[test]
    fn test_year_change_clears_vanished_leap_month() {
        // 2023's leap month 2 does not exist in 2024
        let state = lunar_state(2023, 2, true, 29);
        let next = state.apply(FieldChange::Year(2024), &table());
        assert_eq!(next.year, Some(2024));
        assert_eq!(next.month, None);
        assert_eq!(next.day, None);
        assert!(!next.leap_month);
    }

    #[test]
    fn test_year_change_keeps_regular_lunar_month() {
        let state = lunar_state(2023, 2, false, 28);
        let next = state.apply(FieldChange::Year(2024), &table());
        assert_eq!(next.month, Some(2));
        assert_eq!(next.day, Some(28));
        assert!(!next.leap_month);
    }

    #[test]
    fn test_year_change_clears_overflowing_lunar_day() {
        // 2023 lunar month 2 has 30 days; 2025's has 29
        let state = lunar_state(2023, 2, false, 30);
        let next = state.apply(FieldChange::Year(2025), &table());
        assert_eq!(next.month, Some(2));
        assert_eq!(next.day, None);
    }

    #[test]
    fn test_year_change_outside_table_clears_lunar_fields() {
        let state = lunar_state(2023, 2, false, 15);
        let next = state.apply(FieldChange::Year(2050), &table());
        assert_eq!(next.year, Some(2050));
        assert_eq!(next.month, None);
        assert_eq!(next.day, None);
        assert!(!next.leap_month);
    }

    #[test]
    fn test_month_change_clears_overflowing_day() {
        let state = FormState {
            calendar: Calendar::Solar,
            year: Some(2023),
            month: Some(1),
            leap_month: false,
            day: Some(31),
        };
        let next = state.apply(FieldChange::Month(MonthOption::regular(month(4))), &table());
        assert_eq!(next.month, Some(4));
        assert_eq!(next.day, None);

        let next = state.apply(FieldChange::Month(MonthOption::regular(month(3))), &table());
        assert_eq!(next.day, Some(31));
    }

    #[test]
    fn test_month_change_sets_leap_flag_from_option() {
        let state = lunar_state(2023, 1, false, 15);
        let next = state.apply(FieldChange::Month(MonthOption::leap(month(2))), &table());
        assert_eq!(next.month, Some(2));
        assert!(next.leap_month);

        let back = next.apply(FieldChange::Month(MonthOption::regular(month(2))), &table());
        assert!(!back.leap_month);
    }

    #[test]
    fn test_month_change_without_year_keeps_day() {
        let state = FormState {
            calendar: Calendar::Solar,
            year: None,
            month: Some(1),
            leap_month: false,
            day: Some(31),
        };
        let next = state.apply(FieldChange::Month(MonthOption::regular(month(4))), &table());
        assert_eq!(next.day, Some(31));
    }

    #[test]
    fn test_day_change_has_no_cascade() {
        let state = FormState {
            calendar: Calendar::Solar,
            year: Some(1991),
            month: Some(8),
            leap_month: false,
            day: None,
        };
        let next = state.apply(FieldChange::Day(15), &table());
        assert_eq!(next.day, Some(15));
        assert_eq!(next.year, Some(1991));
        assert_eq!(next.month, Some(8));
    }

    #[test]
    fn test_year_options_descend_to_floor() {
        let years = FormState::year_options(2025);
        assert_eq!(years.first(), Some(&2025));
        assert_eq!(years.last(), Some(&1900));
        assert_eq!(years.len(), 126);
    }

    #[test]
    fn test_month_options_solar() {
        let state = FormState {
            calendar: Calendar::Solar,
            year: Some(2023),
            ..FormState::new()
        };
        let options = state.month_options(&table());
        assert_eq!(options.len(), 12);
        assert!(options.iter().all(|o| !o.leap));
    }

    #[test]
    fn test_month_options_lunar_leap_year() {
        let state = FormState {
            calendar: Calendar::Lunar,
            year: Some(2023),
            ..FormState::new()
        };
        let options = state.month_options(&table());
        assert_eq!(options.len(), 13);
        assert_eq!(options[2], MonthOption::leap(month(2)));
    }

    #[test]
    fn test_month_options_lunar_without_year_falls_back() {
        let state = FormState {
            calendar: Calendar::Lunar,
            ..FormState::new()
        };
        assert_eq!(state.month_options(&table()).len(), 12);
    }

    #[test]
    fn test_day_options_placeholder_until_complete() {
        let state = FormState::new();
        assert_eq!(state.day_options(&table()).len(), 31);

        let state = FormState {
            year: Some(2023),
            ..FormState::new()
        };
        assert_eq!(state.day_options(&table()).len(), 31);
    }

    #[test]
    fn test_day_options_solar() {
        let state = FormState {
            calendar: Calendar::Solar,
            year: Some(2023),
            month: Some(4),
            leap_month: false,
            day: None,
        };
        assert_eq!(state.day_options(&table()).len(), 30);

        let state = FormState {
            month: Some(2),
            ..state
        };
        assert_eq!(state.day_options(&table()).len(), 28);
    }

    #[test]
    fn test_day_options_lunar() {
        let state = lunar_state(2023, 2, false, 1);
        assert_eq!(state.day_options(&table()).len(), 30);

        let state = lunar_state(2023, 2, true, 1);
        assert_eq!(state.day_options(&table()).len(), 29);
    }

    #[test]
    fn test_reducer_is_pure() {
        let state = lunar_state(2023, 2, true, 29);
        let before = state;
        let _ = state.apply(FieldChange::Year(2024), &table());
        assert_eq!(state, before);
    }

    #[test]
    fn test_serde_round_trip() {
        let state = lunar_state(2023, 2, true, 29);
        let json = serde_json::to_string(&state).unwrap();
        let parsed: FormState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, parsed);
    }
}
