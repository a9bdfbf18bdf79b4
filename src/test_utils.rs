//! Shared constructors for tests.

#![allow(clippy::unwrap_used)]

use crate::lunar::EmbeddedLunarTable;
use crate::types::{Day, Month, Year};
use crate::{BirthDate, PartialBirthDate, Validator};

pub fn year(value: u16) -> Year {
    Year::new(value).unwrap()
}

pub fn month(value: u8) -> Month {
    Month::new(value).unwrap()
}

pub fn day(value: u8, year: u16, month: u8) -> Day {
    Day::new(value, year, month).unwrap()
}

pub fn birth(y: u16, m: u8, d: u8) -> BirthDate {
    BirthDate::new(year(y), month(m), Day::try_from(d).unwrap())
}

pub fn partial(y: u16, m: u8, d: u8) -> PartialBirthDate {
    PartialBirthDate::from_parts(y, m, d)
}

pub fn validator(current_year: u16) -> Validator<EmbeddedLunarTable> {
    Validator::new(EmbeddedLunarTable::new(), current_year)
}
