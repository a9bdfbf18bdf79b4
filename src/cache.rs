//! Day-scoped cache of generated fortunes.
//!
//! A fortune is only reusable on the day it was generated for, so lookups
//! carry today's date and anything older is dropped on the next sweep. The
//! serialized form is the map the original client kept under its
//! `daily_fortunes` storage key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::key::BirthKey;
use crate::report::FortuneReport;

/// One cached fortune and the day it was generated for (ISO `YYYY-MM-DD`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFortune {
    pub date: String,
    #[serde(rename = "data")]
    pub report: FortuneReport,
}

/// In-memory map of fortunes keyed by [`BirthKey`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FortuneCache {
    entries: HashMap<BirthKey, StoredFortune>,
}

impl FortuneCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `report` for `key`, replacing any previous entry.
    pub fn insert(&mut self, key: BirthKey, today: impl Into<String>, report: FortuneReport) {
        self.entries.insert(
            key,
            StoredFortune {
                date: today.into(),
                report,
            },
        );
    }

    /// The cached report for `key`, only when it was generated on `today`.
    pub fn get(&self, key: &BirthKey, today: &str) -> Option<&FortuneReport> {
        let stored = self.entries.get(key)?;
        if stored.date == today {
            Some(&stored.report)
        } else {
            None
        }
    }

    /// Drops every entry not generated on `today`.
    pub fn retain_today(&mut self, today: &str) {
        self.entries.retain(|_, stored| stored.date == today);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
