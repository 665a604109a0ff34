//! Boundary translation for transports that cannot carry a real null.
//!
//! Callers encode an absent value as an out-of-domain number (`-999` by
//! convention). The translation turns those cells into proper missing values
//! before validation, so rule checks only ever see `None`.

use std::borrow::Cow;

use crate::batch::TabularBatch;

/// Conventional code for "missing" used by upstream batch producers.
pub const DEFAULT_MISSING_CODE: f64 = -999.0;

/// A numeric code that stands for a missing value on the wire.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissingSentinel(f64);

impl MissingSentinel {
    pub fn new(code: f64) -> Self {
        Self(code)
    }

    pub fn code(&self) -> f64 {
        self.0
    }

    fn matches(&self, value: f64) -> bool {
        value == self.0
    }

    /// Replace sentinel-valued cells with missing values, returning the number
    /// of cells replaced.
    pub fn apply(&self, batch: &mut TabularBatch) -> usize {
        let mut replaced = 0;
        for cell in batch.cells_mut() {
            if cell.is_some_and(|v| self.matches(v)) {
                *cell = None;
                replaced += 1;
            }
        }
        replaced
    }

    /// Translated view of `batch`; borrows it untouched when no cell carries
    /// the sentinel.
    pub fn normalize<'a>(&self, batch: &'a TabularBatch) -> Cow<'a, TabularBatch> {
        let present = batch
            .field_names()
            .filter_map(|f| batch.column(f))
            .flatten()
            .any(|cell| cell.is_some_and(|v| self.matches(v)));

        if present {
            let mut owned = batch.clone();
            self.apply(&mut owned);
            Cow::Owned(owned)
        } else {
            Cow::Borrowed(batch)
        }
    }
}

impl Default for MissingSentinel {
    fn default() -> Self {
        Self(DEFAULT_MISSING_CODE)
    }
}
