use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Serialize, Serializer};

/// A July-to-June reporting period, identified by its starting calendar year.
///
/// Every view that produces a "tax year" label goes through this type, so the
/// bucketing rule exists in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FinancialYear(i32);

impl FinancialYear {
    /// Buckets a date: before July it belongs to the year that started the
    /// previous July, from July onward to the year starting this July.
    pub fn of(date: NaiveDate) -> Self {
        if date.month() < 7 {
            FinancialYear(date.year() - 1)
        } else {
            FinancialYear(date.year())
        }
    }

    pub fn start_year(&self) -> i32 {
        self.0
    }

    /// Renders the conventional label, e.g. `2022-2023`.
    pub fn label(&self) -> String {
        format!("{}-{}", self.0, self.0 + 1)
    }
}

impl fmt::Display for FinancialYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.0 + 1)
    }
}

impl Serialize for FinancialYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.label())
    }
}
