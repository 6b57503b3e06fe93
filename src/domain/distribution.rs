use serde::Serialize;
use thiserror::Error;

/// Smallest value a three-digit draw can take.
pub const INTERVAL_MIN: i32 = 0;
/// Largest value a three-digit draw can take.
pub const INTERVAL_MAX: i32 = 999;
/// Number of integers in `[INTERVAL_MIN, INTERVAL_MAX]`.
pub const INTERVAL_SCALE: f64 = 1000.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionEntry {
    pub year: i32,
    pub total_rainfall: f64,
    pub probability: f64,
    pub cumulative_probability: f64,
    pub lower_bound: i32,
    pub upper_bound: i32,
}

impl DistributionEntry {
    pub fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound
    }

    /// Number of integers covered by this entry. Zero-width entries are legal.
    pub fn width(&self) -> i32 {
        (self.upper_bound - self.lower_bound + 1).max(0)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PartitionFault {
    #[error("distribution table has no entries")]
    Empty,
    #[error("first interval starts at {0} instead of 0")]
    FirstLowerBound(i32),
    #[error("last interval ends at {0} instead of 999")]
    LastUpperBound(i32),
    #[error("interval {index} starts at {lower_bound}, expected {expected}")]
    Discontiguous {
        index: usize,
        lower_bound: i32,
        expected: i32,
    },
    #[error("interval {index} has negative width ({lower_bound}..={upper_bound})")]
    NegativeWidth {
        index: usize,
        lower_bound: i32,
        upper_bound: i32,
    },
}

/// Year-ordered interval table over `[0, 999]`.
///
/// Built once per simulation run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DistributionTable {
    entries: Vec<DistributionEntry>,
}

impl DistributionTable {
    /// Wraps entries as-is. Call [`DistributionTable::check_partition`] before
    /// trusting a table that did not come from the distribution builder.
    pub fn from_entries(entries: Vec<DistributionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DistributionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the entry whose inclusive range contains `value`.
    ///
    /// Upper bounds are non-decreasing in a valid table, so the first entry
    /// whose upper bound reaches `value` is the only candidate.
    pub fn lookup(&self, value: i32) -> Option<&DistributionEntry> {
        let index = self
            .entries
            .partition_point(|entry| entry.upper_bound < value);
        self.entries
            .get(index)
            .filter(|entry| entry.contains(value))
    }

    /// Verifies that the intervals partition `[0, 999]` with no gap and no overlap.
    pub fn check_partition(&self) -> Result<(), PartitionFault> {
        let first = self.entries.first().ok_or(PartitionFault::Empty)?;
        if first.lower_bound != INTERVAL_MIN {
            return Err(PartitionFault::FirstLowerBound(first.lower_bound));
        }

        let mut expected = INTERVAL_MIN;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.lower_bound != expected {
                return Err(PartitionFault::Discontiguous {
                    index,
                    lower_bound: entry.lower_bound,
                    expected,
                });
            }
            if entry.upper_bound < entry.lower_bound - 1 {
                return Err(PartitionFault::NegativeWidth {
                    index,
                    lower_bound: entry.lower_bound,
                    upper_bound: entry.upper_bound,
                });
            }
            expected = entry.upper_bound + 1;
        }

        match self.entries.last() {
            Some(last) if last.upper_bound != INTERVAL_MAX => {
                Err(PartitionFault::LastUpperBound(last.upper_bound))
            }
            _ => Ok(()),
        }
    }
}
