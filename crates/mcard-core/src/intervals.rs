// Copyright 2026 The mcard Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The forgetting-curve interval table.

use serde::Deserialize;
use serde::Serialize;

use crate::error::SchedulerError;

/// Review offsets in days used when no table is configured.
pub const DEFAULT_INTERVALS: [u32; 7] = [1, 3, 7, 15, 30, 60, 90];

/// An immutable, strictly increasing sequence of review offsets in days.
/// Entry `i` is the wait after a card reaches interval index `i`.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct IntervalTable {
    days: Vec<u32>,
}

impl IntervalTable {
    pub fn new(days: Vec<u32>) -> Result<Self, SchedulerError> {
        let Some(&first) = days.first() else {
            return Err(SchedulerError::InvalidIntervalTable(
                "table is empty".to_string(),
            ));
        };
        if first < 1 {
            return Err(SchedulerError::InvalidIntervalTable(
                "first interval must be at least one day".to_string(),
            ));
        }
        if let Some(pair) = days.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SchedulerError::InvalidIntervalTable(format!(
                "{} is not followed by a longer interval",
                pair[0]
            )));
        }
        Ok(Self { days })
    }

    /// The interval in days at `index`.
    pub fn at(&self, index: usize) -> Result<u32, SchedulerError> {
        self.days
            .get(index)
            .copied()
            .ok_or(SchedulerError::OutOfRange {
                index,
                len: self.days.len(),
            })
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always false: construction rejects empty tables.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.days.len() - 1
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.days.iter().copied()
    }
}

impl Default for IntervalTable {
    fn default() -> Self {
        Self {
            days: DEFAULT_INTERVALS.to_vec(),
        }
    }
}

impl TryFrom<Vec<u32>> for IntervalTable {
    type Error = SchedulerError;

    fn try_from(value: Vec<u32>) -> Result<Self, Self::Error> {
        IntervalTable::new(value)
    }
}

impl From<IntervalTable> for Vec<u32> {
    fn from(table: IntervalTable) -> Vec<u32> {
        table.days
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = IntervalTable::default();
        assert_eq!(table.len(), 7);
        assert_eq!(table.at(0), Ok(1));
        assert_eq!(table.at(6), Ok(90));
        assert_eq!(table.last_index(), 6);
    }

    #[test]
    fn test_out_of_range() {
        let table = IntervalTable::default();
        assert_eq!(
            table.at(7),
            Err(SchedulerError::OutOfRange { index: 7, len: 7 })
        );
    }

    #[test]
    fn test_rejects_invalid_tables() {
        assert!(IntervalTable::new(vec![]).is_err());
        assert!(IntervalTable::new(vec![0, 1, 2]).is_err());
        assert!(IntervalTable::new(vec![1, 3, 3]).is_err());
        assert!(IntervalTable::new(vec![1, 7, 3]).is_err());
        assert!(IntervalTable::new(vec![2]).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let table: IntervalTable = serde_json::from_str("[1, 3, 7]").unwrap();
        assert_eq!(table.iter().collect::<Vec<_>>(), vec![1, 3, 7]);
        assert!(serde_json::from_str::<IntervalTable>("[3, 1]").is_err());
    }
}
