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

//! Human-readable review timelines for a freshly created batch of cards.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

use crate::error::SchedulerError;
use crate::intervals::IntervalTable;
use crate::types::date::Date;
use crate::types::word::Word;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum PlanEntryKind {
    FirstStudy,
    /// The `ordinal`-th review, starting at one.
    Review { ordinal: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlanEntry {
    pub label: String,
    #[serde(flatten)]
    pub kind: PlanEntryKind,
    pub offset_days: u32,
    pub date: Date,
    pub words: Vec<Word>,
}

/// A projection of when a batch would be reviewed if every review succeeds.
/// Each card's own due date is authoritative once outcomes diverge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReviewPlan {
    pub entries: Vec<PlanEntry>,
}

/// Fails with `DateOverflow` if a review would land past the end of the
/// calendar.
pub fn build_plan(
    words: &[Word],
    start_date: Date,
    table: &IntervalTable,
) -> Result<ReviewPlan, SchedulerError> {
    let mut entries = Vec::with_capacity(table.len() + 1);
    entries.push(PlanEntry {
        label: "Day 0 (today)".to_string(),
        kind: PlanEntryKind::FirstStudy,
        offset_days: 0,
        date: start_date,
        words: words.to_vec(),
    });
    for (i, offset) in table.iter().enumerate() {
        let date = start_date.add_days(offset)?;
        entries.push(PlanEntry {
            label: format!("Day {offset} ({date})"),
            kind: PlanEntryKind::Review { ordinal: i + 1 },
            offset_days: offset,
            date,
            words: words.to_vec(),
        });
    }
    Ok(ReviewPlan { entries })
}

impl Display for ReviewPlan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            let words = entry
                .words
                .iter()
                .map(Word::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            match entry.kind {
                PlanEntryKind::FirstStudy => {
                    writeln!(f, "{}: first study of {words}", entry.label)?
                }
                PlanEntryKind::Review { ordinal } => {
                    writeln!(f, "{}: review #{ordinal} of {words}", entry.label)?
                }
            }
        }
        Ok(())
    }
}
