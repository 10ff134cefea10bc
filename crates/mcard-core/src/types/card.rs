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

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::SchedulerError;
use crate::intervals::IntervalTable;
use crate::types::date::Date;
use crate::types::word::Word;

/// The learning state of one vocabulary word.
///
/// Records are created and mutated only by the [`Scheduler`]; callers read
/// them through the accessors below.
///
/// [`Scheduler`]: crate::scheduler::Scheduler
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CardRecord {
    word: Word,
    created_date: Date,
    last_reviewed_date: Option<Date>,
    review_count: usize,
    success_count: usize,
    lapse_count: usize,
    current_interval_index: usize,
    /// Absent once the card is mastered.
    due_date: Option<Date>,
    mastered: bool,
}

/// The raw columns of a card, as a storage backend sees them.
#[derive(Clone, Debug, PartialEq)]
pub struct CardParts {
    pub word: Word,
    pub created_date: Date,
    pub last_reviewed_date: Option<Date>,
    pub review_count: usize,
    pub success_count: usize,
    pub lapse_count: usize,
    pub current_interval_index: usize,
    pub due_date: Option<Date>,
    pub mastered: bool,
}

impl CardRecord {
    pub(crate) fn new(
        word: Word,
        created_date: Date,
        table: &IntervalTable,
    ) -> Result<Self, SchedulerError> {
        let mut card = Self {
            word,
            created_date,
            last_reviewed_date: None,
            review_count: 0,
            success_count: 0,
            lapse_count: 0,
            current_interval_index: 0,
            due_date: None,
            mastered: false,
        };
        card.schedule(created_date, 0, table)?;
        Ok(card)
    }

    /// Rebuilds a card from stored columns, rejecting rows that break the
    /// record's invariants under `table`.
    pub fn restore(parts: CardParts, table: &IntervalTable) -> Fallible<Self> {
        let CardParts {
            word,
            created_date,
            last_reviewed_date,
            review_count,
            success_count,
            lapse_count,
            current_interval_index,
            due_date,
            mastered,
        } = parts;
        if current_interval_index > table.last_index() {
            return Err(SchedulerError::OutOfRange {
                index: current_interval_index,
                len: table.len(),
            }
            .into());
        }
        if review_count != success_count + lapse_count {
            return Err(ErrorReport::new(format!(
                "card '{word}' has {review_count} reviews but {success_count} successes and {lapse_count} lapses"
            )));
        }
        if mastered == due_date.is_some() {
            return Err(ErrorReport::new(format!(
                "card '{word}' must have a due date exactly when it is not mastered"
            )));
        }
        if let Some(last) = last_reviewed_date {
            if last < created_date {
                return Err(SchedulerError::InvalidDate {
                    date: last,
                    earliest: created_date,
                }
                .into());
            }
        }
        if let Some(due) = due_date {
            let anchor = last_reviewed_date.unwrap_or(created_date);
            let expected = anchor.add_days(table.at(current_interval_index)?)?;
            if due != expected {
                return Err(ErrorReport::new(format!(
                    "card '{word}' is due on {due}, but its interval puts it on {expected}"
                )));
            }
        }
        Ok(Self {
            word,
            created_date,
            last_reviewed_date,
            review_count,
            success_count,
            lapse_count,
            current_interval_index,
            due_date,
            mastered,
        })
    }

    pub fn to_parts(&self) -> CardParts {
        CardParts {
            word: self.word.clone(),
            created_date: self.created_date,
            last_reviewed_date: self.last_reviewed_date,
            review_count: self.review_count,
            success_count: self.success_count,
            lapse_count: self.lapse_count,
            current_interval_index: self.current_interval_index,
            due_date: self.due_date,
            mastered: self.mastered,
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn created_date(&self) -> Date {
        self.created_date
    }

    pub fn last_reviewed_date(&self) -> Option<Date> {
        self.last_reviewed_date
    }

    pub fn review_count(&self) -> usize {
        self.review_count
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn lapse_count(&self) -> usize {
        self.lapse_count
    }

    pub fn current_interval_index(&self) -> usize {
        self.current_interval_index
    }

    pub fn due_date(&self) -> Option<Date> {
        self.due_date
    }

    pub fn is_mastered(&self) -> bool {
        self.mastered
    }

    /// The date the current interval is counted from.
    pub fn anchor_date(&self) -> Date {
        self.last_reviewed_date.unwrap_or(self.created_date)
    }

    /// Whether the card should be reviewed on or before `as_of`.
    pub fn is_due(&self, as_of: Date) -> bool {
        match self.due_date {
            Some(due) => !self.mastered && due <= as_of,
            None => false,
        }
    }

    /// Puts the card on interval `index`, counted from `from`. Leaves the
    /// card untouched if the due date cannot be represented.
    pub(crate) fn schedule(
        &mut self,
        from: Date,
        index: usize,
        table: &IntervalTable,
    ) -> Result<(), SchedulerError> {
        let index = index.min(table.last_index());
        let due = from.add_days(table.at(index)?)?;
        self.current_interval_index = index;
        self.mastered = false;
        self.due_date = Some(due);
        Ok(())
    }

    pub(crate) fn master(&mut self) {
        self.mastered = true;
        self.due_date = None;
    }

    pub(crate) fn note_review(&mut self, date: Date, success: bool) {
        self.review_count += 1;
        if success {
            self.success_count += 1;
        } else {
            self.lapse_count += 1;
        }
        self.last_reviewed_date = Some(date);
    }
}

/// A learner's cards, keyed by word. A word appears at most once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CardSet {
    cards: BTreeMap<Word, CardRecord>,
}

impl CardSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a set from loaded records, failing on a repeated word.
    pub fn from_records(
        records: impl IntoIterator<Item = CardRecord>,
    ) -> Result<Self, SchedulerError> {
        let mut set = Self::new();
        for record in records {
            if set.contains(record.word()) {
                return Err(SchedulerError::DuplicateWord(record.word.clone()));
            }
            set.cards.insert(record.word.clone(), record);
        }
        Ok(set)
    }

    pub fn get(&self, word: &Word) -> Option<&CardRecord> {
        self.cards.get(word)
    }

    pub(crate) fn get_mut(&mut self, word: &Word) -> Option<&mut CardRecord> {
        self.cards.get_mut(word)
    }

    pub(crate) fn insert(&mut self, record: CardRecord) -> &CardRecord {
        let word = record.word.clone();
        self.cards.entry(word).or_insert(record)
    }

    pub fn contains(&self, word: &Word) -> bool {
        self.cards.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in word order.
    pub fn iter(&self) -> impl Iterator<Item = &CardRecord> {
        self.cards.values()
    }

    pub fn into_records(self) -> Vec<CardRecord> {
        self.cards.into_values().collect()
    }
}
