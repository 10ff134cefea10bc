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

//! Card creation, review transitions and due queries.

use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::SchedulerError;
use crate::intervals::IntervalTable;
use crate::types::card::CardRecord;
use crate::types::card::CardSet;
use crate::types::date::Date;
use crate::types::outcome::ReviewOutcome;
use crate::types::word::Word;

/// What a failed review does to a card's position in the interval table.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelapsePolicy {
    /// Start the curve again from the first interval.
    #[default]
    Reset,
    /// Go back one interval. A mastered card drops to the last interval.
    StepBack,
}

/// Per-word result of creating a batch of cards. Creation is not atomic:
/// words in `failed` can be retried on their own.
#[derive(Debug, Default, PartialEq)]
pub struct BatchReport {
    pub created: Vec<Word>,
    pub failed: Vec<(Word, SchedulerError)>,
}

impl BatchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    table: IntervalTable,
    relapse: RelapsePolicy,
}

impl Scheduler {
    pub fn new(table: IntervalTable, relapse: RelapsePolicy) -> Self {
        Self { table, relapse }
    }

    pub fn table(&self) -> &IntervalTable {
        &self.table
    }

    pub fn relapse_policy(&self) -> RelapsePolicy {
        self.relapse
    }

    /// Introduces `word` into the card set. Fails if the word already has a
    /// card; the caller should route to [`Scheduler::relearn`] instead.
    pub fn create_card<'a>(
        &self,
        cards: &'a mut CardSet,
        word: Word,
        created_date: Date,
    ) -> Result<&'a CardRecord, SchedulerError> {
        if cards.contains(&word) {
            return Err(SchedulerError::DuplicateWord(word));
        }
        log::debug!("Creating card for '{word}' on {created_date}");
        let card = CardRecord::new(word, created_date, &self.table)?;
        Ok(cards.insert(card))
    }

    /// Creates one card per word, collecting failures instead of stopping at
    /// the first one.
    pub fn create_cards(
        &self,
        cards: &mut CardSet,
        words: impl IntoIterator<Item = Word>,
        created_date: Date,
    ) -> BatchReport {
        let mut report = BatchReport::default();
        for word in words {
            match self.create_card(cards, word.clone(), created_date) {
                Ok(_) => report.created.push(word),
                Err(e) => {
                    log::warn!("Could not create card for '{word}': {e}");
                    report.failed.push((word, e));
                }
            }
        }
        report
    }

    /// Restarts an existing card from the first interval. Selecting a word
    /// that is already being learned means it was not remembered, so this
    /// counts as a lapse on `date` whatever the relapse policy.
    pub fn relearn<'a>(
        &self,
        cards: &'a mut CardSet,
        word: &Word,
        date: Date,
    ) -> Result<&'a CardRecord, SchedulerError> {
        let card = cards
            .get_mut(word)
            .ok_or_else(|| SchedulerError::NotFound(word.clone()))?;
        check_chronology(card, date)?;
        log::debug!("Relearning '{word}' from {date}");
        card.schedule(date, 0, &self.table)?;
        card.note_review(date, false);
        Ok(card)
    }

    /// Applies a review outcome to the card for `word`.
    pub fn record_review<'a>(
        &self,
        cards: &'a mut CardSet,
        word: &Word,
        outcome: ReviewOutcome,
        review_date: Date,
    ) -> Result<&'a CardRecord, SchedulerError> {
        let card = cards
            .get_mut(word)
            .ok_or_else(|| SchedulerError::NotFound(word.clone()))?;
        check_chronology(card, review_date)?;
        let index = card.current_interval_index();
        match outcome {
            ReviewOutcome::Success => {
                if card.is_mastered() || index >= self.table.last_index() {
                    card.master();
                } else {
                    card.schedule(review_date, index + 1, &self.table)?;
                }
                card.note_review(review_date, true);
            }
            ReviewOutcome::Failure => {
                let next = match self.relapse {
                    RelapsePolicy::Reset => 0,
                    RelapsePolicy::StepBack if card.is_mastered() => self.table.last_index(),
                    RelapsePolicy::StepBack => index.saturating_sub(1),
                };
                card.schedule(review_date, next, &self.table)?;
                card.note_review(review_date, false);
            }
        }
        log::debug!(
            "Reviewed '{word}' on {review_date} ({}): index {index} -> {}, mastered: {}",
            outcome.as_str(),
            card.current_interval_index(),
            card.is_mastered()
        );
        Ok(card)
    }

    /// Words whose card is not mastered and due on or before `as_of`.
    pub fn due_cards(&self, cards: &CardSet, as_of: Date) -> BTreeSet<Word> {
        cards
            .iter()
            .filter(|card| card.is_due(as_of))
            .map(|card| card.word().clone())
            .collect()
    }

    /// The earliest upcoming due date, if any card is still being learned.
    pub fn next_due_date(&self, cards: &CardSet) -> Option<Date> {
        cards.iter().filter_map(|card| card.due_date()).min()
    }
}

/// History is append-only: a new event may not predate the card's creation
/// or its most recent review.
fn check_chronology(card: &CardRecord, date: Date) -> Result<(), SchedulerError> {
    let earliest = card.anchor_date();
    if date < earliest {
        return Err(SchedulerError::InvalidDate { date, earliest });
    }
    Ok(())
}
