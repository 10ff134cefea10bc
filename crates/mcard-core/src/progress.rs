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

use serde::Deserialize;
use serde::Serialize;

use crate::types::card::CardSet;
use crate::types::date::Date;

/// Learner-facing statistics derived from a card set. Never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerProgress {
    pub total_words: usize,
    pub mastered_words: usize,
    /// Cards due on or before the summary date and not yet mastered.
    pub to_review_words: usize,
    pub streak_days: u32,
    /// Mastered share of all words, rounded to a whole percent.
    pub mastery_percentage: u32,
}

/// Computes progress in a single pass. `streak_days` comes from the
/// learner's activity history and is passed through unchanged.
pub fn summarize(cards: &CardSet, as_of: Date, streak_days: u32) -> LearnerProgress {
    let mut total_words = 0;
    let mut mastered_words = 0;
    let mut to_review_words = 0;
    for card in cards.iter() {
        total_words += 1;
        if card.is_mastered() {
            mastered_words += 1;
        } else if card.is_due(as_of) {
            to_review_words += 1;
        }
    }
    LearnerProgress {
        total_words,
        mastered_words,
        to_review_words,
        streak_days,
        mastery_percentage: percentage(mastered_words, total_words),
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}
