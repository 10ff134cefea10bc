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

use mcard_core::CardRecord;
use mcard_core::CardStore;
use mcard_core::DailyActivity;
use mcard_core::Date;
use mcard_core::ReviewOutcome;
use mcard_core::Word;
use mcard_core::error::Fallible;

use crate::config::Config;
use crate::db::SqliteStore;

pub fn review(
    config: &Config,
    store: &mut SqliteStore,
    word: &str,
    outcome: ReviewOutcome,
    date: Date,
) -> Fallible<CardRecord> {
    let word = Word::new(word)?;
    let scheduler = config.scheduler();
    let learner = config.learner.as_str();
    store.exclusive(|store| {
        let mut cards = store.load(learner)?;
        let card = scheduler
            .record_review(&mut cards, &word, outcome, date)?
            .clone();
        store.save(learner, &cards)?;
        store.record_activity(
            learner,
            date,
            DailyActivity {
                words_learned: 0,
                words_reviewed: 1,
            },
        )?;
        Ok(card)
    })
}

pub fn print_review(card: &CardRecord, config: &Config) {
    match card.due_date() {
        Some(due) => println!(
            "{}: next review on {due} (interval {} of {}).",
            card.word(),
            card.current_interval_index() + 1,
            config.intervals.len()
        ),
        None => println!("{}: mastered.", card.word()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::learn::LearnRequest;
    use crate::cmd::learn::learn;
    use crate::helper::test_context;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_review_to_mastery() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        learn(
            &config,
            None,
            &mut store,
            LearnRequest {
                words: vec!["apple".to_string()],
                scenario: None,
                relearn: false,
                date: date("2023-05-01"),
            },
        )?;
        let card = review(&config, &mut store, "apple", ReviewOutcome::Success, date("2023-05-02"))?;
        assert_eq!(card.due_date(), Some(date("2023-05-05")));
        let card = review(&config, &mut store, "Apple", ReviewOutcome::Success, date("2023-05-05"))?;
        assert_eq!(card.due_date(), Some(date("2023-05-12")));
        let card = review(&config, &mut store, "apple", ReviewOutcome::Success, date("2023-05-12"))?;
        assert!(card.is_mastered());

        let stored = store.load("tester")?;
        assert!(stored.get(&Word::new("apple")?).unwrap().is_mastered());
        let activity = store.load_activity("tester")?;
        assert_eq!(activity.get(date("2023-05-05")).words_reviewed, 1);
        Ok(())
    }

    #[test]
    fn test_review_unknown_word() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        let result = review(&config, &mut store, "apple", ReviewOutcome::Failure, date("2023-05-02"));
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "error: no card for 'apple'.");
        assert!(store.load_activity("tester")?.iter().next().is_none());
        Ok(())
    }

    #[test]
    fn test_review_out_of_order_leaves_card_unchanged() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        learn(
            &config,
            None,
            &mut store,
            LearnRequest {
                words: vec!["apple".to_string()],
                scenario: None,
                relearn: false,
                date: date("2023-05-10"),
            },
        )?;
        assert!(review(&config, &mut store, "apple", ReviewOutcome::Success, date("2023-05-09")).is_err());
        let stored = store.load("tester")?;
        assert_eq!(stored.get(&Word::new("apple")?).unwrap().review_count(), 0);
        Ok(())
    }
}
