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

use mcard_core::CardStore;
use mcard_core::Date;
use mcard_core::Word;
use mcard_core::error::Fallible;

use crate::config::Config;
use crate::db::SqliteStore;

pub struct DueReport {
    /// Due words with the date each one fell due, oldest first.
    pub due: Vec<(Word, Date)>,
    /// When the next card falls due, if nothing is due now.
    pub next_due: Option<Date>,
}

pub fn due(config: &Config, store: &SqliteStore, date: Date) -> Fallible<DueReport> {
    let scheduler = config.scheduler();
    let cards = store.load(&config.learner)?;
    let mut due: Vec<(Word, Date)> = scheduler
        .due_cards(&cards, date)
        .into_iter()
        .filter_map(|word| {
            let due_date = cards.get(&word).and_then(|card| card.due_date())?;
            Some((word, due_date))
        })
        .collect();
    due.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    let next_due = if due.is_empty() {
        scheduler.next_due_date(&cards)
    } else {
        None
    };
    Ok(DueReport { due, next_due })
}

pub fn print_due(report: &DueReport) {
    if report.due.is_empty() {
        match report.next_due {
            Some(next) => println!("No cards due. Next review on {next}."),
            None => println!("No cards due."),
        }
        return;
    }
    for (word, date) in &report.due {
        println!("{word}\t(due {date})");
    }
}

#[cfg(test)]
mod tests {
    use mcard_core::ReviewOutcome;

    use super::*;
    use crate::cmd::learn::LearnRequest;
    use crate::cmd::learn::learn;
    use crate::cmd::review::review;
    use crate::helper::test_context;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_due() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        for (word, day) in [("apple", "2023-05-01"), ("book", "2023-05-02"), ("desk", "2023-05-01")] {
            learn(
                &config,
                None,
                &mut store,
                LearnRequest {
                    words: vec![word.to_string()],
                    scenario: None,
                    relearn: false,
                    date: date(day),
                },
            )?;
        }
        review(&config, &mut store, "desk", ReviewOutcome::Success, date("2023-05-02"))?;

        let report = due(&config, &store, date("2023-05-03"))?;
        assert_eq!(
            report.due,
            vec![
                (Word::new("apple")?, date("2023-05-02")),
                (Word::new("book")?, date("2023-05-03")),
            ]
        );
        assert_eq!(report.next_due, None);

        let report = due(&config, &store, date("2023-05-01"))?;
        assert!(report.due.is_empty());
        assert_eq!(report.next_due, Some(date("2023-05-02")));
        Ok(())
    }
}
