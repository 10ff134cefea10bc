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

use std::collections::HashSet;

use mcard_core::BatchReport;
use mcard_core::CardStore;
use mcard_core::Catalog;
use mcard_core::DailyActivity;
use mcard_core::Date;
use mcard_core::ReviewPlan;
use mcard_core::SchedulerError;
use mcard_core::UnknownWord;
use mcard_core::Word;
use mcard_core::build_plan;
use mcard_core::error::Fallible;
use mcard_core::error::fail;
use mcard_core::extract::ScenarioExtractor;
use mcard_core::extract::WordExtractor;

use crate::config::Config;
use crate::db::SqliteStore;

pub struct LearnRequest {
    /// Words typed on the command line.
    pub words: Vec<String>,
    /// Scenario whose words are added to the candidates.
    pub scenario: Option<String>,
    /// Restart words that already have a card instead of reporting them.
    pub relearn: bool,
    pub date: Date,
}

#[derive(Debug)]
pub struct LearnOutcome {
    pub unknown: Vec<UnknownWord>,
    pub report: BatchReport,
    pub relearned: Vec<Word>,
    /// Timeline for the newly created cards, if any were created.
    pub plan: Option<ReviewPlan>,
}

pub fn learn(
    config: &Config,
    catalog: Option<&Catalog>,
    store: &mut SqliteStore,
    request: LearnRequest,
) -> Fallible<LearnOutcome> {
    let LearnRequest {
        words,
        scenario,
        relearn,
        date,
    } = request;

    let mut candidates: Vec<String> = words;
    if let Some(name) = scenario {
        let Some(catalog) = catalog else {
            return fail("--scenario requires a catalog in the configuration.");
        };
        candidates.extend(ScenarioExtractor::new(catalog).extract(&name)?);
    }

    let (selected, unknown) = match catalog {
        Some(catalog) => {
            let filter = catalog.filter_candidates(candidates.as_slice());
            (filter.matched, filter.unknown)
        }
        None => without_catalog(&candidates),
    };

    let scheduler = config.scheduler();
    let learner = config.learner.as_str();
    let (report, relearned, plan) = store.exclusive(|store| {
        let mut cards = store.load(learner)?;
        let mut report = scheduler.create_cards(&mut cards, selected, date);
        let mut relearned = Vec::new();
        if relearn {
            let mut still_failed = Vec::new();
            for (word, err) in report.failed {
                match err {
                    SchedulerError::DuplicateWord(_) => {
                        match scheduler.relearn(&mut cards, &word, date) {
                            Ok(_) => relearned.push(word),
                            Err(e) => {
                                log::warn!("Could not relearn '{word}': {e}");
                                still_failed.push((word, e));
                            }
                        }
                    }
                    err => still_failed.push((word, err)),
                }
            }
            report.failed = still_failed;
        }
        let plan = if report.created.is_empty() {
            None
        } else {
            Some(build_plan(&report.created, date, scheduler.table())?)
        };
        store.save(learner, &cards)?;
        store.record_activity(
            learner,
            date,
            DailyActivity {
                words_learned: report.created.len() as u32,
                words_reviewed: relearned.len() as u32,
            },
        )?;
        Ok((report, relearned, plan))
    })?;
    log::info!(
        "Created {} cards, relearning {}, {} failed",
        report.created.len(),
        relearned.len(),
        report.failed.len()
    );

    Ok(LearnOutcome {
        unknown,
        report,
        relearned,
        plan,
    })
}

/// Without a catalog every well-formed candidate is accepted.
fn without_catalog(candidates: &[String]) -> (Vec<Word>, Vec<UnknownWord>) {
    let mut seen: HashSet<Word> = HashSet::new();
    let mut selected = Vec::new();
    let mut unknown = Vec::new();
    for candidate in candidates {
        match Word::new(candidate) {
            Ok(word) => {
                if seen.insert(word.clone()) {
                    selected.push(word);
                }
            }
            Err(_) => unknown.push(UnknownWord {
                candidate: candidate.clone(),
            }),
        }
    }
    (selected, unknown)
}

pub fn print_learn(outcome: &LearnOutcome) {
    for unknown in &outcome.unknown {
        eprintln!(
            "warning: '{}' is not in the vocabulary catalog, skipping.",
            unknown.candidate
        );
    }
    let created = &outcome.report.created;
    if created.is_empty() && outcome.relearned.is_empty() && outcome.report.failed.is_empty() {
        println!("No words to learn.");
        return;
    }
    if !created.is_empty() {
        println!("Created {} cards.", created.len());
    }
    for word in &outcome.relearned {
        println!("Relearning {word} from the first interval.");
    }
    for (word, err) in &outcome.report.failed {
        println!("Skipped {word}: {err}");
    }
    if let Some(plan) = &outcome.plan {
        println!();
        print!("{plan}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::SAMPLE_CATALOG;
    use crate::helper::test_context;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    fn request(words: &[&str]) -> LearnRequest {
        LearnRequest {
            words: words.iter().map(|w| w.to_string()).collect(),
            scenario: None,
            relearn: false,
            date: date("2023-05-01"),
        }
    }

    #[test]
    fn test_learn_without_catalog() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        let outcome = learn(&config, None, &mut store, request(&["Apple", "book", "apple", ""]))?;
        assert_eq!(outcome.report.created, vec![Word::new("apple")?, Word::new("book")?]);
        assert_eq!(outcome.unknown.len(), 1);
        let plan = outcome.plan.unwrap();
        assert_eq!(plan.entries.len(), 4);
        assert_eq!(store.card_count("tester")?, 2);
        let activity = store.load_activity("tester")?;
        assert_eq!(activity.get(date("2023-05-01")).words_learned, 2);
        Ok(())
    }

    #[test]
    fn test_learn_with_catalog_reports_unknown_words() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        let catalog = Catalog::from_toml_str(SAMPLE_CATALOG)?;
        let outcome = learn(
            &config,
            Some(&catalog),
            &mut store,
            request(&["apple", "laptop"]),
        )?;
        assert_eq!(outcome.report.created, vec![Word::new("apple")?]);
        assert_eq!(
            outcome.unknown,
            vec![UnknownWord {
                candidate: "laptop".to_string()
            }]
        );
        Ok(())
    }

    #[test]
    fn test_learn_scenario() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        let catalog = Catalog::from_toml_str(SAMPLE_CATALOG)?;
        let outcome = learn(
            &config,
            Some(&catalog),
            &mut store,
            LearnRequest {
                scenario: Some("restaurant".to_string()),
                ..request(&["apple"])
            },
        )?;
        assert_eq!(
            outcome.report.created,
            vec![Word::new("apple")?, Word::new("coffee")?, Word::new("water")?]
        );
        assert_eq!(outcome.unknown.len(), 2);
        Ok(())
    }

    #[test]
    fn test_scenario_needs_catalog() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        let result = learn(
            &config,
            None,
            &mut store,
            LearnRequest {
                scenario: Some("restaurant".to_string()),
                ..request(&[])
            },
        );
        assert!(result.is_err());
        Ok(())
    }

    #[test]
    fn test_duplicates_are_reported_or_relearned() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        learn(&config, None, &mut store, request(&["apple"]))?;

        let outcome = learn(&config, None, &mut store, request(&["apple", "book"]))?;
        assert_eq!(outcome.report.created, vec![Word::new("book")?]);
        assert_eq!(outcome.report.failed.len(), 1);
        assert!(outcome.relearned.is_empty());

        let outcome = learn(
            &config,
            None,
            &mut store,
            LearnRequest {
                relearn: true,
                date: date("2023-05-03"),
                ..request(&["apple"])
            },
        )?;
        assert!(outcome.report.is_complete());
        assert_eq!(outcome.relearned, vec![Word::new("apple")?]);
        assert!(outcome.plan.is_none());
        let cards = store.load("tester")?;
        let apple = cards.get(&Word::new("apple")?).unwrap();
        assert_eq!(apple.due_date(), Some(date("2023-05-04")));
        assert_eq!(store.card_count("tester")?, 2);
        Ok(())
    }

    #[test]
    fn test_relearn_failure_keeps_the_rest_of_the_batch() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        learn(&config, None, &mut store, request(&["apple"]))?;
        crate::cmd::review::review(
            &config,
            &mut store,
            "apple",
            mcard_core::ReviewOutcome::Success,
            date("2023-05-10"),
        )?;

        let outcome = learn(
            &config,
            None,
            &mut store,
            LearnRequest {
                relearn: true,
                date: date("2023-05-05"),
                ..request(&["book", "apple"])
            },
        )?;
        assert_eq!(outcome.report.created, vec![Word::new("book")?]);
        assert!(outcome.relearned.is_empty());
        assert_eq!(
            outcome.report.failed,
            vec![(
                Word::new("apple")?,
                SchedulerError::InvalidDate {
                    date: date("2023-05-05"),
                    earliest: date("2023-05-10"),
                }
            )]
        );
        assert!(outcome.plan.is_some());
        assert_eq!(store.card_count("tester")?, 2);
        let cards = store.load("tester")?;
        let apple = cards.get(&Word::new("apple")?).unwrap();
        assert_eq!(apple.review_count(), 1);
        assert_eq!(apple.last_reviewed_date(), Some(date("2023-05-10")));
        Ok(())
    }
}
