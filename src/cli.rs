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

use clap::Parser;
use mcard_core::ReviewOutcome;
use mcard_core::error::Fallible;

use crate::cmd::due::due;
use crate::cmd::due::print_due;
use crate::cmd::export::export_collection;
use crate::cmd::learn::LearnRequest;
use crate::cmd::learn::learn;
use crate::cmd::learn::print_learn;
use crate::cmd::plan::plan;
use crate::cmd::resolve_date;
use crate::cmd::review::print_review;
use crate::cmd::review::review;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::cmd::stats::stats;
use crate::config::Config;
use crate::db::SqliteStore;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Create cards for new words and print their review plan.
    Learn {
        /// Words to learn.
        words: Vec<String>,
        /// Also learn the words of this catalog scenario.
        #[arg(long)]
        scenario: Option<String>,
        /// Restart words that already have a card instead of skipping them.
        #[arg(long)]
        relearn: bool,
        /// The date of the session, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Path to the configuration file. By default, ./mcard.toml is used if present.
        #[arg(long)]
        config: Option<String>,
    },
    /// Record the outcome of reviewing a word.
    Review {
        /// The word that was reviewed.
        word: String,
        /// Whether the word was remembered: `success` or `failure`.
        outcome: String,
        /// The date of the review, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Path to the configuration file. By default, ./mcard.toml is used if present.
        #[arg(long)]
        config: Option<String>,
    },
    /// List the words due for review.
    Due {
        /// The date to check, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Path to the configuration file. By default, ./mcard.toml is used if present.
        #[arg(long)]
        config: Option<String>,
    },
    /// Print learning statistics.
    Stats {
        /// The date to compute statistics for, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
        /// Path to the configuration file. By default, ./mcard.toml is used if present.
        #[arg(long)]
        config: Option<String>,
    },
    /// Preview the review timeline for a batch of words without creating cards.
    Plan {
        /// Words to plan for.
        words: Vec<String>,
        /// The start date, as YYYY-MM-DD. Defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Path to the configuration file. By default, ./mcard.toml is used if present.
        #[arg(long)]
        config: Option<String>,
    },
    /// Export the learner's cards as JSON.
    Export {
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
        /// Path to the configuration file. By default, ./mcard.toml is used if present.
        #[arg(long)]
        config: Option<String>,
    },
}

fn open(config: Option<String>) -> Fallible<(Config, SqliteStore)> {
    let config = Config::load(config.as_deref())?;
    let store = SqliteStore::open(&config.database, config.intervals.clone())?;
    Ok((config, store))
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Learn {
            words,
            scenario,
            relearn,
            date,
            config,
        } => {
            let date = resolve_date(date)?;
            let (config, mut store) = open(config)?;
            let catalog = config.load_catalog()?;
            let request = LearnRequest {
                words,
                scenario,
                relearn,
                date,
            };
            let outcome = learn(&config, catalog.as_ref(), &mut store, request)?;
            print_learn(&outcome);
            Ok(())
        }
        Command::Review {
            word,
            outcome,
            date,
            config,
        } => {
            let outcome = ReviewOutcome::try_from(outcome)?;
            let date = resolve_date(date)?;
            let (config, mut store) = open(config)?;
            let card = review(&config, &mut store, &word, outcome, date)?;
            print_review(&card, &config);
            Ok(())
        }
        Command::Due { date, config } => {
            let date = resolve_date(date)?;
            let (config, store) = open(config)?;
            print_due(&due(&config, &store, date)?);
            Ok(())
        }
        Command::Stats {
            date,
            format,
            config,
        } => {
            let date = resolve_date(date)?;
            let (config, store) = open(config)?;
            print_stats(&stats(&config, &store, date)?, format)
        }
        Command::Plan {
            words,
            date,
            config,
        } => {
            let date = resolve_date(date)?;
            let config = Config::load(config.as_deref())?;
            print!("{}", plan(&config, &words, date)?);
            Ok(())
        }
        Command::Export { output, config } => {
            let (config, store) = open(config)?;
            export_collection(&config, &store, output)
        }
    }
}
