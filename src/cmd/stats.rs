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

use std::fmt::Display;
use std::fmt::Formatter;

use clap::ValueEnum;
use mcard_core::CardStore;
use mcard_core::Date;
use mcard_core::LearnerProgress;
use mcard_core::error::Fallible;
use mcard_core::summarize;

use crate::config::Config;
use crate::db::SqliteStore;

#[derive(ValueEnum, Clone, Copy, PartialEq)]
pub enum StatsFormat {
    /// Human-readable lines.
    Text,
    /// A JSON object.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn stats(config: &Config, store: &SqliteStore, date: Date) -> Fallible<LearnerProgress> {
    let cards = store.load(&config.learner)?;
    let streak = store.load_activity(&config.learner)?.streak_days(date);
    Ok(summarize(&cards, date, streak))
}

pub fn render_stats(progress: &LearnerProgress, format: StatsFormat) -> Fallible<String> {
    match format {
        StatsFormat::Text => {
            let LearnerProgress {
                total_words,
                mastered_words,
                to_review_words,
                streak_days,
                mastery_percentage,
            } = progress;
            Ok(format!(
                "Total words: {total_words}\n\
                 Mastered: {mastered_words} ({mastery_percentage}%)\n\
                 To review: {to_review_words}\n\
                 Streak: {streak_days} days\n"
            ))
        }
        StatsFormat::Json => Ok(serde_json::to_string_pretty(progress)?),
    }
}

pub fn print_stats(progress: &LearnerProgress, format: StatsFormat) -> Fallible<()> {
    let rendered = render_stats(progress, format)?;
    println!("{}", rendered.trim_end());
    Ok(())
}
