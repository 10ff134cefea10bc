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

//! Daily learning activity, the source of the learner's streak.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::types::date::Date;

/// What the learner did on one day.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyActivity {
    pub words_learned: u32,
    pub words_reviewed: u32,
}

impl DailyActivity {
    pub fn is_active(&self) -> bool {
        self.words_learned > 0 || self.words_reviewed > 0
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActivityLog {
    days: BTreeMap<Date, DailyActivity>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_days(days: impl IntoIterator<Item = (Date, DailyActivity)>) -> Self {
        Self {
            days: days.into_iter().collect(),
        }
    }

    pub fn record_learned(&mut self, date: Date, count: u32) {
        self.days.entry(date).or_default().words_learned += count;
    }

    pub fn record_reviewed(&mut self, date: Date, count: u32) {
        self.days.entry(date).or_default().words_reviewed += count;
    }

    pub fn get(&self, date: Date) -> DailyActivity {
        self.days.get(&date).copied().unwrap_or_default()
    }

    /// Days in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = (Date, DailyActivity)> + '_ {
        self.days.iter().map(|(date, activity)| (*date, *activity))
    }

    /// Consecutive active days ending at `as_of`. A day with no activity yet
    /// does not break the streak until it is over, so counting starts from
    /// the day before when `as_of` is still empty.
    pub fn streak_days(&self, as_of: Date) -> u32 {
        let mut day = if self.get(as_of).is_active() {
            Some(as_of)
        } else {
            as_of.pred()
        };
        let mut streak = 0;
        while let Some(d) = day {
            if !self.get(d).is_active() {
                break;
            }
            streak += 1;
            day = d.pred();
        }
        streak
    }
}
