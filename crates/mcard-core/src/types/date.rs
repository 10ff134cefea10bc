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

use chrono::Days;
use chrono::NaiveDate;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::SchedulerError;

/// Represents a calendar date, without a time zone.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Date(NaiveDate);

impl Date {
    pub fn new(naive_date: NaiveDate) -> Self {
        Self(naive_date)
    }

    /// Builds a date from its components, failing on impossible dates.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Fallible<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| ErrorReport::new(format!("invalid date: {year}-{month}-{day}")))
    }

    /// Parses a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Fallible<Self> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| ErrorReport::new(format!("invalid date: {s}")))?;
        Ok(Date(date))
    }

    #[cfg(feature = "clock")]
    pub fn today() -> Self {
        Self(chrono::Local::now().naive_local().date())
    }

    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// The date `days` days after this one, or `DateOverflow` past the
    /// last representable date.
    pub fn add_days(self, days: u32) -> Result<Self, SchedulerError> {
        self.0
            .checked_add_days(Days::new(days as u64))
            .map(Self)
            .ok_or(SchedulerError::DateOverflow { date: self, days })
    }

    /// The date immediately before this one, if there is one.
    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    /// Signed number of days from `other` to `self`.
    pub fn days_since(self, other: Date) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl TryFrom<String> for Date {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Date::parse(&value)
    }
}

impl From<Date> for String {
    fn from(date: Date) -> String {
        date.to_string()
    }
}
