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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::date::Date;
use crate::types::word::Word;

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport {
            message: format!("TOML error: {value}"),
        }
    }
}

impl From<SchedulerError> for ErrorReport {
    fn from(value: SchedulerError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}

/// Errors raised by the scheduling engine. These are returned to the caller
/// as-is: the engine never retries and never substitutes sample data.
#[derive(Debug, Clone, PartialEq)]
pub enum SchedulerError {
    /// A card for this word already exists in the card set.
    DuplicateWord(Word),
    /// No card exists for this word.
    NotFound(Word),
    /// The date would reorder the card's history.
    InvalidDate { date: Date, earliest: Date },
    /// An interval table index past the end of the table.
    OutOfRange { index: usize, len: usize },
    /// The interval table is empty, not strictly increasing, or starts at 0.
    InvalidIntervalTable(String),
    /// Adding an interval runs past the last representable date.
    DateOverflow { date: Date, days: u32 },
}

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            SchedulerError::DuplicateWord(word) => {
                write!(f, "a card for '{word}' already exists.")
            }
            SchedulerError::NotFound(word) => write!(f, "no card for '{word}'."),
            SchedulerError::InvalidDate { date, earliest } => {
                write!(f, "date {date} precedes {earliest}.")
            }
            SchedulerError::OutOfRange { index, len } => {
                write!(f, "interval index {index} out of range (table has {len} entries).")
            }
            SchedulerError::InvalidIntervalTable(reason) => {
                write!(f, "invalid interval table: {reason}.")
            }
            SchedulerError::DateOverflow { date, days } => {
                write!(f, "{days} days after {date} is past the end of the calendar.")
            }
        }
    }
}

impl Error for SchedulerError {}
