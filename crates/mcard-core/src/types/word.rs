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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// A vocabulary word, the natural key of a card. Words are trimmed and
/// lowercased on construction, so `"Apple "` and `"apple"` are the same key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Word(String);

impl Word {
    pub fn new(s: impl AsRef<str>) -> Fallible<Self> {
        let normalized = s.as_ref().trim().to_lowercase();
        if normalized.is_empty() {
            return fail("word must not be empty");
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Word {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Word {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Word::new(value)
    }
}

impl TryFrom<&str> for Word {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Word::new(value)
    }
}

impl From<Word> for String {
    fn from(word: Word) -> String {
        word.0
    }
}
