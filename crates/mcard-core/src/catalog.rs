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

//! The vocabulary catalog that candidate words are checked against before
//! cards are created for them.

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::word::Word;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: Word,
    #[serde(default)]
    pub phonetic: Option<String>,
    pub translation: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub example_translation: Option<String>,
    #[serde(default = "default_difficulty")]
    pub difficulty: u8,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_difficulty() -> u8 {
    1
}

/// A named set of words that typically appear together, e.g. in a photo of
/// a restaurant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub words: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCatalog {
    #[serde(default)]
    words: Vec<VocabularyEntry>,
    #[serde(default)]
    scenarios: Vec<Scenario>,
}

/// A candidate that matched nothing in the catalog. Not an error: the
/// remaining candidates are still usable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownWord {
    pub candidate: String,
}

#[derive(Debug, Default, PartialEq)]
pub struct CandidateFilter {
    /// Catalog words, in first-seen order, without repeats.
    pub matched: Vec<Word>,
    pub unknown: Vec<UnknownWord>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: BTreeMap<Word, VocabularyEntry>,
    scenarios: Vec<Scenario>,
}

impl Catalog {
    pub fn new(
        entries: impl IntoIterator<Item = VocabularyEntry>,
        scenarios: Vec<Scenario>,
    ) -> Fallible<Self> {
        let mut map = BTreeMap::new();
        for entry in entries {
            if map.contains_key(&entry.word) {
                return fail(format!("word '{}' appears twice in the catalog", entry.word));
            }
            map.insert(entry.word.clone(), entry);
        }
        Ok(Self {
            entries: map,
            scenarios,
        })
    }

    pub fn from_toml_str(s: &str) -> Fallible<Self> {
        let raw: RawCatalog = toml::from_str(s)?;
        Self::new(raw.words, raw.scenarios)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn lookup(&self, word: &Word) -> Option<&VocabularyEntry> {
        self.entries.get(word)
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    /// Splits raw candidates into catalog words and unknown strings.
    /// Matching ignores case and surrounding whitespace.
    pub fn filter_candidates<S: AsRef<str>>(&self, candidates: &[S]) -> CandidateFilter {
        let mut filter = CandidateFilter::default();
        let mut seen: HashSet<Word> = HashSet::new();
        for candidate in candidates {
            let candidate = candidate.as_ref();
            match Word::new(candidate) {
                Ok(word) if self.entries.contains_key(&word) => {
                    if seen.insert(word.clone()) {
                        filter.matched.push(word);
                    }
                }
                _ => {
                    log::warn!("Candidate '{candidate}' is not in the vocabulary catalog");
                    filter.unknown.push(UnknownWord {
                        candidate: candidate.to_string(),
                    });
                }
            }
        }
        filter
    }
}
