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

//! The contract a persistence backend must satisfy. The engine never
//! assumes a storage format.

use std::collections::HashMap;

use crate::error::Fallible;
use crate::types::card::CardRecord;
use crate::types::card::CardSet;

pub trait CardStore {
    /// Loads a learner's cards. An unknown learner has an empty set.
    fn load(&self, learner: &str) -> Fallible<CardSet>;

    /// Replaces the learner's stored cards with `cards`.
    fn save(&mut self, learner: &str, cards: &CardSet) -> Fallible<()>;
}

/// Keeps card sets in memory.
#[derive(Default)]
pub struct MemoryStore {
    learners: HashMap<String, Vec<CardRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CardStore for MemoryStore {
    fn load(&self, learner: &str) -> Fallible<CardSet> {
        let records = self.learners.get(learner).cloned().unwrap_or_default();
        Ok(CardSet::from_records(records)?)
    }

    fn save(&mut self, learner: &str, cards: &CardSet) -> Fallible<()> {
        self.learners
            .insert(learner.to_string(), cards.iter().cloned().collect());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Scheduler;
    use crate::types::date::Date;
    use crate::types::outcome::ReviewOutcome;
    use crate::types::word::Word;

    #[test]
    fn test_memory_store() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let mut store = MemoryStore::new();
        let apple = Word::new("apple")?;

        let mut cards = store.load("alice")?;
        assert!(cards.is_empty());
        scheduler.create_card(&mut cards, apple.clone(), Date::parse("2023-05-01")?)?;
        store.save("alice", &cards)?;

        let mut cards = store.load("alice")?;
        scheduler.record_review(&mut cards, &apple, ReviewOutcome::Success, Date::parse("2023-05-02")?)?;
        store.save("alice", &cards)?;

        let cards = store.load("alice")?;
        assert_eq!(cards.get(&apple).map(|c| c.review_count()), Some(1));
        assert!(store.load("bob")?.is_empty());
        Ok(())
    }
}
