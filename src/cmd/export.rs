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

use std::fs::write;

use mcard_core::CardRecord;
use mcard_core::CardStore;
use mcard_core::error::Fallible;

use crate::config::Config;
use crate::db::SqliteStore;

/// Serializes the learner's cards as a JSON array.
pub fn export_cards(config: &Config, store: &SqliteStore) -> Fallible<String> {
    let cards: Vec<CardRecord> = store.load(&config.learner)?.into_records();
    Ok(serde_json::to_string_pretty(&cards)?)
}

pub fn export_collection(
    config: &Config,
    store: &SqliteStore,
    output: Option<String>,
) -> Fallible<()> {
    let json = export_cards(config, store)?;
    match output {
        Some(path) => write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use mcard_core::Date;
    use tempfile::tempdir;

    use super::*;
    use crate::cmd::learn::LearnRequest;
    use crate::cmd::learn::learn;
    use crate::helper::test_context;

    #[test]
    fn test_export() -> Fallible<()> {
        let (config, mut store) = test_context()?;
        assert_eq!(export_cards(&config, &store)?, "[]");
        learn(
            &config,
            None,
            &mut store,
            LearnRequest {
                words: vec!["apple".to_string()],
                scenario: None,
                relearn: false,
                date: Date::parse("2023-05-01")?,
            },
        )?;
        let dir = tempdir()?;
        let path = dir.path().join("cards.json");
        export_collection(&config, &store, Some(path.display().to_string()))?;
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(json[0]["word"], "apple");
        assert_eq!(json[0]["due_date"], "2023-05-02");
        assert_eq!(json[0]["mastered"], false);
        Ok(())
    }
}
