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

use mcard_core::IntervalTable;
use mcard_core::RelapsePolicy;
use mcard_core::error::Fallible;

use crate::config::Config;
use crate::db::SqliteStore;

pub const SAMPLE_CATALOG: &str = r#"
[[words]]
word = "apple"
translation = "苹果"

[[words]]
word = "banana"
translation = "香蕉"

[[words]]
word = "book"
translation = "书"

[[words]]
word = "coffee"
translation = "咖啡"

[[words]]
word = "water"
translation = "水"

[[scenarios]]
name = "restaurant"
words = ["restaurant", "coffee", "water", "menu"]
"#;

/// A configuration with a short `[1, 3, 7]` table and an in-memory store.
pub fn test_context() -> Fallible<(Config, SqliteStore)> {
    let config = Config {
        intervals: IntervalTable::new(vec![1, 3, 7])?,
        relapse: RelapsePolicy::Reset,
        learner: "tester".to_string(),
        ..Config::default()
    };
    let store = SqliteStore::open_in_memory(config.intervals.clone())?;
    Ok((config, store))
}
