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

use mcard_core::Date;
use mcard_core::ReviewPlan;
use mcard_core::Word;
use mcard_core::build_plan;
use mcard_core::error::Fallible;
use mcard_core::error::fail;

use crate::config::Config;

/// Previews the review timeline for `words` without creating any cards.
pub fn plan(config: &Config, words: &[String], date: Date) -> Fallible<ReviewPlan> {
    let words = words.iter().map(Word::new).collect::<Fallible<Vec<Word>>>()?;
    if words.is_empty() {
        return fail("no words given.");
    }
    Ok(build_plan(&words, date, &config.intervals)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::test_context;

    #[test]
    fn test_plan() -> Fallible<()> {
        let (config, _) = test_context()?;
        let plan = plan(
            &config,
            &["apple".to_string(), "book".to_string()],
            Date::parse("2023-05-01")?,
        )?;
        assert_eq!(
            plan.to_string(),
            "Day 0 (today): first study of apple, book\n\
             Day 1 (2023-05-02): review #1 of apple, book\n\
             Day 3 (2023-05-04): review #2 of apple, book\n\
             Day 7 (2023-05-08): review #3 of apple, book\n"
        );
        Ok(())
    }

    #[test]
    fn test_plan_needs_words() -> Fallible<()> {
        let (config, _) = test_context()?;
        assert!(plan(&config, &[], Date::parse("2023-05-01")?).is_err());
        Ok(())
    }
}
