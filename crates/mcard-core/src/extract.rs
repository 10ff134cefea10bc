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

//! The seam to word recognition. Recognition itself happens elsewhere; the
//! scheduler only ever sees the candidate strings it produces.

use crate::catalog::Catalog;
use crate::error::Fallible;
use crate::error::fail;

pub trait WordExtractor {
    /// Returns candidate words found in `source`. Failures are reported to
    /// the caller, never replaced with sample data.
    fn extract(&self, source: &str) -> Fallible<Vec<String>>;
}

/// Treats `source` as the name of a catalog scenario and returns its words.
pub struct ScenarioExtractor<'a> {
    catalog: &'a Catalog,
}

impl<'a> ScenarioExtractor<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }
}

impl WordExtractor for ScenarioExtractor<'_> {
    fn extract(&self, source: &str) -> Fallible<Vec<String>> {
        match self.catalog.scenario(source) {
            Some(scenario) => Ok(scenario.words.clone()),
            None => fail(format!("no scenario named '{source}'")),
        }
    }
}
