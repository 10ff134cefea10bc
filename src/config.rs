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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use mcard_core::Catalog;
use mcard_core::IntervalTable;
use mcard_core::RelapsePolicy;
use mcard_core::Scheduler;
use mcard_core::error::Fallible;
use mcard_core::error::fail;
use serde::Deserialize;

/// Name of the configuration file looked up when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "mcard.toml";

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Path to the SQLite database.
    pub database: PathBuf,
    /// Optional path to a vocabulary catalog in TOML.
    pub catalog: Option<PathBuf>,
    /// Whose cards the commands operate on.
    pub learner: String,
    /// Review offsets in days.
    pub intervals: IntervalTable,
    /// What a failed review does.
    pub relapse: RelapsePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("mcard.db"),
            catalog: None,
            learner: "default".to_string(),
            intervals: IntervalTable::default(),
            relapse: RelapsePolicy::Reset,
        }
    }
}

impl Config {
    /// Reads the configuration at `path`, or `./mcard.toml` when no path is
    /// given. A missing default file means default settings; a missing
    /// explicit file is an error. Relative paths inside the file are
    /// resolved against the file's directory.
    pub fn load(path: Option<&str>) -> Fallible<Self> {
        let (path, explicit) = match path {
            Some(p) => (PathBuf::from(p), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        if !path.exists() {
            if explicit {
                return fail(format!(
                    "configuration file {} does not exist.",
                    path.display()
                ));
            }
            log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            return Ok(Self::default());
        }
        log::debug!("Loading configuration from {}", path.display());
        let contents = read_to_string(&path)?;
        let config = Self::parse(&contents)?;
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(config.resolve_relative_to(base))
    }

    pub fn parse(contents: &str) -> Fallible<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn resolve_relative_to(self, base: &Path) -> Self {
        let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        Self {
            database: resolve(self.database),
            catalog: self.catalog.map(resolve),
            ..self
        }
    }

    pub fn scheduler(&self) -> Scheduler {
        Scheduler::new(self.intervals.clone(), self.relapse)
    }

    pub fn load_catalog(&self) -> Fallible<Option<Catalog>> {
        match &self.catalog {
            Some(path) => {
                log::debug!("Loading catalog from {}", path.display());
                let contents = read_to_string(path)?;
                Ok(Some(Catalog::from_toml_str(&contents)?))
            }
            None => Ok(None),
        }
    }
}
