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

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// The result of a single review: did the learner recall the word?
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewOutcome {
    Success,
    Failure,
}

impl ReviewOutcome {
    pub fn as_str(&self) -> &str {
        match self {
            ReviewOutcome::Success => "success",
            ReviewOutcome::Failure => "failure",
        }
    }
}

impl TryFrom<String> for ReviewOutcome {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "success" => Ok(ReviewOutcome::Success),
            "failure" => Ok(ReviewOutcome::Failure),
            _ => fail(format!("invalid review outcome: {value}")),
        }
    }
}
