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

pub mod due;
pub mod export;
pub mod learn;
pub mod plan;
pub mod review;
pub mod stats;

use mcard_core::Date;
use mcard_core::error::Fallible;

/// Parses a `--date` argument. The clock is only read here, at the edge:
/// everything below receives the date explicitly.
pub fn resolve_date(date: Option<String>) -> Fallible<Date> {
    match date {
        Some(s) => Date::parse(&s),
        None => Ok(Date::today()),
    }
}
