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

//! mcard-core: Core library for the mcard vocabulary scheduler.
//!
//! This library provides:
//! - The forgetting-curve interval table and per-word card records
//! - The scheduling engine (card creation, review transitions, due queries)
//! - Progress statistics and the activity log behind the learner's streak
//! - Review plans for a new batch of words
//! - The vocabulary catalog, the word-extraction seam and the storage contract
//!
//! Nothing here reads the clock: every operation takes its date explicitly.

pub mod activity;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod intervals;
pub mod plan;
pub mod progress;
pub mod scheduler;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use activity::{ActivityLog, DailyActivity};
pub use catalog::{CandidateFilter, Catalog, UnknownWord};
pub use error::{ErrorReport, Fallible, SchedulerError, fail};
pub use intervals::IntervalTable;
pub use plan::{ReviewPlan, build_plan};
pub use progress::{LearnerProgress, summarize};
pub use scheduler::{BatchReport, RelapsePolicy, Scheduler};
pub use store::{CardStore, MemoryStore};
pub use types::card::{CardParts, CardRecord, CardSet};
pub use types::date::Date;
pub use types::outcome::ReviewOutcome;
pub use types::word::Word;
