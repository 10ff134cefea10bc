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

use std::path::Path;

use mcard_core::ActivityLog;
use mcard_core::CardParts;
use mcard_core::CardRecord;
use mcard_core::CardSet;
use mcard_core::CardStore;
use mcard_core::DailyActivity;
use mcard_core::Date;
use mcard_core::IntervalTable;
use mcard_core::Word;
use mcard_core::error::ErrorReport;
use mcard_core::error::Fallible;
use rusqlite::Connection;
use rusqlite::params;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS cards (
    learner TEXT NOT NULL,
    word TEXT NOT NULL,
    created_date TEXT NOT NULL,
    last_reviewed_date TEXT,
    review_count INTEGER NOT NULL,
    success_count INTEGER NOT NULL,
    lapse_count INTEGER NOT NULL,
    interval_index INTEGER NOT NULL,
    due_date TEXT,
    mastered INTEGER NOT NULL,
    PRIMARY KEY (learner, word)
);

CREATE TABLE IF NOT EXISTS activity (
    learner TEXT NOT NULL,
    date TEXT NOT NULL,
    words_learned INTEGER NOT NULL DEFAULT 0,
    words_reviewed INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (learner, date)
);

CREATE INDEX IF NOT EXISTS idx_cards_due ON cards(learner, due_date);
"#;

fn db_error(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("database error: {e}"))
}

/// SQLite-backed card store. Also keeps the learner's daily activity, which
/// is where the streak comes from.
pub struct SqliteStore {
    conn: Connection,
    table: IntervalTable,
}

/// A card row before its dates and counters are validated.
struct CardRow {
    word: String,
    created_date: String,
    last_reviewed_date: Option<String>,
    review_count: i64,
    success_count: i64,
    lapse_count: i64,
    interval_index: i64,
    due_date: Option<String>,
    mastered: bool,
}

impl SqliteStore {
    pub fn open(path: &Path, table: IntervalTable) -> Fallible<Self> {
        log::debug!("Opening database at {}", path.display());
        let conn = Connection::open(path).map_err(db_error)?;
        Self::init(conn, table)
    }

    #[cfg(test)]
    pub fn open_in_memory(table: IntervalTable) -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(db_error)?;
        Self::init(conn, table)
    }

    fn init(conn: Connection, table: IntervalTable) -> Fallible<Self> {
        conn.execute_batch(SCHEMA).map_err(db_error)?;
        Ok(Self { conn, table })
    }

    /// Runs `f` while holding the database's write lock, so that two
    /// processes cannot interleave load-mutate-save cycles. Rolls back if
    /// `f` fails.
    pub fn exclusive<T>(&mut self, f: impl FnOnce(&mut Self) -> Fallible<T>) -> Fallible<T> {
        self.conn
            .execute_batch("BEGIN IMMEDIATE")
            .map_err(db_error)?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT").map_err(db_error)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                    log::warn!("Rollback failed: {rollback}");
                }
                Err(e)
            }
        }
    }

    pub fn load_activity(&self, learner: &str) -> Fallible<ActivityLog> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT date, words_learned, words_reviewed FROM activity WHERE learner = ?1 ORDER BY date",
            )
            .map_err(db_error)?;
        let rows = stmt
            .query_map(params![learner], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, u32>(1)?,
                    row.get::<_, u32>(2)?,
                ))
            })
            .map_err(db_error)?;
        let mut days = Vec::new();
        for row in rows {
            let (date, words_learned, words_reviewed) = row.map_err(db_error)?;
            days.push((
                Date::parse(&date)?,
                DailyActivity {
                    words_learned,
                    words_reviewed,
                },
            ));
        }
        Ok(ActivityLog::from_days(days))
    }

    pub fn record_activity(
        &self,
        learner: &str,
        date: Date,
        activity: DailyActivity,
    ) -> Fallible<()> {
        if !activity.is_active() {
            return Ok(());
        }
        self.conn
            .execute(
                "INSERT INTO activity (learner, date, words_learned, words_reviewed) VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(learner, date) DO UPDATE SET
                     words_learned = words_learned + excluded.words_learned,
                     words_reviewed = words_reviewed + excluded.words_reviewed",
                params![
                    learner,
                    date.to_string(),
                    activity.words_learned,
                    activity.words_reviewed
                ],
            )
            .map_err(db_error)?;
        Ok(())
    }

    #[cfg(test)]
    pub fn card_count(&self, learner: &str) -> Fallible<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM cards WHERE learner = ?1",
                params![learner],
                |row| row.get(0),
            )
            .map_err(db_error)?;
        Ok(count as usize)
    }

    fn restore(&self, row: CardRow) -> Fallible<CardRecord> {
        let counter = |value: i64, name: &str| -> Fallible<usize> {
            usize::try_from(value).map_err(|_| {
                ErrorReport::new(format!("card '{}' has a negative {name}", row.word))
            })
        };
        let parts = CardParts {
            word: Word::new(&row.word)?,
            created_date: Date::parse(&row.created_date)?,
            last_reviewed_date: row
                .last_reviewed_date
                .as_deref()
                .map(Date::parse)
                .transpose()?,
            review_count: counter(row.review_count, "review count")?,
            success_count: counter(row.success_count, "success count")?,
            lapse_count: counter(row.lapse_count, "lapse count")?,
            current_interval_index: counter(row.interval_index, "interval index")?,
            due_date: row.due_date.as_deref().map(Date::parse).transpose()?,
            mastered: row.mastered,
        };
        CardRecord::restore(parts, &self.table)
    }
}

impl CardStore for SqliteStore {
    fn load(&self, learner: &str) -> Fallible<CardSet> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT word, created_date, last_reviewed_date, review_count, success_count,
                        lapse_count, interval_index, due_date, mastered
                 FROM cards WHERE learner = ?1",
            )
            .map_err(db_error)?;
        let rows = stmt
            .query_map(params![learner], |row| {
                Ok(CardRow {
                    word: row.get(0)?,
                    created_date: row.get(1)?,
                    last_reviewed_date: row.get(2)?,
                    review_count: row.get(3)?,
                    success_count: row.get(4)?,
                    lapse_count: row.get(5)?,
                    interval_index: row.get(6)?,
                    due_date: row.get(7)?,
                    mastered: row.get(8)?,
                })
            })
            .map_err(db_error)?;
        let mut records = Vec::new();
        for row in rows {
            records.push(self.restore(row.map_err(db_error)?)?);
        }
        log::debug!("Loaded {} cards for learner '{learner}'", records.len());
        Ok(CardSet::from_records(records)?)
    }

    fn save(&mut self, learner: &str, cards: &CardSet) -> Fallible<()> {
        let sp = self.conn.savepoint().map_err(db_error)?;
        sp.execute("DELETE FROM cards WHERE learner = ?1", params![learner])
            .map_err(db_error)?;
        {
            let mut stmt = sp
                .prepare(
                    "INSERT INTO cards (learner, word, created_date, last_reviewed_date, review_count,
                                        success_count, lapse_count, interval_index, due_date, mastered)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                )
                .map_err(db_error)?;
            for card in cards.iter() {
                stmt.execute(params![
                    learner,
                    card.word().as_str(),
                    card.created_date().to_string(),
                    card.last_reviewed_date().map(|d| d.to_string()),
                    card.review_count() as i64,
                    card.success_count() as i64,
                    card.lapse_count() as i64,
                    card.current_interval_index() as i64,
                    card.due_date().map(|d| d.to_string()),
                    card.is_mastered(),
                ])
                .map_err(db_error)?;
            }
        }
        sp.commit().map_err(db_error)?;
        log::debug!("Saved {} cards for learner '{learner}'", cards.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mcard_core::ReviewOutcome;
    use mcard_core::Scheduler;
    use tempfile::tempdir;

    use super::*;

    fn date(s: &str) -> Date {
        Date::parse(s).unwrap()
    }

    #[test]
    fn test_roundtrip() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let mut store = SqliteStore::open_in_memory(IntervalTable::default())?;
        let mut cards = CardSet::new();
        let apple = Word::new("apple")?;
        scheduler.create_card(&mut cards, apple.clone(), date("2023-05-01"))?;
        scheduler.create_card(&mut cards, Word::new("book")?, date("2023-05-01"))?;
        scheduler.record_review(&mut cards, &apple, ReviewOutcome::Success, date("2023-05-02"))?;
        store.save("alice", &cards)?;

        let loaded = store.load("alice")?;
        assert_eq!(loaded, cards);
        assert_eq!(store.card_count("alice")?, 2);
        Ok(())
    }

    #[test]
    fn test_learners_are_isolated() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let mut store = SqliteStore::open_in_memory(IntervalTable::default())?;
        let mut cards = CardSet::new();
        scheduler.create_card(&mut cards, Word::new("apple")?, date("2023-05-01"))?;
        store.save("alice", &cards)?;
        store.save("bob", &CardSet::new())?;
        assert_eq!(store.load("alice")?.len(), 1);
        assert!(store.load("bob")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_replaces() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let mut store = SqliteStore::open_in_memory(IntervalTable::default())?;
        let mut cards = CardSet::new();
        scheduler.create_card(&mut cards, Word::new("apple")?, date("2023-05-01"))?;
        store.save("alice", &cards)?;
        store.save("alice", &CardSet::new())?;
        assert_eq!(store.card_count("alice")?, 0);
        Ok(())
    }

    #[test]
    fn test_exclusive_rolls_back_on_error() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let mut store = SqliteStore::open_in_memory(IntervalTable::default())?;
        let result: Fallible<()> = store.exclusive(|store| {
            let mut cards = store.load("alice")?;
            scheduler.create_card(&mut cards, Word::new("apple")?, date("2023-05-01"))?;
            store.save("alice", &cards)?;
            mcard_core::fail("boom")
        });
        assert!(result.is_err());
        assert_eq!(store.card_count("alice")?, 0);
        Ok(())
    }

    #[test]
    fn test_activity() -> Fallible<()> {
        let store = SqliteStore::open_in_memory(IntervalTable::default())?;
        let active = |learned, reviewed| DailyActivity {
            words_learned: learned,
            words_reviewed: reviewed,
        };
        store.record_activity("alice", date("2023-05-01"), active(8, 0))?;
        store.record_activity("alice", date("2023-05-02"), active(5, 3))?;
        store.record_activity("alice", date("2023-05-02"), active(0, 5))?;
        store.record_activity("alice", date("2023-05-03"), active(0, 0))?;
        let log = store.load_activity("alice")?;
        assert_eq!(log.get(date("2023-05-02")), active(5, 8));
        assert_eq!(log.streak_days(date("2023-05-03")), 2);
        assert_eq!(store.load_activity("bob")?.iter().count(), 0);
        Ok(())
    }

    #[test]
    fn test_on_disk() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("cards.db");
        let scheduler = Scheduler::default();
        {
            let mut store = SqliteStore::open(&path, IntervalTable::default())?;
            let mut cards = CardSet::new();
            scheduler.create_card(&mut cards, Word::new("apple")?, date("2023-05-01"))?;
            store.save("alice", &cards)?;
        }
        let store = SqliteStore::open(&path, IntervalTable::default())?;
        assert_eq!(store.card_count("alice")?, 1);
        Ok(())
    }

    #[test]
    fn test_load_rejects_rows_outside_table() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let mut store = SqliteStore::open_in_memory(IntervalTable::default())?;
        let mut cards = CardSet::new();
        let apple = Word::new("apple")?;
        scheduler.create_card(&mut cards, apple.clone(), date("2023-05-01"))?;
        for d in ["2023-05-02", "2023-05-05", "2023-05-12"] {
            scheduler.record_review(&mut cards, &apple, ReviewOutcome::Success, date(d))?;
        }
        store.save("alice", &cards)?;
        // The table shrinks below the card's interval index.
        store.table = IntervalTable::new(vec![1, 2])?;
        assert!(store.load("alice").is_err());
        Ok(())
    }

    #[test]
    fn test_load_rejects_stale_due_date() -> Fallible<()> {
        let scheduler = Scheduler::default();
        let mut store = SqliteStore::open_in_memory(IntervalTable::default())?;
        let mut cards = CardSet::new();
        scheduler.create_card(&mut cards, Word::new("apple")?, date("2023-05-01"))?;
        store.save("alice", &cards)?;
        store
            .conn
            .execute(
                "UPDATE cards SET due_date = '2099-01-01' WHERE learner = 'alice'",
                [],
            )
            .map_err(db_error)?;
        assert!(store.load("alice").is_err());

        // The same table length with different offsets moves every due date.
        store
            .conn
            .execute(
                "UPDATE cards SET due_date = '2023-05-02' WHERE learner = 'alice'",
                [],
            )
            .map_err(db_error)?;
        assert!(store.load("alice").is_ok());
        store.table = IntervalTable::new(vec![2, 3, 7, 15, 30, 60, 90])?;
        assert!(store.load("alice").is_err());
        Ok(())
    }
}
