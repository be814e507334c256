// Copyright 2025 Fernando Borretti
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

#[cfg(test)]
use std::collections::HashMap;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::Fallible;

/// A durable string-to-string store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Fallible<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Fallible<()>;
}

/// A key-value store backed by a single SQLite table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating database schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from kv where key = ?;";
        let value: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert into kv (key, value) values (?, ?) on conflict (key) do update set value = excluded.value;";
        self.conn.execute(sql, (key, value))?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["kv"], |row| row.get(0))?;
    Ok(count > 0)
}

/// An in-memory key-value store.
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_memory_store() -> Fallible<()> {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("a")?, None);
        store.set("a", "1")?;
        store.set("a", "2")?;
        assert_eq!(store.get("a")?, Some("2".to_string()));
        Ok(())
    }

    #[test]
    fn test_sqlite_store_persists() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("kyudocards.db");
        let path = path.to_str().unwrap();
        {
            let mut store = SqliteStore::new(path)?;
            assert_eq!(store.get("cards")?, None);
            store.set("cards", "[]")?;
            store.set("cards", "[1]")?;
        }
        let store = SqliteStore::new(path)?;
        assert_eq!(store.get("cards")?, Some("[1]".to_string()));
        Ok(())
    }
}
