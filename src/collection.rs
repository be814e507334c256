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

use std::env::current_dir;
use std::path::PathBuf;
use std::time::Instant;

use crate::config::Config;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::kv::SqliteStore;
use crate::store::CardStore;

/// Name of the database file in a collection directory.
pub const DATABASE_FILE: &str = "kyudocards.db";

/// An opened collection directory.
pub struct Collection {
    pub directory: PathBuf,
    pub config: Config,
    pub store: CardStore<SqliteStore>,
}

impl Collection {
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        let directory = if directory.exists() {
            directory.canonicalize()?
        } else {
            return fail("directory does not exist.");
        };

        let config = Config::load(&directory)?;

        let db_path: PathBuf = directory.join(DATABASE_FILE);
        let db_path: &str = db_path
            .to_str()
            .ok_or_else(|| ErrorReport::new("invalid path"))?;
        let kv = SqliteStore::new(db_path)?;

        let store = {
            log::debug!("Loading collection...");
            let start = Instant::now();
            let store = CardStore::load(kv, &mut rand::rng());
            let duration = start.elapsed().as_millis();
            log::debug!("Collection loaded in {duration}ms.");
            store
        };

        Ok(Self {
            directory,
            config,
            store,
        })
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::vocabulary::default_cards;

    #[test]
    fn test_non_existent_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_fresh_directory() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().display().to_string();
        let coll = Collection::new(Some(path))?;
        assert_eq!(coll.store.cards().len(), default_cards().len());
        assert!(coll.directory.join(DATABASE_FILE).exists());
        assert_eq!(coll.config, Config::default());
        Ok(())
    }

    #[test]
    fn test_reopen_keeps_order() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().display().to_string();
        let first: Vec<String> = Collection::new(Some(path.clone()))?
            .store
            .cards()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        let second: Vec<String> = Collection::new(Some(path))?
            .store
            .cards()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        assert_eq!(first, second);
        Ok(())
    }
}
