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

use crate::collection::Collection;
use crate::error::Fallible;

/// Forget all review history: every weight goes back to the default.
pub fn reset_collection(directory: Option<String>) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    coll.store.reset_stats();
    println!("Reset {} cards.", coll.store.cards().len());
    Ok(())
}

pub fn shuffle_collection(directory: Option<String>) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    coll.store.reshuffle(&mut rand::rng());
    println!("Shuffled {} cards.", coll.store.cards().len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::types::card_id::CardId;
    use crate::types::weight::Judgment;

    #[test]
    fn test_reset() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().display().to_string();
        {
            let mut coll = Collection::new(Some(path.clone()))?;
            coll.store.review(&CardId::from("1"), Judgment::NeedsReview);
            assert_eq!(coll.store.stats().review_count, 1);
        }
        reset_collection(Some(path.clone()))?;
        let coll = Collection::new(Some(path))?;
        assert_eq!(coll.store.stats().review_count, 0);
        assert!(coll.store.cards().iter().all(|c| c.weight().value() == 1.0));
        Ok(())
    }

    #[test]
    fn test_shuffle_keeps_cards() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().display().to_string();
        let mut before: Vec<String> = Collection::new(Some(path.clone()))?
            .store
            .cards()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        shuffle_collection(Some(path.clone()))?;
        let mut after: Vec<String> = Collection::new(Some(path))?
            .store
            .cards()
            .iter()
            .map(|c| c.id().to_string())
            .collect();
        before.sort();
        after.sort();
        assert_eq!(before, after);
        Ok(())
    }
}
