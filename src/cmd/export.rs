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

use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::kv::KeyValueStore;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::stats::Statistics;
use crate::types::timestamp::Timestamp;

pub fn export_collection(directory: Option<String>) -> Fallible<()> {
    let coll: Collection = Collection::new(directory)?;
    let export: Export = get_export(&coll.store, Timestamp::now());
    let json: String = serde_json::to_string_pretty(&export)?;
    println!("{json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Export<'a> {
    cards: &'a [Card],
    stats: &'a Statistics,
    exported_at: Timestamp,
}

fn get_export<S: KeyValueStore>(store: &CardStore<S>, exported_at: Timestamp) -> Export<'_> {
    Export {
        cards: store.cards(),
        stats: store.stats(),
        exported_at,
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::kv::MemoryStore;
    use crate::types::card_id::CardId;
    use crate::types::weight::Judgment;

    #[test]
    fn test_export_shape() -> Fallible<()> {
        let mut store = CardStore::load(MemoryStore::new(), &mut StdRng::seed_from_u64(1));
        store.review(&CardId::from("5"), Judgment::Known);
        let exported_at = Timestamp::new(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap());
        let json = serde_json::to_value(get_export(&store, exported_at))?;
        assert_eq!(json["cards"].as_array().map(|a| a.len()), Some(38));
        assert_eq!(json["stats"]["reviewCount"], 1);
        assert_eq!(json["stats"]["knownCount"], 1);
        assert_eq!(json["stats"]["cardWeights"]["5"], 0.7);
        assert_eq!(json["exportedAt"], "2025-01-02T03:04:05+00:00");
        Ok(())
    }
}
