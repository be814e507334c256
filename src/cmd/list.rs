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
use crate::kv::KeyValueStore;
use crate::store::CardStore;
use crate::types::card::Card;
use crate::types::theme::ThemeCategory;

pub fn list_cards(directory: Option<String>, theme: Option<ThemeCategory>) -> Fallible<()> {
    let mut coll = Collection::new(directory)?;
    if let Some(theme) = theme {
        coll.store.set_theme_filter(theme);
    }
    for line in card_lines(&coll.store) {
        println!("{line}");
    }
    Ok(())
}

/// One tab-separated line per visible card, in presentation order.
fn card_lines<S: KeyValueStore>(store: &CardStore<S>) -> Vec<String> {
    store.visible().map(card_line).collect()
}

fn card_line(card: &Card) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        card.id(),
        card.weight(),
        card.kanji(),
        card.romaji(),
        card.theme().unwrap_or("-")
    )
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::kv::MemoryStore;
    use crate::types::card::CardFields;
    use crate::types::card_id::CardId;

    #[test]
    fn test_card_line() -> Fallible<()> {
        let card = Card::new(
            CardId::from("7"),
            CardFields::new("矢", "Ya", "La flèche").with_theme("Équipement"),
        )?;
        assert_eq!(card_line(&card), "7\t1.00\t矢\tYa\tÉquipement");
        let card = Card::new(CardId::from("8"), CardFields::new("的", "Mato", "La cible"))?;
        assert_eq!(card_line(&card), "8\t1.00\t的\tMato\t-");
        Ok(())
    }

    #[test]
    fn test_lines_follow_filter() {
        let mut store = CardStore::load(MemoryStore::new(), &mut StdRng::seed_from_u64(3));
        assert_eq!(card_lines(&store).len(), 38);
        store.set_theme_filter(ThemeCategory::Etapes);
        let lines = card_lines(&store);
        assert_eq!(lines.len(), 9);
        assert!(lines.iter().all(|line| line.ends_with("\tÉtapes")));
    }
}
