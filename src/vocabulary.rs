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

use crate::types::card::Card;
use crate::types::card::CardFields;
use crate::types::card_id::CardId;

struct Entry {
    id: &'static str,
    kanji: &'static str,
    romaji: &'static str,
    definition: &'static str,
    image_query: &'static str,
    theme: &'static str,
}

const fn entry(
    id: &'static str,
    kanji: &'static str,
    romaji: &'static str,
    definition: &'static str,
    image_query: &'static str,
    theme: &'static str,
) -> Entry {
    Entry {
        id,
        kanji,
        romaji,
        definition,
        image_query,
        theme,
    }
}

#[rustfmt::skip]
const VOCABULARY: &[Entry] = &[
    entry("1", "弓道", "Kyūdō", "La voie de l'arc, tir à l'arc traditionnel japonais", "japanese archery", "Philosophie"),
    entry("2", "弓", "Yumi", "L'arc japonais, long et asymétrique", "japanese bow yumi", "Équipement"),
    entry("3", "矢", "Ya", "La flèche", "japanese arrow", "Équipement"),
    entry("4", "的", "Mato", "La cible", "archery target", "Équipement"),
    entry("5", "弽", "Yugake", "Le gant de tir porté à la main droite", "kyudo glove", "Équipement"),
    entry("6", "弦", "Tsuru", "La corde de l'arc", "bow string", "Équipement"),
    entry("7", "道場", "Dōjō", "Le lieu où l'on pratique la voie", "kyudo dojo", "Lieux"),
    entry("8", "射場", "Shajō", "L'espace de tir d'où l'on tire", "kyudo shooting range", "Lieux"),
    entry("9", "安土", "Azuchi", "La butte de terre derrière les cibles", "straw target archery", "Lieux"),
    entry("10", "射位", "Shai", "La ligne de tir", "shooting position", "Lieux"),
    entry("11", "本座", "Honza", "La position d'attente avant la ligne de tir", "before target archery", "Lieux"),
    entry("12", "足踏み", "Ashibumi", "Placement des pieds, première étape du tir", "feet stance archery", "Étapes"),
    entry("13", "胴造り", "Dōzukuri", "Placement du corps, deuxième étape", "posture stance", "Étapes"),
    entry("14", "弓構え", "Yugamae", "Préparation de l'arc, troisième étape", "yugamae", "Étapes"),
    entry("15", "打起し", "Uchiokoshi", "Élévation de l'arc, quatrième étape", "ichiokoshi", "Étapes"),
    entry("16", "引分け", "Hikiwake", "Ouverture de l'arc, cinquième étape", "hikiwake", "Étapes"),
    entry("17", "会", "Kai", "Pleine allonge, sixième étape", "kai", "Étapes"),
    entry("18", "離れ", "Hanare", "Le lâcher, septième étape", "arrow release", "Étapes"),
    entry("19", "残心", "Zanshin", "L'esprit qui demeure après le tir, huitième étape", "zanshin", "Étapes"),
    entry("20", "射法八節", "Shahō hassetsu", "Les huit étapes du tir", "kyudo posture", "Étapes"),
    entry("21", "甲矢", "Haya", "La première flèche d'une paire", "arrow feathers", "Flèches"),
    entry("22", "乙矢", "Otoya", "La seconde flèche d'une paire", "arrow feathers", "Flèches"),
    entry("23", "筈", "Hazu", "L'encoche de la flèche", "arrow nock", "Flèches"),
    entry("24", "羽", "Hane", "Les plumes de la flèche", "arrow feathers", "Flèches"),
    entry("25", "手の内", "Tenouchi", "La prise de la main gauche sur l'arc", "hand grip bow", "Position"),
    entry("26", "弓返り", "Yugaeri", "La rotation de l'arc dans la main après le lâcher", "bow rotation archery", "Position"),
    entry("27", "袴", "Hakama", "Le pantalon large traditionnel", "hakama traditional", "Tenue"),
    entry("28", "帯", "Obi", "La ceinture", "japanese obi belt", "Tenue"),
    entry("29", "礼", "Rei", "Le salut, marque de respect", "japanese bow respect", "Cérémonie"),
    entry("30", "体配", "Taihai", "La manière de se déplacer et de se tenir lors du tir cérémoniel", "kyudo ceremony", "Cérémonie"),
    entry("31", "入場", "Nyūjō", "L'entrée dans le dojo", "dojo entrance", "Cérémonie"),
    entry("32", "退場", "Taijō", "La sortie du dojo", "dojo exit", "Cérémonie"),
    entry("33", "真善美", "Shin zen bi", "Vérité, bonté, beauté : l'idéal du kyūdō", "zen archery", "Philosophie"),
    entry("34", "呼吸", "Kokyū", "La respiration", "breathing meditation", "Philosophie"),
    entry("35", "的中", "Tekichū", "Toucher la cible", "bullseye target", "Entraînement"),
    entry("36", "稽古", "Keiko", "L'entraînement, la pratique", "martial arts training", "Entraînement"),
    entry("37", "段位", "Dan'i", "Le grade", "martial arts ranking", "Entraînement"),
    entry("38", "初心者", "Shoshinsha", "Le débutant", "beginner student", "Entraînement"),
];

/// The built-in vocabulary, each card at the default weight, in table order.
pub fn default_cards() -> Vec<Card> {
    VOCABULARY
        .iter()
        .filter_map(|entry| {
            let fields = CardFields::new(entry.kanji, entry.romaji, entry.definition)
                .with_image_query(entry.image_query)
                .with_theme(entry.theme);
            Card::new(CardId::new(entry.id), fields).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::image::has_image;
    use crate::types::theme::ThemeCategory;
    use crate::types::weight::Weight;

    #[test]
    fn test_every_entry_is_a_valid_card() {
        assert_eq!(default_cards().len(), VOCABULARY.len());
    }

    #[test]
    fn test_ids_are_unique() {
        let cards = default_cards();
        let ids: HashSet<&CardId> = cards.iter().map(|c| c.id()).collect();
        assert_eq!(ids.len(), cards.len());
    }

    #[test]
    fn test_default_weight() {
        assert!(default_cards().iter().all(|c| c.weight() == Weight::default()));
    }

    #[test]
    fn test_every_theme_is_in_a_category() {
        for card in default_cards() {
            let named = ThemeCategory::ALL
                .iter()
                .filter(|category| **category != ThemeCategory::All)
                .any(|category| category.matches(card.theme()));
            assert!(named, "{} has an unknown theme", card.romaji());
        }
    }

    #[test]
    fn test_every_image_query_resolves() {
        for card in default_cards() {
            assert!(has_image(card.image_query()), "{}", card.image_query());
        }
    }
}
