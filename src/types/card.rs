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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::weight::Weight;

/// A single vocabulary term.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    id: CardId,
    kanji: String,
    romaji: String,
    definition: String,
    /// Key into the image table. May be empty.
    #[serde(default)]
    image_query: String,
    #[serde(default)]
    weight: Weight,
    /// Category label, used only for filtering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme: Option<String>,
}

/// The user-editable fields of a card.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct CardFields {
    pub kanji: String,
    pub romaji: String,
    pub definition: String,
    pub image_query: String,
    pub theme: Option<String>,
}

/// A partial update of a card's fields. `None` leaves a field unchanged. For
/// the theme, `Some(None)` clears it.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct CardEdit {
    pub kanji: Option<String>,
    pub romaji: Option<String>,
    pub definition: Option<String>,
    pub image_query: Option<String>,
    pub theme: Option<Option<String>>,
}

/// Reasons a card or a card collection is rejected.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ValidationError {
    MissingKanji,
    MissingRomaji,
    MissingDefinition,
    DuplicateId(CardId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingKanji => write!(f, "card is missing a kanji."),
            ValidationError::MissingRomaji => write!(f, "card is missing a romaji reading."),
            ValidationError::MissingDefinition => write!(f, "card is missing a definition."),
            ValidationError::DuplicateId(id) => write!(f, "duplicate card id: {id}."),
        }
    }
}

impl Error for ValidationError {}

impl CardFields {
    pub fn new(
        kanji: impl Into<String>,
        romaji: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            kanji: kanji.into(),
            romaji: romaji.into(),
            definition: definition.into(),
            image_query: String::new(),
            theme: None,
        }
    }

    pub fn with_image_query(mut self, image_query: impl Into<String>) -> Self {
        self.image_query = image_query.into();
        self
    }

    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }
}

impl Card {
    /// Build a card with the default weight. The mandatory fields must be
    /// non-blank.
    pub fn new(id: CardId, fields: CardFields) -> Result<Self, ValidationError> {
        let card = Self {
            id,
            kanji: fields.kanji.trim().to_string(),
            romaji: fields.romaji.trim().to_string(),
            definition: fields.definition.trim().to_string(),
            image_query: fields.image_query.trim().to_string(),
            weight: Weight::default(),
            theme: fields
                .theme
                .map(|theme| theme.trim().to_string())
                .filter(|theme| !theme.is_empty()),
        };
        card.validate()?;
        Ok(card)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.kanji.trim().is_empty() {
            return Err(ValidationError::MissingKanji);
        }
        if self.romaji.trim().is_empty() {
            return Err(ValidationError::MissingRomaji);
        }
        if self.definition.trim().is_empty() {
            return Err(ValidationError::MissingDefinition);
        }
        Ok(())
    }

    /// Apply an edit, returning the edited card. The id and weight are kept.
    pub fn edited(&self, edit: CardEdit) -> Result<Self, ValidationError> {
        let fields = CardFields {
            kanji: edit.kanji.unwrap_or_else(|| self.kanji.clone()),
            romaji: edit.romaji.unwrap_or_else(|| self.romaji.clone()),
            definition: edit.definition.unwrap_or_else(|| self.definition.clone()),
            image_query: edit.image_query.unwrap_or_else(|| self.image_query.clone()),
            theme: edit.theme.unwrap_or_else(|| self.theme.clone()),
        };
        let mut card = Card::new(self.id.clone(), fields)?;
        card.weight = self.weight;
        Ok(card)
    }

    #[cfg(test)]
    pub fn with_weight(mut self, weight: Weight) -> Self {
        self.weight = weight;
        self
    }

    pub fn id(&self) -> &CardId {
        &self.id
    }

    pub fn kanji(&self) -> &str {
        &self.kanji
    }

    pub fn romaji(&self) -> &str {
        &self.romaji
    }

    pub fn definition(&self) -> &str {
        &self.definition
    }

    pub fn image_query(&self) -> &str {
        &self.image_query
    }

    pub fn weight(&self) -> Weight {
        self.weight
    }

    pub fn set_weight(&mut self, weight: Weight) {
        self.weight = weight;
    }

    pub fn theme(&self) -> Option<&str> {
        self.theme.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields() -> CardFields {
        CardFields::new("弓", "yumi", "Arc japonais")
            .with_image_query("japanese bow yumi")
            .with_theme("Équipement")
    }

    #[test]
    fn test_new_card_has_default_weight() {
        let card = Card::new(CardId::new("1"), fields()).unwrap();
        assert_eq!(card.weight(), Weight::default());
        assert_eq!(card.kanji(), "弓");
        assert_eq!(card.theme(), Some("Équipement"));
    }

    #[test]
    fn test_new_card_trims() {
        let card = Card::new(CardId::new("1"), CardFields::new(" 矢 ", "ya\n", " Flèche")).unwrap();
        assert_eq!(card.kanji(), "矢");
        assert_eq!(card.romaji(), "ya");
        assert_eq!(card.definition(), "Flèche");
        assert_eq!(card.theme(), None);
    }

    #[test]
    fn test_missing_fields() {
        let id = CardId::new("1");
        assert_eq!(
            Card::new(id.clone(), CardFields::new("", "yumi", "Arc")),
            Err(ValidationError::MissingKanji)
        );
        assert_eq!(
            Card::new(id.clone(), CardFields::new("弓", "  ", "Arc")),
            Err(ValidationError::MissingRomaji)
        );
        assert_eq!(
            Card::new(id, CardFields::new("弓", "yumi", "")),
            Err(ValidationError::MissingDefinition)
        );
    }

    #[test]
    fn test_edit_keeps_id_and_weight() {
        let card = Card::new(CardId::new("7"), fields())
            .unwrap()
            .with_weight(Weight::new(2.0).unwrap());
        let edit = CardEdit {
            definition: Some("Arc".to_string()),
            theme: Some(None),
            ..CardEdit::default()
        };
        let edited = card.edited(edit).unwrap();
        assert_eq!(edited.id().as_str(), "7");
        assert_eq!(edited.weight().value(), 2.0);
        assert_eq!(edited.definition(), "Arc");
        assert_eq!(edited.kanji(), "弓");
        assert_eq!(edited.theme(), None);
    }

    #[test]
    fn test_edit_rejects_blank() {
        let card = Card::new(CardId::new("7"), fields()).unwrap();
        let edit = CardEdit {
            romaji: Some(String::new()),
            ..CardEdit::default()
        };
        assert_eq!(card.edited(edit), Err(ValidationError::MissingRomaji));
    }

    #[test]
    fn test_json_shape() {
        let card = Card::new(CardId::new("1"), fields()).unwrap();
        let json = serde_json::to_value(&card).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["imageQuery"], "japanese bow yumi");
        assert_eq!(json["weight"], 1.0);
        assert_eq!(json["theme"], "Équipement");

        let untitled = Card::new(CardId::new("2"), CardFields::new("矢", "ya", "Flèche")).unwrap();
        let json = serde_json::to_value(&untitled).unwrap();
        assert!(json.get("theme").is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id":"3","kanji":"的","romaji":"mato","definition":"Cible"}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        assert_eq!(card.weight(), Weight::default());
        assert_eq!(card.image_query(), "");
        assert_eq!(card.theme(), None);
    }
}
