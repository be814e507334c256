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

use std::collections::HashSet;

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ErrorReport;
use crate::kv::KeyValueStore;
use crate::scheduler::ReviewOutcome;
use crate::scheduler::apply_reset;
use crate::scheduler::apply_review;
use crate::scheduler::next_index;
use crate::scheduler::weighted_shuffle;
use crate::types::card::Card;
use crate::types::card::CardEdit;
use crate::types::card::CardFields;
use crate::types::card::ValidationError;
use crate::types::card_id::CardId;
use crate::types::stats::Statistics;
use crate::types::theme::ThemeCategory;
use crate::types::timestamp::Timestamp;
use crate::types::weight::Judgment;
use crate::vocabulary::default_cards;

pub const CARDS_KEY: &str = "kyudo-flashcards-cards";
pub const STATS_KEY: &str = "kyudo-flashcards-stats";
pub const INSTRUCTIONS_KEY: &str = "kyudo-instructions-seen";

/// Owns the card collection, the statistics, and the viewing position, and
/// writes them through to a key-value store after every mutation.
///
/// Write failures are logged and otherwise ignored: the in-memory state is
/// authoritative for the rest of the session.
pub struct CardStore<S: KeyValueStore> {
    kv: S,
    cards: Vec<Card>,
    stats: Statistics,
    current_index: usize,
    theme: ThemeCategory,
}

impl<S: KeyValueStore> CardStore<S> {
    /// Read the persisted cards and statistics. Missing or malformed records
    /// are replaced by the defaults: the built-in vocabulary, shuffled, and
    /// empty statistics.
    pub fn load<R: Rng + ?Sized>(kv: S, rng: &mut R) -> Self {
        let mut stats: Statistics = match read_record(&kv, STATS_KEY) {
            Some(stats) if Statistics::is_consistent(&stats) => stats,
            Some(_) => {
                log::warn!("Ignoring inconsistent statistics record.");
                Statistics::default()
            }
            None => Statistics::default(),
        };
        let persisted: Option<Vec<Card>> = read_record::<_, Vec<Card>>(&kv, CARDS_KEY)
            .filter(|cards| match validate_collection(cards) {
                Ok(()) => !cards.is_empty(),
                Err(e) => {
                    log::warn!("Ignoring invalid card record: {e}");
                    false
                }
            });
        let seeded = persisted.is_none();
        let mut cards = match persisted {
            Some(cards) => cards,
            None => {
                log::debug!("Seeding the default vocabulary.");
                weighted_shuffle(default_cards(), rng)
            }
        };
        reconcile_weights(&mut cards, &mut stats);
        log::debug!(
            "Loaded {} cards ({} reviews, {} known).",
            cards.len(),
            stats.review_count,
            stats.known_count
        );
        let mut store = Self {
            kv,
            cards,
            stats,
            current_index: 0,
            theme: ThemeCategory::All,
        };
        if seeded {
            store.save();
        }
        store
    }

    /// Persist the card collection, unless it is empty.
    pub fn save(&mut self) {
        if self.cards.is_empty() {
            log::debug!("Not saving an empty collection.");
        } else {
            persist(&mut self.kv, CARDS_KEY, &self.cards);
        }
    }

    /// Persist the statistics, unless no review was ever recorded.
    pub fn save_stats(&mut self) {
        if self.stats.has_activity() {
            persist(&mut self.kv, STATS_KEY, &self.stats);
        }
    }

    /// The card at the viewing position, within the active theme filter.
    pub fn current_card(&self) -> Option<&Card> {
        self.visible().nth(self.current_index)
    }

    /// The number of cards within the active theme filter.
    pub fn card_count(&self) -> usize {
        self.visible().count()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The whole collection, in presentation order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The cards within the active theme filter, in presentation order.
    pub fn visible(&self) -> impl Iterator<Item = &Card> {
        let theme = self.theme;
        self.cards
            .iter()
            .filter(move |card| theme.matches(card.theme()))
    }

    pub fn stats(&self) -> &Statistics {
        &self.stats
    }

    pub fn theme(&self) -> ThemeCategory {
        self.theme
    }

    /// Record a review judgment and advance to the next card, wrapping
    /// around after the last one.
    pub fn review(&mut self, id: &CardId, judgment: Judgment) -> ReviewOutcome {
        let outcome = apply_review(&mut self.cards, &mut self.stats, id, judgment);
        log::debug!(
            "{id} {} {} -> {}",
            judgment.as_str(),
            outcome.old_weight,
            outcome.new_weight
        );
        self.current_index = next_index(self.current_index, self.card_count());
        self.save_stats();
        self.save();
        outcome
    }

    /// Reorder the collection with the weighted shuffle and go back to the
    /// first card.
    pub fn reshuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let cards = std::mem::take(&mut self.cards);
        self.cards = weighted_shuffle(cards, rng);
        self.current_index = 0;
        self.save();
    }

    /// Reset every weight to the default and zero the counters.
    pub fn reset_stats(&mut self) {
        apply_reset(&mut self.cards, &mut self.stats);
        persist(&mut self.kv, STATS_KEY, &self.stats);
        self.save();
    }

    /// Replace the whole collection and go back to the first card. If any
    /// card is invalid, nothing changes.
    pub fn replace_cards(&mut self, cards: Vec<Card>) -> Result<(), ValidationError> {
        validate_collection(&cards)?;
        self.cards = cards;
        reconcile_weights(&mut self.cards, &mut self.stats);
        self.current_index = 0;
        self.save();
        Ok(())
    }

    /// Create a card with a fresh id and the default weight, appended to the
    /// collection.
    pub fn add(&mut self, fields: CardFields) -> Result<CardId, ValidationError> {
        let id = {
            let taken: HashSet<&CardId> = self
                .cards
                .iter()
                .map(|card| card.id())
                .chain(self.stats.card_weights.keys())
                .collect();
            CardId::generate(Timestamp::now(), |id| taken.contains(id))
        };
        let card = Card::new(id.clone(), fields)?;
        let mut cards = self.cards.clone();
        cards.push(card);
        self.replace_cards(cards)?;
        Ok(id)
    }

    /// Edit a card's fields. Returns `false`, changing nothing, if there is
    /// no card with that id.
    pub fn edit(&mut self, id: &CardId, edit: CardEdit) -> Result<bool, ValidationError> {
        let Some(position) = self.position_of(id) else {
            return Ok(false);
        };
        let mut cards = self.cards.clone();
        cards[position] = cards[position].edited(edit)?;
        self.replace_cards(cards)?;
        Ok(true)
    }

    /// Delete a card. Returns `false`, changing nothing, if there is no card
    /// with that id.
    pub fn delete(&mut self, id: &CardId) -> bool {
        let Some(position) = self.position_of(id) else {
            return false;
        };
        let mut cards = self.cards.clone();
        cards.remove(position);
        // The remaining cards were already valid.
        if let Err(e) = self.replace_cards(cards) {
            log::error!("Deleting {id} produced an invalid collection: {e}");
            return false;
        }
        true
    }

    /// Restrict presentation to a theme category and go back to the first
    /// card.
    pub fn set_theme_filter(&mut self, theme: ThemeCategory) {
        self.theme = theme;
        self.current_index = 0;
    }

    pub fn instructions_seen(&self) -> bool {
        match self.kv.get(INSTRUCTIONS_KEY) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                log::warn!("Failed to read {INSTRUCTIONS_KEY}: {e}");
                false
            }
        }
    }

    pub fn mark_instructions_seen(&mut self) {
        if let Err(e) = self.kv.set(INSTRUCTIONS_KEY, "true") {
            log::warn!("Failed to persist {INSTRUCTIONS_KEY}: {e}");
        }
    }

    fn position_of(&self, id: &CardId) -> Option<usize> {
        self.cards.iter().position(|card| card.id() == id)
    }

    #[cfg(test)]
    pub fn into_kv(self) -> S {
        self.kv
    }
}

/// Every card has its mandatory fields, and no id appears twice.
fn validate_collection(cards: &[Card]) -> Result<(), ValidationError> {
    let mut seen: HashSet<&CardId> = HashSet::new();
    for card in cards {
        card.validate()?;
        if !seen.insert(card.id()) {
            return Err(ValidationError::DuplicateId(card.id().clone()));
        }
    }
    Ok(())
}

/// Make each card's weight agree with the statistics: a recorded weight wins,
/// otherwise the card's weight is recorded.
fn reconcile_weights(cards: &mut [Card], stats: &mut Statistics) {
    for card in cards.iter_mut() {
        match stats.weight_of(card.id()) {
            Some(weight) => card.set_weight(weight),
            None => {
                stats.card_weights.insert(card.id().clone(), card.weight());
            }
        }
    }
}

/// Read and parse a JSON record. Absent, unreadable, and malformed records
/// are all `None`.
fn read_record<S: KeyValueStore, T: DeserializeOwned>(kv: &S, key: &str) -> Option<T> {
    let json = match kv.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => return None,
        Err(e) => {
            log::warn!("Failed to read {key}: {e}");
            return None;
        }
    };
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed {key}: {e}");
            None
        }
    }
}

fn persist<S: KeyValueStore, T: Serialize>(kv: &mut S, key: &str, value: &T) {
    let result = serde_json::to_string(value)
        .map_err(ErrorReport::from)
        .and_then(|json| kv.set(key, &json));
    if let Err(e) = result {
        log::warn!("Failed to persist {key}: {e}");
    }
}
