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

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::types::card_id::CardId;
use crate::types::weight::DEFAULT_WEIGHT;
use crate::types::weight::Weight;

/// Aggregate review statistics.
#[derive(Clone, Default, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Total number of review judgments recorded.
    pub review_count: usize,
    /// Number of judgments that were "known".
    pub known_count: usize,
    /// The last known weight of each card, by id. Survives changes to the
    /// card collection.
    #[serde(default)]
    pub card_weights: BTreeMap<CardId, Weight>,
}

impl Statistics {
    /// The weight recorded for a card, if any.
    pub fn weight_of(&self, id: &CardId) -> Option<Weight> {
        self.card_weights.get(id).copied()
    }

    /// Whether the counters are worth persisting.
    pub fn has_activity(&self) -> bool {
        self.review_count > 0 || self.known_count > 0
    }

    /// Whether the counters are consistent.
    pub fn is_consistent(&self) -> bool {
        self.known_count <= self.review_count
    }

    /// The mean of the recorded weights, or the default weight if there are
    /// none.
    pub fn average_weight(&self) -> f64 {
        if self.card_weights.is_empty() {
            DEFAULT_WEIGHT
        } else {
            let total: f64 = self.card_weights.values().map(|w| w.value()).sum();
            total / self.card_weights.len() as f64
        }
    }

    /// The fraction of judgments that were "known", in `[0, 1]`.
    pub fn known_ratio(&self) -> f64 {
        if self.review_count == 0 {
            0.0
        } else {
            self.known_count as f64 / self.review_count as f64
        }
    }
}
