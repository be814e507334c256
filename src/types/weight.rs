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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::Error;

/// The lowest weight a card can have.
pub const MIN_WEIGHT: f64 = 0.3;

/// The highest weight a card can have.
pub const MAX_WEIGHT: f64 = 5.0;

/// The weight of a new card, and of every card after a reset.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Multiplier applied when a card is known.
const KNOWN_FACTOR: f64 = 0.7;

/// Multiplier applied when a card needs review.
const REVIEW_FACTOR: f64 = 1.5;

/// The outcome of presenting a card.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Judgment {
    Known,
    NeedsReview,
}

impl Judgment {
    pub fn is_known(self) -> bool {
        self == Judgment::Known
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Judgment::Known => "known",
            Judgment::NeedsReview => "needs review",
        }
    }
}

impl From<bool> for Judgment {
    fn from(known: bool) -> Self {
        if known {
            Judgment::Known
        } else {
            Judgment::NeedsReview
        }
    }
}

/// A card's sampling weight. Always within `[MIN_WEIGHT, MAX_WEIGHT]`:
/// construction saturates at the bounds.
#[derive(Clone, Copy, PartialEq, PartialOrd, Debug, Serialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    /// Build a weight, saturating at the bounds. Returns `None` for NaN or
    /// infinite values.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() {
            Some(Self(value.clamp(MIN_WEIGHT, MAX_WEIGHT)))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The weight after a review with the given judgment.
    pub fn update(self, judgment: Judgment) -> Self {
        match judgment {
            Judgment::Known => Self(MIN_WEIGHT.max(self.0 * KNOWN_FACTOR)),
            Judgment::NeedsReview => Self(MAX_WEIGHT.min(self.0 * REVIEW_FACTOR)),
        }
    }

    /// The weight normalized to `(0, 1]` by the maximum weight.
    pub fn factor(self) -> f64 {
        self.0 / MAX_WEIGHT
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(DEFAULT_WEIGHT)
    }
}

impl Display for Weight {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl<'de> Deserialize<'de> for Weight {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Weight::new(value).ok_or_else(|| D::Error::custom("weight is not a finite number"))
    }
}
