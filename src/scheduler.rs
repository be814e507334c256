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

//! Review scheduling: the order cards are presented in, and how a review
//! judgment changes a card's weight.
//!
//! Ordering is a two-phase weighted shuffle. First, cards are sorted by
//! weight, heaviest first, except that cards whose weights are within
//! `TIE_THRESHOLD` of each other are ordered by a coin flip. Then a
//! back-to-front pass swaps each position `i` with a random position
//! `j = floor(u * (i + 1) * (1 + w / 5))`, clamped to `i`, where `u` is
//! uniform in `[0, 1)` and `w` is the weight of the card at `i`. This is not
//! a uniform shuffle.

use std::cmp::Ordering;

use rand::Rng;

use crate::types::card::Card;
use crate::types::card_id::CardId;
use crate::types::stats::Statistics;
use crate::types::weight::Judgment;
use crate::types::weight::Weight;

/// Weights closer than this are considered tied in the sorting phase.
const TIE_THRESHOLD: f64 = 0.1;

/// Reorder the cards, favouring heavier cards.
pub fn weighted_shuffle<R: Rng + ?Sized>(cards: Vec<Card>, rng: &mut R) -> Vec<Card> {
    let mut cards = weighted_sort(cards, rng);
    perturb(&mut cards, rng);
    cards
}

/// Phase one: sort heaviest first, breaking near-ties at random.
fn weighted_sort<R: Rng + ?Sized>(cards: Vec<Card>, rng: &mut R) -> Vec<Card> {
    let mut compare = |a: &Card, b: &Card| -> Ordering {
        let diff = b.weight().value() - a.weight().value();
        if diff.abs() > TIE_THRESHOLD {
            if diff > 0.0 {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        } else if rng.random_bool(0.5) {
            Ordering::Less
        } else {
            Ordering::Greater
        }
    };
    merge_sort(cards, &mut compare)
}

/// Phase two: weighted random swaps from the back of the list to the front.
fn perturb<R: Rng + ?Sized>(cards: &mut [Card], rng: &mut R) {
    for i in (1..cards.len()).rev() {
        let factor = cards[i].weight().factor();
        let u: f64 = rng.random();
        let j = (u * (i + 1) as f64 * (1.0 + factor)).floor() as usize;
        cards.swap(i, j.min(i));
    }
}

/// A merge sort that tolerates comparators which are not a total order. The
/// standard library sorts may panic on such comparators.
fn merge_sort<T, F>(mut items: Vec<T>, compare: &mut F) -> Vec<T>
where
    F: FnMut(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let left = merge_sort(items, compare);
    let right = merge_sort(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        let take_right = compare(r, l) == Ordering::Less;
        let next = if take_right { right.next() } else { left.next() };
        merged.extend(next);
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// The weight change caused by a single review.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ReviewOutcome {
    pub old_weight: Weight,
    pub new_weight: Weight,
}

/// Record a review judgment: update the card's weight, its mirrored entry in
/// the statistics, and the counters.
///
/// The baseline weight is the one recorded in the statistics. Failing that,
/// the card's own weight, and failing that (unknown id), the default weight.
pub fn apply_review(
    cards: &mut [Card],
    stats: &mut Statistics,
    id: &CardId,
    judgment: Judgment,
) -> ReviewOutcome {
    let card = cards.iter_mut().find(|card| card.id() == id);
    let old_weight = stats
        .weight_of(id)
        .or_else(|| card.as_ref().map(|card| card.weight()))
        .unwrap_or_default();
    let new_weight = old_weight.update(judgment);
    if let Some(card) = card {
        card.set_weight(new_weight);
    }
    stats.card_weights.insert(id.clone(), new_weight);
    stats.review_count += 1;
    if judgment.is_known() {
        stats.known_count += 1;
    }
    ReviewOutcome {
        old_weight,
        new_weight,
    }
}

/// Reset every weight to the default and zero the counters.
pub fn apply_reset(cards: &mut [Card], stats: &mut Statistics) {
    for weight in stats.card_weights.values_mut() {
        *weight = Weight::default();
    }
    for card in cards.iter_mut() {
        card.set_weight(Weight::default());
        stats
            .card_weights
            .insert(card.id().clone(), Weight::default());
    }
    stats.review_count = 0;
    stats.known_count = 0;
}

/// The position after `index` in a cyclic traversal of `len` cards.
pub fn next_index(index: usize, len: usize) -> usize {
    if len == 0 { 0 } else { (index + 1) % len }
}
