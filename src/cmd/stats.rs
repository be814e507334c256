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
use std::fmt::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::collection::Collection;
use crate::error::Fallible;
use crate::kv::KeyValueStore;
use crate::store::CardStore;

#[derive(ValueEnum, Clone, Copy, Default)]
pub enum StatsFormat {
    /// Plain text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

impl Display for StatsFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StatsFormat::Text => write!(f, "text"),
            StatsFormat::Json => write!(f, "json"),
        }
    }
}

pub fn print_stats(directory: Option<String>, format: StatsFormat) -> Fallible<()> {
    let coll = Collection::new(directory)?;
    let stats = get_stats(&coll.store);
    match format {
        StatsFormat::Text => print!("{}", render_text(&stats)?),
        StatsFormat::Json => {
            let stats_json = serde_json::to_string_pretty(&stats)?;
            println!("{stats_json}");
        }
    }
    Ok(())
}

#[derive(Serialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    review_count: usize,
    known_count: usize,
    known_ratio: f64,
    average_weight: f64,
    total_cards: usize,
}

fn get_stats<S: KeyValueStore>(store: &CardStore<S>) -> Stats {
    let stats = store.stats();
    Stats {
        review_count: stats.review_count,
        known_count: stats.known_count,
        known_ratio: stats.known_ratio(),
        average_weight: stats.average_weight(),
        total_cards: store.cards().len(),
    }
}

fn render_text(stats: &Stats) -> Fallible<String> {
    let mut out = String::new();
    writeln!(out, "Reviews:        {}", stats.review_count)?;
    writeln!(
        out,
        "Known:          {} ({:.0}%)",
        stats.known_count,
        stats.known_ratio * 100.0
    )?;
    writeln!(out, "Average weight: {:.2}", stats.average_weight)?;
    writeln!(out, "Cards:          {}", stats.total_cards)?;
    Ok(out)
}
