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

use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::oneshot;

use crate::kv::SqliteStore;
use crate::store::CardStore;
use crate::types::weight::Judgment;

#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

pub struct MutableState {
    pub reveal: bool,
    pub store: CardStore<SqliteStore>,
    /// The outcome of the last review, shown above the next card.
    pub last_review: Option<LastReview>,
    pub finished: bool,
}

pub struct LastReview {
    pub romaji: String,
    pub judgment: Judgment,
}

impl LastReview {
    pub fn message(&self) -> String {
        match self.judgment {
            Judgment::Known => format!(
                "Je sais ! {} : vous verrez cette carte moins souvent.",
                self.romaji
            ),
            Judgment::NeedsReview => format!(
                "À réviser. {} : vous verrez cette carte plus souvent.",
                self.romaji
            ),
        }
    }
}
