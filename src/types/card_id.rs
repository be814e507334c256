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
use serde::Serialize;

use crate::types::timestamp::Timestamp;

/// An opaque, stable card identifier. Ids of the built-in vocabulary are
/// short numeric strings; ids of user-created cards are derived from the
/// creation time in milliseconds.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Generate an id from the given time, bumping it by one millisecond
    /// until `taken` rejects it.
    pub fn generate(now: Timestamp, taken: impl Fn(&CardId) -> bool) -> Self {
        let mut millis = now.millis();
        loop {
            let id = CardId(millis.to_string());
            if !taken(&id) {
                return id;
            }
            millis += 1;
        }
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId::new(value)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_generate_fresh() {
        let now = Timestamp::new(Utc.timestamp_millis_opt(1000).unwrap());
        let id = CardId::generate(now, |_| false);
        assert_eq!(id.as_str(), "1000");
    }

    #[test]
    fn test_generate_skips_taken() {
        let now = Timestamp::new(Utc.timestamp_millis_opt(1000).unwrap());
        let taken: HashSet<CardId> = ["1000", "1001"].into_iter().map(CardId::from).collect();
        let id = CardId::generate(now, |id| taken.contains(id));
        assert_eq!(id.as_str(), "1002");
    }

    #[test]
    fn test_serde_transparent() {
        let id = CardId::new("42");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"42\"");
    }
}
