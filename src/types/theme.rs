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

use clap::ValueEnum;
use serde::Deserialize;

/// A group of card themes the drill can be restricted to.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeCategory {
    /// Every card, themed or not.
    #[default]
    All,
    /// Bows, arrows, gloves, and other gear.
    Equipement,
    /// The dojo and the shooting range.
    Lieux,
    /// The eight stages of shooting.
    Etapes,
    /// Everything else.
    Divers,
}

impl ThemeCategory {
    pub const ALL: [ThemeCategory; 5] = [
        ThemeCategory::All,
        ThemeCategory::Equipement,
        ThemeCategory::Lieux,
        ThemeCategory::Etapes,
        ThemeCategory::Divers,
    ];

    /// The card themes in this category, or `None` for no restriction.
    pub fn themes(self) -> Option<&'static [&'static str]> {
        match self {
            ThemeCategory::All => None,
            ThemeCategory::Equipement => Some(&["Équipement"]),
            ThemeCategory::Lieux => Some(&["Lieux"]),
            ThemeCategory::Etapes => Some(&["Étapes"]),
            ThemeCategory::Divers => Some(&[
                "Flèches",
                "Position",
                "Tenue",
                "Cérémonie",
                "Philosophie",
                "Entraînement",
            ]),
        }
    }

    /// Whether a card with the given theme belongs to this category.
    pub fn matches(self, theme: Option<&str>) -> bool {
        match (self.themes(), theme) {
            (None, _) => true,
            (Some(themes), Some(theme)) => themes.contains(&theme),
            (Some(_), None) => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeCategory::All => "Tous",
            ThemeCategory::Equipement => "Équipement",
            ThemeCategory::Lieux => "Lieux",
            ThemeCategory::Etapes => "Étapes",
            ThemeCategory::Divers => "Divers",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeCategory::All => "all",
            ThemeCategory::Equipement => "equipement",
            ThemeCategory::Lieux => "lieux",
            ThemeCategory::Etapes => "etapes",
            ThemeCategory::Divers => "divers",
        }
    }
}

impl Display for ThemeCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
