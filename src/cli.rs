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

use clap::Parser;

use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::edit::add_card;
use crate::cmd::edit::delete_card;
use crate::cmd::edit::edit_card;
use crate::cmd::export::export_collection;
use crate::cmd::list::list_cards;
use crate::cmd::reset::reset_collection;
use crate::cmd::reset::shuffle_collection;
use crate::cmd::stats::StatsFormat;
use crate::cmd::stats::print_stats;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::card::CardEdit;
use crate::types::card::CardFields;
use crate::types::theme::ThemeCategory;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill cards through a web interface.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The port to serve the drill page on. Overrides the configuration file.
        #[arg(long)]
        port: Option<u16>,
        /// Do not open a browser.
        #[arg(long)]
        no_open: bool,
        /// Only drill cards in this theme category.
        #[arg(long)]
        theme: Option<ThemeCategory>,
    },
    /// Print review statistics.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Which output format to use.
        #[arg(long, default_value_t = StatsFormat::Text)]
        format: StatsFormat,
    },
    /// List cards in presentation order, with their weights.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Only list cards in this theme category.
        #[arg(long)]
        theme: Option<ThemeCategory>,
    },
    /// Add a card, and print its id.
    Add {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        kanji: String,
        #[arg(long)]
        romaji: String,
        #[arg(long)]
        definition: String,
        /// Key used to pick the card's image.
        #[arg(long)]
        image_query: Option<String>,
        #[arg(long)]
        theme: Option<String>,
    },
    /// Change some fields of a card. The weight is kept.
    Edit {
        /// The id of the card to edit.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long)]
        kanji: Option<String>,
        #[arg(long)]
        romaji: Option<String>,
        #[arg(long)]
        definition: Option<String>,
        #[arg(long)]
        image_query: Option<String>,
        /// The new theme. An empty string removes it.
        #[arg(long)]
        theme: Option<String>,
    },
    /// Delete a card.
    Delete {
        /// The id of the card to delete.
        id: String,
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Reset every weight and the review counters.
    Reset {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Reorder the cards, favouring those that need review.
    Shuffle {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Export the collection and statistics as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Drill {
            directory,
            port,
            no_open,
            theme,
        } => {
            let coll = Collection::new(directory)?;
            let config = ServerConfig::resolve(&coll, port, no_open, theme);
            start_server(coll, config).await
        }
        Command::Stats { directory, format } => print_stats(directory, format),
        Command::List { directory, theme } => list_cards(directory, theme),
        Command::Add {
            directory,
            kanji,
            romaji,
            definition,
            image_query,
            theme,
        } => {
            let mut fields = CardFields::new(kanji, romaji, definition);
            if let Some(image_query) = image_query {
                fields = fields.with_image_query(image_query);
            }
            if let Some(theme) = theme {
                fields = fields.with_theme(theme);
            }
            add_card(directory, fields)
        }
        Command::Edit {
            id,
            directory,
            kanji,
            romaji,
            definition,
            image_query,
            theme,
        } => {
            let edit = CardEdit {
                kanji,
                romaji,
                definition,
                image_query,
                theme: theme.map(Some),
            };
            edit_card(directory, id, edit)
        }
        Command::Delete { id, directory } => delete_card(directory, id),
        Command::Reset { directory } => reset_collection(directory),
        Command::Shuffle { directory } => shuffle_collection(directory),
        Command::Export { directory } => export_collection(directory),
    }
}
