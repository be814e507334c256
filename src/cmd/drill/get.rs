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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::image::resolve_image;
use crate::types::card::Card;
use crate::types::theme::ThemeCategory;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = if mutable.finished {
        render_completion()
    } else {
        render_session(&mutable)
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

pub async fn stats_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let stats = mutable.store.stats();
    let mut cards: Vec<&Card> = mutable.store.cards().iter().collect();
    cards.sort_by(|a, b| b.weight().value().total_cmp(&a.weight().value()));
    let body = html! {
        div.root {
            div.stats {
                h1 { "Statistiques" }
                dl {
                    dt { "Révisions" }
                    dd #review-count { (stats.review_count) }
                    dt { "Cartes connues" }
                    dd #known-count { (stats.known_count) }
                    dt { "Taux de réussite" }
                    dd { (format!("{:.0}%", stats.known_ratio() * 100.0)) }
                    dt { "Poids moyen" }
                    dd #average-weight { (format!("{:.2}", stats.average_weight())) }
                    dt { "Nombre de cartes" }
                    dd #total-cards { (mutable.store.cards().len()) }
                }
                p.hint {
                    "Plus le poids est élevé, plus le terme apparaît fréquemment. "
                    "À réviser : poids × 1.5 (max 5). Je sais : poids × 0.7 (min 0.3)."
                }
                table {
                    thead {
                        tr {
                            th { "Kanji" }
                            th { "Romaji" }
                            th { "Poids" }
                        }
                    }
                    tbody {
                        @for card in &cards {
                            tr {
                                td { (card.kanji()) }
                                td { (card.romaji()) }
                                td { (card.weight()) }
                            }
                        }
                    }
                }
                a href="/" { "Retour" }
            }
        }
    };
    let html = page_template(body);
    (StatusCode::OK, Html(html.into_string()))
}

pub fn render_completion() -> Markup {
    html! {
        div.finished {
            h1 {
                "Session terminée"
            }
        }
    }
}

fn render_session(mutable: &MutableState) -> Markup {
    let store = &mutable.store;
    let themes = html! {
        form.themes action="/" method="post" {
            input type="hidden" name="action" value="Theme";
            @for category in ThemeCategory::ALL {
                @if category == store.theme() {
                    button.active type="submit" name="theme" value=(category.as_str()) {
                        (category.label())
                    }
                } @else {
                    button type="submit" name="theme" value=(category.as_str()) {
                        (category.label())
                    }
                }
            }
        }
    };
    let instructions = if store.instructions_seen() {
        html! {}
    } else {
        html! {
            div.instructions {
                p {
                    "Retournez la carte pour voir sa lecture et sa définition, "
                    "puis indiquez si vous la connaissiez. Les termes à réviser "
                    "reviendront plus souvent."
                }
                form action="/" method="post" {
                    button type="submit" name="action" value="Dismiss" { "Compris" }
                }
            }
        }
    };
    let message = match &mutable.last_review {
        Some(last) => html! { div.message { (last.message()) } },
        None => html! {},
    };
    let card = match store.current_card() {
        Some(card) => render_card(card, mutable.reveal),
        None => html! {
            div.card {
                p.empty { "Aucune carte dans cette catégorie." }
            }
        },
    };
    let progress = if store.card_count() == 0 {
        "0 / 0".to_string()
    } else {
        format!("{} / {}", store.current_index() + 1, store.card_count())
    };
    html! {
        div.root {
            div.header {
                (themes)
                div.progress { (progress) }
                a href="/stats" { "Statistiques" }
            }
            (instructions)
            (message)
            (card)
            div.session {
                form action="/" method="post" {
                    button type="submit" name="action" value="Shuffle" { "Mélanger" }
                    button type="submit" name="action" value="Reset" { "Réinitialiser" }
                    button type="submit" name="action" value="End" { "Terminer" }
                }
            }
        }
    }
}

fn render_card(card: &Card, reveal: bool) -> Markup {
    let controls = if reveal {
        html! {
            form action="/" method="post" {
                input type="hidden" name="card" value=(card.id().as_str());
                button #review type="submit" name="action" value="Review" { "À réviser" }
                button #known type="submit" name="action" value="Known" { "Je sais" }
            }
        }
    } else {
        html! {
            form action="/" method="post" {
                button #reveal type="submit" name="action" value="Reveal" { "Retourner" }
            }
        }
    };
    html! {
        div.card {
            @if let Some(theme) = card.theme() {
                div.theme { (theme) }
            }
            div.kanji { (card.kanji()) }
            @if reveal {
                div.answer {
                    img src=(resolve_image(card.image_query())) alt=(card.romaji());
                    div.romaji { (card.romaji()) }
                    div.definition { (card.definition()) }
                }
            }
            div.controls {
                (controls)
            }
        }
    }
}
