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

use axum::Form;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;

use crate::cmd::drill::get::render_completion;
use crate::cmd::drill::state::LastReview;
use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card_id::CardId;
use crate::types::theme::ThemeCategory;
use crate::types::weight::Judgment;

#[derive(Debug, Deserialize, PartialEq)]
enum Action {
    Reveal,
    Known,
    Review,
    Shuffle,
    Reset,
    Theme,
    Dismiss,
    End,
}

impl Action {
    pub fn judgment(&self) -> Option<Judgment> {
        match self {
            Action::Known => Some(Judgment::Known),
            Action::Review => Some(Judgment::NeedsReview),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    /// The card being judged, to detect stale pages.
    card: Option<String>,
    theme: Option<ThemeCategory>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Response {
    let ending = form.action == Action::End;
    match action_handler(&state, form) {
        Ok(_) => {}
        Err(e) => {
            log::error!("{e}");
        }
    }
    if ending {
        // Answer with the completion page directly, since the server stops
        // accepting connections once the shutdown signal is sent.
        let shutdown_tx = state.shutdown_tx.lock().unwrap().take();
        if let Some(tx) = shutdown_tx {
            let _ = tx.send(());
        }
        let html = page_template(render_completion());
        return Html(html.into_string()).into_response();
    }
    Redirect::to("/").into_response()
}

fn action_handler(state: &ServerState, form: FormData) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    match form.action {
        Action::Reveal => {
            if mutable.reveal {
                return fail("revealing a card that is already revealed.");
            }
            mutable.reveal = true;
        }
        Action::Known | Action::Review => {
            if !mutable.reveal {
                return fail("judging a card that is not revealed.");
            }
            let Some(card) = mutable.store.current_card() else {
                return fail("judging with no card on display.");
            };
            let id = card.id().clone();
            let romaji = card.romaji().to_string();
            if let Some(submitted) = form.card {
                if CardId::new(submitted) != id {
                    return fail("judging a card that is no longer on display.");
                }
            }
            let judgment = match form.action.judgment() {
                Some(judgment) => judgment,
                None => return fail("action is not a judgment."),
            };
            mutable.store.review(&id, judgment);
            mutable.last_review = Some(LastReview { romaji, judgment });
            mutable.reveal = false;
        }
        Action::Shuffle => {
            mutable.store.reshuffle(&mut rand::rng());
            mutable.last_review = None;
            mutable.reveal = false;
        }
        Action::Reset => {
            mutable.store.reset_stats();
            mutable.last_review = None;
        }
        Action::Theme => {
            let Some(theme) = form.theme else {
                return fail("no theme given.");
            };
            mutable.store.set_theme_filter(theme);
            mutable.last_review = None;
            mutable.reveal = false;
        }
        Action::Dismiss => {
            mutable.store.mark_instructions_seen();
        }
        Action::End => {
            log::debug!("Session completed");
            mutable.finished = true;
        }
    }
    Ok(())
}
