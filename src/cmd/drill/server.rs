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
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::cmd::drill::get::get_handler;
use crate::cmd::drill::get::stats_handler;
use crate::cmd::drill::post::post_handler;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::types::theme::ThemeCategory;

pub struct ServerConfig {
    pub port: u16,
    pub open_browser: bool,
    pub theme: ThemeCategory,
}

impl ServerConfig {
    /// Command-line flags take precedence over the collection's configuration
    /// file.
    pub fn resolve(
        coll: &Collection,
        port: Option<u16>,
        no_open: bool,
        theme: Option<ThemeCategory>,
    ) -> Self {
        Self {
            port: port.unwrap_or(coll.config.port),
            open_browser: coll.config.open_browser && !no_open,
            theme: theme.unwrap_or(coll.config.theme),
        }
    }
}

pub async fn start_server(coll: Collection, config: ServerConfig) -> Fallible<()> {
    log::debug!("Drilling in {}", coll.directory.display());
    let mut store = coll.store;
    store.set_theme_filter(config.theme);
    if store.card_count() == 0 {
        log::warn!("No cards in the {} category.", config.theme);
    }

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let state = ServerState {
        mutable: Arc::new(Mutex::new(MutableState {
            reveal: false,
            store,
            last_review: None,
            finished: false,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/stats", get(stats_handler));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{}", config.port);

    if config.open_browser {
        // Start a separate task to open the browser.
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::warn!("Failed to open {url}: {e}");
            }
        });
    }

    // Start the server.
    log::debug!("Starting server on {bind}");
    println!("Drilling at http://{bind}/");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_rx))
        .await?;
    log::debug!("Server stopped.");
    Ok(())
}

/// Resolves when the session is ended from the page or the process is
/// interrupted.
async fn shutdown_signal(ended: oneshot::Receiver<()>) {
    tokio::select! {
        _ = ended => {}
        _ = tokio::signal::ctrl_c() => {}
    }
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
