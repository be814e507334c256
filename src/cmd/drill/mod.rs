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

mod get;
mod post;
pub mod server;
mod state;
mod template;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use reqwest::StatusCode;
    use tempfile::TempDir;
    use tempfile::tempdir;
    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::cmd::drill::server::ServerConfig;
    use crate::cmd::drill::server::start_server;
    use crate::collection::Collection;
    use crate::error::Fallible;
    use crate::types::theme::ThemeCategory;

    /// Start a server on a fresh collection and wait until it accepts
    /// connections.
    async fn start(theme: ThemeCategory) -> Fallible<(TempDir, String)> {
        let dir = tempdir()?;
        let coll = Collection::new(Some(dir.path().display().to_string()))?;
        let port = portpicker::pick_unused_port().unwrap();
        let config = ServerConfig {
            port,
            open_browser: false,
            theme,
        };
        spawn(async move { start_server(coll, config).await });
        let bind = format!("127.0.0.1:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok((dir, format!("http://{bind}")))
    }

    async fn act(base: &str, form: &[(&str, &str)]) -> Fallible<String> {
        let response = reqwest::Client::new()
            .post(format!("{base}/"))
            .form(form)
            .send()
            .await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/html; charset=utf-8"
        );
        Ok(response.text().await?)
    }

    #[tokio::test]
    async fn test_e2e() -> Fallible<()> {
        let (_dir, base) = start(ThemeCategory::All).await?;

        // Hit the `style.css` endpoint.
        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        // Hit the not found endpoint.
        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        // Hit the root endpoint.
        let response = reqwest::get(format!("{base}/")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("class=\"kanji\""));
        assert!(html.contains("Retourner"));
        assert!(html.contains("1 / 38"));
        assert!(!html.contains("class=\"romaji\""));

        // Judging before revealing does nothing.
        let html = act(&base, &[("action", "Known")]).await?;
        assert!(html.contains("1 / 38"));

        // Hit reveal.
        let html = act(&base, &[("action", "Reveal")]).await?;
        assert!(html.contains("class=\"romaji\""));
        assert!(html.contains("Je sais"));
        assert!(html.contains("<img"));

        // Hit 'Known'.
        let html = act(&base, &[("action", "Known")]).await?;
        assert!(html.contains("vous verrez cette carte moins souvent"));
        assert!(html.contains("2 / 38"));

        // Reveal and hit 'Review'.
        act(&base, &[("action", "Reveal")]).await?;
        let html = act(&base, &[("action", "Review")]).await?;
        assert!(html.contains("vous verrez cette carte plus souvent"));
        assert!(html.contains("3 / 38"));

        // The statistics page reflects both reviews.
        let response = reqwest::get(format!("{base}/stats")).await?;
        assert!(response.status().is_success());
        let html = response.text().await?;
        assert!(html.contains("<dd id=\"review-count\">2</dd>"));
        assert!(html.contains("<dd id=\"known-count\">1</dd>"));
        assert!(html.contains("<dd id=\"total-cards\">38</dd>"));

        // Reset zeroes the counters.
        act(&base, &[("action", "Reset")]).await?;
        let html = reqwest::get(format!("{base}/stats")).await?.text().await?;
        assert!(html.contains("<dd id=\"review-count\">0</dd>"));
        assert!(html.contains("<dd id=\"average-weight\">1.00</dd>"));

        // Hit end.
        let html = act(&base, &[("action", "End")]).await?;
        assert!(html.contains("Session terminée"));

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_card_is_ignored() -> Fallible<()> {
        let (_dir, base) = start(ThemeCategory::All).await?;
        act(&base, &[("action", "Reveal")]).await?;
        let html = act(&base, &[("action", "Known"), ("card", "no-such-card")]).await?;
        assert!(html.contains("1 / 38"));
        assert!(!html.contains("moins souvent"));
        Ok(())
    }

    #[tokio::test]
    async fn test_theme_filter() -> Fallible<()> {
        let (_dir, base) = start(ThemeCategory::All).await?;
        let html = act(&base, &[("action", "Theme"), ("theme", "etapes")]).await?;
        assert!(html.contains("1 / 9"));
        assert!(html.contains("Étapes"));
        let html = act(&base, &[("action", "Theme"), ("theme", "all")]).await?;
        assert!(html.contains("1 / 38"));
        Ok(())
    }

    #[tokio::test]
    async fn test_dismiss_instructions() -> Fallible<()> {
        let (_dir, base) = start(ThemeCategory::All).await?;
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(html.contains("class=\"instructions\""));
        let html = act(&base, &[("action", "Dismiss")]).await?;
        assert!(!html.contains("class=\"instructions\""));
        Ok(())
    }
}
