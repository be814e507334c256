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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::types::theme::ThemeCategory;

/// Name of the optional configuration file in a collection directory.
pub const CONFIG_FILE: &str = "kyudocards.toml";

const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// The port the drill server listens on.
    pub port: u16,
    /// Whether to open a browser when the drill server starts.
    pub open_browser: bool,
    /// The theme category a drill starts with.
    pub theme: ThemeCategory,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            open_browser: true,
            theme: ThemeCategory::All,
        }
    }
}

impl Config {
    /// Read the configuration file in the given directory, or the defaults if
    /// there is none.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if path.exists() {
            log::debug!("Reading {}", path.display());
            let content = read_to_string(&path)?;
            Self::parse(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn parse(content: &str) -> Fallible<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults_without_file() -> Fallible<()> {
        let dir = tempdir()?;
        assert_eq!(Config::load(dir.path())?, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Fallible<()> {
        let dir = tempdir()?;
        write(dir.path().join(CONFIG_FILE), "port = 9000\ntheme = \"lieux\"\n")?;
        let config = Config::load(dir.path())?;
        assert_eq!(config.port, 9000);
        assert!(config.open_browser);
        assert_eq!(config.theme, ThemeCategory::Lieux);
        Ok(())
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Config::parse("port = \"eighty\"").is_err());
        assert!(Config::parse("colour = \"blue\"").is_err());
    }
}
