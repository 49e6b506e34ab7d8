use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Debug, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DeckKind {
    /// Slides fetched one by one from locators.
    Remote,
    /// Slides already present in a single page.
    Inline,
}

/// A deck file.
#[derive(Debug, Deserialize)]
pub struct DeckConfig {
    #[serde(default = "default_title")]
    pub title: String,
    pub kind: DeckKind,
    /// One-based slide to open on, clamped into the deck.
    #[serde(default = "default_start_slide")]
    pub start_slide: usize,
    #[serde(default)]
    pub locators: Vec<String>,
    pub page: Option<String>,
}

fn default_title() -> String {
    "Slides".to_string()
}

fn default_start_slide() -> usize {
    1
}

impl DeckConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: DeckConfig = toml::from_str(text)?;
        match config.kind {
            DeckKind::Remote if config.locators.is_empty() => {
                Err(ConfigError::Invalid("a remote deck needs at least one locator"))
            }
            DeckKind::Inline if config.page.is_none() => Err(ConfigError::Invalid("an inline deck needs a page")),
            _ => Ok(config),
        }
    }

    /// Zero-based start index, before clamping to the loaded deck.
    pub fn start_index(&self) -> usize {
        self.start_slide.saturating_sub(1)
    }
}
