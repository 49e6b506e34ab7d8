use std::path::PathBuf;

/// Failure that stops the slide loader. Slides loaded before it are kept.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("failed to fetch slide {locator}: {source}")]
    ResourceUnavailable {
        locator: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed markup in slide {locator}: {source}")]
    Markup {
        locator: String,
        #[source]
        source: quick_xml::Error,
    },
}

#[derive(thiserror::Error, Debug)]
pub enum DeckError {
    #[error("no slides were loaded")]
    Empty,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read deck file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid deck file")]
    Parse(#[from] toml::de::Error),
    #[error("{0}")]
    Invalid(&'static str),
}
