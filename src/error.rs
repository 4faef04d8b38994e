use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a browser session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to connect to any WebDriver server (tried {0})")]
    Connect(String),

    #[error(transparent)]
    Command(#[from] fantoccini::error::CmdError),

    #[error("session disconnected: {0}")]
    Disconnected(String),
}

/// Failures while reading the next link out of a loaded document
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("selector `{selector}` matched nothing on {url}")]
    NoMatch { selector: String, url: String },

    #[error("link `{link}` on {url} is not a valid URL: {source}")]
    InvalidLink {
        link: String,
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failures while building a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid selector `{0}`")]
    Selector(String),

    #[error("invalid start URL `{url}`: {source}")]
    StartUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

/// Fatal conditions that end a walk
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("failed to navigate to {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: SessionError,
    },

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error("failed to write dump {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("session failure while {context}: {source}")]
    Session {
        context: &'static str,
        #[source]
        source: SessionError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}
