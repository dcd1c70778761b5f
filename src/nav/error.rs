//! Navigation loading error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a navigation tree, before the sidebar attaches.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("unsupported navigation format `{0}` (expected .html, .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("navigation markup error at position {position}: {message}")]
    Markup { position: u64, message: String },

    #[error("navigation markup contains no <ol> list")]
    NoList,
}
