//! `[session]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[session]` section in tocbar.toml - where the scroll offset is handed off.
///
/// # Example
/// ```toml
/// [session]
/// key = "sidebar-scroll"
/// file = ".tocbar-session.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    /// Storage key of the scroll offset.
    #[serde(default = "defaults::session::key")]
    #[educe(Default = defaults::session::key())]
    pub key: String,

    /// File standing in for the browser tab's session storage.
    #[serde(default = "defaults::session::file")]
    #[educe(Default = defaults::session::file())]
    pub file: PathBuf,
}
