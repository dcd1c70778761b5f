//! `[nav]` section configuration.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[nav]` section in tocbar.toml - the navigation tree and its fold state.
///
/// # Example
/// ```toml
/// [nav]
/// source = "theme/toc.html"   # .html, .toml or .json
/// fold = true                 # collapse non-affixed sections
/// alias_first_entry = true    # root index.html highlights the first entry
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct NavConfig {
    /// Navigation tree file.
    #[serde(default = "defaults::nav::source")]
    #[educe(Default = defaults::nav::source())]
    pub source: Option<PathBuf>,

    /// Collapse non-affixed sections unless they lead to the current page.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub fold: bool,

    /// Treat the root `index.html` as the page of the first entry.
    ///
    /// Turn off when the first entry is not the site's landing page.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = true)]
    pub alias_first_entry: bool,
}
