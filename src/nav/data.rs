//! Navigation trees described as data (TOML or JSON).
//!
//! ```toml
//! [[chapter]]
//! label = "Introduction"
//! href = "introduction.html"
//! affix = true
//!
//! [[chapter]]
//! label = "User Guide"
//! kind = "part-title"
//!
//! [[chapter]]
//! label = "Walker"
//! number = "1."
//! href = "guide/walker.html"
//!
//!   [[chapter.children]]
//!   label = "Steps"
//!   number = "1.1."
//!   href = "guide/walker/steps.html"
//! ```

use super::node::NavNode;
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Root of a navigation data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavDocument {
    #[serde(default, rename = "chapter")]
    pub chapters: Vec<NavNode>,
}

impl NavDocument {
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str::<Self>(content)?.normalized())
    }

    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(content)?.normalized())
    }

    fn normalized(mut self) -> Self {
        for node in &mut self.chapters {
            node.normalize_kind();
        }
        self
    }
}
