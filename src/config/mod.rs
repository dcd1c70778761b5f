//! Configuration management for `tocbar.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[nav]`     | Navigation tree source and fold behavior        |
//! | `[session]` | Storage key and session file of the scroll slot |
//! | `[layout]`  | Sidebar geometry                                |
//!
//! # Example
//!
//! ```toml
//! [nav]
//! source = "toc.html"
//! fold = true
//!
//! [session]
//! key = "sidebar-scroll"
//!
//! [layout]
//! row_height = 24.0
//! viewport_height = 600.0
//! ```
//!
//! Relative paths are resolved against the directory of the config file.

mod defaults;
mod error;
mod layout;
mod nav;
mod session;

pub use error::ConfigError;
pub use layout::LayoutConfig;
pub use nav::NavConfig;
pub use session::SessionConfig;

use crate::cli::Cli;
use crate::sidebar::SidebarOptions;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing tocbar.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct TocbarConfig {
    /// Path of the loaded config file (empty when running on defaults)
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub nav: NavConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub layout: LayoutConfig,
}

impl TocbarConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: TocbarConfig = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    /// Load configuration from file path, resolving relative paths against
    /// the file's directory.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        let mut config = Self::from_str(&content)?;
        config.config_path = path.to_path_buf();

        let root = path.parent().unwrap_or(Path::new(""));
        config.nav.source = config.nav.source.map(|source| root.join(source));
        config.session.file = root.join(&config.session.file);
        Ok(config)
    }

    /// Load `cli.config` if it exists, otherwise run on defaults; CLI flags
    /// override file values.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut config = if cli.config.exists() {
            Self::from_path(&cli.config)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        if let Some(nav) = &cli.nav {
            self.nav.source = Some(nav.clone());
        }
        Self::update_option(&mut self.session.file, cli.session.as_ref());
        Self::update_option(&mut self.nav.fold, cli.fold.as_ref());
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.nav.source.is_none() {
            bail!(ConfigError::Invalid {
                field: "[nav.source]",
                reason: "is required (or pass --nav)",
            });
        }

        if self.session.key.trim().is_empty() {
            bail!(ConfigError::Invalid {
                field: "[session.key]",
                reason: "must not be empty",
            });
        }

        for (field, value) in [
            ("[layout.row_height]", self.layout.row_height),
            ("[layout.viewport_height]", self.layout.viewport_height),
        ] {
            if !(value.is_finite() && value > 0.0) {
                bail!(ConfigError::Invalid {
                    field,
                    reason: "must be a positive number",
                });
            }
        }

        Ok(())
    }

    /// Navigation source; present once `validate` passed.
    pub fn nav_source(&self) -> Result<&Path> {
        match &self.nav.source {
            Some(path) => Ok(path.as_path()),
            None => bail!(ConfigError::Invalid {
                field: "[nav.source]",
                reason: "is not set",
            }),
        }
    }

    pub fn sidebar_options(&self) -> SidebarOptions {
        SidebarOptions {
            fold: self.nav.fold,
            alias_first_entry: self.nav.alias_first_entry,
            storage_key: self.session.key.as_str().into(),
            layout: (&self.layout).into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
